//! Pure functions turning raw vendor field values into canonical forms

pub mod architecture;
pub mod date;
pub mod format;
pub mod identity;
pub mod os_name;
pub mod url;

pub use architecture::{architecture_from_file_name, architecture_from_os_text, normalize_architecture};
pub use date::{normalize_date, parse_iso_date};
pub use format::infer_format;
pub use identity::{clean, content_id};
pub use os_name::{dell_os_name, hp_os_name, is_winpe, lenovo_os_name, windows_family};
pub use url::{file_name_from_url, normalize_download_url, resolve_download_url};
