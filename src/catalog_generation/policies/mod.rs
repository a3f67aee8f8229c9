mod release_id;
mod threshold;

pub use release_id::{ReleaseIdPolicy, WINDOWS_11_MIN_BUILD};
pub use threshold::ThresholdPolicy;
