//! Parser adapters turning vendor payloads into raw record sets
//!
//! XML manifests are read with quick-xml's serde deserializer into private
//! document structs and then copied into the vendor modules' raw shapes.
//! Every field is optional; a document whose root element is not the
//! expected one is rejected as `MalformedInput` before deserialization.

mod dell_parser;
mod hp_parser;
mod lenovo_parser;
mod products_parser;
mod surface_parser;

pub use dell_parser::parse_dell_catalog;
pub use hp_parser::{parse_hp_catalog, parse_hp_platforms};
pub use lenovo_parser::parse_lenovo_catalog;
pub use products_parser::parse_products;
pub use surface_parser::parse_surface_page;

use crate::shared::error::CatalogError;
use crate::shared::Result;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::de::DeserializeOwned;

/// Decodes a payload to text, honouring UTF-8 and UTF-16 byte order marks
pub fn decode_text(payload: &[u8]) -> String {
    match payload {
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8_lossy(rest).into_owned(),
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        _ => String::from_utf8_lossy(payload).into_owned(),
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Drops a leading `<?xml ...?>` declaration; its encoding no longer
/// applies once the payload has been decoded.
fn strip_declaration(text: &str) -> &str {
    let trimmed = text.trim_start();
    if trimmed.starts_with("<?xml") {
        if let Some(end) = trimmed.find("?>") {
            return &trimmed[end + 2..];
        }
    }
    trimmed
}

/// Checks that the first element of `xml` is named `expected`
pub fn ensure_root(xml: &str, expected: &str, source_name: &str) -> Result<()> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                let name = element.local_name();
                if name.as_ref() == expected.as_bytes() {
                    return Ok(());
                }
                return Err(malformed(
                    source_name,
                    format!(
                        "expected root element '{}', found '{}'",
                        expected,
                        String::from_utf8_lossy(name.as_ref())
                    ),
                ));
            }
            Ok(Event::Eof) => {
                return Err(malformed(
                    source_name,
                    format!("missing root element '{}'", expected),
                ))
            }
            Err(e) => return Err(malformed(source_name, e.to_string())),
            Ok(_) => {}
        }
    }
}

/// Decodes, root-checks and deserializes one XML document
pub(crate) fn parse_document<T: DeserializeOwned>(
    source_name: &str,
    payload: &[u8],
    root: &str,
) -> Result<T> {
    let text = decode_text(payload);
    let xml = strip_declaration(&text);
    ensure_root(xml, root, source_name)?;
    quick_xml::de::from_str(xml).map_err(|e| malformed(source_name, format!("{}: {}", root, e)))
}

pub(crate) fn malformed(source_name: &str, details: String) -> anyhow::Error {
    CatalogError::MalformedInput {
        source_name: source_name.to_string(),
        details,
    }
    .into()
}

/// Lenient numeric attribute: blanks and garbage become `None`
pub(crate) fn parse_size(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| v.trim().parse().ok())
}
