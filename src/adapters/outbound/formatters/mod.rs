/// Formatter adapters for the catalog documents and the run report
mod json_formatter;
mod markdown_formatter;
mod xml_formatter;

pub use json_formatter::JsonFormatter;
pub use markdown_formatter::MarkdownReportFormatter;
pub use xml_formatter::XmlFormatter;
