/// Output format enumeration for catalog documents
///
/// This enum represents the structured document formats the tool writes.
/// It belongs in the application layer as it represents an application-level
/// concern that both the CLI (inbound adapter) and formatters (outbound adapters)
/// need to understand. The Markdown summary report is always written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON documents only
    Json,
    /// XML documents only
    Xml,
    /// Both JSON and XML (default)
    All,
}

impl OutputFormat {
    /// Concrete document formats this selection expands to
    pub fn expand(self) -> Vec<OutputFormat> {
        match self {
            OutputFormat::All => vec![OutputFormat::Json, OutputFormat::Xml],
            single => vec![single],
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "xml" => Ok(OutputFormat::Xml),
            "all" | "both" => Ok(OutputFormat::All),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json', 'xml' or 'all'",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Xml => write!(f, "xml"),
            OutputFormat::All => write!(f, "all"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("XML").unwrap(), OutputFormat::Xml);
        assert_eq!(OutputFormat::from_str("All").unwrap(), OutputFormat::All);
        assert_eq!(OutputFormat::from_str("both").unwrap(), OutputFormat::All);
    }

    #[test]
    fn test_output_format_from_str_invalid() {
        let error = OutputFormat::from_str("markdown").unwrap_err();
        assert!(error.contains("Invalid format"));
        assert!(error.contains("markdown"));
        assert!(error.contains("json"));
        assert!(error.contains("xml"));
    }

    #[test]
    fn test_output_format_from_str_empty() {
        assert!(OutputFormat::from_str("").is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Xml.to_string(), "xml");
        assert_eq!(OutputFormat::All.to_string(), "all");
    }

    #[test]
    fn test_expand() {
        assert_eq!(
            OutputFormat::All.expand(),
            vec![OutputFormat::Json, OutputFormat::Xml]
        );
        assert_eq!(OutputFormat::Xml.expand(), vec![OutputFormat::Xml]);
    }
}
