use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow schedulers and CI jobs to distinguish a catalog that
/// came out too small from an outright failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every requested catalog was written
    Success = 0,
    /// A catalog held fewer items than the configured minimum
    ThresholdNotMet = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (network error, malformed config, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ThresholdNotMet => write!(f, "Threshold Not Met (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for catalog generation.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Source unavailable: {source_name}\nDetails: {details}\n\n💡 Hint: The vendor endpoint may be down or unreachable; the source is skipped for this run")]
    SourceUnavailable { source_name: String, details: String },

    #[error("Malformed input from {source_name}\nDetails: {details}\n\n💡 Hint: The vendor may have changed its catalog layout")]
    MalformedInput { source_name: String, details: String },

    #[error("Failed to extract archive: {path}\nDetails: {details}\n\n💡 Hint: Install 'cabextract' (or use expand.exe on Windows) and make sure it is on PATH")]
    ExtractionFailed { path: PathBuf, details: String },

    #[error("{category} catalog has {actual} item(s), below the configured minimum of {minimum}\n\n💡 Hint: Check the skipped sources above, or lower --min-items")]
    ThresholdNotMet {
        category: String,
        actual: usize,
        minimum: usize,
    },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Invalid config: {message}\n\n💡 Hint: {hint}")]
    InvalidConfig { message: String, hint: String },

    /// Validation error for builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl CatalogError {
    /// Exit code the CLI should use when this error ends the run
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CatalogError::ThresholdNotMet { .. } => ExitCode::ThresholdNotMet,
            _ => ExitCode::ApplicationError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::ThresholdNotMet.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::ThresholdNotMet),
            "Threshold Not Met (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_source_unavailable_display() {
        let error = CatalogError::SourceUnavailable {
            source_name: "Dell".to_string(),
            details: "connection refused".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Source unavailable: Dell"));
        assert!(display.contains("connection refused"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_malformed_input_display() {
        let error = CatalogError::MalformedInput {
            source_name: "HP".to_string(),
            details: "missing NewDataSet root".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Malformed input from HP"));
        assert!(display.contains("missing NewDataSet root"));
    }

    #[test]
    fn test_threshold_not_met_display_and_exit_code() {
        let error = CatalogError::ThresholdNotMet {
            category: "WinPE".to_string(),
            actual: 3,
            minimum: 10,
        };
        let display = format!("{}", error);
        assert!(display.contains("WinPE catalog has 3 item(s)"));
        assert!(display.contains("minimum of 10"));
        assert_eq!(error.exit_code(), ExitCode::ThresholdNotMet);
    }

    #[test]
    fn test_other_errors_map_to_application_error() {
        let error = CatalogError::FileWriteError {
            path: PathBuf::from("/test/output.json"),
            details: "Permission denied".to_string(),
        };
        assert_eq!(error.exit_code(), ExitCode::ApplicationError);
        let display = format!("{}", error);
        assert!(display.contains("/test/output.json"));
        assert!(display.contains("Permission denied"));
    }

    #[test]
    fn test_extraction_failed_display() {
        let error = CatalogError::ExtractionFailed {
            path: PathBuf::from("/tmp/catalog.cab"),
            details: "cabextract not found".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to extract archive"));
        assert!(display.contains("cabextract not found"));
    }
}
