use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid geometry for zone '{zone}': {reason}")]
    InvalidZoneError { zone: String, reason: String },

    #[error("Zone '{zone}' is defined more than once")]
    DuplicateZoneError { zone: String },

    #[error("Unsupported snapshot format for '{path}'")]
    UnsupportedFormatError { path: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LayoutError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LayoutError::IoError(_) => ErrorCategory::Io,
            LayoutError::SerializationError(_)
            | LayoutError::CsvError(_)
            | LayoutError::UnsupportedFormatError { .. } => ErrorCategory::Data,
            LayoutError::ConfigValidationError { .. }
            | LayoutError::InvalidConfigValueError { .. }
            | LayoutError::MissingConfigError { .. }
            | LayoutError::InvalidZoneError { .. }
            | LayoutError::DuplicateZoneError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LayoutError::IoError(_) => "Check that the input files exist and the output directory is writable",
            LayoutError::SerializationError(_) => {
                "Snapshot JSON must be an array of objects with _id, firstName, lastName and zone"
            }
            LayoutError::CsvError(_) => "Snapshot CSV needs the header row _id,firstName,lastName,zone",
            LayoutError::UnsupportedFormatError { .. } => "Use a .json or .csv snapshot file",
            LayoutError::ConfigValidationError { .. } => "Fix the syntax of the TOML configuration file",
            LayoutError::InvalidConfigValueError { .. } | LayoutError::MissingConfigError { .. } => {
                "Review the canvas and transition settings"
            }
            LayoutError::InvalidZoneError { .. } => {
                "Each zone needs finite values with outer_radius > inner_radius >= 0"
            }
            LayoutError::DuplicateZoneError { .. } => "Give every zone a unique name",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not access a file: {}", self),
            ErrorCategory::Data => format!("Could not read the position list: {}", self),
            ErrorCategory::Configuration => format!("Invalid floor plan configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;
