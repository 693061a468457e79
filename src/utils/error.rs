use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickupError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{path} does not exist or is not a file")]
    MissingInputError { path: String },

    #[error("Invalid size key '{key}' in synthetic lesion dictionary")]
    InvalidSizeKeyError { key: String },

    #[error(
        "Cannot find {requested} images of {size} +- {tolerance_voxels} voxels in the synth dataset \
         (only {available} available)"
    )]
    NotEnoughCandidatesError {
        requested: usize,
        size: u64,
        tolerance_voxels: f64,
        available: usize,
    },

    #[error("The file list is empty")]
    EmptyListError,

    #[error("Output folder {path} already exists")]
    OutputExistsError { path: String },

    #[error("Failed to read NIfTI image {path}: {message}")]
    NiftiError { path: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("External tool {tool} failed: {message}")]
    ExternalToolError { tool: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Selection,
    Output,
    ExternalTool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PickupError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PickupError::ConfigError { .. }
            | PickupError::MissingConfigError { .. }
            | PickupError::InvalidConfigValueError { .. }
            | PickupError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            PickupError::CsvError(_)
            | PickupError::SerializationError(_)
            | PickupError::MissingInputError { .. }
            | PickupError::InvalidSizeKeyError { .. }
            | PickupError::NiftiError { .. } => ErrorCategory::Input,
            PickupError::NotEnoughCandidatesError { .. } | PickupError::EmptyListError => {
                ErrorCategory::Selection
            }
            PickupError::IoError(_) | PickupError::OutputExistsError { .. } => ErrorCategory::Output,
            PickupError::ExternalToolError { .. } => ErrorCategory::ExternalTool,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 調整參數後即可重跑
            ErrorCategory::Selection => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Output | ErrorCategory::ExternalTool => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PickupError::NotEnoughCandidatesError { .. } => {
                "Increase --size-range or lower --number-per-lesion / --multiple-lists"
            }
            PickupError::EmptyListError => "Check that the lesion input produced at least one size",
            PickupError::OutputExistsError { .. } => {
                "Remove the existing folder or choose another output path"
            }
            PickupError::InvalidSizeKeyError { .. } => {
                "Regenerate the synthetic lesion dictionary; keys must be voxel counts"
            }
            PickupError::NiftiError { .. } => "Make sure the lesion masks are valid .nii or .nii.gz files",
            PickupError::MissingInputError { .. } => "Check the input paths given on the command line",
            PickupError::CsvError(_) => "Check that the list files are plain CSV or text",
            PickupError::SerializationError(_) => "Check that the synthetic lesion dictionary is valid JSON",
            PickupError::ConfigError { .. }
            | PickupError::MissingConfigError { .. }
            | PickupError::InvalidConfigValueError { .. }
            | PickupError::ConfigValidationError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
            PickupError::ExternalToolError { .. } => {
                "Make sure ANTs is installed and antsAtroposN4.sh is on PATH (or set ANTS_ATROPOS_SCRIPT)"
            }
            PickupError::IoError(_) => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Could not read input: {}", self),
            ErrorCategory::Selection => format!("Selection failed: {}", self),
            ErrorCategory::Output => format!("Could not write output: {}", self),
            ErrorCategory::ExternalTool => format!("Segmentation failed: {}", self),
        }
    }

    /// 依嚴重程度對應的程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, PickupError>;
