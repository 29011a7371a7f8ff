use thiserror::Error;

/// 詩文檔案的結構錯誤，行號從 1 起算
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("line {line}: expected a title line like 《title》, found {found:?}")]
    ExpectedTitle { line: usize, found: String },

    #[error("line {line}: malformed title {found:?}, brackets 《 》 must enclose a non-empty title")]
    MalformedTitle { line: usize, found: String },

    #[error("line {line}: poem 《{title}》 has no body lines")]
    EmptyBody { line: usize, title: String },
}

impl FormatError {
    pub fn line(&self) -> usize {
        match self {
            FormatError::ExpectedTitle { line, .. }
            | FormatError::MalformedTitle { line, .. }
            | FormatError::EmptyBody { line, .. } => *line,
        }
    }

    /// 不含行號前綴的錯誤描述
    pub fn message(&self) -> String {
        match self {
            FormatError::ExpectedTitle { found, .. } => {
                format!("expected a title line like 《title》, found {:?}", found)
            }
            FormatError::MalformedTitle { found, .. } => format!(
                "malformed title {:?}, brackets 《 》 must enclose a non-empty title",
                found
            ),
            FormatError::EmptyBody { title, .. } => {
                format!("poem 《{}》 has no body lines", title)
            }
        }
    }
}

/// 單一檔案的驗證失敗
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file: String,
    pub line: Option<usize>,
    pub message: String,
}

impl FileFailure {
    pub fn from_format(file: impl Into<String>, err: &FormatError) -> Self {
        Self {
            file: file.into(),
            line: Some(err.line()),
            message: err.message(),
        }
    }
}

impl std::fmt::Display for FileFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.file, line, self.message),
            None => write!(f, "{}: {}", self.file, self.message),
        }
    }
}

#[derive(Error, Debug)]
pub enum PoemError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV writing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value:?} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("{} file(s) failed validation", failures.len())]
    InvalidFiles { failures: Vec<FileFailure> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PoemError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PoemError::InvalidFiles { .. } => ErrorCategory::Data,
            PoemError::ConfigError { .. }
            | PoemError::InvalidConfigValueError { .. }
            | PoemError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PoemError::IoError(_) | PoemError::SerializationError(_) | PoemError::CsvError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 對應的程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PoemError::InvalidFiles { .. } => {
                "Save files as UTF-8; each poem needs a 《title》 line followed by at least one verse line, separated by blank lines"
            }
            PoemError::ConfigError { .. }
            | PoemError::InvalidConfigValueError { .. }
            | PoemError::MissingConfigError { .. } => {
                "Check the command line arguments or the TOML configuration file"
            }
            PoemError::IoError(_) => "Check that the paths exist and are readable/writable",
            PoemError::SerializationError(_) | PoemError::CsvError(_) => {
                "Check free disk space and permissions of the output directory"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PoemError::InvalidFiles { failures } => {
                let mut message = format!("{} file(s) failed validation:", failures.len());
                for failure in failures {
                    message.push_str("\n  ");
                    message.push_str(&failure.to_string());
                }
                message
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PoemError>;
