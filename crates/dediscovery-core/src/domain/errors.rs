use std::path::PathBuf;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    InputValidation,
    IoSystem,
    Computation,
    Internal,
}

impl ErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidation => 2,
            Self::IoSystem => 3,
            Self::Computation => 4,
            Self::Internal => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidation => "InputValidationError",
            Self::IoSystem => "IoSystemError",
            Self::Computation => "ComputationError",
            Self::Internal => "InternalError",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("missing file '{}'", path.display())]
    MissingFile { path: PathBuf },

    #[error("malformed equation line '{line}': {reason}")]
    MalformedEquation { line: String, reason: String },

    #[error("term '{term}' has a non-numeric coefficient '{field}'")]
    CoefficientParse { term: String, field: String },

    #[error("invalid run key '{file_name}': {reason}")]
    InvalidRunKey { file_name: String, reason: String },

    #[error("invalid numeric value '{token}' at line {line} of '{}'", path.display())]
    NumericArray {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("array length mismatch: predicted has {predicted} values, measured has {measured}")]
    ShapeMismatch { predicted: usize, measured: usize },

    #[error("no values to compare for {what}")]
    EmptyArray { what: String },

    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid setting '{name}': {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("{stage} engine failed: {message}")]
    Engine { stage: &'static str, message: String },
}

impl AnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::MissingFile { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub fn malformed_equation(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedEquation {
            line: line.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_run_key(file_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRunKey {
            file_name: file_name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_setting(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            name,
            reason: reason.into(),
        }
    }

    pub fn engine(stage: &'static str, message: impl Into<String>) -> Self {
        Self::Engine {
            stage,
            message: message.into(),
        }
    }

    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingFile { .. } | Self::Io { .. } => ErrorCategory::IoSystem,
            Self::MalformedEquation { .. }
            | Self::CoefficientParse { .. }
            | Self::InvalidRunKey { .. }
            | Self::NumericArray { .. }
            | Self::Config { .. }
            | Self::InvalidSetting { .. } => ErrorCategory::InputValidation,
            Self::ShapeMismatch { .. } | Self::EmptyArray { .. } | Self::Engine { .. } => {
                ErrorCategory::Computation
            }
        }
    }

    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::MissingFile { .. } => "IO.MISSING_FILE",
            Self::Io { .. } => "IO.ACCESS",
            Self::MalformedEquation { .. } => "INPUT.EQUATION_LINE",
            Self::CoefficientParse { .. } => "INPUT.COEFFICIENT",
            Self::InvalidRunKey { .. } => "INPUT.RUN_KEY",
            Self::NumericArray { .. } => "INPUT.NUMERIC_ARRAY",
            Self::Config { .. } => "INPUT.CONFIG",
            Self::InvalidSetting { .. } => "INPUT.SETTING",
            Self::ShapeMismatch { .. } => "RUN.SHAPE_MISMATCH",
            Self::EmptyArray { .. } => "RUN.EMPTY_ARRAY",
            Self::Engine { .. } => "RUN.ENGINE",
        }
    }

    /// Whether aggregation may drop the affected row instead of failing.
    pub const fn is_skippable(&self) -> bool {
        matches!(self, Self::MissingFile { .. })
    }

    pub const fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder(), self)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}
