use thiserror::Error;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failures of the data layer (fetch, payload validation, date parsing).
///
/// These never reach the chart: callers log them and leave the view as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// Network failure or non-2xx response.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The payload does not have the expected shape.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A date key is not `YYYY-MM-DD`.
    #[error("unexpected date format '{0}'")]
    DateFormat(String),

    /// A lookup outside the dataset. The window code clamps instead of raising this.
    #[error("index {index} out of range (len {len})")]
    InvalidIndex { index: i64, len: usize },
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        let code = match &err {
            DataError::Fetch(_) => 4,
            DataError::MalformedPayload(_) | DataError::DateFormat(_) => 3,
            DataError::InvalidIndex { .. } => 2,
        };
        AppError::new(code, err.to_string())
    }
}
