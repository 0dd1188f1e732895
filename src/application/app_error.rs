use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Valid email is required")]
    InvalidEmail,

    #[error("Email already registered")]
    AlreadyRegistered,

    #[error("Storage error: {0}")]
    Storage(String),
}

#[derive(Clone, Copy, Debug)]
pub enum ErrorCode {
    InvalidEmail,
    AlreadyRegistered,
    StorageError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidEmail => "INVALID_EMAIL",
            ErrorCode::AlreadyRegistered => "ALREADY_REGISTERED",
            ErrorCode::StorageError => "STORAGE_ERROR",
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(format!("waitlist json error: {err}"))
    }
}

pub type AppResult<T> = Result<T, AppError>;
