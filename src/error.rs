use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database not connected")]
    NotConnected,

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handler-boundary error, rendered as a plain-text response.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    Store { context: &'static str, source: StoreError },
}

impl AppError {
    pub fn store(context: &'static str, source: StoreError) -> Self {
        Self::Store { context, source }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Invalid movie: {msg}"),
            AppError::Store { source: StoreError::NotConnected, .. } => {
                write!(f, "{}", StoreError::NotConnected)
            },
            AppError::Store { context, source } => write!(f, "{context}: {source}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<CreateError> for AppError {
    fn from(err: CreateError) -> Self {
        match err {
            CreateError::Validation(msg) => AppError::Validation(msg),
            CreateError::Store(source) => AppError::store("Error adding movie", source),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Store { context, source } => {
                tracing::error!(error = %source, "{context}");
                StatusCode::INTERNAL_SERVER_ERROR
            },
        };
        (status, self.to_string()).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
