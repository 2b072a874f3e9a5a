use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("tokenizer error: {0}")]
    Tokenization(String),

    #[error("invalid model config: {0}")]
    Config(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("download failed: {0}")]
    Download(String),

    #[error("inference task was cancelled: {0}")]
    Blocking(String),

    #[error("candle error: {0}")]
    Candle(#[from] candle_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<hf_hub::api::sync::ApiError> for Error {
    fn from(err: hf_hub::api::sync::ApiError) -> Self {
        Self::Download(err.to_string())
    }
}

impl From<actix_web::error::BlockingError> for Error {
    fn from(err: actix_web::error::BlockingError) -> Self {
        Self::Blocking(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
