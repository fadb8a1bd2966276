use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid book id: '{0}'")]
    InvalidBookId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
