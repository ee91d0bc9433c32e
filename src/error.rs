#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Statement {index} failed: {message}")]
    Execution { index: usize, message: String },
}

pub type Result<T = ()> = std::result::Result<T, Error>;
