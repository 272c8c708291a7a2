pub type QrForgeResult<T> = Result<T, QrForgeError>;

#[derive(thiserror::Error, Debug)]
pub enum QrForgeError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("qr encoding error: {0}")]
    Encoding(String),

    #[error("logo error: {0}")]
    LogoLoad(String),

    #[error("compositing error: {0}")]
    Compositing(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QrForgeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    pub fn logo_load(msg: impl Into<String>) -> Self {
        Self::LogoLoad(msg.into())
    }

    pub fn compositing(msg: impl Into<String>) -> Self {
        Self::Compositing(msg.into())
    }
}
