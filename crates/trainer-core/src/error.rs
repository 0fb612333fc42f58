use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Failed to open process: {0}")]
    ProcessOpenFailed(String),

    #[error("Failed to read process memory at address {address:#x}: {message}")]
    MemoryReadFailed { address: u64, message: String },

    #[error("Failed to write process memory at address {address:#x}: {message}")]
    MemoryWriteFailed { address: u64, message: String },

    #[error("Pointer chain broken at hop {hop} (address {address:#x}): {message}")]
    ChainResolutionFailed {
        hop: usize,
        address: u64,
        message: String,
    },

    #[error("Pointer chain is empty")]
    EmptyChain,

    #[error("Invalid game registry: {0}")]
    InvalidRegistry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error means the target process is gone (or never existed).
    pub fn is_process_not_found(&self) -> bool {
        matches!(self, Error::ProcessNotFound(_))
    }
}
