//! Error types for the soundtouch crate.

use thiserror::Error;

/// Result type alias for soundtouch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for soundtouch operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The native library could not be located or loaded.
    #[error("failed to load native library '{name}': {message}")]
    LibraryLoad {
        /// Library name or path that was tried.
        name: String,
        /// Loader message.
        message: String,
    },

    /// A required entry point is missing from the loaded library.
    #[error("symbol '{symbol}' not found: {message}")]
    SymbolNotFound {
        /// Symbol name.
        symbol: String,
        /// Loader message.
        message: String,
    },

    /// `init()` has not completed successfully.
    #[error("native library not initialized")]
    NotInitialized,

    /// The native create call returned a null handle.
    #[error("native instance creation failed")]
    CreateFailed,

    /// The instance was already disposed.
    #[error("instance already disposed")]
    AlreadyDisposed,

    /// Function argument is invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Audio file is not in a format the pipeline handles.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// WAV encode/decode error.
    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),

    /// Filesystem I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a library or symbol loading error.
    pub fn is_library_load(&self) -> bool {
        matches!(self, Error::LibraryLoad { .. } | Error::SymbolNotFound { .. })
    }

    /// Check if this is an already-disposed error.
    pub fn is_disposed(&self) -> bool {
        matches!(self, Error::AlreadyDisposed)
    }

    /// Check if this is an invalid argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}
