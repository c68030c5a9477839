//! Durable credential storage for the staffdesk client.
//!
//! The client persists exactly three identity keys (`token`, `userId`,
//! `username`) across restarts. The default backend is a JSON file under the
//! client base directory; tests substitute an in-memory implementation of the
//! [`CredentialStorage`] trait.

mod file;
mod keys;
mod traits;

pub use file::FileStorage;
pub use keys::StorageKeys;
pub use traits::CredentialStorage;

use console_config_and_utils::Paths;
use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Storage backend error
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Create the default file-backed storage under the client base directory.
pub fn create_storage(paths: &Paths) -> StorageResult<Box<dyn CredentialStorage>> {
    let storage = FileStorage::open(paths.credentials_file())?;
    Ok(Box::new(storage))
}
