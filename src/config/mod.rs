//! Configuration for the buffered reader.
//!
//! This module provides types to configure how a
//! [`BufferedReader`](crate::BufferedReader) pulls from its source:
//!
//! - [`ReaderConfig`] - Read chunk size and fill mode
//! - [`FillMode`] - Background worker or eager fill on the calling thread
//!
//! # Example
//!
//! ```
//! use syncrs::{FillMode, ReaderConfig};
//!
//! // Custom chunk size
//! let config = ReaderConfig::new(8192)?;
//!
//! // Fill on the calling thread before returning
//! let config = ReaderConfig::default()
//!     .with_fill_mode(FillMode::Eager);
//!
//! # Ok::<(), syncrs::SyncError>(())
//! ```

use crate::error::SyncError;

/// Default number of bytes requested from the source per read (1 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// How a [`BufferedReader`](crate::BufferedReader) gets its data.
///
/// The two modes have different blocking contracts and are kept distinct
/// on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillMode {
    /// A dedicated worker thread drains the source. Construction returns
    /// immediately, before any data has arrived.
    #[default]
    Background,

    /// Construction drains the source on the calling thread until it ends
    /// or fails, and only then returns. No worker thread is spawned, and
    /// construction blocks for as long as the source takes.
    Eager,
}

/// Configuration for buffered reading.
///
/// # Example
///
/// ```
/// use syncrs::{FillMode, ReaderConfig};
///
/// let config = ReaderConfig::default()
///     .with_chunk_size(4096)
///     .with_fill_mode(FillMode::Eager);
///
/// assert_eq!(config.chunk_size(), 4096);
/// assert_eq!(config.fill_mode(), FillMode::Eager);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReaderConfig {
    /// Bytes requested from the source per read call.
    chunk_size: usize,

    /// Background worker or eager fill.
    fill_mode: FillMode,
}

impl ReaderConfig {
    /// Creates a new configuration with the given chunk size.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfig`] if `chunk_size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use syncrs::ReaderConfig;
    ///
    /// let config = ReaderConfig::new(64)?;
    /// assert_eq!(config.chunk_size(), 64);
    /// assert!(ReaderConfig::new(0).is_err());
    /// # Ok::<(), syncrs::SyncError>(())
    /// ```
    pub fn new(chunk_size: usize) -> Result<Self, SyncError> {
        if chunk_size == 0 {
            return Err(SyncError::InvalidConfig {
                message: "chunk_size must be non-zero",
            });
        }

        Ok(Self {
            chunk_size,
            fill_mode: FillMode::default(),
        })
    }

    /// Shorthand for the default configuration in [`FillMode::Eager`].
    pub fn eager() -> Self {
        Self::default().with_fill_mode(FillMode::Eager)
    }

    /// Sets the chunk size.
    ///
    /// Note: This does not validate the configuration. Use [`ReaderConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets the fill mode.
    pub fn with_fill_mode(mut self, mode: FillMode) -> Self {
        self.fill_mode = mode;
        self
    }

    /// Returns the chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the fill mode.
    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use syncrs::ReaderConfig;
    ///
    /// let config = ReaderConfig::default().with_chunk_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), SyncError> {
        Self::new(self.chunk_size).map(|_| ())
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            fill_mode: FillMode::default(),
        }
    }
}
