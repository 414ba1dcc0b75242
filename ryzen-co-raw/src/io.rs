//! Register-file read/write primitives
//!
//! The `ryzen_smu` driver exposes SMU registers as fixed-size binary files
//! under `/sys/kernel/ryzen_smu_drv/`. Every access here opens the endpoint,
//! performs exactly one transfer and releases it. A transfer that moves fewer
//! bytes than requested is a driver or protocol error and is reported as such.
//! Serialization of multi-step sequences is left to the callers in ryzen-co.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, IoError>;

/// Upper bound for text reads that do not specify a length
pub const MAX_TEXT_LEN: usize = 256;

/// Errors that can occur while talking to a driver endpoint
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Failed to open {endpoint}: {source}")]
    OpenFailed {
        endpoint: String,
        source: std::io::Error,
    },

    #[error("Failed to read {endpoint}: {source}")]
    ReadFailed {
        endpoint: String,
        source: std::io::Error,
    },

    #[error("Failed to write {endpoint}: {source}")]
    WriteFailed {
        endpoint: String,
        source: std::io::Error,
    },

    #[error("Short read from {endpoint}: expected {expected} bytes, got {actual}")]
    ShortRead {
        endpoint: String,
        expected: usize,
        actual: usize,
    },

    #[error("Short write to {endpoint}: expected {expected} bytes, wrote {actual}")]
    ShortWrite {
        endpoint: String,
        expected: usize,
        actual: usize,
    },

    #[error("{endpoint} returned non UTF-8 text")]
    InvalidText { endpoint: String },
}

/// A byte-oriented register endpoint
///
/// Implementations perform a single transfer per call and report how many
/// bytes actually moved; they never loop to complete a partial transfer.
pub trait Endpoint {
    /// Human readable name used in errors and logs
    fn name(&self) -> &str;

    /// Read up to `buf.len()` bytes in one transfer
    fn read(&self, buf: &mut [u8]) -> Result<usize>;

    /// Write `data` in one transfer
    fn write(&self, data: &[u8]) -> Result<usize>;
}

impl<E: Endpoint + ?Sized> Endpoint for &E {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read(&self, buf: &mut [u8]) -> Result<usize> {
        (**self).read(buf)
    }

    fn write(&self, data: &[u8]) -> Result<usize> {
        (**self).write(data)
    }
}

/// Endpoint backed by a driver pseudo-file
#[derive(Debug, Clone)]
pub struct FileEndpoint {
    path: PathBuf,
    name: String,
}

impl FileEndpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl Endpoint for FileEndpoint {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self, buf: &mut [u8]) -> Result<usize> {
        let mut file = File::open(&self.path).map_err(|e| IoError::OpenFailed {
            endpoint: self.name.clone(),
            source: e,
        })?;

        file.read(buf).map_err(|e| IoError::ReadFailed {
            endpoint: self.name.clone(),
            source: e,
        })
    }

    fn write(&self, data: &[u8]) -> Result<usize> {
        let mut file = OpenOptions::new()
            .write(true)
            .custom_flags(libc::O_SYNC) // the driver acts on each write immediately
            .open(&self.path)
            .map_err(|e| IoError::OpenFailed {
                endpoint: self.name.clone(),
                source: e,
            })?;

        file.write(data).map_err(|e| IoError::WriteFailed {
            endpoint: self.name.clone(),
            source: e,
        })
    }
}

fn read_exact_once<E: Endpoint + ?Sized>(endpoint: &E, buf: &mut [u8]) -> Result<()> {
    let actual = endpoint.read(buf)?;
    if actual != buf.len() {
        return Err(IoError::ShortRead {
            endpoint: endpoint.name().to_string(),
            expected: buf.len(),
            actual,
        });
    }
    Ok(())
}

fn write_exact_once<E: Endpoint + ?Sized>(endpoint: &E, data: &[u8]) -> Result<()> {
    let actual = endpoint.write(data)?;
    if actual != data.len() {
        return Err(IoError::ShortWrite {
            endpoint: endpoint.name().to_string(),
            expected: data.len(),
            actual,
        });
    }
    Ok(())
}

/// Read a little-endian 32-bit word
///
/// # Errors
///
/// Returns [`IoError::ShortRead`] if the endpoint yields fewer than 4 bytes,
/// or the underlying open/read error.
pub fn read_u32<E: Endpoint + ?Sized>(endpoint: &E) -> Result<u32> {
    let mut buffer = [0u8; 4];
    read_exact_once(endpoint, &mut buffer)?;

    let value = u32::from_le_bytes(buffer);
    Ok(value)
}

/// Write a little-endian 32-bit word
pub fn write_u32<E: Endpoint + ?Sized>(endpoint: &E, value: u32) -> Result<()> {
    write_exact_once(endpoint, &value.to_le_bytes())
}

/// Write two little-endian words as a single 8-byte transfer
///
/// Used for address + value register writes such as SMN.
pub fn write_u32_pair<E: Endpoint + ?Sized>(endpoint: &E, first: u32, second: u32) -> Result<()> {
    let mut buffer = [0u8; 8];
    buffer[..4].copy_from_slice(&first.to_le_bytes());
    buffer[4..].copy_from_slice(&second.to_le_bytes());

    write_exact_once(endpoint, &buffer)
}

/// Read six little-endian words (24 bytes)
pub fn read_u32x6<E: Endpoint + ?Sized>(endpoint: &E) -> Result<[u32; 6]> {
    let mut buffer = [0u8; 24];
    read_exact_once(endpoint, &mut buffer)?;

    let mut words = [0u32; 6];
    for (word, chunk) in words.iter_mut().zip(buffer.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    Ok(words)
}

/// Write six little-endian words as a single 24-byte transfer
pub fn write_u32x6<E: Endpoint + ?Sized>(endpoint: &E, words: &[u32; 6]) -> Result<()> {
    let mut buffer = [0u8; 24];
    for (chunk, word) in buffer.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }

    write_exact_once(endpoint, &buffer)
}

/// Read a text endpoint
///
/// With `Some(len)` exactly `len` bytes must come back; with `None` whatever a
/// single read of up to [`MAX_TEXT_LEN`] bytes returns is accepted.
pub fn read_fixed_text<E: Endpoint + ?Sized>(
    endpoint: &E,
    expected_len: Option<usize>,
) -> Result<String> {
    let mut buffer = vec![0u8; expected_len.unwrap_or(MAX_TEXT_LEN)];
    let actual = endpoint.read(&mut buffer)?;

    if let Some(expected) = expected_len {
        if actual != expected {
            return Err(IoError::ShortRead {
                endpoint: endpoint.name().to_string(),
                expected,
                actual,
            });
        }
    }

    buffer.truncate(actual);
    String::from_utf8(buffer).map_err(|_| IoError::InvalidText {
        endpoint: endpoint.name().to_string(),
    })
}
