//! Core types for sprite encoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for sprite encoding operations.
///
/// Every variant is terminal for the image being converted: there is no
/// partial output and no automatic retry.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The image needs more distinct colors than the 4bpp palette can hold.
    #[error("Palette overflow: more than {limit} distinct colors (first extra color at row {row}, column {column})")]
    PaletteOverflow { limit: usize, row: u32, column: u32 },

    /// The output sink rejected a packed row.
    #[error("Failed to write row {row} to output: {source}")]
    SinkWriteFailure {
        row: usize,
        #[source]
        source: std::io::Error,
    },

    /// A value outside its documented domain reached the encoder.
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match expected dimensions and row padding
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// A packed row does not fit the one-byte length header.
    #[error("Packed row is {length} bytes, the length header holds at most 255")]
    RowTooLong { length: usize },
}

/// A maximal stretch of identical palette indices within one scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Palette index (0-15)
    pub color: u8,
    /// Number of pixels, at least 1
    pub length: usize,
}

impl Run {
    pub fn new(color: u8, length: usize) -> Self {
        Self { color, length }
    }
}

/// Outcome of the odd-terminal-byte check performed on every packed row.
///
/// The Lynx sprite engine misreads a line whose final byte has its least
/// significant bit set; such rows get one extra zero byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HardwareFix {
    /// The final byte was even.
    #[default]
    NotNeeded,
    /// The final byte was odd and a zero byte was appended.
    Applied,
    /// The final byte was odd but correction was disabled.
    Skipped,
}

/// One scanline in its on-wire form: a length header followed by packets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedRow {
    bytes: Vec<u8>,
    hardware_fix: HardwareFix,
}

impl PackedRow {
    pub(crate) fn new(bytes: Vec<u8>, hardware_fix: HardwareFix) -> Self {
        Self {
            bytes,
            hardware_fix,
        }
    }

    /// The complete record, header byte first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total record length in bytes, header included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; a record holds at least its header byte.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The length header as stored on the wire.
    pub fn header(&self) -> u8 {
        self.bytes.first().copied().unwrap_or(0)
    }

    pub fn hardware_fix(&self) -> HardwareFix {
        self.hardware_fix
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
