//! Row output.

use super::types::{EncodeError, PackedRow};
use std::io::Write;

/// Writes packed rows to a sink in scanline order.
///
/// The file format has no row index, so rows must arrive top to bottom.
/// Any write error is fatal for the whole image.
#[derive(Debug)]
pub struct RowEmitter<W: Write> {
    sink: W,
    next_row: usize,
    bytes_written: usize,
}

impl<W: Write> RowEmitter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            next_row: 0,
            bytes_written: 0,
        }
    }

    /// Write the record for scanline `row_index`.
    pub fn emit(&mut self, row_index: usize, packed: &PackedRow) -> Result<(), EncodeError> {
        if row_index != self.next_row {
            return Err(EncodeError::InvariantViolation(format!(
                "row {row_index} emitted out of order, expected row {}",
                self.next_row
            )));
        }

        self.sink
            .write_all(packed.as_bytes())
            .map_err(|source| EncodeError::SinkWriteFailure {
                row: row_index,
                source,
            })?;

        log::trace!("row {row_index}: wrote {} bytes", packed.len());
        self.next_row += 1;
        self.bytes_written += packed.len();
        Ok(())
    }

    pub fn rows_emitted(&self) -> usize {
        self.next_row
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Flush the sink and hand it back.
    pub fn finish(mut self) -> Result<W, EncodeError> {
        self.sink
            .flush()
            .map_err(|source| EncodeError::SinkWriteFailure {
                row: self.next_row,
                source,
            })?;
        Ok(self.sink)
    }
}
