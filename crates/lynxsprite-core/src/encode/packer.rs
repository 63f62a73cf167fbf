//! Packed sprite line encoding.
//!
//! Each run becomes one or more 9-bit packets, written MSB-first:
//!
//! ```text
//! +---+---------+---------+
//! | L | count-1 |   pen   |
//! +---+---------+---------+
//!   1      4         4
//! ```
//!
//! `L` is set for a single pixel (a one-pixel literal) and clear for a
//! repeated pen. Runs longer than 16 pixels are split into 16-pixel packets
//! followed by the remainder. The record starts with a length byte that
//! counts itself and every byte up to and including the one under the bit
//! cursor.

use super::bitwriter::BitWriter;
use super::palette::MAX_COLORS;
use super::types::{EncodeError, HardwareFix, PackedRow, Run};
use crate::EncodeOptions;

/// Largest pixel count a single packet can describe.
pub const MAX_PACKET_RUN: usize = 16;

/// Largest record length the one-byte header can describe.
pub const MAX_ROW_LENGTH: usize = u8::MAX as usize;

const COUNT_BITS: u8 = 4;
const PEN_BITS: u8 = 4;
const HEADER_PLACEHOLDER: u8 = 0xFF;

/// Turns run lists into packed row records.
///
/// The packer keeps one scratch buffer that is reused for every row.
#[derive(Debug, Clone)]
pub struct Packer {
    scratch: Vec<u8>,
    correct_hardware_bug: bool,
}

impl Default for Packer {
    fn default() -> Self {
        Self::new(&EncodeOptions::default())
    }
}

impl Packer {
    pub fn new(options: &EncodeOptions) -> Self {
        Self {
            scratch: Vec::with_capacity(MAX_ROW_LENGTH + 1),
            correct_hardware_bug: options.correct_hardware_bug,
        }
    }

    /// Pack the runs of one scanline into a length-prefixed record.
    ///
    /// Runs with an empty length or a pen outside 0-15 can only come from a
    /// broken upstream stage and are rejected as invariant violations.
    ///
    /// The odd-terminal-byte check only guards this layout: writing bit 7 of
    /// a byte always moves the cursor to a fresh zero byte, and that byte is
    /// the one counted last, so packed rows come out as
    /// [`HardwareFix::NotNeeded`].
    pub fn pack(&mut self, runs: &[Run]) -> Result<PackedRow, EncodeError> {
        self.scratch.clear();
        self.scratch.push(HEADER_PLACEHOLDER);

        let mut writer = BitWriter::new(&mut self.scratch);
        for run in runs {
            check_run(run)?;

            let mut remaining = run.length;
            while remaining > MAX_PACKET_RUN {
                write_packet(&mut writer, MAX_PACKET_RUN, run.color);
                remaining -= MAX_PACKET_RUN;
            }
            write_packet(&mut writer, remaining, run.color);
        }

        let length = self.scratch.len();
        let header = u8::try_from(length).map_err(|_| EncodeError::RowTooLong { length })?;
        self.scratch[0] = header;

        let fix = apply_hardware_fix(&mut self.scratch, self.correct_hardware_bug)?;
        Ok(PackedRow::new(self.scratch.clone(), fix))
    }
}

fn check_run(run: &Run) -> Result<(), EncodeError> {
    if run.length == 0 {
        return Err(EncodeError::InvariantViolation(format!(
            "empty run for pen {}",
            run.color
        )));
    }
    if run.color as usize >= MAX_COLORS {
        return Err(EncodeError::InvariantViolation(format!(
            "pen {} out of range",
            run.color
        )));
    }
    Ok(())
}

/// Write one packet of 1-16 pixels.
fn write_packet(writer: &mut BitWriter<'_>, count: usize, pen: u8) {
    debug_assert!((1..=MAX_PACKET_RUN).contains(&count));

    writer.write_bit(count == 1);
    writer.write_field(COUNT_BITS, (count - 1) as u16);
    writer.write_field(PEN_BITS, pen as u16);
}

/// Guard against the sprite engine's odd-terminal-byte defect.
///
/// `record` is a complete row record with a valid length header. When its
/// last byte has the least significant bit set and `enabled` is true, a zero
/// byte is appended and the header incremented.
pub fn apply_hardware_fix(record: &mut Vec<u8>, enabled: bool) -> Result<HardwareFix, EncodeError> {
    let odd = record.len() > 1 && record.last().is_some_and(|b| b & 1 == 1);
    if !odd {
        return Ok(HardwareFix::NotNeeded);
    }
    if !enabled {
        return Ok(HardwareFix::Skipped);
    }

    let length = record.len() + 1;
    let header = u8::try_from(length).map_err(|_| EncodeError::RowTooLong { length })?;
    record.push(0);
    record[0] = header;
    Ok(HardwareFix::Applied)
}
