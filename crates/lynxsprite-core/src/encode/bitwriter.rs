//! MSB-first bit writer for packed sprite data.
//!
//! The buffer's last byte is always the byte under the cursor. Whenever the
//! cursor leaves a byte a fresh zero byte is pushed, so `buf.len()` counts the
//! cursor byte even when no bit of it has been written yet. Packed row lengths
//! are defined that way by the format.

/// Writes bit fields into a byte buffer, most significant bit first.
#[derive(Debug)]
pub struct BitWriter<'a> {
    buf: &'a mut Vec<u8>,
    /// Bit offset inside the cursor byte (0 = MSB)
    bit: u8,
}

impl<'a> BitWriter<'a> {
    /// Start writing at a new zero byte appended to `buf`.
    pub fn new(buf: &'a mut Vec<u8>) -> Self {
        buf.push(0);
        Self { buf, bit: 0 }
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, set: bool) {
        self.write_field(1, set as u16);
    }

    /// Write the low `width` bits of `value` (`width` in 0..=16).
    ///
    /// A field that does not fit the cursor byte is split: its high bits fill
    /// the remainder of the current byte and its low bits start the next one.
    pub fn write_field(&mut self, width: u8, value: u16) {
        debug_assert!(width <= 16, "field width {width} exceeds 16 bits");

        let mut remaining = width;
        while remaining > 0 {
            let free = 8 - self.bit;
            let take = remaining.min(free);
            let shift = remaining - take;
            let chunk = ((value as u32 >> shift) & ((1u32 << take) - 1)) as u8;

            if let Some(byte) = self.buf.last_mut() {
                *byte |= chunk << (free - take);
            }

            self.bit += take;
            remaining -= take;
            if self.bit == 8 {
                self.buf.push(0);
                self.bit = 0;
            }
        }
    }

    /// Cursor position as (byte index in the buffer, bit offset in that byte).
    pub fn position(&self) -> (usize, u8) {
        (self.buf.len() - 1, self.bit)
    }

    /// Buffer length including the cursor byte.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Always false; the cursor byte exists from construction.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
