//! Whole-image conversion.
//!
//! A conversion builds the palette over the full image first, then run-encodes
//! and packs each scanline in order. All rows are packed before anything is
//! written, so a palette overflow or packing failure leaves the sink untouched.

use super::emitter::RowEmitter;
use super::packer::Packer;
use super::palette::Palette;
use super::runs::encode_runs_into;
use super::types::{EncodeError, HardwareFix, PackedRow, Run};
use crate::source::{ChannelOrder, ImageSource};
use crate::EncodeOptions;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Statistics about a finished conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSummary {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels (one record per row)
    pub height: u32,
    /// Number of palette entries used
    pub colors: usize,
    /// Total size of all row records in bytes
    pub bytes: usize,
    /// Rows that received the odd-terminal-byte padding
    pub corrected_rows: usize,
}

/// A fully packed sprite: the palette plus one record per scanline.
#[derive(Debug, Clone)]
pub struct EncodedSprite {
    width: u32,
    height: u32,
    channel_order: ChannelOrder,
    palette: Palette,
    rows: Vec<PackedRow>,
}

impl EncodedSprite {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel order of the palette's color keys.
    pub fn channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Packed records, top row first.
    pub fn rows(&self) -> &[PackedRow] {
        &self.rows
    }

    /// Total size of all records in bytes.
    pub fn byte_len(&self) -> usize {
        self.rows.iter().map(PackedRow::len).sum()
    }

    /// All records concatenated, as they are laid out in a sprite file.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        for row in &self.rows {
            out.extend_from_slice(row.as_bytes());
        }
        out
    }

    pub fn summary(&self) -> ConversionSummary {
        ConversionSummary {
            width: self.width,
            height: self.height,
            colors: self.palette.len(),
            bytes: self.byte_len(),
            corrected_rows: self
                .rows
                .iter()
                .filter(|r| r.hardware_fix() == HardwareFix::Applied)
                .count(),
        }
    }

    /// Write every record to `sink`, top row first, then flush it.
    pub fn write_to<W: Write>(&self, sink: W) -> Result<(), EncodeError> {
        let mut emitter = RowEmitter::new(sink);
        for (index, row) in self.rows.iter().enumerate() {
            emitter.emit(index, row)?;
        }
        emitter.finish()?;
        Ok(())
    }
}

/// Converts images into packed sprite data.
///
/// The encoder can be reused across images; its packer keeps its scratch
/// buffer between rows and between images.
#[derive(Debug, Clone, Default)]
pub struct SpriteEncoder {
    options: EncodeOptions,
    packer: Packer,
}

impl SpriteEncoder {
    pub fn new(options: EncodeOptions) -> Self {
        Self {
            packer: Packer::new(&options),
            options,
        }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Encode every scanline of `source`.
    pub fn encode<S: ImageSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> Result<EncodedSprite, EncodeError> {
        let (width, height) = (source.width(), source.height());
        if width == 0 || height == 0 {
            return Err(EncodeError::InvalidDimensions { width, height });
        }

        let palette = Palette::build(source)?;
        log::info!(
            "encoding {}x{} sprite with {} colors",
            width,
            height,
            palette.len()
        );

        let mut indexed: Vec<u8> = Vec::with_capacity(width as usize);
        let mut runs: Vec<Run> = Vec::new();
        let mut rows = Vec::with_capacity(height as usize);

        for y in 0..height {
            palette.index_row(source.row(y), &mut indexed)?;
            encode_runs_into(&indexed, &mut runs);

            let packed = self.packer.pack(&runs).inspect_err(|e| {
                log::error!("row {y}: {e}");
            })?;
            match packed.hardware_fix() {
                HardwareFix::NotNeeded => {}
                HardwareFix::Applied => {
                    log::debug!("row {y}: odd terminal byte, padded to {} bytes", packed.len())
                }
                HardwareFix::Skipped => {
                    log::warn!("row {y}: odd terminal byte left uncorrected")
                }
            }
            log::trace!("row {y}: {} runs, {} bytes", runs.len(), packed.len());
            rows.push(packed);
        }

        Ok(EncodedSprite {
            width,
            height,
            channel_order: source.channel_order(),
            palette,
            rows,
        })
    }

    /// Encode `source` and write the records to `sink`.
    ///
    /// Nothing reaches the sink unless the whole image encodes.
    pub fn convert<S: ImageSource + ?Sized, W: Write>(
        &mut self,
        source: &S,
        sink: W,
    ) -> Result<ConversionSummary, EncodeError> {
        let sprite = self.encode(source)?;
        sprite.write_to(sink)?;

        let summary = sprite.summary();
        log::info!(
            "wrote {} rows, {} bytes ({} corrected)",
            summary.height,
            summary.bytes,
            summary.corrected_rows
        );
        Ok(summary)
    }
}

/// Encode `source` with default options.
pub fn encode_sprite<S: ImageSource + ?Sized>(source: &S) -> Result<EncodedSprite, EncodeError> {
    SpriteEncoder::default().encode(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::palette::Color;
    use crate::source::RawImage;

    fn gray_pixels(levels: &[u8]) -> Vec<u8> {
        levels.iter().flat_map(|&v| [v, v, v]).collect()
    }

    #[test]
    fn test_encode_small_sprite() {
        // Row 0: A A A, row 1: B A A
        let pixels = gray_pixels(&[0x40, 0x40, 0x40, 0x90, 0x40, 0x40]);
        let img = RawImage::packed_rgb(&pixels, 3, 2).unwrap();

        let sprite = encode_sprite(&img).unwrap();
        assert_eq!(sprite.width(), 3);
        assert_eq!(sprite.height(), 2);
        assert_eq!(sprite.palette().colors(), &[Color(0x404040), Color(0x909090)]);
        assert_eq!(sprite.rows().len(), 2);

        // Row 0: 0 0010 0000
        assert_eq!(sprite.rows()[0].as_bytes(), &[0x03, 0x10, 0x00]);
        // Row 1: 1 0000 0001 | 0 0001 0000
        assert_eq!(sprite.rows()[1].as_bytes(), &[0x04, 0x80, 0x84, 0x00]);

        assert_eq!(
            sprite.to_bytes(),
            vec![0x03, 0x10, 0x00, 0x04, 0x80, 0x84, 0x00]
        );
    }

    #[test]
    fn test_convert_writes_rows_and_summary() {
        let pixels = gray_pixels(&[7; 8]);
        let img = RawImage::packed_rgb(&pixels, 4, 2).unwrap();

        let mut out = Vec::new();
        let summary = SpriteEncoder::default().convert(&img, &mut out).unwrap();
        assert_eq!(
            summary,
            ConversionSummary {
                width: 4,
                height: 2,
                colors: 1,
                bytes: 6,
                corrected_rows: 0,
            }
        );
        // 0 0011 0000 per row
        assert_eq!(out, vec![0x03, 0x18, 0x00, 0x03, 0x18, 0x00]);
    }

    #[test]
    fn test_palette_overflow_emits_nothing() {
        let levels: Vec<u8> = (0..17).collect();
        let pixels = gray_pixels(&levels);
        let img = RawImage::packed_rgb(&pixels, 17, 1).unwrap();

        let mut out = Vec::new();
        let result = SpriteEncoder::default().convert(&img, &mut out);
        assert!(matches!(result, Err(EncodeError::PaletteOverflow { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_overflow_in_last_row_emits_nothing() {
        // 16 colors in row 0, a 17th only in the final row
        let mut levels: Vec<u8> = (0..16).collect();
        levels.extend(std::iter::repeat(0).take(15));
        levels.push(200);
        let pixels = gray_pixels(&levels);
        let img = RawImage::packed_rgb(&pixels, 16, 2).unwrap();

        let mut out = Vec::new();
        let result = SpriteEncoder::default().convert(&img, &mut out);
        assert!(matches!(
            result,
            Err(EncodeError::PaletteOverflow { row: 1, column: 15, .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_row_too_long_emits_nothing() {
        let levels: Vec<u8> = (0..226).map(|i| (i % 2) as u8).collect();
        let pixels = gray_pixels(&levels);
        let img = RawImage::packed_rgb(&pixels, 226, 1).unwrap();

        let mut out = Vec::new();
        let result = SpriteEncoder::default().convert(&img, &mut out);
        assert!(matches!(result, Err(EncodeError::RowTooLong { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_bmp_source_uses_bgr_keys() {
        // 1x1 BMP row: B=0x30 G=0x20 R=0x10, one byte of padding
        let pixels = vec![0x30, 0x20, 0x10, 0x00];
        let img = RawImage::bmp24(&pixels, 1, 1).unwrap();

        let sprite = encode_sprite(&img).unwrap();
        assert_eq!(sprite.channel_order(), ChannelOrder::Bgr);
        let color = sprite.palette().get(0).unwrap();
        assert_eq!(color, Color(0x302010));
        assert_eq!(color.to_rgb(sprite.channel_order()), [0x10, 0x20, 0x30]);
    }

    #[test]
    fn test_rgb_image_source() {
        let mut img = image::RgbImage::new(20, 1);
        img.put_pixel(19, 0, image::Rgb([255, 255, 255]));

        let sprite = encode_sprite(&img).unwrap();
        assert_eq!(sprite.palette().len(), 2);
        // 0 1111 0000 | 0 0010 0000 | 1 0000 0001
        assert_eq!(
            sprite.rows()[0].as_bytes(),
            &[0x05, 0x78, 0x08, 0x20, 0x20]
        );
    }

    #[test]
    fn test_empty_rgb_image_rejected() {
        let img = image::RgbImage::new(0, 0);
        let result = encode_sprite(&img);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encoder_reuse_is_deterministic() {
        let pixels = gray_pixels(&[1, 1, 2, 3, 3, 3, 3, 1]);
        let img = RawImage::packed_rgb(&pixels, 4, 2).unwrap();

        let mut encoder = SpriteEncoder::new(EncodeOptions::default());
        let first = encoder.encode(&img).unwrap();
        let second = encoder.encode(&img).unwrap();
        assert_eq!(first.to_bytes(), second.to_bytes());
        assert_eq!(first.palette(), second.palette());
    }

    #[test]
    fn test_write_to_failing_sink() {
        let pixels = gray_pixels(&[5; 4]);
        let img = RawImage::packed_rgb(&pixels, 2, 2).unwrap();
        let sprite = encode_sprite(&img).unwrap();

        let mut buf = [0u8; 4];
        let result = sprite.write_to(&mut buf[..]);
        assert!(matches!(
            result,
            Err(EncodeError::SinkWriteFailure { row: 1, .. })
        ));
    }
}
