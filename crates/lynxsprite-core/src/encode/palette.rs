//! Palette extraction.
//!
//! Every distinct pixel color gets a 4-bit palette index in first-seen order,
//! scanning rows top to bottom and pixels left to right. The assignment order
//! is part of the output format: a sprite's pens refer to these indices.

use super::types::EncodeError;
use crate::source::{ChannelOrder, ImageSource};
use serde::{Deserialize, Serialize};

/// Number of pens available to a 4bpp sprite.
pub const MAX_COLORS: usize = 16;

/// A 24-bit color key, channels packed in source order (first channel highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Pack a pixel triple exactly as the source delivered it.
    #[inline]
    pub fn from_triple(pixel: [u8; 3]) -> Self {
        Color((pixel[0] as u32) << 16 | (pixel[1] as u32) << 8 | pixel[2] as u32)
    }

    /// The triple in source order.
    #[inline]
    pub fn to_triple(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    /// The color as red, green, blue given the order it was read in.
    pub fn to_rgb(self, order: ChannelOrder) -> [u8; 3] {
        let [a, b, c] = self.to_triple();
        match order {
            ChannelOrder::Rgb => [a, b, c],
            ChannelOrder::Bgr => [c, b, a],
        }
    }
}

/// An append-only color table of at most [`MAX_COLORS`] entries.
///
/// Indices are contiguous from 0 and never change once assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Create an empty palette
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan every pixel of `source` once and collect its colors.
    ///
    /// Fails with [`EncodeError::PaletteOverflow`] as soon as a 17th distinct
    /// color is found.
    pub fn build<S: ImageSource + ?Sized>(source: &S) -> Result<Self, EncodeError> {
        let mut palette = Palette::new();

        for y in 0..source.height() {
            for (x, pixel) in source.row(y).chunks_exact(3).enumerate() {
                let color = Color::from_triple([pixel[0], pixel[1], pixel[2]]);
                if palette.intern(color).is_none() {
                    return Err(EncodeError::PaletteOverflow {
                        limit: MAX_COLORS,
                        row: y,
                        column: x as u32,
                    });
                }
            }
        }

        Ok(palette)
    }

    /// Return the index of `color`, appending it if it is new.
    ///
    /// Returns `None` when the color is new and the palette is full.
    pub fn intern(&mut self, color: Color) -> Option<u8> {
        if let Some(index) = self.index_of(color) {
            return Some(index);
        }
        if self.colors.len() >= MAX_COLORS {
            return None;
        }
        self.colors.push(color);
        Some((self.colors.len() - 1) as u8)
    }

    /// Look up the index of a color.
    pub fn index_of(&self, color: Color) -> Option<u8> {
        // At most 16 entries: a linear scan beats hashing.
        self.colors
            .iter()
            .position(|&c| c == color)
            .map(|i| i as u8)
    }

    /// Color stored at `index`.
    pub fn get(&self, index: u8) -> Option<Color> {
        self.colors.get(index as usize).copied()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Translate one scanline of pixel bytes into palette indices.
    ///
    /// `out` is cleared first so a single buffer can serve every row. A color
    /// missing from the palette means the palette was built from a different
    /// image and is reported as an invariant violation.
    pub fn index_row(&self, pixels: &[u8], out: &mut Vec<u8>) -> Result<(), EncodeError> {
        out.clear();
        for pixel in pixels.chunks_exact(3) {
            let color = Color::from_triple([pixel[0], pixel[1], pixel[2]]);
            let index = self.index_of(color).ok_or_else(|| {
                EncodeError::InvariantViolation(format!(
                    "color {:06x} is not in the palette",
                    color.0
                ))
            })?;
            out.push(index);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RawImage;

    /// Build a tightly packed RGB buffer from gray levels, one byte per pixel.
    fn gray_pixels(levels: &[u8]) -> Vec<u8> {
        levels.iter().flat_map(|&v| [v, v, v]).collect()
    }

    #[test]
    fn test_color_packing_keeps_source_order() {
        let color = Color::from_triple([0x11, 0x22, 0x33]);
        assert_eq!(color, Color(0x112233));
        assert_eq!(color.to_triple(), [0x11, 0x22, 0x33]);
        assert_eq!(color.to_rgb(ChannelOrder::Rgb), [0x11, 0x22, 0x33]);
        assert_eq!(color.to_rgb(ChannelOrder::Bgr), [0x33, 0x22, 0x11]);
    }

    #[test]
    fn test_first_seen_row_major_order() {
        // Row 0: 5 5 9, row 1: 1 9 7
        let pixels = gray_pixels(&[5, 5, 9, 1, 9, 7]);
        let img = RawImage::packed_rgb(&pixels, 3, 2).unwrap();

        let palette = Palette::build(&img).unwrap();
        assert_eq!(palette.len(), 4);
        assert_eq!(palette.index_of(Color(0x050505)), Some(0));
        assert_eq!(palette.index_of(Color(0x090909)), Some(1));
        assert_eq!(palette.index_of(Color(0x010101)), Some(2));
        assert_eq!(palette.index_of(Color(0x070707)), Some(3));
    }

    #[test]
    fn test_exactly_sixteen_colors_fit() {
        let levels: Vec<u8> = (0..16).collect();
        let pixels = gray_pixels(&levels);
        let img = RawImage::packed_rgb(&pixels, 16, 1).unwrap();

        let palette = Palette::build(&img).unwrap();
        assert_eq!(palette.len(), MAX_COLORS);
        assert_eq!(palette.get(15), Some(Color(0x0f0f0f)));
        assert_eq!(palette.get(16), None);
    }

    #[test]
    fn test_seventeenth_color_overflows() {
        // 4x5 image, the 17th distinct color appears at row 4, column 0
        let levels: Vec<u8> = (0..20).map(|i| if i < 16 { i } else { 16 }).collect();
        let pixels = gray_pixels(&levels);
        let img = RawImage::packed_rgb(&pixels, 4, 5).unwrap();

        let result = Palette::build(&img);
        assert!(matches!(
            result,
            Err(EncodeError::PaletteOverflow {
                limit: 16,
                row: 4,
                column: 0
            })
        ));
    }

    #[test]
    fn test_intern_is_idempotent() {
        let mut palette = Palette::new();
        assert_eq!(palette.intern(Color(0xff0000)), Some(0));
        assert_eq!(palette.intern(Color(0x00ff00)), Some(1));
        assert_eq!(palette.intern(Color(0xff0000)), Some(0));
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn test_index_row() {
        let pixels = gray_pixels(&[3, 4, 3]);
        let img = RawImage::packed_rgb(&pixels, 3, 1).unwrap();
        let palette = Palette::build(&img).unwrap();

        let mut indexed = vec![99, 99, 99, 99];
        palette.index_row(&pixels, &mut indexed).unwrap();
        assert_eq!(indexed, vec![0, 1, 0]);
    }

    #[test]
    fn test_index_row_unknown_color() {
        let palette = Palette::new();
        let mut indexed = Vec::new();
        let result = palette.index_row(&[1, 2, 3], &mut indexed);
        assert!(matches!(result, Err(EncodeError::InvariantViolation(_))));
    }
}
