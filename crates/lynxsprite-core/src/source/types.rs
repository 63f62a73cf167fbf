//! Image source trait and adapters.

use crate::encode::EncodeError;
use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Byte order of the three channels of each pixel as delivered by a source.
///
/// Palette keys are built from the triple as delivered, so the order only
/// matters to whoever interprets the palette afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelOrder {
    /// Red, green, blue.
    #[default]
    Rgb,
    /// Blue, green, red (24-bit BMP pixel layout).
    Bgr,
}

/// Sequential scanline access to a 24-bit image.
pub trait ImageSource {
    /// Image width in pixels.
    fn width(&self) -> u32;

    /// Image height in pixels.
    fn height(&self) -> u32;

    /// Pixel bytes of scanline `y`, exactly `width * 3` bytes (padding excluded).
    ///
    /// Rows are numbered top to bottom; `y` must be less than `height`.
    fn row(&self, y: u32) -> &[u8];

    /// Channel order of the triples returned by [`ImageSource::row`].
    fn channel_order(&self) -> ChannelOrder {
        ChannelOrder::Rgb
    }
}

/// Row padding of a 24-bit BMP scanline (rows are aligned to 4 bytes).
pub fn bmp_row_padding(width: u32) -> usize {
    let row_bytes = width as usize * 3;
    (4 - row_bytes % 4) % 4
}

/// A borrowed buffer of 24-bit pixels, rows top to bottom.
///
/// Each row holds `width * 3` pixel bytes followed by `padding` bytes that
/// are skipped.
#[derive(Debug, Clone, Copy)]
pub struct RawImage<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    padding: usize,
    order: ChannelOrder,
}

impl<'a> RawImage<'a> {
    /// Wrap a pixel buffer, validating its size against the dimensions.
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        padding: usize,
        order: ChannelOrder,
    ) -> Result<Self, EncodeError> {
        if width == 0 || height == 0 {
            return Err(EncodeError::InvalidDimensions { width, height });
        }

        let expected = (width as usize)
            .checked_mul(3)
            .and_then(|row| row.checked_add(padding))
            .and_then(|stride| stride.checked_mul(height as usize))
            .ok_or(EncodeError::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(EncodeError::InvalidPixelData {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            padding,
            order,
        })
    }

    /// Tightly packed RGB pixels (3 bytes per pixel, row-major order).
    pub fn packed_rgb(data: &'a [u8], width: u32, height: u32) -> Result<Self, EncodeError> {
        Self::new(data, width, height, 0, ChannelOrder::Rgb)
    }

    /// Pixels laid out like a decoded 24-bit BMP surface: blue, green, red
    /// with every row padded to a multiple of 4 bytes.
    pub fn bmp24(data: &'a [u8], width: u32, height: u32) -> Result<Self, EncodeError> {
        Self::new(
            data,
            width,
            height,
            bmp_row_padding(width),
            ChannelOrder::Bgr,
        )
    }

    /// Bytes between the starts of two consecutive rows.
    pub fn stride(&self) -> usize {
        self.width as usize * 3 + self.padding
    }

    pub fn padding(&self) -> usize {
        self.padding
    }
}

impl ImageSource for RawImage<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride();
        &self.data[start..start + self.width as usize * 3]
    }

    fn channel_order(&self) -> ChannelOrder {
        self.order
    }
}

impl ImageSource for RgbImage {
    fn width(&self) -> u32 {
        RgbImage::width(self)
    }

    fn height(&self) -> u32 {
        RgbImage::height(self)
    }

    fn row(&self, y: u32) -> &[u8] {
        let row_bytes = RgbImage::width(self) as usize * 3;
        let start = y as usize * row_bytes;
        &self.as_raw()[start..start + row_bytes]
    }
}
