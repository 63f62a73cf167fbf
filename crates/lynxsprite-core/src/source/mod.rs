//! Pixel sources for the encoder.
//!
//! The encoder never parses image files. It reads decoded pixels one scanline
//! at a time through the [`ImageSource`] trait, which is implemented for:
//! - [`RawImage`] - a borrowed buffer of 24-bit pixels with optional row padding
//! - `image::RgbImage` - images decoded by the `image` crate
//!
//! # Examples
//!
//! ```ignore
//! use lynxsprite_core::source::{bmp_row_padding, ChannelOrder, RawImage};
//!
//! // Rows as delivered by a 24-bit BMP surface: B, G, R plus 4-byte alignment
//! let image = RawImage::bmp24(&surface_pixels, 13, 8).unwrap();
//! assert_eq!(bmp_row_padding(13), 1);
//! ```

mod types;

pub use types::{bmp_row_padding, ChannelOrder, ImageSource, RawImage};
