//! Sprite encoding pipeline.
//!
//! This module turns a 24-bit image with at most 16 colors into packed 4bpp
//! sprite lines for the Atari Lynx sprite engine:
//! - [`Palette`] - first-seen color table, built once per image
//! - [`encode_runs`] - maximal runs of one palette index within a scanline
//! - [`Packer`] - 9-bit packets behind a one-byte length header
//! - [`RowEmitter`] - writes records to a sink, top row first
//!
//! # Output Layout
//!
//! A sprite file is the plain concatenation of its row records. There is no
//! image header and no terminator; dimensions and the palette travel
//! separately.
//!
//! # Examples
//!
//! ```ignore
//! use lynxsprite_core::encode::SpriteEncoder;
//! use lynxsprite_core::source::RawImage;
//! use lynxsprite_core::EncodeOptions;
//!
//! let image = RawImage::bmp24(&surface_pixels, width, height).unwrap();
//! let mut file = std::fs::File::create("brick.spr").unwrap();
//! let summary = SpriteEncoder::new(EncodeOptions::default())
//!     .convert(&image, &mut file)
//!     .unwrap();
//! println!("Image has {} colors", summary.colors);
//! ```

mod bitwriter;
mod emitter;
mod packer;
mod palette;
mod runs;
mod session;
mod types;

pub use bitwriter::BitWriter;
pub use emitter::RowEmitter;
pub use packer::{apply_hardware_fix, Packer, MAX_PACKET_RUN, MAX_ROW_LENGTH};
pub use palette::{Color, Palette, MAX_COLORS};
pub use runs::{encode_runs, encode_runs_into};
pub use session::{encode_sprite, ConversionSummary, EncodedSprite, SpriteEncoder};
pub use types::{EncodeError, HardwareFix, PackedRow, Run};
