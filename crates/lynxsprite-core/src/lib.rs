//! Lynxsprite Core - Packed sprite encoder
//!
//! This crate converts 24-bit images with up to 16 colors into the packed,
//! run-length compressed 4bpp line format read by the Atari Lynx sprite
//! engine.

pub mod encode;
pub mod source;

pub use encode::{
    encode_sprite, ConversionSummary, EncodeError, EncodedSprite, Palette, SpriteEncoder,
};
pub use source::{ImageSource, RawImage};

/// Options controlling sprite encoding
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Pad rows whose final byte is odd with an extra zero byte.
    ///
    /// The sprite engine misreads such rows. Disabling this only reports the
    /// condition, matching older converters.
    pub correct_hardware_bug: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            correct_hardware_bug: true,
        }
    }
}

impl EncodeOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
