//! Sprite encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_sprite`] - Encode tightly packed RGB pixels
//! - [`encode_bmp24`] - Encode pixels laid out like a 24-bit BMP surface
//!
//! # Example
//!
//! ```typescript
//! import { encode_sprite } from '@lynxsprite/wasm';
//!
//! const sprite = encode_sprite(pixels, 32, 16, true);
//! await writable.write(sprite.bytes());
//! const pens = sprite.palette();
//! ```

use crate::types::JsEncodedSprite;
use lynxsprite_core::{EncodeOptions, RawImage, SpriteEncoder};
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data into packed sprite rows.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data as a `Uint8Array` (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `correct_hardware_bug` - Pad rows ending in an odd byte (recommended: true)
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 3
/// - Width or height is zero
/// - The image has more than 16 distinct colors
/// - A packed row exceeds 255 bytes
#[wasm_bindgen]
pub fn encode_sprite(
    pixels: &[u8],
    width: u32,
    height: u32,
    correct_hardware_bug: bool,
) -> Result<JsEncodedSprite, JsValue> {
    let image = RawImage::packed_rgb(pixels, width, height).map_err(to_js_error)?;
    encode(&image, correct_hardware_bug)
}

/// Encode pixels stored blue, green, red with rows padded to 4 bytes.
///
/// Palette keys keep the blue-green-red order of the input.
#[wasm_bindgen]
pub fn encode_bmp24(
    pixels: &[u8],
    width: u32,
    height: u32,
    correct_hardware_bug: bool,
) -> Result<JsEncodedSprite, JsValue> {
    let image = RawImage::bmp24(pixels, width, height).map_err(to_js_error)?;
    encode(&image, correct_hardware_bug)
}

fn encode(image: &RawImage<'_>, correct_hardware_bug: bool) -> Result<JsEncodedSprite, JsValue> {
    let options = EncodeOptions {
        correct_hardware_bug,
    };
    let sprite = SpriteEncoder::new(options)
        .encode(image)
        .map_err(to_js_error)?;
    Ok(JsEncodedSprite::from_encoded(&sprite))
}

fn to_js_error(e: lynxsprite_core::EncodeError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
