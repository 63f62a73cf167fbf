//! Lynxsprite WASM - WebAssembly bindings for the sprite encoder
//!
//! This crate exposes the lynxsprite-core encoder to JavaScript/TypeScript
//! tooling, e.g. asset pipelines that run in the browser or under Node.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for encoded sprites
//! - `encode` - Sprite encoding bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { encode_sprite } from '@lynxsprite/wasm';
//!
//! await init();
//!
//! const sprite = encode_sprite(rgbPixels, width, height, true);
//! console.log(`${sprite.row_count} rows, ${sprite.byte_length} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod encode;
mod types;

pub use encode::{encode_bmp24, encode_sprite};
pub use types::JsEncodedSprite;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
