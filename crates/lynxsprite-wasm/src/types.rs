//! WASM-compatible wrapper types for encoded sprites.

use lynxsprite_core::EncodedSprite;
use wasm_bindgen::prelude::*;

/// An encoded sprite wrapper for JavaScript.
///
/// Holds the packed row records and the palette they index into. Records are
/// copied into JavaScript memory when accessed.
#[wasm_bindgen]
pub struct JsEncodedSprite {
    width: u32,
    height: u32,
    rows: Vec<Vec<u8>>,
    palette: Vec<u32>,
    corrected_rows: usize,
}

#[wasm_bindgen]
impl JsEncodedSprite {
    /// Get the sprite width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the sprite height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of row records (equals the height)
    #[wasm_bindgen(getter)]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total size of all row records in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Rows that were padded for the odd-terminal-byte defect
    #[wasm_bindgen(getter)]
    pub fn corrected_rows(&self) -> usize {
        self.corrected_rows
    }

    /// All row records concatenated, ready to be written as a sprite file.
    pub fn bytes(&self) -> Vec<u8> {
        self.rows.concat()
    }

    /// Row records as an array of `Uint8Array`, top row first.
    pub fn rows(&self) -> js_sys::Array {
        self.rows
            .iter()
            .map(|row| JsValue::from(js_sys::Uint8Array::from(row.as_slice())))
            .collect()
    }

    /// Palette as an array of packed 24-bit color keys, indexed by pen number.
    pub fn palette(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.palette).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsEncodedSprite {
    /// Create a JsEncodedSprite from a core EncodedSprite.
    pub(crate) fn from_encoded(sprite: &EncodedSprite) -> Self {
        let summary = sprite.summary();
        Self {
            width: sprite.width(),
            height: sprite.height(),
            rows: sprite.rows().iter().map(|r| r.as_bytes().to_vec()).collect(),
            palette: sprite.palette().colors().iter().map(|c| c.0).collect(),
            corrected_rows: summary.corrected_rows,
        }
    }

    #[cfg(test)]
    pub(crate) fn palette_keys(&self) -> &[u32] {
        &self.palette
    }
}
