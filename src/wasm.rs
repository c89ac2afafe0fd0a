//! Browser bindings. Errors cross the boundary as plain message strings.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::color::Color;
use crate::config::ExtractConfig;
use crate::loader;
use crate::palette::{LockMap, Palette};
use crate::session::PaletteSession;

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js_array(items: Vec<String>) -> Array {
    let arr = Array::new();
    for s in items {
        arr.push(&JsValue::from_str(&s));
    }
    arr
}

/// Stateful extractor backing the palette UI.
#[wasm_bindgen]
pub struct PaletteExtractor {
    session: PaletteSession,
}

#[wasm_bindgen]
impl PaletteExtractor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<PaletteExtractor, JsValue> {
        let session = PaletteSession::new(ExtractConfig::default()).map_err(js_err)?;
        Ok(PaletteExtractor { session })
    }

    /// Validate, decode and extract a new upload. Clears all locks.
    pub fn load(&mut self, input: Vec<u8>, mime: String) -> Result<Array, JsValue> {
        let pixels = loader::load_upload(&input, Some(&mime)).map_err(js_err)?;
        let palette = self
            .session
            .load(pixels, &mut rand::rng())
            .map_err(js_err)?;
        Ok(to_js_array(palette.to_rgb_strings()))
    }

    pub fn refresh(&mut self) -> Result<Array, JsValue> {
        let palette = self.session.refresh(&mut rand::rng()).map_err(js_err)?;
        Ok(to_js_array(palette.to_rgb_strings()))
    }

    pub fn toggle_lock(&mut self, slot: usize) -> Result<bool, JsValue> {
        self.session.toggle_lock(slot).map_err(js_err)
    }

    pub fn is_locked(&self, slot: usize) -> bool {
        self.session.is_locked(slot)
    }

    /// Replace one swatch with a color given as `rgb(...)` or `#rrggbb`.
    pub fn set_color(&mut self, slot: usize, color: &str) -> Result<(), JsValue> {
        let color: Color = color.parse().map_err(js_err)?;
        self.session.set_color(slot, color).map_err(js_err)
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn rgb_strings(&self) -> Array {
        to_js_array(self.session.palette().to_rgb_strings())
    }

    pub fn hex_strings(&self) -> Array {
        to_js_array(self.session.palette().to_hex_strings())
    }

    /// Caption colors (`#000000` or `#ffffff`) readable on each swatch.
    pub fn text_colors(&self) -> Array {
        to_js_array(
            self.session
                .palette()
                .iter()
                .map(|c| c.contrast_text().to_hex_string())
                .collect(),
        )
    }
}

/// One-shot extraction without session state.
///
/// Returns `{ rgb: string[], hex: string[] }`.
#[wasm_bindgen]
pub fn extract_palette(input: Vec<u8>, n_colors: usize) -> Result<Object, JsValue> {
    let pixels = loader::load_upload(&input, None).map_err(js_err)?;
    let config = ExtractConfig::new().palette_size(n_colors);
    let palette: Palette = crate::extract(
        &pixels,
        &LockMap::new(),
        &Palette::empty(),
        &config,
        &mut rand::rng(),
    )
    .map_err(js_err)?;

    let result = Object::new();
    Reflect::set(
        &result,
        &JsValue::from_str("rgb"),
        &to_js_array(palette.to_rgb_strings()),
    )?;
    Reflect::set(
        &result,
        &JsValue::from_str("hex"),
        &to_js_array(palette.to_hex_strings()),
    )?;
    Ok(result)
}
