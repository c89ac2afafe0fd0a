//! Representative color palettes from images, with lockable swatches.
//!
//! An extraction samples random pixels, ranks the exact colors it saw, and
//! reconciles the ranking with the user's locked slots and the previous
//! palette. See [`extract`].

pub mod color;
pub mod config;
pub mod error;
pub mod loader;
pub mod palette;
pub mod pixels;
pub mod reconcile;
pub mod sampler;
pub mod session;
pub mod wasm;

pub use crate::color::Color;
pub use crate::config::{ExtractConfig, MAX_PALETTE_SIZE};
pub use crate::error::{Error, LoadError, PaletteError, ParseColorError, Result};
pub use crate::palette::{LockMap, PALETTE_SIZE, Palette};
pub use crate::pixels::PixelBuffer;
pub use crate::reconcile::reconcile;
pub use crate::sampler::{RankedColor, RankedColorList, SAMPLE_SIZE, SampleSource, sample};
pub use crate::session::PaletteSession;

/// One full extraction: sample `pixels`, then reconcile against `locks`
/// and `previous`.
pub fn extract<S: SampleSource + ?Sized>(
    pixels: &PixelBuffer,
    locks: &LockMap,
    previous: &Palette,
    config: &ExtractConfig,
    source: &mut S,
) -> Result<Palette> {
    config.validate()?;
    let ranked = sample(pixels, config.sample_size, source)?;
    Ok(reconcile(
        &ranked,
        locks,
        previous,
        config.palette_size,
        config.fallback,
    ))
}

/// Decode an encoded image and extract a fresh palette from it.
#[cfg(not(target_arch = "wasm32"))]
pub fn extract_palette_bytes<S: SampleSource + ?Sized>(
    input: &[u8],
    config: &ExtractConfig,
    source: &mut S,
) -> std::result::Result<Palette, Error> {
    let pixels = loader::load_upload(input, None)?;
    let palette = extract(&pixels, &LockMap::new(), &Palette::empty(), config, source)?;
    Ok(palette)
}
