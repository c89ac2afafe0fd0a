use crate::color::Color;
use crate::error::{PaletteError, Result};
use crate::palette::PALETTE_SIZE;
use crate::sampler::SAMPLE_SIZE;

/// Largest palette an extraction will build.
pub const MAX_PALETTE_SIZE: usize = 256;

/// Tuning for one extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Random pixel draws per extraction.
    pub sample_size: usize,
    /// Swatches in the produced palette.
    pub palette_size: usize,
    /// Filler for slots that no lock, sample, or previous color covers.
    pub fallback: Color,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            sample_size: SAMPLE_SIZE,
            palette_size: PALETTE_SIZE,
            fallback: Color::FALLBACK,
        }
    }
}

impl ExtractConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample_size(mut self, n: usize) -> Self {
        self.sample_size = n;
        self
    }

    pub fn palette_size(mut self, n: usize) -> Self {
        self.palette_size = n;
        self
    }

    pub fn fallback(mut self, color: Color) -> Self {
        self.fallback = color;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_size == 0 {
            return Err(PaletteError::InvalidConfig("sample_size must be positive"));
        }
        if self.palette_size == 0 {
            return Err(PaletteError::InvalidConfig("palette_size must be positive"));
        }
        if self.palette_size > MAX_PALETTE_SIZE {
            return Err(PaletteError::InvalidConfig("palette_size exceeds MAX_PALETTE_SIZE"));
        }
        Ok(())
    }
}
