use tracing::{debug, info};

use crate::color::Color;
use crate::config::ExtractConfig;
use crate::error::{PaletteError, Result};
use crate::extract;
use crate::palette::{LockMap, Palette};
use crate::pixels::PixelBuffer;
use crate::sampler::SampleSource;

/// Application state around the core: the loaded image, the palette on
/// screen, and the user's locks.
///
/// Locks survive [`refresh`](Self::refresh) and are cleared by
/// [`load`](Self::load) and [`reset`](Self::reset).
#[derive(Debug, Clone, Default)]
pub struct PaletteSession {
    config: ExtractConfig,
    pixels: Option<PixelBuffer>,
    palette: Palette,
    locks: LockMap,
}

impl PaletteSession {
    pub fn new(config: ExtractConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn locks(&self) -> &LockMap {
        &self.locks
    }

    pub fn has_image(&self) -> bool {
        self.pixels.is_some()
    }

    /// Take a new image and extract its palette from scratch.
    ///
    /// On failure the session keeps its previous state.
    pub fn load<S: SampleSource + ?Sized>(
        &mut self,
        pixels: PixelBuffer,
        source: &mut S,
    ) -> Result<&Palette> {
        let fresh = LockMap::new();
        let palette = extract(&pixels, &fresh, &Palette::empty(), &self.config, source)?;

        info!(pixels = pixels.len(), "loaded image");
        self.pixels = Some(pixels);
        self.locks = fresh;
        self.palette = palette;
        Ok(&self.palette)
    }

    /// Re-sample the current image, keeping locked slots.
    pub fn refresh<S: SampleSource + ?Sized>(&mut self, source: &mut S) -> Result<&Palette> {
        let pixels = self.pixels.as_ref().ok_or(PaletteError::NoImage)?;
        self.palette = extract(pixels, &self.locks, &self.palette, &self.config, source)?;
        debug!(locked = self.locks.len(), "refreshed palette");
        Ok(&self.palette)
    }

    /// Pin the color currently shown at `slot`.
    pub fn lock(&mut self, slot: usize) -> Result<Color> {
        self.check_slot(slot)?;
        let color = self.palette.get(slot).ok_or(PaletteError::EmptySlot(slot))?;
        self.locks.lock(slot, color);
        debug!(slot, %color, "locked slot");
        Ok(color)
    }

    pub fn unlock(&mut self, slot: usize) -> Result<Option<Color>> {
        self.check_slot(slot)?;
        let prev = self.locks.unlock(slot);
        debug!(slot, "unlocked slot");
        Ok(prev)
    }

    /// Flip the lock on `slot`. Returns whether it is now locked.
    pub fn toggle_lock(&mut self, slot: usize) -> Result<bool> {
        if self.locks.is_locked(slot) {
            self.unlock(slot)?;
            Ok(false)
        } else {
            self.lock(slot)?;
            Ok(true)
        }
    }

    pub fn is_locked(&self, slot: usize) -> bool {
        self.locks.is_locked(slot)
    }

    /// Direct user edit of one swatch. A locked slot stays locked on the new color.
    pub fn set_color(&mut self, slot: usize, color: Color) -> Result<()> {
        self.check_slot(slot)?;
        if !self.palette.set(slot, color) {
            return Err(PaletteError::EmptySlot(slot));
        }
        if self.locks.is_locked(slot) {
            self.locks.lock(slot, color);
        }
        debug!(slot, %color, "edited slot");
        Ok(())
    }

    /// Drop the image, the palette and every lock.
    pub fn reset(&mut self) {
        self.pixels = None;
        self.palette = Palette::empty();
        self.locks.clear();
        info!("session reset");
    }

    fn check_slot(&self, slot: usize) -> Result<()> {
        if slot >= self.config.palette_size {
            return Err(PaletteError::SlotOutOfRange {
                slot,
                size: self.config.palette_size,
            });
        }
        Ok(())
    }
}
