use core::fmt;
use std::collections::BTreeMap;

use crate::color::Color;

/// Number of swatches in a palette.
pub const PALETTE_SIZE: usize = 5;

/// The swatches shown to the user, in slot order.
///
/// Empty until the first extraction and after a reset. Otherwise every slot
/// holds a color; the reconciler never hands out a partial palette.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_colors(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn get(&self, slot: usize) -> Option<Color> {
        self.colors.get(slot).copied()
    }

    /// Overwrite an existing slot. Returns `false` if the slot does not exist.
    pub(crate) fn set(&mut self, slot: usize, color: Color) -> bool {
        match self.colors.get_mut(slot) {
            Some(c) => {
                *c = color;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors.iter().copied()
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.colors
    }

    pub fn to_rgb_strings(&self) -> Vec<String> {
        self.iter().map(Color::to_rgb_string).collect()
    }

    pub fn to_hex_strings(&self) -> Vec<String> {
        self.iter().map(Color::to_hex_string).collect()
    }
}

impl From<Vec<Color>> for Palette {
    fn from(colors: Vec<Color>) -> Self {
        Self::from_colors(colors)
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.iter() {
            writeln!(f, "{} {}", c.to_rgb_string(), c.to_hex_string())?;
        }
        Ok(())
    }
}

/// Slots pinned by the user. A slot missing from the map is unlocked.
///
/// Only lock/unlock actions change this; extraction reads it but never
/// writes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockMap {
    slots: BTreeMap<usize, Color>,
}

impl LockMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin `color` at `slot`, returning the color previously locked there.
    pub fn lock(&mut self, slot: usize, color: Color) -> Option<Color> {
        self.slots.insert(slot, color)
    }

    pub fn unlock(&mut self, slot: usize) -> Option<Color> {
        self.slots.remove(&slot)
    }

    pub fn get(&self, slot: usize) -> Option<Color> {
        self.slots.get(&slot).copied()
    }

    pub fn is_locked(&self, slot: usize) -> bool {
        self.slots.contains_key(&slot)
    }

    /// Locked slots in increasing slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Color)> + '_ {
        self.slots.iter().map(|(&slot, &color)| (slot, color))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl FromIterator<(usize, Color)> for LockMap {
    fn from_iter<I: IntoIterator<Item = (usize, Color)>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}
