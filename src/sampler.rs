use std::collections::HashMap;
use std::collections::hash_map::Entry;

use rand::Rng;
use tracing::debug;

use crate::color::Color;
use crate::error::{PaletteError, Result};
use crate::pixels::PixelBuffer;

/// Number of random pixel draws per extraction.
pub const SAMPLE_SIZE: usize = 1000;

/// Source of uniformly random pixel indices.
///
/// Any [`rand::Rng`] works. Tests can implement it with a fixed sequence.
pub trait SampleSource {
    /// Return an index in `[0, len)`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng> SampleSource for R {
    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// One observed color and how many draws landed on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedColor {
    pub color: Color,
    pub count: u64,
}

/// Distinct sampled colors, most frequent first. Ties keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedColorList {
    entries: Vec<RankedColor>,
}

impl RankedColorList {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedColor> {
        self.entries.iter()
    }

    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.entries.iter().map(|e| e.color)
    }

    /// The first `n` colors, or all of them if there are fewer.
    pub fn top(&self, n: usize) -> Vec<Color> {
        self.colors().take(n).collect()
    }

    pub fn total_count(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }
}

impl FromIterator<RankedColor> for RankedColorList {
    /// Takes entries as already ranked.
    fn from_iter<I: IntoIterator<Item = RankedColor>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Draw `sample_size` pixels with replacement and rank the exact colors seen.
///
/// Cost is O(`sample_size`) whatever the image size. Two calls on the same
/// buffer may disagree; refresh relies on that.
pub fn sample<S: SampleSource + ?Sized>(
    pixels: &PixelBuffer,
    sample_size: usize,
    source: &mut S,
) -> Result<RankedColorList> {
    if pixels.is_empty() {
        return Err(PaletteError::InvalidInput("pixel buffer is empty"));
    }
    if sample_size == 0 {
        return Err(PaletteError::InvalidInput("sample size must be positive"));
    }

    let data = pixels.as_slice();
    let mut entries: Vec<RankedColor> = Vec::new();
    let mut slot_of: HashMap<Color, usize> = HashMap::new();

    for _ in 0..sample_size {
        let color = data[source.pick(data.len())];
        match slot_of.entry(color) {
            Entry::Occupied(e) => entries[*e.get()].count += 1,
            Entry::Vacant(e) => {
                e.insert(entries.len());
                entries.push(RankedColor { color, count: 1 });
            }
        }
    }

    // Stable sort keeps first-observation order among equal counts.
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    debug!(
        pixels = data.len(),
        sample_size,
        distinct = entries.len(),
        "sampled image colors"
    );

    Ok(RankedColorList { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Script(Vec<usize>, usize);

    impl SampleSource for Script {
        fn pick(&mut self, len: usize) -> usize {
            let i = self.0[self.1 % self.0.len()] % len;
            self.1 += 1;
            i
        }
    }

    fn buffer(colors: &[(u8, u8, u8)]) -> PixelBuffer {
        colors.iter().map(|&c| Color::from(c)).collect::<Vec<_>>().into()
    }

    #[test]
    fn empty_buffer_is_invalid() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            sample(&PixelBuffer::default(), SAMPLE_SIZE, &mut rng),
            Err(PaletteError::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_sample_size_is_invalid() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            sample(&buffer(&[(1, 1, 1)]), 0, &mut rng),
            Err(PaletteError::InvalidInput(_))
        ));
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let pixels = buffer(&[(1, 1, 1), (2, 2, 2), (3, 3, 3)]);
        // 2 seen first, then 3, then 1; counts 2/2/2.
        let mut script = Script(vec![1, 2, 0, 0, 2, 1], 0);
        let ranked = sample(&pixels, 6, &mut script).unwrap();
        assert_eq!(
            ranked.top(3),
            vec![Color::new(2, 2, 2), Color::new(3, 3, 3), Color::new(1, 1, 1)]
        );
    }

    #[test]
    fn higher_count_wins_over_first_seen() {
        let pixels = buffer(&[(1, 1, 1), (2, 2, 2)]);
        let mut script = Script(vec![0, 1, 1], 0);
        let ranked = sample(&pixels, 3, &mut script).unwrap();
        let counts: Vec<u64> = ranked.iter().map(|e| e.count).collect();
        assert_eq!(ranked.top(2), vec![Color::new(2, 2, 2), Color::new(1, 1, 1)]);
        assert_eq!(counts, vec![2, 1]);
    }

    #[test]
    fn near_colors_stay_distinct() {
        let pixels = buffer(&[(10, 10, 10), (10, 10, 11)]);
        let mut script = Script(vec![0, 1], 0);
        let ranked = sample(&pixels, 10, &mut script).unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked.total_count(), 10);
    }

    #[test]
    fn top_truncates() {
        let pixels = buffer(&[(1, 1, 1), (2, 2, 2), (3, 3, 3)]);
        let mut rng = StdRng::seed_from_u64(7);
        let ranked = sample(&pixels, SAMPLE_SIZE, &mut rng).unwrap();
        assert_eq!(ranked.top(2).len(), 2);
        assert_eq!(ranked.top(10).len(), ranked.len());
    }
}
