use tracing::{trace, warn};

use crate::color::Color;
use crate::palette::{LockMap, Palette};
use crate::sampler::RankedColorList;

/// Merge a fresh ranking into the next palette.
///
/// Each slot is filled from the first available tier:
/// 1. the locked color for that slot,
/// 2. the next unused entry of `ranked`, walking unlocked slots in order,
/// 3. the color at the same slot in `previous`,
/// 4. `fallback`.
///
/// The result always has exactly `palette_size` colors.
pub fn reconcile(
    ranked: &RankedColorList,
    locks: &LockMap,
    previous: &Palette,
    palette_size: usize,
    fallback: Color,
) -> Palette {
    let mut slots: Vec<Option<Color>> = vec![None; palette_size];

    for (slot, color) in locks.iter() {
        match slots.get_mut(slot) {
            Some(s) => *s = Some(color),
            None => warn!(slot, palette_size, "ignoring lock outside palette"),
        }
    }

    let mut fresh = ranked.colors();
    for s in slots.iter_mut().filter(|s| s.is_none()) {
        match fresh.next() {
            Some(color) => *s = Some(color),
            None => break,
        }
    }

    let colors: Vec<Color> = slots
        .into_iter()
        .enumerate()
        .map(|(i, s)| s.or_else(|| previous.get(i)).unwrap_or(fallback))
        .collect();

    trace!(
        locked = locks.len(),
        ranked = ranked.len(),
        previous = previous.len(),
        "reconciled palette"
    );

    Palette::from_colors(colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PALETTE_SIZE;
    use crate::sampler::RankedColor;

    fn ranked(colors: &[(u8, u8, u8, u64)]) -> RankedColorList {
        colors
            .iter()
            .map(|&(r, g, b, count)| RankedColor {
                color: Color::new(r, g, b),
                count,
            })
            .collect()
    }

    fn gray(v: u8) -> Color {
        Color::new(v, v, v)
    }

    #[test]
    fn lock_fills_around_ranked() {
        let ranked = ranked(&[(10, 10, 10, 500), (20, 20, 20, 300), (30, 30, 30, 200)]);
        let locks: LockMap = [(1, Color::new(255, 0, 0))].into_iter().collect();
        let previous = Palette::from_colors(vec![gray(0); 5]);

        let out = reconcile(&ranked, &locks, &previous, PALETTE_SIZE, Color::FALLBACK);

        assert_eq!(
            out.as_slice(),
            &[gray(10), Color::new(255, 0, 0), gray(20), gray(30), gray(0)]
        );
    }

    #[test]
    fn excess_ranked_is_ignored() {
        let ranked = ranked(&[
            (1, 1, 1, 9),
            (2, 2, 2, 8),
            (3, 3, 3, 7),
            (4, 4, 4, 6),
            (5, 5, 5, 5),
            (6, 6, 6, 4),
        ]);
        let out = reconcile(&ranked, &LockMap::new(), &Palette::empty(), 5, Color::FALLBACK);
        assert_eq!(out.as_slice(), &[gray(1), gray(2), gray(3), gray(4), gray(5)]);
    }

    #[test]
    fn partial_previous_then_fallback() {
        let previous = Palette::from_colors(vec![gray(7), gray(8)]);
        let out = reconcile(
            &RankedColorList::default(),
            &LockMap::new(),
            &previous,
            5,
            Color::FALLBACK,
        );
        assert_eq!(
            out.as_slice(),
            &[gray(7), gray(8), gray(200), gray(200), gray(200)]
        );
    }

    #[test]
    fn all_locked_consumes_nothing() {
        let locks: LockMap = (0..5).map(|i| (i, gray(100 + i as u8))).collect();
        let ranked = ranked(&[(1, 1, 1, 1)]);
        let out = reconcile(&ranked, &locks, &Palette::empty(), 5, Color::FALLBACK);
        assert_eq!(out.as_slice(), &[gray(100), gray(101), gray(102), gray(103), gray(104)]);
    }

    #[test]
    fn out_of_range_lock_is_dropped() {
        let locks: LockMap = [(9, Color::WHITE)].into_iter().collect();
        let out = reconcile(
            &RankedColorList::default(),
            &locks,
            &Palette::empty(),
            5,
            Color::FALLBACK,
        );
        assert_eq!(out.as_slice(), &[Color::FALLBACK; 5]);
    }

    #[test]
    fn locked_color_may_repeat_in_ranked_slots() {
        let ranked = ranked(&[(9, 9, 9, 3), (8, 8, 8, 2)]);
        let locks: LockMap = [(0, gray(9))].into_iter().collect();
        let out = reconcile(&ranked, &locks, &Palette::empty(), 3, Color::FALLBACK);
        assert_eq!(out.as_slice(), &[gray(9), gray(9), gray(8)]);
    }
}
