//! Indentation normalization.
//!
//! Derives a small set of discrete indent tiers from line left edges so
//! that paragraph structure survives OCR jitter, and maps each line onto a
//! rendered indent of two spaces per tier step.

/// Indent tiers in character-width units, sorted ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct IndentMap {
    tiers: Vec<u32>,
    base_left: f64,
}

/// Spaces emitted per tier step.
const SPACES_PER_LEVEL: usize = 2;

/// Two unit values closer than this collapse into one tier.
const MERGE_DISTANCE: u32 = 2;

impl IndentMap {
    /// Builds tiers from line left edges.
    ///
    /// `base_left` is the minimum left edge across all lines; `char_width`
    /// converts pixel offsets into character units.
    pub fn build(line_lefts: &[f64], base_left: f64, char_width: f64) -> Self {
        let mut units: Vec<u32> = line_lefts
            .iter()
            .map(|&left| Self::units_for(left, base_left, char_width))
            .collect();
        units.sort_unstable();
        units.dedup();

        // Collapse neighboring values within the merge distance, keeping
        // the first of each run. Small OCR jitter lands on a stable tier.
        let mut tiers: Vec<u32> = Vec::with_capacity(units.len());
        for u in units {
            match tiers.last() {
                Some(&prev) if u - prev <= MERGE_DISTANCE => {}
                _ => tiers.push(u),
            }
        }
        if tiers.is_empty() {
            tiers.push(0);
        }

        // Stored as-is; rounding here would make render-time units disagree
        // with the units the tiers were built from.
        Self { tiers, base_left }
    }

    fn units_for(left: f64, base_left: f64, char_width: f64) -> u32 {
        let offset = (left - base_left).max(0.0);
        let units = (offset / char_width.max(1.0)).round();
        if units < 1.0 { 0 } else { units as u32 }
    }

    /// Rendered indent for a line with the given left edge: snap to the
    /// nearest tier (ties to the lower tier) and emit two spaces per step.
    pub fn indent_for(&self, left: f64, char_width: f64) -> String {
        let units = Self::units_for(left, self.base_left, char_width);
        let mut best = 0usize;
        let mut best_dist = u32::MAX;
        for (i, &tier) in self.tiers.iter().enumerate() {
            let d = tier.abs_diff(units);
            if d < best_dist {
                best = i;
                best_dist = d;
            }
        }
        " ".repeat(SPACES_PER_LEVEL * best)
    }

    #[cfg(test)]
    pub(crate) fn tiers(&self) -> &[u32] {
        &self.tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jittered_lefts_collapse_to_tiers() {
        // Unit offsets 0, 1, 8, 9, 16: the 1 merges into the 0 tier, the 9
        // into the 8 tier, 16 stands alone.
        let lefts = [0.0, 10.0, 80.0, 90.0, 160.0];
        let map = IndentMap::build(&lefts, 0.0, 10.0);
        assert_eq!(map.tiers(), &[0, 8, 16]);
    }

    #[test]
    fn sub_character_offsets_floor_to_zero() {
        let map = IndentMap::build(&[0.0, 4.0], 0.0, 10.0);
        assert_eq!(map.tiers(), &[0]);
        assert_eq!(map.indent_for(4.0, 10.0), "");
    }

    #[test]
    fn fractional_base_left_keeps_units_consistent() {
        // base_left 4.6, char width 10: offsets 0 / 15 / 30 give units
        // 0 / 2 / 3, so the tiers are [0, 3] (the 2 merges into 0). The
        // middle line must resolve with the same offset arithmetic used at
        // build time; a base rounded to 5 would shift its units to 1 and
        // snap it to the wrong tier.
        let lefts = [4.6, 19.6, 34.6];
        let map = IndentMap::build(&lefts, 4.6, 10.0);
        assert_eq!(map.tiers(), &[0, 3]);
        assert_eq!(map.indent_for(19.6, 10.0), "  ");
        assert_eq!(map.indent_for(34.6, 10.0), "  ");
    }

    #[test]
    fn indent_renders_two_spaces_per_step() {
        let map = IndentMap::build(&[0.0, 80.0, 160.0], 0.0, 10.0);
        assert_eq!(map.indent_for(0.0, 10.0), "");
        assert_eq!(map.indent_for(82.0, 10.0), "  ");
        assert_eq!(map.indent_for(158.0, 10.0), "    ");
    }
}
