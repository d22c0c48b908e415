// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Categorical fill palettes.

extern crate alloc;

use alloc::vec::Vec;

use peniko::Brush;
use peniko::color::palette::css;

const PALETTE: [peniko::Color; 8] = [
    css::CORNFLOWER_BLUE,
    css::ORANGE,
    css::MEDIUM_SEA_GREEN,
    css::CRIMSON,
    css::GOLDENROD,
    css::SLATE_BLUE,
    css::DARK_CYAN,
    css::HOT_PINK,
];

/// Returns a categorical fill palette of `count` brushes.
///
/// Colors come from named CSS colors and repeat if `count` exceeds the
/// palette length.
pub fn default_palette(count: usize) -> Vec<Brush> {
    (0..count)
        .map(|i| Brush::Solid(PALETTE[i % PALETTE.len()]))
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn palette_cycles_past_its_length() {
        let fills = default_palette(10);
        assert_eq!(fills.len(), 10);
        assert_eq!(fills[0], fills[8]);
        assert_ne!(fills[0], fills[1]);
    }
}
