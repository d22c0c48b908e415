// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales for count charts.
//!
//! Two scales cover everything these charts need: a continuous linear scale
//! for counts and proportions, and a discrete band scale for category
//! positions. Specs hold domain and options; instantiating binds them to an
//! output range once the plot rectangle is known.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns round-valued tick positions for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to extend the domain to round tick values.
    pub nice: bool,
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
        }
    }

    /// Enables or disables nice-domain behavior.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Returns the effective domain after applying `nice` (if enabled).
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        if !self.nice {
            return self.domain;
        }
        let ticks = nice_ticks(self.domain.0, self.domain.1, tick_count);
        if ticks.len() >= 2 {
            (*ticks.first().unwrap(), *ticks.last().unwrap())
        } else {
            self.domain
        }
    }

    /// Returns the ticks of the resolved domain.
    pub fn ticks(&self, tick_count: usize) -> Vec<f64> {
        let (d0, d1) = self.resolved_domain(tick_count);
        nice_ticks(d0, d1, tick_count)
    }

    /// Instantiates a concrete scale using the resolved domain.
    pub fn instantiate(&self, range: (f64, f64), tick_count: usize) -> ScaleLinear {
        ScaleLinear::new(self.resolved_domain(tick_count), range)
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step = nice_step(span / count.max(1) as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A discrete band scale for categorical positions.
#[derive(Clone, Copy, Debug)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding in band units.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.max(0.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.count as f64;
        if n <= 0.0 {
            return 0.0;
        }
        let span = (r1 - r0).abs();
        let denom = n + self.padding_inner * (n - 1.0) + 2.0 * self.padding_outer;
        if denom == 0.0 { 0.0 } else { span / denom }
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the leading edge of the band at `index`.
    pub fn position(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let bw = self.band_width();
        let step = bw * (1.0 + self.padding_inner);
        let start = if r1 >= r0 { r0 } else { r1 };
        start + bw * self.padding_outer + step * index as f64
    }

    /// Returns the center of the band at `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.position(index) + 0.5 * self.band_width()
    }
}

/// Specification for a band scale (count + padding, no range yet).
#[derive(Clone, Copy, Debug)]
pub struct ScaleBandSpec {
    /// Number of bands.
    pub count: usize,
    /// Inner padding in band units.
    pub padding_inner: f64,
    /// Outer padding in band units.
    pub padding_outer: f64,
}

impl ScaleBandSpec {
    /// Creates a new band scale spec with default padding.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding in band units.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.max(0.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleBand {
        ScaleBand::new(range, self.count).with_padding(self.padding_inner, self.padding_outer)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn linear_maps_endpoints_to_range() {
        let s = ScaleLinear::new((0.0, 10.0), (100.0, 0.0));
        assert_eq!(s.map(0.0), 100.0);
        assert_eq!(s.map(10.0), 0.0);
        assert_eq!(s.map(5.0), 50.0);
    }

    #[test]
    fn degenerate_domain_maps_to_range_start() {
        let s = ScaleLinear::new((3.0, 3.0), (0.0, 10.0));
        assert_eq!(s.map(3.0), 0.0);
    }

    #[test]
    fn nice_domain_extends_to_round_ticks() {
        let spec = ScaleLinearSpec::new((0.0, 97.0)).with_nice(true);
        let (d0, d1) = spec.resolved_domain(5);
        assert_eq!(d0, 0.0);
        assert!(d1 >= 97.0);
        let ticks = spec.ticks(5);
        assert_eq!(ticks.first().copied(), Some(d0));
        assert_eq!(ticks.last().copied(), Some(d1));
    }

    #[test]
    fn band_positions_are_monotonic_and_within_range() {
        let band = ScaleBand::new((0.0, 100.0), 4);
        let xs: std::vec::Vec<f64> = (0..4).map(|i| band.position(i)).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]), "positions must increase");
        assert!(xs[0] >= 0.0);
        assert!(xs[3] + band.band_width() <= 100.0 + 1e-9);
    }

    #[test]
    fn band_center_is_half_a_band_past_the_edge() {
        let band = ScaleBand::new((0.0, 100.0), 2).with_padding(0.0, 0.0);
        assert_eq!(band.band_width(), 50.0);
        assert_eq!(band.center(0), 25.0);
        assert_eq!(band.center(1), 75.0);
    }
}
