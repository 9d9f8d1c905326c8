//! Time-series model shared by every scenario.
//!
//! Covers the three data shapes the comparison pipeline works with: the
//! `(time, value)` pairs read from simulator device output, the
//! Celsius-to-Kelvin normalizer applied to FDS columns, and the fixed
//! sampling grid used to reconstruct the time axis of FireVox thermometer
//! traces (which carry no time column of their own).

use serde::Deserialize;

/// Offset added to convert degrees Celsius to Kelvin.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Unit of the temperature columns in a primary dataset.
///
/// FDS device files report degrees Celsius; SimScale probe exports are
/// already Kelvin. All charts are drawn in Kelvin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    /// Values are already Kelvin and pass through unchanged.
    #[default]
    Kelvin,
    /// Values are degrees Celsius and gain 273.15 during normalization.
    Celsius,
}

impl TemperatureUnit {
    /// Normalize a column to Kelvin. Identity for Kelvin input.
    pub fn to_kelvin(self, values: Vec<f64>) -> Vec<f64> {
        match self {
            TemperatureUnit::Kelvin => values,
            TemperatureUnit::Celsius => {
                values.into_iter().map(|v| v + KELVIN_OFFSET).collect()
            }
        }
    }
}

/// Fixed sampling grid of a FireVox thermometer trace.
///
/// The trace files hold one value per line and no timestamps; the axis is
/// reconstructed as `step * i` for `i` in `0..=count`, i.e. `count + 1`
/// evenly spaced points starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SampleGrid {
    /// Spacing between consecutive samples, in seconds.
    pub step: f64,
    /// Index of the last sample (inclusive); the grid has `count + 1` points.
    pub count: usize,
}

impl SampleGrid {
    pub const fn new(step: f64, count: usize) -> Self {
        Self { step, count }
    }

    /// Number of points on the grid, always `count + 1`.
    pub fn points(&self) -> usize {
        self.count + 1
    }

    /// Total spanned time, `step * count`.
    pub fn span(&self) -> f64 {
        self.step * self.count as f64
    }

    /// The reconstructed time axis `{step * i : i = 0..=count}`.
    pub fn axis(&self) -> Vec<f64> {
        (0..=self.count).map(|i| self.step * i as f64).collect()
    }
}

/// An ordered sequence of `(time, value)` samples for one measured quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub time: Vec<f64>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    /// Pair a time axis with its values. Both vectors must have equal length.
    pub fn new(time: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(time.len(), values.len());
        Self { time, values }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Samples as `(time, value)` pairs, in order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + Clone + '_ {
        self.time.iter().copied().zip(self.values.iter().copied())
    }

    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Linear interpolation of the series at time `t`.
    ///
    /// Assumes the time axis is sorted ascending. Returns `None` for an empty
    /// series or when `t` lies outside the recorded time range, so deviation
    /// statistics only cover the overlap of the two traces.
    pub fn sample_at(&self, t: f64) -> Option<f64> {
        let first = *self.time.first()?;
        let last = *self.time.last()?;
        if t < first || t > last {
            return None;
        }
        let idx = self.time.partition_point(|&x| x < t);
        if idx == 0 {
            return self.values.first().copied();
        }
        if idx >= self.time.len() {
            return self.values.last().copied();
        }
        let (t0, v0) = (self.time[idx - 1], self.values[idx - 1]);
        let (t1, v1) = (self.time[idx], self.values[idx]);
        if t1 == t0 {
            return Some(v1);
        }
        Some(v0 + (v1 - v0) * (t - t0) / (t1 - t0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn axis_has_count_plus_one_points() {
        let grid = SampleGrid::new(0.5, 3600);
        let axis = grid.axis();
        assert_eq!(axis.len(), 3601);
        assert_eq!(grid.points(), 3601);
        assert_eq!(axis[0], 0.0);
        assert_eq!(*axis.last().unwrap(), 1800.0);
    }

    #[test]
    fn conduction_axis_bounds() {
        // 0.1 s for 1000 steps: 1001 points ending at 100 s.
        let grid = SampleGrid::new(0.1, 1000);
        let axis = grid.axis();
        assert_eq!(axis.len(), 1001);
        assert_eq!(axis[0], 0.0);
        assert!((axis.last().unwrap() - 100.0).abs() < 1e-9);
        assert!((grid.span() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_count_grid_is_single_point() {
        let grid = SampleGrid::new(0.1, 0);
        assert_eq!(grid.axis(), vec![0.0]);
    }

    #[test]
    fn celsius_gains_offset() {
        let converted = TemperatureUnit::Celsius.to_kelvin(vec![20.0, 10.0, -273.15]);
        assert_eq!(converted, vec![293.15, 283.15, 0.0]);
    }

    #[test]
    fn kelvin_passes_through() {
        let values = vec![293.15, 283.15];
        assert_eq!(TemperatureUnit::Kelvin.to_kelvin(values.clone()), values);
    }

    #[test]
    fn sample_at_interpolates_between_points() {
        let series = TimeSeries::new(vec![0.0, 1.0, 2.0], vec![10.0, 20.0, 40.0]);
        assert_eq!(series.sample_at(0.0), Some(10.0));
        assert_eq!(series.sample_at(0.5), Some(15.0));
        assert_eq!(series.sample_at(1.5), Some(30.0));
        assert_eq!(series.sample_at(2.0), Some(40.0));
    }

    #[test]
    fn sample_at_outside_range_is_none() {
        let series = TimeSeries::new(vec![0.0, 1.0], vec![1.0, 2.0]);
        assert_eq!(series.sample_at(-0.1), None);
        assert_eq!(series.sample_at(1.1), None);
        assert_eq!(TimeSeries::new(vec![], vec![]).sample_at(0.0), None);
    }

    proptest! {
        #[test]
        fn conversion_is_identity_plus_offset(values in proptest::collection::vec(-200.0f64..2000.0, 0..64)) {
            let converted = TemperatureUnit::Celsius.to_kelvin(values.clone());
            prop_assert_eq!(converted.len(), values.len());
            for (v, k) in values.iter().zip(&converted) {
                prop_assert!((k - (v + KELVIN_OFFSET)).abs() < 1e-12);
            }
        }

        #[test]
        fn axis_length_and_endpoints(step in 0.01f64..10.0, count in 0usize..5000) {
            let grid = SampleGrid::new(step, count);
            let axis = grid.axis();
            prop_assert_eq!(axis.len(), count + 1);
            prop_assert_eq!(axis[0], 0.0);
            prop_assert!((axis.last().unwrap() - step * count as f64).abs() < 1e-9);
        }
    }
}
