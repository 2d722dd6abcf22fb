use std::{ops::Range, path::Path};

use tracing::debug;

use crate::{
    locate,
    source::{Layout, Series, SourceError},
};

/// Daily and cumulative growing degree days above a base temperature.
///
/// The cumulative total is floored at zero: a cold spell never leaves a
/// deficit for later warm days to pay back.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowingDays {
    base: f64,
    degree_days: Vec<f64>,
    cumulative: Vec<f64>,
    peaks: Vec<f64>,
}

impl GrowingDays {
    /// `degrees` holds one daily average per day. Non-finite values are carried through as is.
    pub fn new(degrees: &[f64], base: f64) -> Self {
        let mut degree_days = Vec::with_capacity(degrees.len());
        let mut cumulative = Vec::with_capacity(degrees.len());

        let mut running = 0.0;
        for degree in degrees {
            let degree_day = degree - base;
            running += degree_day;
            if running < 0.0 {
                running = 0.0;
            }
            degree_days.push(degree_day);
            cumulative.push(running);
        }

        let peaks = locate::peaks(&cumulative);
        Self {
            base,
            degree_days,
            cumulative,
            peaks,
        }
    }

    pub fn from_series(series: &Series, base: f64) -> Self {
        Self::new(&series.values(), base)
    }

    /// Reads the daily averages at `path` as described by `layout`.
    /// Nothing is built if the file can't be read or a value doesn't parse.
    pub fn from_source(
        path: impl AsRef<Path>,
        base: f64,
        layout: &Layout,
    ) -> Result<Self, SourceError> {
        let series = Series::read(path, layout)?;
        let days = Self::from_series(&series, base);
        debug!(
            days = days.len(),
            total = days.total(),
            "accumulated degree days above {base}"
        );
        Ok(days)
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn degree_days(&self) -> &[f64] {
        &self.degree_days
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Cumulative total on the last day, 0 when there are no days.
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// First day (0-based) whose cumulative total is at least `target`.
    pub fn first_day_at_or_above(&self, target: f64) -> Option<usize> {
        locate::first_at_or_above(&self.peaks, target)
    }

    /// Same as [`Self::first_day_at_or_above`] but only looking at the days in `range`.
    /// The range is clamped to the available days.
    pub fn first_day_at_or_above_in(&self, range: Range<usize>, target: f64) -> Option<usize> {
        locate::first_in(&self.cumulative, range, target)
    }
}
