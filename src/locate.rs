//! Finding the first day a cumulative total is reached.
//!
//! Cumulative degree days reset to zero and can shrink on cold days, so a
//! bisection straight over them may skip an earlier qualifying day. The
//! running maximum of the totals never decreases and first reaches a target
//! on the same day the totals do, so that is what gets bisected.

use std::ops::Range;

/// Running maximum of `values`. NaN entries never raise the peak.
pub(crate) fn peaks(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(f64::NEG_INFINITY, |peak, &value| {
            *peak = peak.max(value);
            Some(*peak)
        })
        .collect()
}

/// Leftmost index whose peak is `>= target`.
pub(crate) fn first_at_or_above(peaks: &[f64], target: f64) -> Option<usize> {
    // written negated so a NaN target is never reached
    let day = peaks.partition_point(|&peak| !(peak >= target));
    (day < peaks.len()).then_some(day)
}

/// Linear scan of `values[range]`, with `range` clamped to the slice.
pub(crate) fn first_in(values: &[f64], range: Range<usize>, target: f64) -> Option<usize> {
    let end = range.end.min(values.len());
    let start = range.start;
    if start >= end {
        return None;
    }
    values[start..end]
        .iter()
        .position(|&value| value >= target)
        .map(|offset| start + offset)
}
