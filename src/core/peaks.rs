//! Peak-day selection over a daily count series.
//!
//! A peak is a day whose count reaches a threshold read off the series
//! sorted by count, descending: the count at index `floor(len * p / 100)`.
//! An index past the end gives threshold 0, i.e. every day.

use crate::core::timeline::{next_day, DailyCount};
use serde::{Deserialize, Serialize};

/// Percentile used by the fixed server-side rule.
pub const DEFAULT_PEAK_PERCENTILE: f64 = 10.0;

/// Threshold count for the top `percentile` percent of days.
pub fn peak_threshold(counts: &[DailyCount], percentile: f64) -> usize {
    let mut sorted: Vec<usize> = counts.iter().map(|c| c.count).collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let fraction = percentile.clamp(0.0, 100.0) / 100.0;
    let index = (sorted.len() as f64 * fraction).floor() as usize;
    sorted.get(index).copied().unwrap_or(0)
}

/// Fixed top-10% rule: every day at or above the threshold, no consolidation.
pub fn detect_top_decile(counts: &[DailyCount]) -> Vec<DailyCount> {
    if counts.is_empty() {
        return Vec::new();
    }
    let threshold = peak_threshold(counts, DEFAULT_PEAK_PERCENTILE);
    counts
        .iter()
        .filter(|c| c.count >= threshold)
        .copied()
        .collect()
}

/// Configurable rule.
///
/// `percentile == 0` selects every day tied for the maximum. Any other value
/// applies the sorted-index threshold and then collapses each plateau of
/// consecutive peak days with an identical count to its middle day
/// (index `len / 2` within the run).
pub fn detect_peaks(counts: &[DailyCount], percentile: f64) -> Vec<DailyCount> {
    let Some(max) = counts.iter().map(|c| c.count).max() else {
        return Vec::new();
    };

    if percentile <= 0.0 {
        return counts.iter().filter(|c| c.count == max).copied().collect();
    }

    let threshold = peak_threshold(counts, percentile);
    consolidate_plateaus(counts, threshold)
}

/// Keep one representative per run of consecutive days at or above
/// `threshold` that share the same count.
pub fn consolidate_plateaus(counts: &[DailyCount], threshold: usize) -> Vec<DailyCount> {
    let mut peaks = Vec::new();
    let mut run: Vec<DailyCount> = Vec::new();

    for &day in counts {
        let continues = run.last().is_some_and(|prev| {
            prev.count == day.count && next_day(prev.date) == Some(day.date)
        });
        if !continues {
            if let Some(rep) = middle(&run) {
                peaks.push(rep);
            }
            run.clear();
        }
        if day.count >= threshold {
            run.push(day);
        }
    }
    if let Some(rep) = middle(&run) {
        peaks.push(rep);
    }

    peaks
}

fn middle(run: &[DailyCount]) -> Option<DailyCount> {
    run.get(run.len() / 2).copied()
}

/// A peak with its relative intensity among the selected peaks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedPeak {
    #[serde(flatten)]
    pub peak: DailyCount,
    /// 0.0 for the lowest selected peak, 1.0 for the highest.
    pub ratio: f64,
    /// HSL hue in degrees, 0 (red) for the highest down to 120 (green).
    pub hue: f64,
}

/// Rank peaks against each other. A single peak, or peaks that all share
/// one count, rank at 1.0.
pub fn rank_peaks(peaks: &[DailyCount]) -> Vec<RankedPeak> {
    let max = peaks.iter().map(|p| p.count).max().unwrap_or(0);
    let min = peaks.iter().map(|p| p.count).min().unwrap_or(0);

    peaks
        .iter()
        .map(|&peak| {
            let ratio = if max == min {
                1.0
            } else {
                (peak.count - min) as f64 / (max - min) as f64
            };
            RankedPeak {
                peak,
                ratio,
                hue: 120.0 * (1.0 - ratio),
            }
        })
        .collect()
}
