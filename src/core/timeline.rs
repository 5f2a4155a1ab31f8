//! Daily count of concurrently active activities.

use crate::ingest::Activity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of activities active on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DailyCount {
    /// Serialised as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub count: usize,
}

impl DailyCount {
    pub fn new(date: NaiveDate, count: usize) -> Self {
        Self { date, count }
    }
}

/// The calendar day after `day`, or `None` past the representable range.
pub fn next_day(day: NaiveDate) -> Option<NaiveDate> {
    day.succ_opt()
}

/// Every day from `first` to `last` inclusive.
pub fn days_between(first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(first), |day| next_day(*day)).take_while(move |day| *day <= last)
}

/// Build the daily series.
///
/// Only activities with both dates take part. The series runs from the
/// earliest date to the latest date seen on any of them (start or end), and
/// an activity counts on day `d` when `start <= d <= end` at day granularity.
pub fn compute_active_counts(activities: &[Activity]) -> Vec<DailyCount> {
    let spans: Vec<(NaiveDate, NaiveDate)> = activities
        .iter()
        .filter_map(|a| Some((a.start?.date(), a.end?.date())))
        .collect();

    let bounds = spans.iter().flat_map(|&(start, end)| [start, end]);
    let (Some(first), Some(last)) = (bounds.clone().min(), bounds.max()) else {
        return Vec::new();
    };

    let counts: Vec<DailyCount> = days_between(first, last)
        .map(|day| {
            let count = spans
                .iter()
                .filter(|&&(start, end)| start <= day && day <= end)
                .count();
            DailyCount::new(day, count)
        })
        .collect();

    tracing::debug!(
        days = counts.len(),
        activities = spans.len(),
        %first,
        %last,
        "Computed daily active counts"
    );

    counts
}
