//! Calendar bucketing: daily grouping with gap-fill, weekly and monthly
//! resampling.

use std::collections::BTreeMap;

use crate::domain::{CleanRecord, Granularity, LedgerDate, SalesSeries, SeriesPoint};
use crate::error::PipelineError;

/// A freshly built daily series plus the number of calendar days that had to
/// be zero-filled to make it contiguous.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBuild {
    pub series: SalesSeries,
    pub zero_filled_days: usize,
}

/// Group clean records into one total per calendar day, then fill every date
/// in [min, max] that has no records with a zero total so the series has no
/// gaps.
pub fn daily_series(records: &[CleanRecord]) -> Result<DailyBuild, PipelineError> {
    let mut totals: BTreeMap<LedgerDate, f64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.date).or_insert(0.0) += record.amount;
    }

    let (Some((&first, _)), Some((&last, _))) =
        (totals.first_key_value(), totals.last_key_value())
    else {
        return Err(PipelineError::EmptyInput);
    };

    let observed_days = totals.len();
    let mut points = Vec::new();
    let mut current = first;
    loop {
        let total = totals.get(&current).copied().unwrap_or(0.0);
        points.push(SeriesPoint {
            date: current,
            total,
        });
        if current == last {
            break;
        }
        let Some(next) = current.next_day() else {
            break;
        };
        current = next;
    }

    let zero_filled_days = points.len() - observed_days;
    Ok(DailyBuild {
        series: SalesSeries::new(Granularity::Day, points),
        zero_filled_days,
    })
}

/// Resample the daily series into the requested granularity.
///
/// Weekly buckets are non-overlapping 7-day spans ending on Sunday; monthly
/// buckets are calendar months. Both are labeled by the bucket's period-end
/// date and sum the zero-filled daily totals inside them, so partial
/// boundary buckets carry whatever days fall inside the observed range.
pub fn resample(daily: &SalesSeries, granularity: Granularity) -> SalesSeries {
    if granularity == Granularity::Day {
        return daily.clone();
    }

    let mut buckets: BTreeMap<LedgerDate, f64> = BTreeMap::new();
    for point in &daily.points {
        let end = match granularity {
            Granularity::Week => point.date.week_end(),
            Granularity::Month => point.date.month_end(),
            Granularity::Day => unreachable!("handled above"),
        };
        *buckets.entry(end).or_insert(0.0) += point.total;
    }

    let points = buckets
        .into_iter()
        .map(|(date, total)| SeriesPoint { date, total })
        .collect();
    SalesSeries::new(granularity, points)
}
