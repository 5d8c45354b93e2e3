//! Moving-average engine: SMA, WMA, and EMA over a bucketed series.
//!
//! All three statistics are computed per configured window size. SMA and WMA
//! are undefined for the first `window - 1` positions and carry `None`
//! there; EMA is recursive over the whole series from its first value and
//! has no null prefix. Nulls are represented as `Option<f64>`, never NaN, so
//! comparisons stay exact.

use serde::Serialize;

use crate::domain::{Granularity, LedgerDate, SalesSeries};

/// The moving-average families the engine computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MovingStat {
    Sma,
    Wma,
    Ema,
}

impl MovingStat {
    pub const ALL: [Self; 3] = [Self::Sma, Self::Wma, Self::Ema];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sma => "sma",
            Self::Wma => "wma",
            Self::Ema => "ema",
        }
    }
}

/// Deterministic output column name for a (statistic, window, granularity)
/// triple, e.g. `sma_7day` or `wma_4week`. Unique windows guarantee unique
/// names.
pub fn column_name(stat: MovingStat, window: usize, granularity: Granularity) -> String {
    format!("{}_{}{}", stat.as_str(), window, granularity.as_str())
}

/// Simple moving average with a running-sum sliding window.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    debug_assert!(window > 0, "window sizes are validated at configuration");
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, &value) in values.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= values[i - window];
        }
        if i + 1 >= window {
            out.push(Some(sum / window as f64));
        } else {
            out.push(None);
        }
    }
    out
}

/// Linearly weighted moving average: weight k goes to the k-th-oldest point
/// in the window (oldest = 1, newest = `window`).
pub fn wma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    debug_assert!(window > 0, "window sizes are validated at configuration");
    let weight_sum = (window * (window + 1)) as f64 / 2.0;
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i + 1 < window {
            out.push(None);
            continue;
        }
        let start = i + 1 - window;
        let weighted: f64 = values[start..=i]
            .iter()
            .enumerate()
            .map(|(k, &value)| value * (k + 1) as f64)
            .sum();
        out.push(Some(weighted / weight_sum));
    }
    out
}

/// Exponential moving average with smoothing factor α = 2 / (window + 1),
/// seeded from the first value and recursive over the entire series.
pub fn ema(values: &[f64], window: usize) -> Vec<Option<f64>> {
    debug_assert!(window > 0, "window sizes are validated at configuration");
    let alpha = 2.0 / (window as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut previous: Option<f64> = None;
    for &value in values {
        let next = match previous {
            None => value,
            Some(prev) => alpha * value + (1.0 - alpha) * prev,
        };
        out.push(Some(next));
        previous = Some(next);
    }
    out
}

/// One computed indicator column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// A bucketed series extended with one column per (statistic, window) pair.
/// Computed once per run and never mutated after export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorTable {
    pub granularity: Granularity,
    pub dates: Vec<LedgerDate>,
    pub sales: Vec<f64>,
    pub columns: Vec<IndicatorColumn>,
}

/// Compute every configured indicator column over a series. Windows are
/// processed independently; an empty windows list yields the base series
/// with zero indicator columns. Windows longer than the series are allowed
/// and simply produce all-null SMA/WMA columns.
pub fn enrich(series: &SalesSeries, windows: &[usize]) -> IndicatorTable {
    let totals = series.totals();
    let mut columns = Vec::with_capacity(windows.len() * MovingStat::ALL.len());
    for &window in windows {
        for stat in MovingStat::ALL {
            let values = match stat {
                MovingStat::Sma => sma(&totals, window),
                MovingStat::Wma => wma(&totals, window),
                MovingStat::Ema => ema(&totals, window),
            };
            columns.push(IndicatorColumn {
                name: column_name(stat, window, series.granularity),
                values,
            });
        }
    }

    IndicatorTable {
        granularity: series.granularity,
        dates: series.points.iter().map(|point| point.date).collect(),
        sales: totals,
        columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeriesPoint;

    fn series(values: &[f64]) -> SalesSeries {
        let mut date = LedgerDate::parse("2024-01-01").expect("date");
        let mut points = Vec::new();
        for &total in values {
            points.push(SeriesPoint { date, total });
            date = date.next_day().expect("next day");
        }
        SalesSeries::new(Granularity::Day, points)
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("value must be present");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn sma_matches_worked_example() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        let result = sma(&values, 3);
        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert_close(result[2], 20.0);
        assert_close(result[3], 30.0);
        assert_close(result[4], 40.0);
    }

    #[test]
    fn wma_weights_favor_recent_points() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        let result = wma(&values, 3);
        assert_eq!(result[1], None);
        // (10*1 + 20*2 + 30*3) / 6
        assert_close(result[2], 140.0 / 6.0);
        assert_close(result[3], 200.0 / 6.0);
        assert_close(result[4], 260.0 / 6.0);
    }

    #[test]
    fn ema_recurses_from_the_first_value() {
        // window 3 gives alpha = 0.5
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        let result = ema(&values, 3);
        assert_close(result[0], 10.0);
        assert_close(result[1], 15.0);
        assert_close(result[2], 22.5);
        assert_close(result[3], 31.25);
        assert_close(result[4], 40.625);
    }

    #[test]
    fn window_one_collapses_sma_and_wma_to_the_raw_series() {
        let values = [4.0, 9.0, 2.5];
        let simple = sma(&values, 1);
        let weighted = wma(&values, 1);
        for (i, &value) in values.iter().enumerate() {
            assert_close(simple[i], value);
            assert_close(weighted[i], value);
        }
    }

    #[test]
    fn window_longer_than_series_yields_all_null_sma_and_wma() {
        let values = [1.0, 2.0];
        assert!(sma(&values, 5).iter().all(Option::is_none));
        assert!(wma(&values, 5).iter().all(Option::is_none));
        // EMA still covers every position.
        assert!(ema(&values, 5).iter().all(Option::is_some));
    }

    #[test]
    fn enrich_builds_three_columns_per_window() {
        let table = enrich(&series(&[10.0, 20.0, 30.0]), &[2, 3]);
        assert_eq!(table.columns.len(), 6);
        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["sma_2day", "wma_2day", "ema_2day", "sma_3day", "wma_3day", "ema_3day"]
        );
        for column in &table.columns {
            assert_eq!(column.values.len(), table.sales.len());
        }
    }

    #[test]
    fn enrich_with_no_windows_keeps_the_base_series() {
        let table = enrich(&series(&[10.0, 20.0]), &[]);
        assert!(table.columns.is_empty());
        assert_eq!(table.sales, vec![10.0, 20.0]);
        assert_eq!(table.dates.len(), 2);
    }
}
