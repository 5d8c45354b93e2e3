//! Numerical properties of the bucketing and moving-average stages,
//! exercised through the public core API.

use ledgertrend_core::{
    daily_series, ema, enrich, normalize, resample, sma, wma, Granularity, RawSalesRecord,
};

fn raw(date: &str, order: &str, amount: f64) -> RawSalesRecord {
    RawSalesRecord {
        date_value: date.to_owned(),
        order_id: order.to_owned(),
        amount,
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn worked_example_five_days_window_three() {
    // Amounts 10..50 over five consecutive days.
    let rows: Vec<RawSalesRecord> = (0..5)
        .map(|i| raw(&format!("2024-01-0{}", i + 1), &format!("O-{i}"), (i as f64 + 1.0) * 10.0))
        .collect();

    let (clean, _) = normalize(&rows).expect("normalize");
    let daily = daily_series(&clean).expect("daily").series;
    let totals = daily.totals();

    let simple = sma(&totals, 3);
    assert_eq!(simple[0], None);
    assert_eq!(simple[1], None);
    assert_close(simple[2].unwrap(), 20.0);
    assert_close(simple[3].unwrap(), 30.0);
    assert_close(simple[4].unwrap(), 40.0);

    let weighted = wma(&totals, 3);
    assert_close(weighted[2].unwrap(), 140.0 / 6.0); // 23.33
    let exponential = ema(&totals, 3);
    let expected_ema = [10.0, 15.0, 22.5, 31.25, 40.625];
    for (value, expected) in exponential.iter().zip(expected_ema) {
        assert_close(value.unwrap(), expected);
    }
}

#[test]
fn daily_totals_conserve_the_clean_amount_sum() {
    let rows = vec![
        raw("2024-02-01", "A-1", 12.5),
        raw("2024-02-01", "A-2", 7.5),
        raw("2024-02-09", "A-3", 30.0),
        raw("2024-02-20", "A-4", 50.0),
        raw("2024-02-20", "A-4", 50.0), // duplicate, dropped
        raw("2024-02-21", "A-5", -10.0), // refund, dropped
    ];

    let (clean, report) = normalize(&rows).expect("normalize");
    assert_eq!(report.dropped_duplicates, 1);
    assert_eq!(report.dropped_non_positive, 1);
    let clean_sum: f64 = clean.iter().map(|record| record.amount).sum();

    let daily = daily_series(&clean).expect("daily").series;
    let daily_sum: f64 = daily.totals().iter().sum();
    assert_close(daily_sum, clean_sum);

    for granularity in [Granularity::Week, Granularity::Month] {
        let period_sum: f64 = resample(&daily, granularity).totals().iter().sum();
        assert_close(period_sum, daily_sum);
    }
}

#[test]
fn ema_recursion_holds_at_every_position() {
    let values: Vec<f64> = (0..40).map(|i| ((i * 37) % 11) as f64 + 0.25).collect();
    let window = 7;
    let alpha = 2.0 / (window as f64 + 1.0);

    let result = ema(&values, window);
    assert_close(result[0].unwrap(), values[0]);
    for i in 1..values.len() {
        let expected = alpha * values[i] + (1.0 - alpha) * result[i - 1].unwrap();
        assert_close(result[i].unwrap(), expected);
    }
}

#[test]
fn sma_running_sum_agrees_with_direct_means() {
    let values: Vec<f64> = (0..30).map(|i| ((i * 13) % 17) as f64).collect();
    let window = 5;

    let result = sma(&values, window);
    for i in 0..values.len() {
        if i + 1 < window {
            assert_eq!(result[i], None);
        } else {
            let direct: f64 =
                values[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
            assert_close(result[i].unwrap(), direct);
        }
    }
}

#[test]
fn window_one_makes_all_three_statistics_the_raw_series() {
    let values = [3.0, 1.0, 4.0, 1.5, 9.0];
    let simple = sma(&values, 1);
    let weighted = wma(&values, 1);
    let exponential = ema(&values, 1);
    for (i, &value) in values.iter().enumerate() {
        assert_close(simple[i].unwrap(), value);
        assert_close(weighted[i].unwrap(), value);
        assert_close(exponential[i].unwrap(), value);
    }
}

#[test]
fn indicator_columns_never_collide_across_granularities() {
    let rows = vec![raw("2024-01-01", "A-1", 10.0), raw("2024-03-15", "A-2", 20.0)];
    let (clean, _) = normalize(&rows).expect("normalize");
    let daily = daily_series(&clean).expect("daily").series;

    let mut names = Vec::new();
    for granularity in Granularity::ALL {
        let table = enrich(&resample(&daily, granularity), &[2, 4]);
        names.extend(table.columns.into_iter().map(|column| column.name));
    }

    let mut deduped = names.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), names.len());
}
