//! Integration tests for purge detection on full-day series.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use metqc_detect::{DetectionConfig, detect_flat, detect_purges};
use metqc_interval::{Source, Variable};

fn day_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 8, 20)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 8, 20)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

/// 24 h at 60 s with an alternating signal and a constant stretch on
/// `[12:00, 12:08)` for both variables.
fn purge_day() -> (Vec<NaiveDateTime>, Vec<Option<f64>>, Vec<Option<f64>>) {
    let times: Vec<_> = (0..1440).map(|i| day_start() + TimeDelta::minutes(i)).collect();
    let in_purge = |t: NaiveDateTime| t >= at(12, 0) && t < at(12, 8);
    let temperature = times
        .iter()
        .enumerate()
        .map(|(i, &t)| Some(if in_purge(t) { 285.0 } else { 280.0 + (i % 2) as f64 }))
        .collect();
    let humidity = times
        .iter()
        .enumerate()
        .map(|(i, &t)| Some(if in_purge(t) { 75.0 } else { 70.0 + (i % 2) as f64 }))
        .collect();
    (times, temperature, humidity)
}

#[test]
fn scenario_day_yields_one_candidate_per_variable() {
    let (times, temperature, humidity) = purge_day();
    let out = detect_purges(&times, &temperature, &humidity, &DetectionConfig::default()).unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].variable(), Variable::Temperature);
    assert_eq!(out[1].variable(), Variable::Humidity);
    for iv in &out {
        assert_eq!(iv.start(), at(12, 0));
        assert_eq!(iv.end(), at(12, 8));
        assert_eq!(iv.source(), Source::Detected);
    }
}

#[test]
fn candidates_are_ordered_and_disjoint() {
    let (times, mut temperature, _) = purge_day();
    for i in 300..320 {
        temperature[i] = Some(281.5);
    }
    let out = detect_flat(&times, &temperature, Variable::Temperature, &DetectionConfig::default())
        .unwrap();
    assert_eq!(out.len(), 2);
    assert!(out[0].end() <= out[1].start());
    assert_eq!(out[0].start(), at(5, 0));
    assert_eq!(out[0].end(), at(5, 20));
}

#[test]
fn increasing_threshold_never_shrinks_flagged_samples() {
    let times: Vec<_> = (0..600).map(|i| day_start() + TimeDelta::minutes(i)).collect();
    // Slowly varying signal whose local spread sits around the thresholds.
    let temperature: Vec<_> = (0..600)
        .map(|i| Some(280.0 + 0.05 * ((i as f64) * 0.37).sin() + 0.02 * ((i * 7 % 11) as f64)))
        .collect();

    let flagged = |threshold: f64| {
        let cfg = DetectionConfig::new().with_temp_std_threshold(threshold);
        let ivs = detect_flat(&times, &temperature, Variable::Temperature, &cfg).unwrap();
        times.iter().filter(|&&t| ivs.iter().any(|iv| iv.contains(t))).count()
    };

    let mut previous = 0;
    for threshold in [0.01, 0.03, 0.05, 0.07, 0.1, 0.2, 1.0] {
        let n = flagged(threshold);
        assert!(n >= previous, "threshold {threshold}: {n} < {previous}");
        previous = n;
    }
    assert_eq!(previous, 600);
}

#[test]
fn low_temperatures_are_not_purges() {
    let times: Vec<_> = (0..60).map(|i| day_start() + TimeDelta::minutes(i)).collect();
    let temperature = vec![Some(200.0); 60];
    let humidity: Vec<_> = (0..60).map(|i| Some(60.0 + (i % 2) as f64)).collect();
    let out = detect_purges(&times, &temperature, &humidity, &DetectionConfig::default()).unwrap();
    assert!(out.is_empty());

    let cfg = DetectionConfig::new().with_low_temperature_threshold(None);
    let out = detect_purges(&times, &temperature, &humidity, &cfg).unwrap();
    assert_eq!(out.len(), 1);
}

#[test]
fn empty_series_is_not_an_error() {
    let out = detect_purges(&[], &[], &[], &DetectionConfig::default()).unwrap();
    assert!(out.is_empty());
}
