use ftpgraph_core::decoupling::{activity_decoupling, average_decoupling, average_decoupling_over};
use ftpgraph_core::TimeSeries;

const MIN_SAMPLES: usize = 3600;

fn ride(watts: f64, hr_first: f64, hr_second: f64, secs: usize) -> TimeSeries {
    let hr: Vec<f64> = (0..secs)
        .map(|i| if i < secs / 2 { hr_first } else { hr_second })
        .collect();
    TimeSeries::from_columns(vec![("power", vec![watts; secs]), ("heart_rate", hr)])
}

#[test]
fn flat_power_and_hr_gives_zero() {
    let ts = ride(200.0, 150.0, 150.0, 4000);
    let d = activity_decoupling(&ts, MIN_SAMPLES).unwrap();
    assert!(d.abs() < 1e-9, "d={d}");
}

#[test]
fn short_rides_do_not_qualify() {
    let ts = ride(200.0, 140.0, 150.0, 3599);
    assert_eq!(activity_decoupling(&ts, MIN_SAMPLES), None);
}

#[test]
fn rides_without_hr_or_power_do_not_qualify() {
    let no_hr = TimeSeries::from_columns(vec![("power", vec![200.0; 4000])]);
    let no_power = TimeSeries::from_columns(vec![("heart_rate", vec![140.0; 4000])]);
    assert_eq!(activity_decoupling(&no_hr, MIN_SAMPLES), None);
    assert_eq!(activity_decoupling(&no_power, MIN_SAMPLES), None);
}

#[test]
fn outliers_are_dropped_before_averaging() {
    // 35 % og −25 % er sensorfeil; grensene selv er også utenfor
    let avg = average_decoupling(vec![4.0, 6.0, 35.0, -25.0, 30.0, -20.0], -20.0, 30.0);
    assert!((avg - 5.0).abs() < 1e-12);
}

#[test]
fn nothing_qualifying_averages_to_zero() {
    assert_eq!(average_decoupling(Vec::<f64>::new(), -20.0, 30.0), 0.0);
    assert_eq!(average_decoupling(vec![50.0, -40.0], -20.0, 30.0), 0.0);
}

#[test]
fn average_over_rides() {
    let drift = ride(200.0, 140.0, 150.0, 3600); // ≈ 6.67 %
    let flat = ride(200.0, 150.0, 150.0, 3600); // 0 %
    let short = ride(200.0, 100.0, 180.0, 1800); // hoppes over

    let avg = average_decoupling_over(vec![&drift, &flat, &short], MIN_SAMPLES, -20.0, 30.0);
    let expected = (1.0 - 140.0 / 150.0) * 100.0 / 2.0;
    assert!((avg - expected).abs() < 1e-9, "avg={avg}");
}
