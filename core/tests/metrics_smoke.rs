use ftpgraph_core::metrics::{avg_hr, decoupling_pct, efficiency_factor, normalized_power, variability_index};

#[test]
fn np_of_constant_series_equals_value() {
    for v in [0.0, 123.4, 250.0] {
        for n in [30usize, 31, 600] {
            let np = normalized_power(&vec![v; n]);
            assert!((np - v).abs() < 1e-9, "v={v} n={n} np={np}");
        }
    }
}

#[test]
fn np_on_empty_is_zero() {
    assert_eq!(normalized_power(&[]), 0.0);
}

#[test]
fn vi_of_constant_effort_is_one() {
    let w = vec![220.0; 120];
    let vi = variability_index(normalized_power(&w), 220.0).unwrap();
    assert!((vi - 1.0).abs() < 1e-9);
    assert_eq!(variability_index(200.0, 0.0), None);
}

#[test]
fn decoupling_of_flat_series_is_zero() {
    let watts = vec![200.0; 3600];
    let hr = vec![Some(140.0); 3600];
    assert!(decoupling_pct(&watts, &hr).abs() < 1e-9);
}

#[test]
fn decoupling_positive_when_hr_drifts_up() {
    let watts = vec![200.0; 3600];
    let hr: Vec<Option<f64>> = (0..3600).map(|i| Some(if i < 1800 { 140.0 } else { 150.0 })).collect();
    let d = decoupling_pct(&watts, &hr);
    // EF1 = 200/140, EF2 = 200/150 → (1 − 140/150) · 100
    let expected = (1.0 - 140.0 / 150.0) * 100.0;
    assert!((d - expected).abs() < 1e-9, "d={d}");
}

#[test]
fn decoupling_zero_when_first_half_has_no_hr() {
    let watts = vec![200.0; 100];
    let hr: Vec<Option<f64>> = (0..100).map(|i| if i < 50 { None } else { Some(150.0) }).collect();
    assert_eq!(decoupling_pct(&watts, &hr), 0.0);
}

#[test]
fn avg_hr_skips_missing() {
    assert_eq!(avg_hr(&[Some(100.0), None, Some(110.0)]), Some(105.0));
    assert_eq!(avg_hr(&[None, None]), None);
    assert_eq!(efficiency_factor(&[200.0; 40], &[Some(0.0); 40]), 0.0);
}
