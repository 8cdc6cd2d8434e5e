use ftpgraph_core::smoothing::{max_rolling_mean, rolling_means, RollingMean};

#[test]
fn rolling_mean_reports_only_full_windows() {
    let mut rm = RollingMean::new(3);
    assert_eq!(rm.push(1.0), None);
    assert_eq!(rm.push(2.0), None);
    assert_eq!(rm.push(3.0), Some(2.0));
    assert_eq!(rm.push(6.0), Some(11.0 / 3.0));
    assert!(rm.is_full());
}

#[test]
fn rolling_means_match_naive_windows() {
    let xs: Vec<f64> = (0..200).map(|i| ((i * 37) % 101) as f64).collect();
    let fast = rolling_means(&xs, 30);
    assert_eq!(fast.len(), xs.len() - 30 + 1);
    for (i, m) in fast.iter().enumerate() {
        let naive = xs[i..i + 30].iter().sum::<f64>() / 30.0;
        assert!((m - naive).abs() < 1e-9, "window {i}: {m} vs {naive}");
    }
}

#[test]
fn max_rolling_mean_prefers_earliest_on_ties() {
    let xs = [5.0, 5.0, 1.0, 5.0, 5.0];
    assert_eq!(max_rolling_mean(&xs, 2), Some((0, 5.0)));
}

#[test]
fn max_rolling_mean_none_when_too_short() {
    assert_eq!(max_rolling_mean(&[1.0, 2.0], 3), None);
    assert_eq!(max_rolling_mean(&[1.0, 2.0], 0), None);
    assert!(rolling_means(&[], 1).is_empty());
}
