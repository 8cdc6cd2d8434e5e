use crate::metrics::decoupling_pct;
use crate::timeseries::TimeSeries;

/// Decoupling (%) for én økt, eller None når den ikke kvalifiserer
/// (færre enn `min_samples` samples, eller mangler effekt/puls).
pub fn activity_decoupling(ts: &TimeSeries, min_samples: usize) -> Option<f64> {
    if ts.len() < min_samples {
        return None;
    }
    let hr = ts.heart_rate()?;
    if !ts.has_power() {
        return None;
    }
    Some(decoupling_pct(&ts.power_watts(), hr))
}

/// Verdier utenfor det åpne intervallet (min, max) regnes som sensorfeil.
pub fn is_plausible(d: f64, min_pct: f64, max_pct: f64) -> bool {
    d > min_pct && d < max_pct
}

/// Snitt av plausible decoupling-verdier; 0 når ingen kvalifiserer.
pub fn average_decoupling<I>(values: I, min_pct: f64, max_pct: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, n) = values
        .into_iter()
        .filter(|d| is_plausible(*d, min_pct, max_pct))
        .fold((0.0f64, 0usize), |(s, n), d| (s + d, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Snitt-decoupling over aktiviteter.
pub fn average_decoupling_over<'a, I>(activities: I, min_samples: usize, min_pct: f64, max_pct: f64) -> f64
where
    I: IntoIterator<Item = &'a TimeSeries>,
{
    average_decoupling(
        activities
            .into_iter()
            .filter_map(|ts| activity_decoupling(ts, min_samples)),
        min_pct,
        max_pct,
    )
}
