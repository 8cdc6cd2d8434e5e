// core/src/critical_power.rs
use crate::error::{FtpError, FtpResult};
use crate::types::{CpModel, PowerCurvePoint};

/// Korteste varighet (sek) som brukes i CP-tilpasningen
pub const MIN_CP_DURATION_S: usize = 180;

/// 2-parameter CP-modell, linearisert: Arbeid(t) = CP·t + W′
///
/// Minste kvadraters regresjon av arbeid (P·t) mot t, med sentrerte summer:
/// CP = Σ(x−x̄)(y−ȳ) / Σ(x−x̄)², W′ = ȳ − CP·x̄.
///
/// Ingen plausibilitetssjekk av fortegn her.
pub fn fit_cp_model(curve: &[PowerCurvePoint]) -> FtpResult<CpModel> {
    let pts: Vec<(f64, f64)> = curve
        .iter()
        .filter(|p| p.duration_seconds >= MIN_CP_DURATION_S && p.best_average_power_watts > 0.0)
        .map(|p| {
            let t = p.duration_seconds as f64;
            (t, p.best_average_power_watts * t)
        })
        .collect();

    if pts.len() < 2 {
        return Err(FtpError::InsufficientData { usable_points: pts.len() });
    }

    let n = pts.len() as f64;
    let x_mean = pts.iter().map(|(x, _)| x).sum::<f64>() / n;
    let y_mean = pts.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in &pts {
        let dx = x - x_mean;
        sxx += dx * dx;
        sxy += dx * (y - y_mean);
    }

    // alle punkter på samme varighet – ingen helning å finne
    if sxx <= f64::EPSILON {
        return Err(FtpError::InsufficientData { usable_points: 1 });
    }

    let cp = sxy / sxx;
    let w_prime = y_mean - cp * x_mean;
    log::debug!("CP fit over {} points: cp={:.1} W, w'={:.0} J", pts.len(), cp, w_prime);

    Ok(CpModel { cp_watts: cp, w_prime_joules: w_prime })
}
