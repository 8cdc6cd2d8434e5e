use crate::smoothing::RollingMean;

/// NP-vindu (samples, ~30 s ved 1 Hz)
pub const NP_WINDOW: usize = 30;

/// Normalized Power:
/// 1) 30s rullende snitt av kraft
/// 2) ^4-middel over fulle vinduer
/// 3) fjerderot
///
/// Tom serie eller kortere enn vinduet gir 0.
pub fn normalized_power(watts: &[f64]) -> f64 {
    let mut rm = RollingMean::new(NP_WINDOW);
    let mut fourth_sum = 0.0f64;
    let mut n = 0usize;
    for &w in watts {
        if let Some(m) = rm.push(w) {
            fourth_sum += m.powi(4);
            n += 1;
        }
    }
    if n == 0 {
        return 0.0;
    }
    (fourth_sum / n as f64).powf(0.25)
}

pub fn avg_power(watts: &[f64]) -> Option<f64> {
    if watts.is_empty() {
        None
    } else {
        Some(watts.iter().sum::<f64>() / watts.len() as f64)
    }
}

/// Snittpuls; samples uten puls hoppes over.
pub fn avg_hr(hr: &[Option<f64>]) -> Option<f64> {
    let mut sum = 0.0f64;
    let mut cnt = 0usize;
    for h in hr.iter().flatten() {
        sum += h;
        cnt += 1;
    }
    if cnt == 0 { None } else { Some(sum / cnt as f64) }
}

/// VI = NP / AvgPower
pub fn variability_index(np: f64, avg_p: f64) -> Option<f64> {
    if avg_p > 0.0 { Some(np / avg_p) } else { None }
}

/// EF = NP / snittpuls (0 når pulsen mangler eller er ≤ 0)
pub fn efficiency_factor(watts: &[f64], hr: &[Option<f64>]) -> f64 {
    match avg_hr(hr) {
        Some(h) if h > 0.0 => normalized_power(watts) / h,
        _ => 0.0,
    }
}

/// Aerob decoupling (%) – del økta på midten (gulv), EF pr halvdel,
/// (EF1 − EF2) / EF1 × 100. Positiv verdi = pulsen drifter opp mot effekten.
pub fn decoupling_pct(watts: &[f64], hr: &[Option<f64>]) -> f64 {
    let n = watts.len().min(hr.len());
    let mid = n / 2;

    let ef1 = efficiency_factor(&watts[..mid], &hr[..mid]);
    let ef2 = efficiency_factor(&watts[mid..n], &hr[mid..n]);

    if ef1 <= 0.0 {
        return 0.0;
    }
    (ef1 - ef2) / ef1 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn np_of_short_series_is_zero() {
        assert_eq!(normalized_power(&[250.0; 29]), 0.0);
        assert_eq!(normalized_power(&[]), 0.0);
    }

    #[test]
    fn np_weights_surges_above_average() {
        // 60 s @ 100 W + 60 s @ 300 W
        let mut w = vec![100.0; 60];
        w.extend(vec![300.0; 60]);
        let np = normalized_power(&w);
        assert!(np > avg_power(&w).unwrap(), "np={np}");
    }

    #[test]
    fn ef_without_hr_is_zero() {
        assert_eq!(efficiency_factor(&[200.0; 60], &[None; 60]), 0.0);
    }
}
