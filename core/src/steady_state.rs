use crate::metrics::{normalized_power, variability_index};
use crate::smoothing::max_rolling_mean;
use crate::timeseries::TimeSeries;
use crate::types::{ActivityId, SteadyEffort};

/// Beste stabile vindu i én økt.
///
/// For hver vinduslengde: finn posisjonen med høyest glidende snitt, regn NP over
/// akkurat det utsnittet og VI = NP / snitt. Godtas kun med VI ≤ `max_vi`.
/// Av de godtatte beholdes vinduet med høyest snitteffekt.
pub fn best_steady_window(
    activity_id: ActivityId,
    ts: &TimeSeries,
    windows: &[usize],
    max_vi: f64,
) -> Option<SteadyEffort> {
    if !ts.has_power() {
        return None;
    }
    let watts = ts.power_watts();

    let mut best: Option<SteadyEffort> = None;
    for &window in windows {
        // for kort økt for vinduet
        let Some((start, avg)) = max_rolling_mean(&watts, window) else {
            continue;
        };
        let segment = &watts[start..start + window];
        let np = normalized_power(segment);
        let Some(vi) = variability_index(np, avg) else {
            continue;
        };
        if vi > max_vi {
            log::debug!(
                "activity {activity_id}: {window}s window rejected (vi={vi:.3}, avg={avg:.1} W)"
            );
            continue;
        }
        let candidate = SteadyEffort {
            power: avg,
            duration_seconds: window,
            activity_id,
            variability_index: vi,
        };
        best = pick_better(best, Some(candidate));
    }
    best
}

/// Strengt høyere effekt vinner; ved likhet beholdes `current`.
pub fn pick_better(current: Option<SteadyEffort>, candidate: Option<SteadyEffort>) -> Option<SteadyEffort> {
    match (current, candidate) {
        (Some(c), Some(n)) if n.power > c.power => Some(n),
        (Some(c), _) => Some(c),
        (None, n) => n,
    }
}

/// Beste stabile innsats over aktiviteter i gitt rekkefølge.
pub fn find_best_steady_state<'a, I>(activities: I, windows: &[usize], max_vi: f64) -> Option<SteadyEffort>
where
    I: IntoIterator<Item = (ActivityId, &'a TimeSeries)>,
{
    activities.into_iter().fold(None, |best, (id, ts)| {
        pick_better(best, best_steady_window(id, ts, windows, max_vi))
    })
}
