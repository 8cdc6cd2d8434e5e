use std::collections::BTreeMap;

use crate::smoothing::max_rolling_mean;
use crate::timeseries::TimeSeries;
use crate::types::{ActivityId, PowerCurvePoint};

/// Beste snitteffekt for én varighet og hvilken aktivitet som ga den.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestPower {
    pub watts: f64,
    pub activity_id: Option<ActivityId>,
}

/// Løpende sesongbeste pr varighet (varighet → rekord).
///
/// Ren akkumulator: `scan` returnerer ny tilstand, ingen delt muterbar state.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerCurveAccumulator {
    best: BTreeMap<usize, BestPower>,
}

impl PowerCurveAccumulator {
    pub fn new(durations: &[usize]) -> Self {
        Self {
            best: durations
                .iter()
                .map(|&d| (d, BestPower { watts: 0.0, activity_id: None }))
                .collect(),
        }
    }

    pub fn durations(&self) -> impl Iterator<Item = usize> + '_ {
        self.best.keys().copied()
    }

    /// Tar imot én aktivitets beste snitt pr varighet.
    /// Erstatter kun ved streng forbedring – ved likhet beholdes tidligste holder.
    pub fn offer(mut self, activity_id: ActivityId, bests: &BTreeMap<usize, f64>) -> Self {
        for (d, rec) in self.best.iter_mut() {
            if let Some(&w) = bests.get(d) {
                if w > rec.watts {
                    *rec = BestPower { watts: w, activity_id: Some(activity_id) };
                }
            }
        }
        self
    }

    pub fn scan(self, activity_id: ActivityId, ts: &TimeSeries) -> Self {
        let durations: Vec<usize> = self.durations().collect();
        let bests = activity_bests(ts, &durations);
        self.offer(activity_id, &bests)
    }

    pub fn get(&self, duration: usize) -> Option<BestPower> {
        self.best.get(&duration).copied()
    }

    pub fn into_points(self) -> Vec<PowerCurvePoint> {
        self.best
            .into_iter()
            .map(|(d, b)| PowerCurvePoint {
                duration_seconds: d,
                best_average_power_watts: b.watts,
                activity_id: b.activity_id,
            })
            .collect()
    }
}

/// Høyeste glidende snitt (vindu = varighet i samples) for hver varighet.
/// Varigheter lengre enn økta hoppes over.
pub fn activity_bests(ts: &TimeSeries, durations: &[usize]) -> BTreeMap<usize, f64> {
    if !ts.has_power() {
        return BTreeMap::new();
    }
    let watts = ts.power_watts();
    durations
        .iter()
        .filter_map(|&d| max_rolling_mean(&watts, d).map(|(_, m)| (d, m)))
        .collect()
}

/// Sesongbeste-kurve over aktiviteter i gitt rekkefølge.
pub fn build_power_curve<'a, I>(activities: I, durations: &[usize]) -> Vec<PowerCurvePoint>
where
    I: IntoIterator<Item = (ActivityId, &'a TimeSeries)>,
{
    activities
        .into_iter()
        .fold(PowerCurveAccumulator::new(durations), |acc, (id, ts)| acc.scan(id, ts))
        .into_points()
}
