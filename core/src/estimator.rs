// core/src/estimator.rs
//
// Feltbasert FTP-estimat:
//   1) sesongbeste-kurve (MMP)   2) CP-tilpasning   3) beste stabile innsats
//   4) klemming                  5) decoupling      6) vekting + konfidens
use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde_json::json;

use crate::config::{EstimatorConfig, FtpPolicy};
use crate::critical_power::fit_cp_model;
use crate::decoupling::{activity_decoupling, average_decoupling};
use crate::error::{FtpError, FtpResult};
use crate::power_curve::{activity_bests, PowerCurveAccumulator};
use crate::steady_state::{best_steady_window, pick_better};
use crate::storage::ActivityStore;
use crate::telemetry;
use crate::timeseries::{extract_time_series, TimeSeries};
use crate::types::{ActivityId, FtpEstimate, PowerCurvePoint, SteadyEffort};

/// Alt én økt bidrar med – regnes uavhengig pr aktivitet.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityAnalysis {
    pub activity_id: ActivityId,
    /// varighet (sek) → beste glidende snitt (W)
    pub bests: BTreeMap<usize, f64>,
    pub steady: Option<SteadyEffort>,
    pub decoupling: Option<f64>,
}

pub fn analyze_activity(activity_id: ActivityId, ts: &TimeSeries, cfg: &EstimatorConfig) -> ActivityAnalysis {
    ActivityAnalysis {
        activity_id,
        bests: activity_bests(ts, &cfg.mmp_durations_s),
        steady: best_steady_window(activity_id, ts, &cfg.steady_windows_s, cfg.policy.max_steady_vi),
        decoupling: activity_decoupling(ts, cfg.min_decoupling_samples),
    }
}

/// Samlet resultat av én gjennomgang av aktivitetene.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSummary {
    pub power_curve: Vec<PowerCurvePoint>,
    pub best_steady: Option<SteadyEffort>,
    pub decoupling_avg: f64,
    pub activities_analyzed: usize,
}

/// Sekvensiell fold i skannerekkefølge – samme max/likhetsregel uansett
/// hvordan analysene ble regnet ut.
pub fn reduce_analyses(analyses: &[ActivityAnalysis], cfg: &EstimatorConfig) -> ScanSummary {
    let mut curve = PowerCurveAccumulator::new(&cfg.mmp_durations_s);
    let mut steady = None;
    for a in analyses {
        curve = curve.offer(a.activity_id, &a.bests);
        steady = pick_better(steady, a.steady);
    }
    let decoupling_avg = average_decoupling(
        analyses.iter().filter_map(|a| a.decoupling),
        cfg.policy.decoupling_min_pct,
        cfg.policy.decoupling_max_pct,
    );
    ScanSummary {
        power_curve: curve.into_points(),
        best_steady: steady,
        decoupling_avg,
        activities_analyzed: analyses.len(),
    }
}

/// Analyserer ferdig parsede serier (parallelt med `parallel`-featuren).
pub fn analyze_all(series: &[(ActivityId, TimeSeries)], cfg: &EstimatorConfig) -> Vec<ActivityAnalysis> {
    #[cfg(feature = "parallel")]
    let analyses = series
        .par_iter()
        .map(|(id, ts)| analyze_activity(*id, ts, cfg))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let analyses = series
        .iter()
        .map(|(id, ts)| analyze_activity(*id, ts, cfg))
        .collect();
    analyses
}

// ──────────────────────────────────────────────────────────────────────────────
// Policy-steg (rene funksjoner)
// ──────────────────────────────────────────────────────────────────────────────

/// Klem modellert FTP ned til clamp_ratio × beste stabile effekt.
/// Returnerer (modellert FTP, om den ble klemt).
pub fn clamp_modeled_ftp(cp: f64, best_steady_power: f64, policy: &FtpPolicy) -> (f64, bool) {
    if best_steady_power <= 0.0 {
        return (cp, false);
    }
    let upper = best_steady_power * policy.clamp_ratio;
    if cp > upper {
        log::info!(
            "Clamping FTP down: CP ({:.1}) > {:.2} * Steady ({:.1})",
            cp,
            policy.clamp_ratio,
            best_steady_power
        );
        (upper, true)
    } else {
        (cp, false)
    }
}

/// 70/30 modell/stabil; 50/50 ved høy decoupling; 100 % modell uten stabil innsats.
pub fn blend_ftp(modeled: f64, best_steady_power: f64, decoupling_avg: f64, policy: &FtpPolicy) -> f64 {
    if best_steady_power <= 0.0 {
        return modeled;
    }
    let w = if decoupling_avg > policy.fatigue_decoupling_pct {
        policy.fatigued_model_weight
    } else {
        policy.model_weight
    };
    w * modeled + (1.0 - w) * best_steady_power
}

pub fn confidence_score(decoupling_avg: f64, policy: &FtpPolicy) -> f64 {
    if decoupling_avg < policy.confidence_decoupling_pct {
        policy.high_confidence
    } else {
        policy.low_confidence
    }
}

/// Steg 2–7 over en ferdig gjennomgang.
pub fn estimate_from_scan(scan: ScanSummary, coverage_days: u32, policy: &FtpPolicy) -> FtpResult<FtpEstimate> {
    let cp = fit_cp_model(&scan.power_curve)?;

    let steady_power = scan.best_steady.map(|s| s.power).unwrap_or(0.0);
    let (modeled, clamped) = clamp_modeled_ftp(cp.cp_watts, steady_power, policy);
    let ftp = blend_ftp(modeled, steady_power, scan.decoupling_avg, policy);

    Ok(FtpEstimate {
        ftp_watts: ftp,
        confidence_score: confidence_score(scan.decoupling_avg, policy),
        cp_watts: cp.cp_watts,
        w_prime: cp.w_prime_joules,
        modeled_ftp_watts: modeled,
        clamped,
        best_steady_power: steady_power,
        best_steady_duration: scan.best_steady.map(|s| s.duration_seconds).unwrap_or(0),
        best_steady_activity_id: scan.best_steady.map(|s| s.activity_id),
        best_steady_vi: scan.best_steady.map(|s| s.variability_index).unwrap_or(0.0),
        decoupling_avg: scan.decoupling_avg,
        coverage_days,
        activities_analyzed: scan.activities_analyzed,
        power_curve: scan.power_curve,
    })
}

// ──────────────────────────────────────────────────────────────────────────────
// Orkestrering mot lagringslaget
// ──────────────────────────────────────────────────────────────────────────────

pub struct FtpEstimator<S> {
    store: S,
    config: EstimatorConfig,
}

impl<S: ActivityStore> FtpEstimator<S> {
    pub fn new(store: S, config: EstimatorConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Henter og parser én økt. Datafeil hoppes over (None); lagringsfeil propageres.
    pub fn load_series(&self, activity_id: ActivityId) -> FtpResult<Option<TimeSeries>> {
        let Some(raw) = self.store.get_raw_detail(activity_id)? else {
            log::debug!("activity {activity_id}: no detail payload");
            telemetry::skipped("no_detail");
            return Ok(None);
        };
        telemetry::ACTIVITIES_SCANNED.inc();

        let mut ts = extract_time_series(&raw);
        if ts.is_empty() {
            log::debug!("activity {activity_id}: empty time series");
            telemetry::skipped("empty_series");
            return Ok(None);
        }
        if !ts.has_power() {
            log::debug!("activity {activity_id}: no power column");
            telemetry::skipped("no_power");
            return Ok(None);
        }
        if self.config.resample_to_1hz {
            ts = ts.resample_1hz(self.config.max_hold_secs);
        }
        Ok(Some(ts))
    }

    /// Alle brukbare serier innenfor vinduet, nyeste først.
    pub fn load_recent(
        &self,
        lookback_days: u32,
        type_filter: Option<&[String]>,
    ) -> FtpResult<Vec<(ActivityId, TimeSeries)>> {
        let ids = self.store.list_recent_activity_ids(lookback_days, type_filter)?;
        log::info!("Analyzing {} activities for MMP curve...", ids.len());

        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(ts) = self.load_series(id)? {
                out.push((id, ts));
            }
        }
        Ok(out)
    }

    pub fn scan(&self, lookback_days: u32, type_filter: Option<&[String]>) -> FtpResult<ScanSummary> {
        let series = self.load_recent(lookback_days, type_filter)?;
        let analyses = analyze_all(&series, &self.config);
        Ok(reduce_analyses(&analyses, &self.config))
    }

    pub fn build_power_curve(
        &self,
        lookback_days: u32,
        type_filter: Option<&[String]>,
    ) -> FtpResult<Vec<PowerCurvePoint>> {
        Ok(self.scan(lookback_days, type_filter)?.power_curve)
    }

    pub fn find_best_steady_state(
        &self,
        lookback_days: u32,
        type_filter: Option<&[String]>,
    ) -> FtpResult<Option<SteadyEffort>> {
        Ok(self.scan(lookback_days, type_filter)?.best_steady)
    }

    pub fn average_decoupling(&self, lookback_days: u32, type_filter: Option<&[String]>) -> FtpResult<f64> {
        Ok(self.scan(lookback_days, type_filter)?.decoupling_avg)
    }

    pub fn estimate_ftp(&self, lookback_days: u32, type_filter: Option<&[String]>) -> FtpResult<FtpEstimate> {
        let result = self
            .scan(lookback_days, type_filter)
            .and_then(|scan| estimate_from_scan(scan, lookback_days, &self.config.policy));

        let outcome = match &result {
            Ok(est) => {
                log::info!(
                    "Estimated FTP {:.1} W (cp={:.1} W, steady={:.1} W, decoupling={:.1} %, confidence={:.2})",
                    est.ftp_watts,
                    est.cp_watts,
                    est.best_steady_power,
                    est.decoupling_avg,
                    est.confidence_score
                );
                "ok"
            }
            Err(FtpError::InsufficientData { usable_points }) => {
                log::warn!("Not enough valid data points (>= 3 mins): {usable_points}");
                "insufficient_data"
            }
            Err(_) => "error",
        };
        telemetry::ESTIMATES.with_label_values(&[outcome]).inc();
        result
    }

    /// Estimat med vindu og typeliste fra konfigurasjonen.
    pub fn estimate_default(&self) -> FtpResult<FtpEstimate> {
        self.estimate_ftp(self.config.lookback_days, Some(self.config.activity_types.as_slice()))
    }

    /// JSON-svar for kallere utenfor Rust; for lite data gir `{"error": "insufficient data"}`.
    pub fn estimate_ftp_json(&self, lookback_days: u32, type_filter: Option<&[String]>) -> FtpResult<String> {
        match self.estimate_ftp(lookback_days, type_filter) {
            Ok(est) => Ok(serde_json::to_string(&est)?),
            Err(e) if e.is_insufficient_data() => Ok(json!({ "error": "insufficient data" }).to_string()),
            Err(e) => Err(e),
        }
    }
}
