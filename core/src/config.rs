use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FtpError, FtpResult};

/// Varigheter (sek) for sesongbeste-kurven: 3, 5, 10, 20, 30, 40 og 60 min
pub const MMP_DURATIONS_S: [usize; 7] = [180, 300, 600, 1200, 1800, 2400, 3600];

/// Kandidatvinduer (sek) for stabil innsats: 40 og 60 min
pub const STEADY_WINDOWS_S: [usize; 2] = [2400, 3600];

/// Sykkeltyper som teller med når ingen annen liste er gitt
pub const CYCLING_TYPES: [&str; 6] = [
    "cycling",
    "road_biking",
    "virtual_ride",
    "mountain_biking",
    "gravel_cycling",
    "indoor_cycling",
];

/// Produktpolicy for klemming, vekting og konfidens.
///
/// Ikke fysikk – justerbare terskler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FtpPolicy {
    /// Modellert FTP klemmes til clamp_ratio × beste stabile effekt
    pub clamp_ratio: f64,
    /// Maks VI for at et vindu regnes som stabilt
    pub max_steady_vi: f64,
    /// Modellvekt i normal blanding (resten går til stabil effekt)
    pub model_weight: f64,
    /// Modellvekt når snitt-decoupling er over fatigue_decoupling_pct
    pub fatigued_model_weight: f64,
    pub fatigue_decoupling_pct: f64,
    /// Decoupling under denne gir høy konfidens
    pub confidence_decoupling_pct: f64,
    pub high_confidence: f64,
    pub low_confidence: f64,
    /// Decoupling-verdier utenfor (min, max) regnes som sensorfeil
    pub decoupling_min_pct: f64,
    pub decoupling_max_pct: f64,
}

impl Default for FtpPolicy {
    fn default() -> Self {
        Self {
            clamp_ratio: 1.10,
            max_steady_vi: 1.05,
            model_weight: 0.7,
            fatigued_model_weight: 0.5,
            fatigue_decoupling_pct: 7.0,
            confidence_decoupling_pct: 5.0,
            high_confidence: 0.8,
            low_confidence: 0.5,
            decoupling_min_pct: -20.0,
            decoupling_max_pct: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub lookback_days: u32,
    pub activity_types: Vec<String>,
    pub mmp_durations_s: Vec<usize>,
    pub steady_windows_s: Vec<usize>,
    /// Minste antall samples for at en økt brukes i decoupling
    pub min_decoupling_samples: usize,
    /// Resampler til 1 Hz før vindusberegninger når tidsstempler finnes
    pub resample_to_1hz: bool,
    pub max_hold_secs: i64,
    pub policy: FtpPolicy,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            lookback_days: 60,
            activity_types: CYCLING_TYPES.iter().map(|s| s.to_string()).collect(),
            mmp_durations_s: MMP_DURATIONS_S.to_vec(),
            steady_windows_s: STEADY_WINDOWS_S.to_vec(),
            min_decoupling_samples: 3600,
            resample_to_1hz: true,
            max_hold_secs: 10,
            policy: FtpPolicy::default(),
        }
    }
}

/// Leser inn konfig fra disk (JSON).
/// Hvis filen ikke finnes, returneres default-konfig.
pub fn load_config(path: &str) -> FtpResult<EstimatorConfig> {
    if !Path::new(path).exists() {
        log::info!("No config at {}, using defaults", path);
        return Ok(EstimatorConfig::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| config_err(path, e))?;
    let cfg: EstimatorConfig = serde_json::from_str(&contents).map_err(|e| config_err(path, e))?;
    log::info!(
        "Config loaded from {} (lookback={}d, {} activity types)",
        path,
        cfg.lookback_days,
        cfg.activity_types.len()
    );
    Ok(cfg)
}

/// Lagrer konfig til disk som JSON (pretty-print).
pub fn save_config(cfg: &EstimatorConfig, path: &str) -> FtpResult<()> {
    let json = serde_json::to_string_pretty(cfg).map_err(|e| config_err(path, e))?;
    std::fs::write(path, json).map_err(|e| config_err(path, e))?;
    log::info!("Config saved to {}", path);
    Ok(())
}

fn config_err(path: &str, e: impl std::fmt::Display) -> FtpError {
    FtpError::Config {
        path: path.to_string(),
        reason: e.to_string(),
    }
}
