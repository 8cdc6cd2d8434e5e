use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aktivitets-id slik lagringslaget bruker den (BIGINT).
pub type ActivityId = i64;

/// Sammendrag av én aktivitet – eies av lagringslaget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub activity_id: ActivityId,
    #[serde(default)]
    pub activity_name: Option<String>,
    pub activity_type: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub duration_seconds: f64,
    #[serde(default)]
    pub distance_meters: Option<f64>,
    #[serde(default)]
    pub avg_hr: Option<f64>,      // bpm
    #[serde(default)]
    pub max_hr: Option<f64>,      // bpm
    #[serde(default)]
    pub avg_power: Option<f64>,   // watt
    #[serde(default)]
    pub max_power: Option<f64>,   // watt
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub elevation_gain_meters: Option<f64>,
}

/// Ett punkt på sesongbeste-kurven (MMP).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerCurvePoint {
    pub duration_seconds: usize,
    pub best_average_power_watts: f64,
    /// None når ingen aktivitet har vært lang nok for varigheten
    pub activity_id: Option<ActivityId>,
}

/// To-parameter Critical Power-modell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpModel {
    pub cp_watts: f64,
    pub w_prime_joules: f64,
}

/// Beste stabile innsats (40–70 min, lav VI).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteadyEffort {
    pub power: f64,              // watt, snitt over vinduet
    pub duration_seconds: usize,
    pub activity_id: ActivityId,
    pub variability_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FtpEstimate {
    pub ftp_watts: f64,
    pub confidence_score: f64,
    pub cp_watts: f64,
    pub w_prime: f64,
    /// CP etter eventuell klemming mot beste stabile innsats
    pub modeled_ftp_watts: f64,
    pub clamped: bool,
    pub best_steady_power: f64,
    pub best_steady_duration: usize, // sek
    pub best_steady_activity_id: Option<ActivityId>,
    pub best_steady_vi: f64,
    pub decoupling_avg: f64, // %
    pub coverage_days: u32,
    pub activities_analyzed: usize,
    pub power_curve: Vec<PowerCurvePoint>,
}

impl FtpEstimate {
    pub fn best_steady_duration_min(&self) -> f64 {
        self.best_steady_duration as f64 / 60.0
    }

    pub fn has_steady_effort(&self) -> bool {
        self.best_steady_power > 0.0
    }
}
