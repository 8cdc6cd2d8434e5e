//! FTPGraph core: effekt/varighet-modellering og FTP-estimat fra historiske
//! effekt- og pulsserier.
//!
//! Flyt: rå detaljdata → [`timeseries`] → sesongbeste-kurve ([`power_curve`]) →
//! CP-modell ([`critical_power`]), sammen med stabil innsats ([`steady_state`])
//! og decoupling ([`decoupling`]) → [`estimator`].

pub mod cli;
pub mod config;
pub mod critical_power;
pub mod decoupling;
pub mod error;
pub mod estimator;
pub mod metrics;
pub mod power_curve;
pub mod smoothing;
pub mod steady_state;
pub mod storage;
pub mod telemetry;
pub mod timeseries;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use cli::{format_ftp_report, print_ftp_report};
pub use config::{load_config, save_config, EstimatorConfig, FtpPolicy};
pub use critical_power::fit_cp_model;
pub use error::{FtpError, FtpResult};
pub use estimator::{blend_ftp, clamp_modeled_ftp, confidence_score, FtpEstimator};
pub use metrics::normalized_power;
pub use storage::{ActivityStore, InMemoryStore, JsonDirStore};
pub use timeseries::{extract_time_series, extract_time_series_str, MetricDescriptor, Sample, TimeSeries};
pub use types::{ActivityId, ActivitySummary, CpModel, FtpEstimate, PowerCurvePoint, SteadyEffort};
