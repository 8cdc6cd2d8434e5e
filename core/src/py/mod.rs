// Python-bindinger (feature = "python"). Tynne omslag rundt Rust-API-et;
// alt går inn og ut som JSON-tekst.
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use serde_json::{json, Map as JsonMap, Value};

use crate::config::EstimatorConfig;
use crate::estimator::FtpEstimator;
use crate::storage::JsonDirStore;
use crate::timeseries::{extract_time_series_str, TimeSeries};

/// Kolonneorientert JSON: { "len": n, "timestamp": [...], "<kolonne>": [...] }
fn series_to_json(ts: &TimeSeries) -> Value {
    let mut obj = JsonMap::new();
    obj.insert("len".into(), json!(ts.len()));
    if let Some(stamps) = ts.timestamps() {
        let v: Vec<Value> = stamps
            .iter()
            .map(|t| t.map(|t| json!(t.to_rfc3339())).unwrap_or(Value::Null))
            .collect();
        obj.insert("timestamp".into(), Value::Array(v));
    }
    for name in ts.column_names() {
        if let Some(col) = ts.column(name) {
            obj.insert(name.to_string(), json!(col));
        }
    }
    Value::Object(obj)
}

#[pyfunction]
fn extract_time_series_json(raw: &str) -> PyResult<String> {
    let ts = extract_time_series_str(raw);
    Ok(series_to_json(&ts).to_string())
}

#[pyfunction]
#[pyo3(signature = (data_dir, lookback_days = 60, activity_types = None))]
fn estimate_ftp_from_dir(
    data_dir: &str,
    lookback_days: u32,
    activity_types: Option<Vec<String>>,
) -> PyResult<String> {
    let estimator = FtpEstimator::new(JsonDirStore::open(data_dir), EstimatorConfig::default());
    estimator
        .estimate_ftp_json(lookback_days, activity_types.as_deref())
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pymodule]
fn ftpgraph_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(extract_time_series_json, m)?)?;
    m.add_function(wrap_pyfunction!(estimate_ftp_from_dir, m)?)?;
    Ok(())
}
