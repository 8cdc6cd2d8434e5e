// core/src/timeseries.rs
//
// Parser rå per-aktivitet detaljdata (descriptor-liste + per-sample verdiarrays)
// til en navngitt, kolonnebasert tidsserie.
use std::collections::BTreeMap;
use std::ops::Range;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kanoniske kolonnenavn.
pub mod columns {
    pub const POWER: &str = "power";
    pub const HEART_RATE: &str = "heart_rate";
    pub const SPEED: &str = "speed";
    pub const ELEVATION: &str = "elevation";
    pub const CADENCE: &str = "cadence";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const DISTANCE: &str = "distance";
    /// Leverandørnøkkel for epoch-millisekunder
    pub const DIRECT_TIMESTAMP: &str = "directTimestamp";
}

/// Lengste tidsserie vi resampler (7 døgn @ 1 Hz).
const MAX_RESAMPLED_LEN: i64 = 7 * 24 * 3600;

/// Kobler en slot-posisjon i sample-arrayet til et metrikknavn.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MetricDescriptor {
    #[serde(alias = "metricsIndex")]
    pub index: usize,
    pub key: String,
}

/// Ett tidspunkts metrikknavn → verdi.
pub type Sample = BTreeMap<String, f64>;

/// Leverandørnøkler → kanonisk kolonne. Ukjente nøkler beholdes som de er.
pub fn canonical_key(key: &str) -> &str {
    match key {
        "directHeartRate" => columns::HEART_RATE,
        "directSpeed" => columns::SPEED,
        "directElevation" => columns::ELEVATION,
        "directLatitude" => columns::LATITUDE,
        "directLongitude" => columns::LONGITUDE,
        "sumDistance" => columns::DISTANCE,
        "directPower" => columns::POWER,
        "directCadence"
        | "directRunCadence"
        | "directBikeCadence"
        | "directRunningCadence"
        | "directCyclingCadence"
        | "directSwimCadence" => columns::CADENCE,
        other => other,
    }
}

/// Tidsordnet, kolonnebasert serie for én aktivitet.
///
/// Alle kolonner har samme lengde som serien; manglende verdier er `None`.
/// En kolonne finnes hvis minst én sample hadde den metrikken.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    len: usize,
    timestamps: Option<Vec<Option<DateTime<Utc>>>>,
    columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bygger en serie fra ferdige kolonner (kortere kolonner fylles med `None`).
    pub fn from_columns<I, S>(cols: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut columns: BTreeMap<String, Vec<Option<f64>>> = cols
            .into_iter()
            .map(|(name, values)| (name.into(), values.into_iter().map(Some).collect()))
            .collect();
        let len = columns.values().map(Vec::len).max().unwrap_or(0);
        for col in columns.values_mut() {
            col.resize(len, None);
        }
        Self { len, timestamps: None, columns }
    }

    /// Legger til én rad. Kolonner som dukker opp første gang fylles bakover med `None`.
    pub fn push_sample(&mut self, timestamp: Option<DateTime<Utc>>, sample: Sample) {
        let row = self.len;

        if timestamp.is_some() || self.timestamps.is_some() {
            let ts = self.timestamps.get_or_insert_with(|| vec![None; row]);
            ts.push(timestamp);
        }

        for (name, value) in sample {
            let col = self
                .columns
                .entry(name)
                .or_insert_with(|| vec![None; row]);
            col.push(Some(value));
        }
        self.len += 1;
        for col in self.columns.values_mut() {
            if col.len() < self.len {
                col.push(None);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn timestamps(&self) -> Option<&[Option<DateTime<Utc>>]> {
        self.timestamps.as_deref()
    }

    pub fn timestamp_at(&self, i: usize) -> Option<DateTime<Utc>> {
        self.timestamps.as_ref().and_then(|ts| ts.get(i).copied().flatten())
    }

    /// Rad `i` som navn → verdi (uten tidsstempel).
    pub fn sample(&self, i: usize) -> Option<Sample> {
        if i >= self.len {
            return None;
        }
        Some(
            self.columns
                .iter()
                .filter_map(|(name, col)| col[i].map(|v| (name.clone(), v)))
                .collect(),
        )
    }

    pub fn has_power(&self) -> bool {
        self.has_column(columns::POWER)
    }

    /// Effekt i watt per sample; manglende verdier teller som 0 W.
    pub fn power_watts(&self) -> Vec<f64> {
        match self.column(columns::POWER) {
            Some(col) => col.iter().map(|v| v.unwrap_or(0.0)).collect(),
            None => Vec::new(),
        }
    }

    pub fn heart_rate(&self) -> Option<&[Option<f64>]> {
        self.column(columns::HEART_RATE)
    }

    /// Delserie for radene i `range` (klippes mot lengden).
    pub fn slice(&self, range: Range<usize>) -> TimeSeries {
        let end = range.end.min(self.len);
        let start = range.start.min(end);
        TimeSeries {
            len: end - start,
            timestamps: self.timestamps.as_ref().map(|ts| ts[start..end].to_vec()),
            columns: self
                .columns
                .iter()
                .map(|(k, col)| (k.clone(), col[start..end].to_vec()))
                .collect(),
        }
    }

    /// Resampler til jevnt 1 Hz-grid basert på tidsstempler.
    ///
    /// Hvert grid-sekund får siste sample ved eller før seg, så lenge den er
    /// høyst `max_hold_secs` gammel; ellers blir sekundet tomt. Serier uten minst
    /// to stigende tidsstempler returneres uendret.
    pub fn resample_1hz(&self, max_hold_secs: i64) -> TimeSeries {
        let Some(ts) = self.timestamps.as_ref() else {
            return self.clone();
        };
        let timed: Vec<(usize, DateTime<Utc>)> = ts
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.map(|t| (i, t)))
            .collect();
        if timed.len() < 2 {
            return self.clone();
        }
        if timed.windows(2).any(|w| w[1].1 < w[0].1) {
            log::debug!("timestamps not monotonic, keeping sample-count series");
            return self.clone();
        }

        let first = timed[0].1;
        let last = timed[timed.len() - 1].1;
        let span = (last - first).num_seconds();
        if span <= 0 {
            return self.clone();
        }
        if span > MAX_RESAMPLED_LEN {
            log::warn!("activity spans {span} s, skipping 1 Hz resampling");
            return self.clone();
        }

        let mut out = TimeSeries::new();
        let mut j = 0usize;
        for s in 0..=span {
            let t = first + Duration::seconds(s);
            while j + 1 < timed.len() && timed[j + 1].1 <= t {
                j += 1;
            }
            let (row, t_row) = timed[j];
            let sample = if (t - t_row).num_seconds() <= max_hold_secs {
                self.sample(row).unwrap_or_default()
            } else {
                Sample::new()
            };
            out.push_sample(Some(t), sample);
        }
        out
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Rå payload: { metricDescriptors: [...], activityDetailMetrics: [{metrics: [...]}] }
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawDetail {
    #[serde(rename = "metricDescriptors")]
    metric_descriptors: Vec<Value>,
    #[serde(rename = "activityDetailMetrics")]
    activity_detail_metrics: Vec<Value>,
}

fn descriptor_from_value(v: &Value) -> Option<MetricDescriptor> {
    let index = v.get("metricsIndex").or_else(|| v.get("index"))?.as_u64()?;
    let key = v.get("key")?.as_str()?;
    if key.is_empty() {
        return None;
    }
    Some(MetricDescriptor {
        index: usize::try_from(index).ok()?,
        key: key.to_string(),
    })
}

fn row_from_value(v: &Value) -> Vec<Option<f64>> {
    match v.get("metrics").and_then(Value::as_array) {
        Some(vals) => vals
            .iter()
            .map(|x| x.as_f64().filter(|f| f.is_finite()))
            .collect(),
        None => Vec::new(),
    }
}

/// Parser rå detaljdata. Total: alt som ikke kan tolkes gir en tom serie.
pub fn extract_time_series(raw: &Value) -> TimeSeries {
    let parsed: Result<RawDetail, _> = serde_path_to_error::deserialize(raw);
    let detail = match parsed {
        Ok(d) => d,
        Err(e) => {
            log::warn!(
                "Error parsing activity details at {}: {}",
                e.path(),
                e.inner()
            );
            return TimeSeries::new();
        }
    };

    let descriptors: Vec<MetricDescriptor> = detail
        .metric_descriptors
        .iter()
        .filter_map(descriptor_from_value)
        .collect();
    let rows: Vec<Vec<Option<f64>>> = detail
        .activity_detail_metrics
        .iter()
        .map(row_from_value)
        .collect();

    extract_from_parts(&descriptors, &rows)
}

/// Som [`extract_time_series`], men fra JSON-tekst.
pub fn extract_time_series_str(raw: &str) -> TimeSeries {
    let mut de = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, Value>(&mut de) {
        Ok(v) => extract_time_series(&v),
        Err(e) => {
            log::warn!("Malformed activity detail JSON at {}: {}", e.path(), e.inner());
            TimeSeries::new()
        }
    }
}

/// Slot `i` i hver rad tilhører descriptoren med `index == i`,
/// uavhengig av rekkefølgen i descriptor-listen.
pub fn extract_from_parts(descriptors: &[MetricDescriptor], rows: &[Vec<Option<f64>>]) -> TimeSeries {
    // Duplikate indekser: minste nøkkel vinner, så resultatet ikke avhenger av listens rekkefølge
    let mut sorted: Vec<&MetricDescriptor> = descriptors.iter().collect();
    sorted.sort();
    let mut index_to_key: BTreeMap<usize, &str> = BTreeMap::new();
    for d in sorted {
        index_to_key.entry(d.index).or_insert(d.key.as_str());
    }

    let mut ts = TimeSeries::new();
    for values in rows {
        let mut sample = Sample::new();
        let mut timestamp = None;
        for (slot, value) in values.iter().enumerate() {
            let (Some(key), Some(v)) = (index_to_key.get(&slot), value) else {
                continue;
            };
            if *key == columns::DIRECT_TIMESTAMP {
                timestamp = Utc.timestamp_millis_opt(*v as i64).single();
                continue;
            }
            // laveste slot vinner når flere nøkler kollapser til samme kolonne
            sample
                .entry(canonical_key(key).to_string())
                .or_insert(*v);
        }
        ts.push_sample(timestamp, sample);
    }
    ts
}
