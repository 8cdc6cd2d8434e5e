// core/src/storage.rs
//
// Lesesiden mot aktivitetslageret. Kjernen eier ingen tilstand selv; alt leses
// fra uforanderlige detalj-blobs.
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::types::{ActivityId, ActivitySummary};

pub trait ActivityStore {
    /// Aktivitets-id-er innenfor `lookback_days`, nyeste først.
    /// Tom eller manglende typeliste betyr alle typer.
    fn list_recent_activity_ids(
        &self,
        lookback_days: u32,
        type_filter: Option<&[String]>,
    ) -> anyhow::Result<Vec<ActivityId>>;

    /// Rå detaljpayload for én aktivitet (None hvis den ikke finnes).
    fn get_raw_detail(&self, activity_id: ActivityId) -> anyhow::Result<Option<Value>>;
}

impl<S: ActivityStore + ?Sized> ActivityStore for &S {
    fn list_recent_activity_ids(
        &self,
        lookback_days: u32,
        type_filter: Option<&[String]>,
    ) -> anyhow::Result<Vec<ActivityId>> {
        (**self).list_recent_activity_ids(lookback_days, type_filter)
    }

    fn get_raw_detail(&self, activity_id: ActivityId) -> anyhow::Result<Option<Value>> {
        (**self).get_raw_detail(activity_id)
    }
}

/// Felles filtrering: innenfor vinduet, riktig type, sortert nyeste først.
pub fn select_recent<'a, I>(
    summaries: I,
    now: DateTime<Utc>,
    lookback_days: u32,
    type_filter: Option<&[String]>,
) -> Vec<ActivityId>
where
    I: IntoIterator<Item = &'a ActivitySummary>,
{
    let cutoff = now - Duration::days(i64::from(lookback_days));
    let filter = type_filter.filter(|f| !f.is_empty());

    let mut hits: Vec<&ActivitySummary> = summaries
        .into_iter()
        .filter(|a| a.start_time >= cutoff)
        .filter(|a| match filter {
            Some(types) => types.iter().any(|t| *t == a.activity_type),
            None => true,
        })
        .collect();
    // stabil sortering: lik starttid beholder innsettingsrekkefølgen
    hits.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    hits.into_iter().map(|a| a.activity_id).collect()
}

/// Lager i minnet – for tester og in-process kall.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    now: DateTime<Utc>,
    summaries: Vec<ActivitySummary>,
    details: std::collections::HashMap<ActivityId, Value>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_now(Utc::now())
    }

    /// Fast "nå" gir deterministisk lookback-filtrering.
    pub fn with_now(now: DateTime<Utc>) -> Self {
        Self {
            now,
            summaries: Vec::new(),
            details: Default::default(),
        }
    }

    pub fn insert(&mut self, summary: ActivitySummary, detail: Option<Value>) {
        if let Some(d) = detail {
            self.details.insert(summary.activity_id, d);
        }
        self.summaries.push(summary);
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

impl ActivityStore for InMemoryStore {
    fn list_recent_activity_ids(
        &self,
        lookback_days: u32,
        type_filter: Option<&[String]>,
    ) -> anyhow::Result<Vec<ActivityId>> {
        Ok(select_recent(&self.summaries, self.now, lookback_days, type_filter))
    }

    fn get_raw_detail(&self, activity_id: ActivityId) -> anyhow::Result<Option<Value>> {
        Ok(self.details.get(&activity_id).cloned())
    }
}

/// Katalogbasert lager:
///   <root>/activities.json        – liste av ActivitySummary
///   <root>/details/<id>.json      – rå detaljpayload
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
    now: DateTime<Utc>,
}

impl JsonDirStore {
    pub fn open(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            now: Utc::now(),
        }
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn summaries_path(&self) -> PathBuf {
        self.root.join("activities.json")
    }

    pub fn detail_path(&self, activity_id: ActivityId) -> PathBuf {
        self.root.join("details").join(format!("{activity_id}.json"))
    }

    pub fn load_summaries(&self) -> anyhow::Result<Vec<ActivitySummary>> {
        let path = self.summaries_path();
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let summaries = serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(summaries)
    }

    /// Skriver sammendrag + detaljer (brukes av tester og import).
    pub fn write_activity(&self, summary: &ActivitySummary, detail: Option<&Value>) -> anyhow::Result<()> {
        std::fs::create_dir_all(self.root.join("details"))?;
        let mut summaries = match self.load_summaries() {
            Ok(s) => s,
            Err(_) if !self.summaries_path().exists() => Vec::new(),
            Err(e) => return Err(e),
        };
        summaries.retain(|s| s.activity_id != summary.activity_id);
        summaries.push(summary.clone());
        std::fs::write(self.summaries_path(), serde_json::to_string_pretty(&summaries)?)?;
        if let Some(d) = detail {
            std::fs::write(self.detail_path(summary.activity_id), serde_json::to_string(d)?)?;
        }
        Ok(())
    }
}

impl ActivityStore for JsonDirStore {
    fn list_recent_activity_ids(
        &self,
        lookback_days: u32,
        type_filter: Option<&[String]>,
    ) -> anyhow::Result<Vec<ActivityId>> {
        let summaries = self.load_summaries()?;
        Ok(select_recent(&summaries, self.now, lookback_days, type_filter))
    }

    fn get_raw_detail(&self, activity_id: ActivityId) -> anyhow::Result<Option<Value>> {
        let path = self.detail_path(activity_id);
        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(anyhow::Error::new(e).context(format!("reading {}", path.display())))
            }
        };
        match serde_json::from_str(&contents) {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                log::warn!("Error fetching details for {}: {}", activity_id, e);
                Ok(None)
            }
        }
    }
}
