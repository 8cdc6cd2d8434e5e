use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

pub static ACTIVITIES_SCANNED: Lazy<IntCounter> = Lazy::new(|| {
    register(IntCounter::new(
        "ftp_activities_scanned_total",
        "Activities loaded and parsed for FTP estimation",
    ))
});

pub static ACTIVITIES_SKIPPED: Lazy<IntCounterVec> = Lazy::new(|| {
    register(IntCounterVec::new(
        Opts::new("ftp_activities_skipped_total", "Activities skipped, by reason"),
        &["reason"],
    ))
});

pub static ESTIMATES: Lazy<IntCounterVec> = Lazy::new(|| {
    register(IntCounterVec::new(
        Opts::new("ftp_estimates_total", "FTP estimation calls, by outcome"),
        &["outcome"],
    ))
});

fn register<C>(metric: prometheus::Result<C>) -> C
where
    C: prometheus::core::Collector + Clone + 'static,
{
    // Navn og hjelpetekst er konstanter; new() feiler bare på ugyldige navn
    let metric = match metric {
        Ok(m) => m,
        Err(e) => panic!("invalid metric definition: {e}"),
    };
    if let Err(e) = REGISTRY.register(Box::new(metric.clone())) {
        log::warn!("metric registration failed: {e}");
    }
    metric
}

pub fn skipped(reason: &str) {
    ACTIVITIES_SKIPPED.with_label_values(&[reason]).inc();
}

pub fn skipped_count(reason: &str) -> u64 {
    ACTIVITIES_SKIPPED.with_label_values(&[reason]).get()
}

/// Prometheus tekstformat for alle tellere i registeret.
pub fn gather_text() -> String {
    // sørg for at tellerne er registrert før første innsamling
    Lazy::force(&ACTIVITIES_SCANNED);
    Lazy::force(&ACTIVITIES_SKIPPED);
    Lazy::force(&ESTIMATES);

    let mut buf = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(e) = encoder.encode(&REGISTRY.gather(), &mut buf) {
        log::warn!("metrics encoding failed: {e}");
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}
