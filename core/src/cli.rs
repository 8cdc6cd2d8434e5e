use std::fmt::Write;

use crate::types::FtpEstimate;

/// FTP innenfor så mange watt over beste stabile innsats regnes som godt forankret
const ANCHOR_MARGIN_W: f64 = 10.0;
const LOW_DECOUPLING_PCT: f64 = 5.0;
const HIGH_DECOUPLING_PCT: f64 = 8.0;

/// Tolkningslinjer for rapporten.
pub fn interpret(est: &FtpEstimate) -> Vec<String> {
    let mut lines = Vec::new();

    if est.decoupling_avg < LOW_DECOUPLING_PCT {
        lines.push("Low HR Decoupling (<5%) suggests good aerobic endurance.".to_string());
    } else if est.decoupling_avg > HIGH_DECOUPLING_PCT {
        lines.push("High Decoupling (>8%) suggests potential fatigue or underdeveloped base.".to_string());
    }

    if est.has_steady_effort() {
        let diff = est.ftp_watts - est.best_steady_power;
        if diff < ANCHOR_MARGIN_W {
            lines.push("FTP is well-anchored by real-world steady efforts.".to_string());
        } else {
            lines.push(format!(
                "FTP is {diff:.1}W higher than best steady effort; ensure you can hold this power."
            ));
        }
    } else {
        lines.push("No steady 40-70 min effort found; FTP rests on the CP model alone.".to_string());
    }
    lines
}

pub fn format_ftp_report(est: &FtpEstimate) -> String {
    let mut out = String::new();
    // skriving til String feiler ikke
    let _ = writeln!(out, "--- Advanced Field-Based FTP Estimation ---");
    let _ = writeln!(out, "Final Estimated FTP: {:.1} W", est.ftp_watts);
    let _ = writeln!(out, "Confidence Score: {:.2}", est.confidence_score);
    let _ = writeln!(out);
    let _ = writeln!(out, "[Components]");
    let _ = writeln!(out, "  Model CP (Critical Power):   {:.1} W", est.cp_watts);
    let _ = writeln!(out, "  W' (Anaerobic Capacity):     {:.0} J", est.w_prime);
    if est.clamped {
        let _ = writeln!(out, "  Modeled FTP (clamped):       {:.1} W", est.modeled_ftp_watts);
    }
    let _ = writeln!(
        out,
        "  Best Steady-State Power:     {:.1} W (Duration: {:.0} min)",
        est.best_steady_power,
        est.best_steady_duration_min()
    );
    let _ = writeln!(out, "  Aerobic Decoupling (Avg):    {:.1} %", est.decoupling_avg);
    let _ = writeln!(
        out,
        "  Coverage:                    {} days, {} activities",
        est.coverage_days, est.activities_analyzed
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "[Interpretation]");
    for line in interpret(est) {
        let _ = writeln!(out, "  - {line}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "-------------------------------------------");
    out
}

pub fn print_ftp_report(est: &FtpEstimate) {
    print!("{}", format_ftp_report(est));
}
