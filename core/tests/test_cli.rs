use ftpgraph_core::cli::interpret;
use ftpgraph_core::{format_ftp_report, FtpEstimate};

fn estimate(ftp: f64, steady: f64, decoupling: f64) -> FtpEstimate {
    FtpEstimate {
        ftp_watts: ftp,
        confidence_score: if decoupling < 5.0 { 0.8 } else { 0.5 },
        cp_watts: 290.0,
        w_prime: 18_400.0,
        modeled_ftp_watts: 275.0,
        clamped: true,
        best_steady_power: steady,
        best_steady_duration: if steady > 0.0 { 3600 } else { 0 },
        best_steady_activity_id: if steady > 0.0 { Some(42) } else { None },
        best_steady_vi: if steady > 0.0 { 1.02 } else { 0.0 },
        decoupling_avg: decoupling,
        coverage_days: 60,
        activities_analyzed: 14,
        power_curve: Vec::new(),
    }
}

#[test]
fn test_report_components() {
    let report = format_ftp_report(&estimate(267.5, 250.0, 3.2));

    assert!(report.starts_with("--- Advanced Field-Based FTP Estimation ---"));
    assert!(report.contains("Final Estimated FTP: 267.5 W"));
    assert!(report.contains("Confidence Score: 0.80"));
    assert!(report.contains("290.0 W"));
    assert!(report.contains("18400 J"));
    assert!(report.contains("Modeled FTP (clamped):"));
    assert!(report.contains("250.0 W (Duration: 60 min)"));
    assert!(report.contains("3.2 %"));
    assert!(report.contains("60 days, 14 activities"));
    assert!(report.contains("[Interpretation]"));
}

#[test]
fn test_unclamped_report_hides_modeled_line() {
    let mut est = estimate(255.0, 250.0, 3.0);
    est.clamped = false;
    assert!(!format_ftp_report(&est).contains("Modeled FTP (clamped):"));
}

#[test]
fn test_interpretation_lines() {
    // lav decoupling, godt forankret
    let lines = interpret(&estimate(255.0, 250.0, 2.0));
    assert_eq!(
        lines,
        vec![
            "Low HR Decoupling (<5%) suggests good aerobic endurance.".to_string(),
            "FTP is well-anchored by real-world steady efforts.".to_string(),
        ]
    );

    // høy decoupling, stort gap
    let lines = interpret(&estimate(267.5, 250.0, 9.0));
    assert!(lines[0].starts_with("High Decoupling (>8%)"));
    assert_eq!(lines[1], "FTP is 17.5W higher than best steady effort; ensure you can hold this power.");

    // mellom 5 og 8 %: ingen decoupling-linje
    let lines = interpret(&estimate(255.0, 250.0, 6.0));
    assert_eq!(lines.len(), 1);

    // ingen stabil innsats
    let lines = interpret(&estimate(280.0, 0.0, 1.0));
    assert!(lines[1].starts_with("No steady 40-70 min effort found"));
}
