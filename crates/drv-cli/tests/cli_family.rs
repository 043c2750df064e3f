use std::path::PathBuf;
use std::process::{Command, Output};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_drvstat"))
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

fn stdout(out: &Output) -> String {
    assert!(
        out.status.success(),
        "command should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn family_binomial_json_report() {
    let out = run(&["family", "binomial", "10", "0.5", "--format", "json"]);
    let v: serde_json::Value =
        serde_json::from_str(&stdout(&out)).expect("output should be valid JSON");

    assert_eq!(v["document"]["name"], "X");
    assert_eq!(v["document"]["description"], "B(n=10, p=0.500)");
    let p5 = v["document"]["distribution"]["5"].as_f64().unwrap();
    assert!((p5 - 0.24609375).abs() < 1e-12, "P(5)={}", p5);

    let mean = v["summary"]["mean"].as_f64().unwrap();
    let variance = v["summary"]["variance"].as_f64().unwrap();
    assert!((mean - 5.0).abs() < 1e-9);
    assert!((variance - 2.5).abs() < 1e-9);
    assert_eq!(v["summary"]["median"], 5);
    assert_eq!(v["alternatives"].as_array().unwrap().len(), 3);
}

#[test]
fn family_poisson_csv() {
    let text = stdout(&run(&["family", "Poisson", "3", "--format", "csv"]));
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("X,P,F"));
    let first: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(first[0], "0");
    let p0: f64 = first[1].parse().unwrap();
    assert!((p0 - (-3.0f64).exp()).abs() < 1e-6);
    let last: Vec<&str> = text.lines().last().unwrap().split(',').collect();
    let f_max: f64 = last[2].parse().unwrap();
    assert!((f_max - 1.0).abs() < 1e-9);
}

#[test]
fn family_default_report_lists_sections() {
    let text = stdout(&run(&["family", "geometric", "0.5"]));
    assert!(text.contains("Variable: X ~ Ge(p=0.500)"));
    assert!(text.contains("[Raw moments]"));
    assert!(text.contains("[Quartiles]"));
    assert!(text.contains("[Table]"));
}

#[test]
fn family_rejects_bad_parameters() {
    for args in [
        &["family", "binomial", "10", "1.5"][..],
        &["family", "binomial", "2.5", "0.5"][..],
        &["family", "poisson", "-1"][..],
        &["family", "hypergeometric", "10", "5"][..],
        &["family", "zipf", "1.1"][..],
    ] {
        let out = run(args);
        assert!(!out.status.success(), "{:?} should fail", args);
        assert!(!out.stderr.is_empty());
    }
}

#[test]
fn config_caps_truncation() {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut cfg = std::env::temp_dir();
    cfg.push(format!("drvstat_cli_{}_{}_config.yaml", std::process::id(), nanos));
    std::fs::write(&cfg, "truncation:\n  max_terms: 4\n").unwrap();

    let out = run(&["family", "geometric", "0.1", "--format", "csv", "--config", cfg.to_str().unwrap()]);
    let text = stdout(&out);
    // Header plus four rows.
    assert_eq!(text.lines().count(), 5);
    let _ = std::fs::remove_file(&cfg);
}

#[test]
fn families_and_version() {
    let text = stdout(&run(&["families"]));
    let names: Vec<&str> = text.lines().filter_map(|l| l.split_whitespace().next()).collect();
    assert_eq!(names, vec!["binomial", "poisson", "geometric", "hypergeometric"]);
    assert!(text.contains("N K n"));

    let text = stdout(&run(&["version"]));
    assert!(text.starts_with("drvstat "));
}
