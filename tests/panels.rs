use std::fs;
use std::path::PathBuf;

use em_lab::config::LabConfig;
use em_lab::simulation::{run_all, run_topic, Topic};

fn output_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("em-lab-it-{name}"));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn every_topic_renders_with_defaults() {
    let mut config = LabConfig::default();
    config.output.dir = output_dir("defaults");
    config.output.csv = true;

    let reports = run_all(&config).expect("all topics render");
    assert_eq!(reports.len(), Topic::all().len());
    for report in &reports {
        let svg = fs::read_to_string(&report.image).expect("svg written");
        assert!(svg.starts_with("<svg") || svg.starts_with("<?xml"), "{}", report.topic);
        assert!(svg.contains("</svg>"), "{}", report.topic);

        let data = report.data.as_ref().expect("csv requested");
        let rows = fs::read_to_string(data).expect("csv written");
        assert!(rows.lines().count() > 1, "{} has no data rows", report.topic);
        assert!(!report.summary.is_empty());
    }
}

#[test]
fn alternative_settings_render() {
    let dir = output_dir("alternatives");
    let overrides: Vec<(String, String)> = [
        ("rlc.excitation", "impulse"),
        ("rlc.resistance", "100"),
        ("waveguide.mode", "tm"),
        ("waveguide.m", "2"),
        ("waveguide.n", "1"),
        ("fiber.angle_deg", "80"),
        ("point_charge.charge_nc", "-12"),
        ("wires.current2", "-3"),
    ]
    .iter()
    .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
    .collect();
    let base = dir.join("no-base.toml");
    let mut config = LabConfig::load_from(&base, None, &overrides).expect("overrides load");
    config.output.dir = dir;

    for topic in [Topic::Rlc, Topic::Waveguide, Topic::Fiber, Topic::PointCharge, Topic::Wires] {
        let report = run_topic(topic, &config).expect("renders");
        assert!(report.image.exists());
        assert!(report.data.is_none());
    }
}
