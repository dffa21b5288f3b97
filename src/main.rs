use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use em_lab::config::LabConfig;
use em_lab::simulation::{run_all, run_topic, PanelReport, Section, Topic};

mod cli;

use cli::{Cli, Command, OutputArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    match cli.command {
        Command::List => list(),
        Command::Params { topic, set } => {
            let config = load(cli.config.as_deref(), &set, Some(topic))?;
            params(topic, &config);
        }
        Command::Render { topic, set, output } => {
            let config = with_output(load(cli.config.as_deref(), &set, Some(topic))?, &output);
            let report = run_topic(topic, &config).with_context(|| format!("rendering {topic}"))?;
            print_report(&report);
        }
        Command::RenderAll { set, output } => {
            let config = with_output(load(cli.config.as_deref(), &set, None)?, &output);
            for report in run_all(&config).context("rendering all topics")? {
                print_report(&report);
            }
        }
    }
    Ok(())
}

fn load(file: Option<&Path>, set: &[String], topic: Option<Topic>) -> Result<LabConfig> {
    let overrides = cli::overrides(set, topic)?;
    LabConfig::load(file, &overrides).context("loading configuration")
}

fn with_output(mut config: LabConfig, output: &OutputArgs) -> LabConfig {
    if let Some(dir) = &output.out {
        config.output.dir.clone_from(dir);
    }
    config.output.csv |= output.csv;
    config
}

fn list() {
    for section in Section::all() {
        println!("{section}");
        for topic in section.topics() {
            println!("  {:<14} {}", topic.slug(), topic.title());
        }
    }
}

fn params(topic: Topic, config: &LabConfig) {
    println!("{} [{}]", topic.title(), topic.config_section());
    println!("  {:<16} {:<28} {:<6} {:<28} {:>10} {:>10}", "key", "label", "unit", "range", "default", "value");
    for row in topic.parameters(config) {
        println!(
            "  {:<16} {:<28} {:<6} {:<28} {:>10} {:>10}",
            row.key, row.label, row.unit, row.range, row.default, row.value
        );
    }
}

fn print_report(report: &PanelReport) {
    println!("{} -> {}", report.topic.title(), report.image.display());
    if let Some(data) = &report.data {
        println!("  data: {}", data.display());
    }
    for line in &report.summary {
        println!("  {line}");
    }
}
