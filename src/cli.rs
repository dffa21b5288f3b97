//! Command line interface for em-lab

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use em_lab::config::parse_override;
use em_lab::errors::ParameterError;
use em_lab::simulation::Topic;

/// em-lab - electromagnetism teaching panels rendered to SVG
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (TOML format)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// What to do.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List sections and their topics
    List,
    /// Show a topic's parameters, their ranges and effective values
    Params {
        /// Topic name, e.g. `rlc` or `loop-dipole`
        topic: Topic,
        /// Override a parameter (`key=value` or `section.key=value`)
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
    /// Render one topic
    Render {
        /// Topic name, e.g. `rlc` or `loop-dipole`
        topic: Topic,
        /// Override a parameter (`key=value` or `section.key=value`)
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Render every topic
    RenderAll {
        /// Override a parameter (`section.key=value`)
        #[arg(short, long = "set", value_name = "SECTION.KEY=VALUE")]
        set: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Output flags shared by the render commands.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output directory (overrides config file)
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Also write each scene as CSV
    #[arg(long)]
    pub csv: bool,
}

/// Parses `--set` arguments; keys without a section are scoped to `topic`.
pub fn overrides(set: &[String], topic: Option<Topic>) -> Result<Vec<(String, String)>, ParameterError> {
    set.iter()
        .map(|arg| {
            let (key, value) = parse_override(arg)?;
            let key = match topic {
                Some(t) if !key.contains('.') => format!("{}.{key}", t.config_section()),
                _ => key,
            };
            Ok((key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_keys_are_scoped_to_the_topic() {
        let set = vec!["resistance=50".to_owned(), "output.csv=true".to_owned()];
        let parsed = overrides(&set, Some(Topic::Rlc)).expect("valid");
        assert_eq!(parsed[0], ("rlc.resistance".to_owned(), "50".to_owned()));
        assert_eq!(parsed[1], ("output.csv".to_owned(), "true".to_owned()));

        let parsed = overrides(&["charge_nc=2".to_owned()], Some(Topic::PointCharge)).expect("valid");
        assert_eq!(parsed[0].0, "point_charge.charge_nc");
    }

    #[test]
    fn malformed_set_is_reported() {
        let err = overrides(&["resistance".to_owned()], Some(Topic::Rlc)).unwrap_err();
        assert_eq!(err, ParameterError::MalformedOverride("resistance".to_owned()));
    }

    #[test]
    fn parses_render_command() {
        let cli = Cli::parse_from(["em-lab", "-v", "render", "loop-dipole", "--set", "radius=0.2", "--csv"]);
        assert!(cli.verbose);
        match cli.command {
            Command::Render { topic, set, output } => {
                assert_eq!(topic, Topic::LoopDipole);
                assert_eq!(set, vec!["radius=0.2".to_owned()]);
                assert!(output.csv);
                assert!(output.out.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
