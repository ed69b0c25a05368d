//! StepDial CLI: inspect panels and replay setting operations.
//!
//! Commands:
//! - `show`: print every setting of a panel file (or the demo panel)
//! - `run`: build one setting, replay operations on it, print each state
//! - `step-size`: print the automatic step size for a range

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use stepdial_core::converter::canonical_string;
use stepdial_core::{
    parse_operations, DecimalConverter, DecimalRange, FloatConverter, IntegerConverter,
    NumericKind, Operation, PanelConfig, Setting, SettingConfig, SettingSnapshot,
};

#[derive(Parser)]
#[command(
    name = "stepdial",
    about = "StepDial CLI: numeric setting bindings from the command line"
)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the state of every setting in a panel.
    Show {
        /// Panel TOML file. Defaults to the built-in demo panel.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Replay operations on one setting and print the state after each.
    ///
    /// Operations: inc[:N] dec[:N] text:T value:V rescale:F range:LO..HI drag:P
    Run {
        /// Panel TOML file to take the setting from (requires --setting).
        #[arg(long, requires = "setting")]
        config: Option<PathBuf>,

        /// Setting name within --config (or the demo panel).
        #[arg(long)]
        setting: Option<String>,

        /// Numeric kind for an ad-hoc setting: integer or float.
        #[arg(long, conflicts_with = "setting")]
        kind: Option<NumericKind>,

        /// Maximum range lower bound for an ad-hoc setting.
        #[arg(long, allow_negative_numbers = true, requires = "kind")]
        min: Option<Decimal>,

        /// Maximum range upper bound for an ad-hoc setting.
        #[arg(long, allow_negative_numbers = true, requires = "kind")]
        max: Option<Decimal>,

        /// Initial value for an ad-hoc setting.
        #[arg(long, allow_negative_numbers = true, requires = "kind")]
        value: Option<Decimal>,

        /// Initial slider range lower bound.
        #[arg(long, allow_negative_numbers = true, requires = "kind")]
        slider_min: Option<Decimal>,

        /// Initial slider range upper bound.
        #[arg(long, allow_negative_numbers = true, requires = "kind")]
        slider_max: Option<Decimal>,

        /// Disable snapping to the step grid.
        #[arg(long, default_value_t = false, requires = "kind")]
        no_snap: bool,

        /// Print the final state as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Operations, separated by spaces or commas.
        #[arg(allow_hyphen_values = true)]
        ops: Vec<String>,
    },
    /// Print the automatic step size for a range.
    StepSize {
        /// Numeric kind: integer or float.
        #[arg(long)]
        kind: NumericKind,

        /// Range lower bound.
        #[arg(allow_negative_numbers = true)]
        lower: Decimal,

        /// Range upper bound.
        #[arg(allow_negative_numbers = true)]
        upper: Decimal,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Show { config, json } => run_show(config.as_deref(), json),
        Commands::Run {
            config,
            setting,
            kind,
            min,
            max,
            value,
            slider_min,
            slider_max,
            no_snap,
            json,
            ops,
        } => {
            let setting_config = match (setting, kind) {
                (Some(name), None) => {
                    let panel = load_panel(config.as_deref())?;
                    panel.find(&name)?.clone()
                }
                (None, Some(kind)) => ad_hoc_setting(
                    kind,
                    min,
                    max,
                    value,
                    (slider_min, slider_max),
                    !no_snap,
                )?,
                _ => bail!("one of --setting or --kind is required"),
            };
            run_ops(&setting_config, &ops.join(" "), json)
        }
        Commands::StepSize { kind, lower, upper } => {
            println!("{}", step_size_text(kind, lower, upper));
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn load_panel(path: Option<&Path>) -> Result<PanelConfig> {
    match path {
        Some(path) => PanelConfig::load(path)
            .with_context(|| format!("loading panel {}", path.display())),
        None => Ok(PanelConfig::default_panel()),
    }
}

fn ad_hoc_setting(
    kind: NumericKind,
    min: Option<Decimal>,
    max: Option<Decimal>,
    value: Option<Decimal>,
    (slider_min, slider_max): (Option<Decimal>, Option<Decimal>),
    snap: bool,
) -> Result<SettingConfig> {
    let (Some(min), Some(max)) = (min, max) else {
        bail!("--min and --max are required with --kind");
    };
    let setting = SettingConfig {
        name: "setting".to_string(),
        kind,
        min,
        max,
        value: value.unwrap_or(min),
        slider_min,
        slider_max,
        snap,
    };
    PanelConfig {
        settings: vec![setting.clone()],
    }
    .validate()?;
    Ok(setting)
}

fn run_show(config: Option<&Path>, json: bool) -> Result<()> {
    let panel = load_panel(config)?;
    let settings = panel.build()?;
    info!(settings = settings.len(), "panel loaded");

    if json {
        let snapshots: Vec<SettingSnapshot> = settings.iter().map(|s| s.snapshot()).collect();
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
        return Ok(());
    }

    println!("{}", table_header("setting"));
    for setting in &settings {
        println!("{}", table_row(setting.name(), setting.as_ref()));
    }
    Ok(())
}

fn run_ops(config: &SettingConfig, script: &str, json: bool) -> Result<()> {
    let operations = parse_operations(script)?;
    let mut setting = config.build()?;
    debug!(setting = %config.name, ops = operations.len(), "replaying operations");

    if json {
        for op in &operations {
            op.apply(setting.as_mut());
        }
        let report = serde_json::json!({
            "operations": operations.iter().map(Operation::to_string).collect::<Vec<_>>(),
            "state": setting.snapshot(),
            "external": setting.external_text(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", table_header("op"));
    println!("{}", table_row("init", setting.as_ref()));
    for op in &operations {
        op.apply(setting.as_mut());
        println!("{}", table_row(&op.to_string(), setting.as_ref()));
    }
    Ok(())
}

fn step_size_text(kind: NumericKind, lower: Decimal, upper: Decimal) -> String {
    let range = DecimalRange::from_bounds(lower, upper);
    let step = match kind {
        NumericKind::Integer => IntegerConverter.make_step_size(&range),
        NumericKind::Float => FloatConverter.make_step_size(&range),
    };
    canonical_string(step)
}

fn table_header(first: &str) -> String {
    format!(
        "{:<16} {:>12} {:>12} {:>8} {:>21} {:>8} {:>12}",
        first, "quantity", "text", "pos", "slider", "step", "external"
    )
}

fn table_row(label: &str, setting: &dyn Setting) -> String {
    let s = setting.snapshot();
    format!(
        "{:<16} {:>12} {:>12} {:>8.4} {:>21} {:>8} {:>12}",
        label,
        canonical_string(s.quantity),
        s.field_text,
        s.slider_position,
        format!("{}..{}", s.slider_lower, s.slider_upper),
        s.step_size,
        setting.external_text(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_ad_hoc_run_with_negative_bounds() {
        let cli = Cli::try_parse_from([
            "stepdial", "run", "--kind", "float", "--min", "-5", "--max", "5", "--value", "0",
            "inc:3", "rescale:0.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Run { kind, min, ops, .. } => {
                assert_eq!(kind, Some(NumericKind::Float));
                assert_eq!(min, Some(Decimal::from(-5)));
                assert_eq!(ops, vec!["inc:3", "rescale:0.5"]);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn setting_and_kind_conflict() {
        let parsed = Cli::try_parse_from([
            "stepdial", "run", "--setting", "volume", "--kind", "integer",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn ad_hoc_setting_requires_bounds() {
        let err = ad_hoc_setting(NumericKind::Integer, None, Some(Decimal::TEN), None, (None, None), true);
        assert!(err.is_err());
        let inverted = ad_hoc_setting(
            NumericKind::Integer,
            Some(Decimal::TEN),
            Some(Decimal::ZERO),
            None,
            (None, None),
            true,
        );
        assert!(inverted.is_err());
    }

    #[test]
    fn ad_hoc_value_defaults_to_min() {
        let setting = ad_hoc_setting(
            NumericKind::Integer,
            Some(Decimal::from(100)),
            Some(Decimal::from(200)),
            None,
            (None, None),
            false,
        )
        .unwrap();
        assert_eq!(setting.value, Decimal::from(100));
        assert!(!setting.snap);
    }

    #[test]
    fn step_sizes() {
        assert_eq!(step_size_text(NumericKind::Integer, Decimal::ZERO, Decimal::from(1000)), "10");
        assert_eq!(step_size_text(NumericKind::Integer, Decimal::ZERO, Decimal::TEN), "1");
        assert_eq!(step_size_text(NumericKind::Float, Decimal::ZERO, Decimal::TEN), "0.1");
        assert_eq!(step_size_text(NumericKind::Float, Decimal::from(-5), Decimal::from(5)), "0.1");
    }

    #[test]
    fn table_row_shows_state() {
        let panel = PanelConfig::default_panel();
        let setting = panel.find("volume").unwrap().build().unwrap();
        let row = table_row("init", setting.as_ref());
        assert!(row.starts_with("init"));
        assert!(row.contains("0..1000"));
        assert!(row.contains("0.5000"));
    }
}
