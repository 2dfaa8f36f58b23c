//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one value per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use peplink_core::{ActionOutcome, NotifyOutcome, WanHealth};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

pub fn paint_health(health: WanHealth, color: bool) -> String {
    let label = health.to_string();
    if !color {
        return label;
    }
    match health {
        WanHealth::Healthy => label.green().to_string(),
        WanHealth::Unhealthy => label.red().to_string(),
        WanHealth::Exempt => label.yellow().to_string(),
    }
}

pub fn paint_outcome(outcome: &ActionOutcome, color: bool) -> String {
    let label = describe_outcome(outcome);
    if !color {
        return label;
    }
    match outcome {
        ActionOutcome::Applied { .. } => label.green().to_string(),
        ActionOutcome::Failed { .. } => label.red().to_string(),
        ActionOutcome::Skipped { .. } | ActionOutcome::Planned => label.dimmed().to_string(),
    }
}

/// One-line description of an action outcome.
pub fn describe_outcome(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Applied { notification: None } => "applied".into(),
        ActionOutcome::Applied {
            notification: Some(notify),
        } => format!("applied, {}", describe_notify(notify)),
        ActionOutcome::Skipped { reason } => format!("skipped: {reason}"),
        ActionOutcome::Failed { reason } => format!("failed: {reason}"),
        ActionOutcome::Planned => "planned (dry run)".into(),
    }
}

fn describe_notify(outcome: &NotifyOutcome) -> String {
    match outcome {
        NotifyOutcome::Sent => "alert sent".into(),
        NotifyOutcome::Failed { reason } => format!("alert failed: {reason}"),
        NotifyOutcome::NotConfigured => "no webhook configured".into(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted
/// string, since detail views don't use `Tabled` derive.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    plain_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(plain_fn(data)),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.map_err(|e| CliError::Internal(format!("JSON serialization failed: {e}")))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data)
        .map_err(|e| CliError::Internal(format!("YAML serialization failed: {e}")))
}
