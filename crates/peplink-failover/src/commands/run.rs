//! `run`: one failover pass and its summary.

use tabled::Tabled;

use peplink_core::{ActionRecord, FailoverConfig, RunOptions, RunReport, run_cycle};

use crate::cli::{GlobalOpts, RunArgs};
use crate::commands::status::identity_detail;
use crate::commands::wans::WanRow;
use crate::error::{CliError, ErrorContext};
use crate::output;

#[derive(Tabled)]
struct ActionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
}

impl ActionRow {
    fn new(record: &ActionRecord, color: bool) -> Self {
        Self {
            id: record.action.wan_id.to_string(),
            name: record.wan_name.clone(),
            action: record.action.verb().into(),
            outcome: output::paint_outcome(&record.outcome, color),
        }
    }
}

pub async fn handle(
    config: &FailoverConfig,
    args: RunArgs,
    ctx: &ErrorContext,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let options = RunOptions {
        dry_run: args.dry_run,
    };
    let report = run_cycle(config, options)
        .await
        .map_err(|e| CliError::from_core(e, ctx))?;

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &report,
        |r| summary(r, color),
        plain_summary,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn summary(report: &RunReport, color: bool) -> String {
    let wans: Vec<WanRow> = report.wans.iter().map(|r| WanRow::new(r, color)).collect();
    let mut sections = vec![
        identity_detail(&report.identity),
        output::render_table(&wans),
    ];

    if report.all_connected() {
        sections.push("All WANs are connected".into());
    } else {
        let actions: Vec<ActionRow> = report
            .actions
            .iter()
            .map(|a| ActionRow::new(a, color))
            .collect();
        sections.push(output::render_table(&actions));
        if report.dry_run {
            sections.push("Dry run: no changes were made".into());
        }
    }

    sections.join("\n\n")
}

/// `<id>\t<verb>\t<outcome>` per action; a single line when nothing was done.
fn plain_summary(report: &RunReport) -> String {
    if report.all_connected() {
        return "All WANs are connected".into();
    }
    report
        .actions
        .iter()
        .map(|a| {
            format!(
                "{}\t{}\t{}",
                a.action.wan_id,
                a.action.verb(),
                output::describe_outcome(&a.outcome)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
