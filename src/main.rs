use std::io::{self, BufRead, Write};
use std::sync::Arc;

use intake_core::constants::CONFIG_ENV_VAR;
use intake_core::{
    resolve_config_path, FlowStage, IntakeSession, StepStatus, Toggle, Transition, TriageConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Interactive terminal runner for one intake session.
///
/// Reads one command per line from stdin:
/// `search <text>`, `toggle <symptom>`, `severity <1-10>`, `next`, `back`, `restart`, `quit`.
///
/// # Environment Variables
/// - `INTAKE_CONFIG`: optional YAML configuration file (defaults to the built-in catalog)
/// - `RUST_LOG`: log filter; logs go to stderr
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("intake_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config_path = resolve_config_path(std::env::var(CONFIG_ENV_VAR).ok())?;
    if let Some(path) = &config_path {
        tracing::info!("++ Loading intake configuration from {}", path.display());
    }
    let config = Arc::new(TriageConfig::load_or_default(config_path.as_deref())?);

    let mut session = IntakeSession::new(config);
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    render(&session, &mut out)?;
    for line in stdin.lock().lines() {
        let line = line?;
        let (command, arg) = match line.trim().split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (line.trim(), ""),
        };

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "search" => session.search(arg),
            "toggle" => match session.toggle_symptom(arg) {
                Toggle::Rejected(reason) => writeln!(out, "Not toggled: {:?}", reason)?,
                Toggle::Selected | Toggle::Deselected => {}
            },
            "severity" => match arg.parse::<i64>() {
                Ok(value) => {
                    if session.set_severity(value).is_none() {
                        writeln!(out, "Severity can only be set on the severity step.")?;
                    }
                }
                Err(_) => writeln!(out, "Severity must be a whole number from 1 to 10.")?,
            },
            "next" => report(session.advance(), &mut out)?,
            "back" => report(session.retreat(), &mut out)?,
            "restart" => session.restart(),
            other => writeln!(out, "Unknown command: {}", other)?,
        }

        render(&session, &mut out)?;
    }

    Ok(())
}

fn report(transition: Transition, out: &mut impl Write) -> io::Result<()> {
    if let Transition::Refused { reason, .. } = transition {
        writeln!(out, "Cannot move: {:?}", reason)?;
    }
    Ok(())
}

fn render(session: &IntakeSession, out: &mut impl Write) -> io::Result<()> {
    let steps: Vec<String> = session
        .progress()
        .iter()
        .map(|step| match step.status {
            StepStatus::Done => format!("[x] {}", step.name),
            StepStatus::Active => format!("[{}] {}", step.number, step.name.to_uppercase()),
            StepStatus::Pending => format!("[{}] {}", step.number, step.name),
        })
        .collect();
    writeln!(out, "\n{}", steps.join("  "))?;

    match session.stage() {
        FlowStage::Symptoms => {
            for label in session.visible_symptoms() {
                let mark = if session.is_selected(label.as_str()) { "*" } else { " " };
                writeln!(out, " ({}) {}", mark, label)?;
            }
            if session.search_query().is_some() && session.visible_symptoms().next().is_none() {
                writeln!(out, " No symptoms match your search.")?;
            }
            let selected = session.selected();
            if !selected.is_empty() {
                let names: Vec<&str> = selected.iter().map(|l| l.as_str()).collect();
                writeln!(out, "Selected ({}): {}", names.len(), names.join(", "))?;
            }
        }
        FlowStage::Severity => {
            writeln!(out, "How severe are your symptoms? Mild 1 .. 10 Severe")?;
            writeln!(out, "Current: {}", session.severity())?;
        }
        FlowStage::History => {
            writeln!(out, "Medical history, auto-loaded from your records. Review and confirm.")?;
            for fact in session.history() {
                writeln!(out, "  {}: {}", fact.label, fact.value)?;
            }
        }
        FlowStage::Result => {
            if let Some(outcome) = session.outcome() {
                writeln!(out, "Urgency: {}", outcome.tier.as_str().to_uppercase())?;
                for action in outcome.actions {
                    match action.destination() {
                        Some(destination) => {
                            writeln!(out, "  > {} ({})", action.label(), destination.path())?
                        }
                        None => writeln!(out, "  {}", action.label())?,
                    }
                }
            }
        }
    }

    match session.stage().forward_label() {
        Some(label) if session.can_advance() => writeln!(out, "next: {}", label)?,
        Some(label) => writeln!(out, "next: {} (select at least one symptom)", label)?,
        None => writeln!(out, "restart: Start Over")?,
    }
    out.flush()
}
