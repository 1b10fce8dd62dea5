use clap::{Parser, Subcommand};
use intake_core::{
    actions_for, load_script, Action, IntakeSession, SelectionSet, SeverityScore, SymptomCatalog,
    TriageConfig, TriageScorer, UrgencyTier,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Patient symptom intake and triage CLI")]
struct Cli {
    /// YAML configuration file (defaults to the built-in catalog and rules)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog symptoms, optionally filtered
    Symptoms {
        /// Case-insensitive substring to match
        #[arg(long)]
        query: Option<String>,
    },
    /// Classify a set of symptoms at a given severity
    Classify {
        /// Symptom name (repeatable)
        #[arg(long = "symptom", required = true)]
        symptoms: Vec<String>,
        /// Severity from 1 to 10 (out-of-range values are clamped)
        #[arg(long, allow_negative_numbers = true)]
        severity: i64,
    },
    /// Show the actions offered for an urgency tier
    Actions {
        /// low, medium or high
        tier: UrgencyTier,
    },
    /// Replay a YAML/JSON event script and print the final session as JSON
    Replay {
        /// Path to the event script
        script: PathBuf,
    },
}

fn build_selection(catalog: &SymptomCatalog, names: &[String]) -> Result<SelectionSet, String> {
    names
        .iter()
        .map(|name| {
            catalog
                .lookup(name)
                .cloned()
                .ok_or_else(|| format!("unknown symptom: {}", name.trim()))
        })
        .collect()
}

fn print_actions(actions: &[Action]) {
    for action in actions {
        match action.destination() {
            Some(destination) => println!("- {} -> {}", action.label(), destination.path()),
            None => println!("- {}", action.label()),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("intake_core=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Arc::new(TriageConfig::load_or_default(cli.config.as_deref())?);

    match cli.command {
        Some(Commands::Symptoms { query }) => {
            let matches: Vec<_> = config
                .catalog()
                .filter(query.as_deref().unwrap_or_default())
                .collect();
            if matches.is_empty() {
                println!("No symptoms match.");
            } else {
                for label in matches {
                    println!("{}", label);
                }
            }
        }
        Some(Commands::Classify { symptoms, severity }) => {
            match build_selection(config.catalog(), &symptoms) {
                Ok(selection) => {
                    let scorer = TriageScorer::new(config.rules().clone());
                    let severity = SeverityScore::clamped(severity);
                    let tier = scorer.classify(&selection, severity);
                    println!(
                        "Tier: {} (severity {}, {} symptom(s))",
                        tier,
                        severity,
                        selection.len()
                    );
                    print_actions(actions_for(tier));
                }
                Err(e) => eprintln!("Error classifying symptoms: {}", e),
            }
        }
        Some(Commands::Actions { tier }) => {
            print_actions(actions_for(tier));
        }
        Some(Commands::Replay { script }) => {
            let events = load_script(&script)?;
            let mut session = IntakeSession::new(config);
            session.replay(events);
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        }
        None => {
            println!("Use 'intake --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classify_with_repeated_symptoms() {
        let cli = Cli::try_parse_from([
            "intake",
            "classify",
            "--symptom",
            "Fever",
            "--symptom",
            "Cough",
            "--severity",
            "6",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Classify { symptoms, severity }) => {
                assert_eq!(symptoms, vec!["Fever", "Cough"]);
                assert_eq!(severity, 6);
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn test_parse_actions_tier() {
        let cli = Cli::try_parse_from(["intake", "actions", "high"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Actions {
                tier: UrgencyTier::High
            })
        ));
        assert!(Cli::try_parse_from(["intake", "actions", "urgent"]).is_err());
    }

    #[test]
    fn test_build_selection_rejects_unknown_symptom() {
        let catalog = SymptomCatalog::reference();
        let ok = build_selection(&catalog, &["fever".into(), "Back Pain".into()]).unwrap();
        assert_eq!(ok.len(), 2);
        let err = build_selection(&catalog, &["Rash".into()]).unwrap_err();
        assert!(err.contains("unknown symptom"));
    }
}
