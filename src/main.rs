use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use waymark::models::{artifact_type_of, ArtifactMap, ArtifactType, LifecycleState, Trigger};
use waymark::{graph, lifecycle, report, store};

#[derive(Parser)]
#[command(name = "waymark")]
#[command(about = "Lifecycle consistency checks for hierarchical work artifacts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every artifact under a directory
    Validate {
        /// Directory holding the artifact YAML files
        dir: PathBuf,
    },
    /// Print the legal transitions from a state
    Transitions {
        /// Artifact type: initiative, milestone, or issue
        artifact_type: String,
        /// Current lifecycle state
        state: String,
    },
    /// Print an artifact's event history
    History {
        /// Directory holding the artifact YAML files
        dir: PathBuf,
        /// Artifact id, e.g. A.1.2
        id: String,
    },
}

/// Initialize tracing to stderr; reports own stdout.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "waymark=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { dir } => {
            let artifacts = store::load_dir(&dir)?;
            tracing::info!(
                "Validating {} artifacts from {}",
                artifacts.len(),
                dir.display()
            );

            let history_issues = validate_histories(&artifacts);
            let graph_report = graph::validate_graph(&artifacts);

            match history_issues.len() {
                0 => println!("Event histories: no issues"),
                1 => println!("Event histories: 1 issue"),
                n => println!("Event histories: {n} issues"),
            }
            for line in &history_issues {
                print!("{line}");
            }

            print!("{}", report::render_graph_report(&graph_report));

            if !history_issues.is_empty() || !graph_report.is_clean() {
                std::process::exit(1);
            }
        }
        Commands::Transitions {
            artifact_type,
            state,
        } => {
            let ty = artifact_type_from_arg(&artifact_type)?;
            let from = state_from_arg(&state)?;

            let valid = lifecycle::valid_transitions(ty, from);
            if valid.is_empty() {
                println!("{ty} {from}: terminal, no outgoing transitions");
            } else {
                let names: Vec<_> = valid.iter().map(|s| s.as_str()).collect();
                println!("{ty} {from} -> {}", names.join(", "));
            }
        }
        Commands::History { dir, id } => {
            let artifacts = store::load_dir(&dir)?;
            let artifact = artifacts.get(&id).ok_or_else(|| {
                anyhow::anyhow!("Artifact {id} not found under {}", dir.display())
            })?;
            print!("{}", report::render_history(&id, &artifact.metadata.events));
        }
    }

    Ok(())
}

/// Check every artifact's history: chronology, legal state pairs, and
/// state/trigger compatibility.
fn validate_histories(artifacts: &ArtifactMap) -> Vec<String> {
    let mut issues = Vec::new();

    for (id, artifact) in artifacts {
        let events = &artifact.metadata.events;

        if let Err(err) = lifecycle::validate_event_order(events) {
            issues.push(report::render_history_issue(id, &err.to_string()));
        }

        for event in events {
            if !Trigger::allowed_for(event.state).contains(&event.trigger) {
                issues.push(report::render_history_issue(
                    id,
                    &format!(
                        "trigger {} is not allowed for state {}",
                        event.trigger, event.state
                    ),
                ));
            }
        }

        // Transition legality needs the artifact's type, so an
        // unclassifiable id only gets the checks above.
        let Some(ty) = artifact_type_of(id) else {
            continue;
        };
        for pair in events.windows(2) {
            if let Err(err) = lifecycle::assert_transition(ty, pair[0].state, pair[1].state) {
                issues.push(report::render_history_issue(id, &err.to_string()));
            }
        }
    }

    issues
}

fn artifact_type_from_arg(value: &str) -> anyhow::Result<ArtifactType> {
    ArtifactType::from_str(value).ok_or_else(|| {
        anyhow::anyhow!("Unknown artifact type {value:?} (expected initiative, milestone, or issue)")
    })
}

fn state_from_arg(value: &str) -> anyhow::Result<LifecycleState> {
    LifecycleState::from_str(value)
        .ok_or_else(|| anyhow::anyhow!("Unknown lifecycle state {value:?}"))
}
