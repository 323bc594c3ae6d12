use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use skillaudit::config::{Config, GroupingKind};
use skillaudit::source::{HttpSkillSource, JsonFileSource, SkillSource};

/// Skillaudit: find duplicated skills and incoherent lessons in an
/// academic program's skill catalogue.
#[derive(Parser)]
#[command(name = "skillaudit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full coherence and duplicate analysis
    Analyze {
        /// JSON skill-list file (defaults to SKILLAUDIT_SOURCE_URL when omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Institution to analyze (defaults to the first in the catalogue)
        #[arg(long)]
        institution: Option<String>,

        /// Peer-grouping heuristic
        #[arg(long, value_enum)]
        grouping: Option<GroupingKind>,

        /// Flag lessons whose coherence falls below this score
        #[arg(long)]
        threshold: Option<f64>,

        /// Also write a markdown report to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Write the markdown report to SKILLAUDIT_REPORT_PATH
        #[arg(long, conflicts_with = "report")]
        save: bool,

        /// Print the report as JSON instead of the terminal view
        #[arg(long)]
        json: bool,
    },

    /// Only run duplicate detection (within and across lessons)
    Duplicates {
        /// JSON skill-list file (defaults to SKILLAUDIT_SOURCE_URL when omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Restrict to one institution (defaults to all)
        #[arg(long)]
        institution: Option<String>,
    },

    /// Show how lessons are grouped into peer groups
    Groups {
        /// JSON skill-list file (defaults to SKILLAUDIT_SOURCE_URL when omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Institution to group (defaults to the first in the catalogue)
        #[arg(long)]
        institution: Option<String>,

        /// Peer-grouping heuristic
        #[arg(long, value_enum)]
        grouping: Option<GroupingKind>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("skillaudit=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            institution,
            grouping,
            threshold,
            report,
            save,
            json,
        } => {
            let config = Config::load()?;
            let source = open_source(&config, input, institution.as_deref())?;
            let strategy = grouping.unwrap_or(config.grouping).strategy()?;

            let mut settings = config.settings();
            if let Some(t) = threshold {
                settings.coherence.anomaly_threshold =
                    skillaudit::config::validate_threshold("--threshold", t)?;
            }

            let result = skillaudit::pipeline::analyze::run(
                source.as_ref(),
                strategy.as_ref(),
                &settings,
                institution.as_deref(),
            )
            .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                skillaudit::output::terminal::display_report(
                    &result,
                    settings.coherence.anomaly_threshold,
                );
            }

            let report_path = report.or_else(|| save.then(|| config.report_path.clone()));
            if let Some(path) = report_path {
                let written = skillaudit::output::markdown::generate_report(&result, &path)?;
                info!(path = %written, "Markdown report written");
                if !json {
                    println!(
                        "\n{}",
                        format!("Markdown report saved to: {written}").bold()
                    );
                }
            }
        }

        Commands::Duplicates { input, institution } => {
            let config = Config::load()?;
            let source = open_source(&config, input, institution.as_deref())?;
            let catalogue = source.fetch().await?;

            let scope = institution.as_deref();
            if let Some(name) = scope {
                // Fail early on an unknown institution rather than printing nothing
                catalogue.institution(Some(name))?;
            }

            for inst in catalogue
                .institutions
                .iter()
                .filter(|i| scope.is_none() || i.name.as_deref() == scope)
            {
                println!("\n{}", format!("=== {} ===", inst.label()).bold());
                let findings = skillaudit::duplicates::find_intra_lesson(&inst.lessons);
                skillaudit::output::terminal::display_intra_lesson(&findings);
            }

            let index =
                skillaudit::duplicates::SkillOccurrenceIndex::from_catalogue(&catalogue, scope);
            println!("\n  Total unique skills: {}", index.len());
            skillaudit::output::terminal::display_cross_lesson(&index.duplicated());
        }

        Commands::Groups {
            input,
            institution,
            grouping,
        } => {
            let config = Config::load()?;
            let source = open_source(&config, input, institution.as_deref())?;
            let strategy = grouping.unwrap_or(config.grouping).strategy()?;

            let catalogue = source.fetch().await?;
            let selected = catalogue.institution(institution.as_deref())?;
            let groups = strategy.group(&selected.lessons);

            skillaudit::output::terminal::display_groups(strategy.name(), &groups);
        }
    }

    Ok(())
}

/// Pick the skill source: an input file when given, otherwise the
/// extraction service configured in SKILLAUDIT_SOURCE_URL.
fn open_source(
    config: &Config,
    input: Option<PathBuf>,
    institution: Option<&str>,
) -> Result<Box<dyn SkillSource>> {
    match input {
        Some(path) => Ok(Box::new(JsonFileSource::new(path))),
        None => {
            let url = config.require_source_url()?;
            Ok(Box::new(HttpSkillSource::new(url, institution)?))
        }
    }
}
