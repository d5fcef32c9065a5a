//! CLI for filtering student rosters with a selectable traversal strategy

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use roster_engine::{
    catalog, compare_backends, AnalysisReport, Backend, Criteria, MissingName, Settings,
    StrategyContext,
};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter
const LOG_ENV: &str = "ROSTER_LOG";

#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "Extract student names from a roster document")]
struct Cli {
    /// Settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List names of students matching the criteria
    Analyze {
        #[command(flatten)]
        filter: FilterArgs,

        /// Strategy: tree (dom), stream (sax) or declarative (linq)
        #[arg(long, short)]
        strategy: Option<Backend>,

        /// Print a JSON report instead of one name per line
        #[arg(long)]
        json: bool,
    },
    /// List the distinct faculties present in the document
    Faculties {
        /// Roster document
        file: PathBuf,
    },
    /// Run every strategy and check that they agree
    Compare {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Debug, Args)]
struct FilterArgs {
    /// Roster document
    file: PathBuf,

    /// Only students of this faculty ("All" or blank means any)
    #[arg(long, short)]
    faculty: Option<String>,

    /// Only students of this department (blank means any)
    #[arg(long, short)]
    department: Option<String>,

    /// Contribution of records without a Name element: empty or skip
    #[arg(long)]
    missing_name: Option<MissingName>,
}

impl FilterArgs {
    fn criteria(&self) -> Criteria {
        Criteria::from_user_input(self.faculty.as_deref(), self.department.as_deref())
    }

    fn missing_name(&self, settings: &Settings) -> MissingName {
        self.missing_name.unwrap_or(settings.missing_name)
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Ok(Settings::default()),
    }
}

fn init_logging(verbose: u8, settings: &Settings) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let level = match verbose {
            0 => settings.log_level.as_str(),
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::new(level)
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    init_logging(cli.verbose, &settings);

    match cli.command {
        Command::Analyze {
            filter,
            strategy,
            json,
        } => {
            let backend = strategy.unwrap_or(settings.strategy);
            let missing_name = filter.missing_name(&settings);
            let criteria = filter.criteria();

            let mut context = StrategyContext::new();
            context.set_strategy(backend.strategy(missing_name));
            let names = context
                .execute_strategy(&filter.file, &criteria)
                .with_context(|| format!("analysis of {} failed", filter.file.display()))?;

            if json {
                let report = AnalysisReport::new(backend.as_str(), criteria, missing_name, names);
                println!("{}", report.to_json_pretty()?);
            } else {
                for name in names {
                    println!("{}", name);
                }
            }
        }
        Command::Faculties { file } => {
            let faculties = catalog::faculties(&file)
                .with_context(|| format!("failed to read faculties from {}", file.display()))?;
            for faculty in faculties {
                println!("{}", faculty);
            }
        }
        Command::Compare { filter } => {
            let comparison =
                compare_backends(&filter.file, &filter.criteria(), filter.missing_name(&settings))
                    .with_context(|| format!("comparison of {} failed", filter.file.display()))?;
            for (backend, names) in &comparison.results {
                println!("{:<12} {}", backend.as_str(), serde_json::to_string(names)?);
            }
            if comparison.agrees() {
                println!("all strategies agree");
            } else {
                let disagreeing: Vec<&str> =
                    comparison.disagreeing().iter().map(|b| b.as_str()).collect();
                anyhow::bail!("strategies disagree: {}", disagreeing.join(", "));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_arguments_parse() {
        let cli = Cli::parse_from([
            "roster", "analyze", "students.xml", "--faculty", "All", "-d", "CS", "--strategy",
            "sax", "--missing-name", "skip", "--json",
        ]);
        match cli.command {
            Command::Analyze {
                filter,
                strategy,
                json,
            } => {
                assert_eq!(strategy, Some(Backend::Stream));
                assert!(json);
                assert_eq!(filter.criteria(), Criteria::any().with_department("CS"));
                assert_eq!(filter.missing_name(&Settings::default()), MissingName::Skip);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn missing_name_falls_back_to_settings() {
        let cli = Cli::parse_from(["roster", "-v", "compare", "students.xml"]);
        assert_eq!(cli.verbose, 1);
        let settings = Settings {
            missing_name: MissingName::Skip,
            ..Settings::default()
        };
        match cli.command {
            Command::Compare { filter } => {
                assert!(filter.criteria().is_unconstrained());
                assert_eq!(filter.missing_name(&settings), MissingName::Skip);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let result = Cli::try_parse_from(["roster", "analyze", "students.xml", "-s", "xslt"]);
        assert!(result.is_err());
    }
}
