//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use placeboard_core::stats::ViewMode;
use placeboard_core::{config, logging};
use placeboard_types::{Dimension, SeasonType};

mod commands;

#[derive(Parser)]
#[command(name = "placeboard")]
#[command(version)]
#[command(about = "Campus placement statistics and job applications")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Also log to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the full-screen statistics dashboard (default)
    Dashboard {
        /// Season id to preselect
        #[arg(long, value_name = "SEASON_ID")]
        season: Option<String>,
    },
    /// List recruitment seasons
    Seasons {
        /// First year to include (default: current year minus year_span)
        #[arg(long)]
        from: Option<i32>,
        /// Last year to include (default: current year)
        #[arg(long)]
        to: Option<i32>,
    },
    /// Print a season's overview and a dimension breakdown
    Stats {
        #[arg(value_name = "SEASON_ID")]
        season_id: String,
        /// department, category, gender, course or cpi
        #[arg(short, long, default_value = "cpi")]
        dimension: Dimension,
        /// chart or table (default: config default_view)
        #[arg(long)]
        view: Option<ViewMode>,
    },
    /// Job offer details and applications
    Salary {
        #[command(subcommand)]
        command: SalaryCommands,
    },
    /// The student's resumes
    Resumes {
        #[command(subcommand)]
        command: ResumeCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum SalaryCommands {
    /// Print the job card
    Show {
        #[arg(value_name = "SALARY_ID")]
        salary_id: String,
        /// placement or intern
        #[arg(long, default_value = "placement")]
        season_type: SeasonType,
        /// Include compensation breakdown, selection procedure and events
        #[arg(long)]
        details: bool,
    },
    /// Apply to the job with one of your resumes
    Apply {
        #[arg(value_name = "SALARY_ID")]
        salary_id: String,
        /// Resume id (see `placeboard resumes list`)
        #[arg(long, value_name = "RESUME_ID")]
        resume: Option<String>,
    },
    /// Open the interactive job card
    Card {
        #[arg(value_name = "SALARY_ID")]
        salary_id: String,
        /// placement or intern
        #[arg(long, default_value = "placement")]
        season_type: SeasonType,
    },
}

#[derive(clap::Subcommand)]
enum ResumeCommands {
    /// List uploaded resumes
    List,
    /// Download a resume and open it with the system viewer
    Open {
        #[arg(value_name = "FILEPATH")]
        filepath: String,
    },
    /// Download a resume without opening it
    Download {
        #[arg(value_name = "FILEPATH")]
        filepath: String,
        /// Target directory (default: $PLACEBOARD_HOME/downloads)
        #[arg(long)]
        dir: Option<std::path::PathBuf>,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = logging::init(cli.verbose).context("init logging")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let command = cli
        .command
        .unwrap_or(Commands::Dashboard { season: None });

    if let Commands::Config { command } = command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        };
    }

    let config = config::Config::load().context("load config")?;

    match command {
        Commands::Dashboard { season } => placeboard_tui::run_dashboard(&config, season).await,
        Commands::Seasons { from, to } => commands::seasons::run(&config, from, to).await,
        Commands::Stats {
            season_id,
            dimension,
            view,
        } => {
            let view = view.unwrap_or(config.default_view);
            commands::stats::run(&config, &season_id, dimension, view).await
        }
        Commands::Salary { command } => match command {
            SalaryCommands::Show {
                salary_id,
                season_type,
                details,
            } => commands::salary::show(&config, &salary_id, season_type, details).await,
            SalaryCommands::Apply { salary_id, resume } => {
                commands::salary::apply(&config, &salary_id, resume.as_deref()).await
            }
            SalaryCommands::Card {
                salary_id,
                season_type,
            } => placeboard_tui::run_salary_card(&config, salary_id, season_type).await,
        },
        Commands::Resumes { command } => match command {
            ResumeCommands::List => commands::resumes::list(&config).await,
            ResumeCommands::Open { filepath } => commands::resumes::open(&config, &filepath).await,
            ResumeCommands::Download { filepath, dir } => {
                commands::resumes::download(&config, &filepath, dir).await
            }
        },
        Commands::Config { .. } => Ok(()),
    }
}
