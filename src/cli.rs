// src/cli.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::info;

use crate::core::{ConfigManager, ConfigOverrides, FileStore, ServiceClient};
use crate::render::TextStyle;
use crate::types::CvUpload;
use crate::utils::read_file_safe;
use crate::views::submission::{FAILURE_MESSAGE, SUBMITTING_LABEL};
use crate::views::{
    PendingNavigation, ResultsState, ResultsView, Route, SubmissionView, SubmitOutcome,
    SystemOpener,
};

#[derive(Parser)]
#[command(name = "tailorcv")]
#[command(about = "Tailor a CV to a job description with the rewrite service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the rewrite service
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory holding the last result
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload a CV with a job description and show the tailored result
    Submit {
        /// CV file (.pdf or .docx)
        #[arg(long)]
        cv: Option<PathBuf>,
        /// File containing the job description
        #[arg(long, conflicts_with = "job_text")]
        job: Option<PathBuf>,
        /// Job description given inline
        #[arg(long)]
        job_text: Option<String>,
        /// Open the tailored document once it is ready
        #[arg(long)]
        open: bool,
    },
    /// Show the last stored result
    Result {
        /// Print the result view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open the tailored document of the last result
    Download,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            state_dir: self.state_dir.clone(),
            timeout_seconds: self.timeout_secs,
        }
    }

    fn text_style(&self) -> TextStyle {
        TextStyle {
            color: !self.no_color && std::io::stdout().is_terminal(),
            ..TextStyle::default()
        }
    }
}

pub async fn handle_command(cli: Cli, config: ConfigManager) -> Result<()> {
    let style = cli.text_style();
    let store = FileStore::new(&config.storage.state_dir);

    match cli.command {
        Command::Submit {
            cv,
            job,
            job_text,
            open,
        } => {
            let client = ServiceClient::new(config.service.api_url.clone(), config.timeout())?;
            let mut view = SubmissionView::new();

            if let Some(path) = cv {
                let upload = CvUpload::from_path(&path).await?;
                if let Err(e) = view.select_file(Some(upload)) {
                    eprintln!("⚠️  {}", e);
                }
            }

            let job_description = match (job, job_text) {
                (Some(path), _) => read_file_safe(&path).await?,
                (None, Some(text)) => text,
                (None, None) => String::new(),
            };
            view.set_job_description(job_description);

            if view.has_required_input() {
                eprintln!("⏳ {}", SUBMITTING_LABEL);
            }
            let mut navigation = PendingNavigation::default();
            let outcome = view.submit(&client, &store, &mut navigation).await;

            match outcome {
                SubmitOutcome::Navigated(id) if navigation.route == Some(Route::Results) => {
                    info!("Showing results for submission {}", id);
                    let view = show_results(&store, &config, style, false).await?;
                    if open {
                        view.download(&SystemOpener)?;
                    }
                    Ok(())
                }
                _ => anyhow::bail!("{}", view.error().unwrap_or(FAILURE_MESSAGE)),
            }
        }

        Command::Result { json } => {
            show_results(&store, &config, style, json).await?;
            Ok(())
        }

        Command::Download => {
            let view = load_results(&store, &config).await?;
            view.download(&SystemOpener)?;
            println!("✓ Opened tailored CV");
            Ok(())
        }
    }
}

async fn load_results(store: &FileStore, config: &ConfigManager) -> Result<ResultsView> {
    let mut view = ResultsView::new(config.max_age());
    if let ResultsState::Missing { message } = view.activate(store).await {
        anyhow::bail!("{}", message);
    }
    Ok(view)
}

async fn show_results(
    store: &FileStore,
    config: &ConfigManager,
    style: TextStyle,
    json: bool,
) -> Result<ResultsView> {
    let view = load_results(store, config).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(view.state())?);
    } else if let Some(page) = view.page() {
        print!("{}", page.to_text(style));
    }

    Ok(view)
}
