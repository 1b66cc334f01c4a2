use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use patdraft::api::{DraftApi, HttpDraftClient};
use patdraft::app::App;
use patdraft::config::Config;
use patdraft::logging;
use patdraft::wizard::steps::PreviewEditor;

#[derive(Parser)]
#[command(name = "patdraft")]
#[command(about = "Terminal wizard for drafting patent applications")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the drafting wizard, resuming a draft or starting a new one
    Wizard {
        /// Draft to resume (omit to start a new draft)
        draft_id: Option<String>,
    },

    /// List the configured user's projects
    Projects,

    /// List the drafts in a project
    Drafts {
        /// Project to list
        project_id: String,
    },

    /// Download the generated application document
    Download {
        /// Draft to download
        draft_id: String,

        /// Output file (default: downloads dir + derived name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    // No subcommand means the full-screen TUI; logs go to a file so they
    // stay off the alternate screen.
    let is_tui_mode = matches!(&cli.command, None | Some(Commands::Wizard { .. }));
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Wizard { draft_id }) => {
            let mut app = App::with_wizard(config, draft_id)?;
            let result = app.run().await;
            print_log_hint(logging_handle.log_file_path);
            result
        }
        Some(Commands::Projects) => cmd_projects(&config).await,
        Some(Commands::Drafts { project_id }) => cmd_drafts(&config, &project_id).await,
        Some(Commands::Download { draft_id, output }) => {
            cmd_download(&config, &draft_id, output).await
        }
        None => {
            let mut app = App::new(config)?;
            let result = app.run().await;
            print_log_hint(logging_handle.log_file_path);
            result
        }
    }
}

/// Tell the user where the session log landed, but only if anything was
/// written.
fn print_log_hint(log_file_path: Option<PathBuf>) {
    if let Some(log_path) = log_file_path {
        if log_path.metadata().is_ok_and(|m| m.len() > 0) {
            eprintln!("Session log: {}", log_path.display());
        }
    }
}

async fn cmd_projects(config: &Config) -> Result<()> {
    let client = HttpDraftClient::new(&config.backend.base_url)?;
    let projects = client.list_projects(&config.backend.user_id).await?;

    if projects.is_empty() {
        println!("No projects for {}", config.backend.user_id);
        return Ok(());
    }

    println!("Projects for {}", config.backend.user_id);
    println!("{}", "-".repeat(60));
    for project in projects {
        println!("{}  {}  ({} drafts)", project.id, project.title, project.draft_count);
    }
    Ok(())
}

async fn cmd_drafts(config: &Config, project_id: &str) -> Result<()> {
    let client = HttpDraftClient::new(&config.backend.base_url)?;
    let drafts = client.list_drafts(project_id).await?;

    if drafts.is_empty() {
        println!("No drafts in project {project_id}");
        return Ok(());
    }

    println!("Drafts in {project_id}");
    println!("{}", "-".repeat(60));
    for draft in drafts {
        let title = if draft.title.trim().is_empty() {
            "(untitled)"
        } else {
            draft.title.as_str()
        };
        let status = if draft.is_complete {
            "complete".to_string()
        } else {
            format!("step {}/8", draft.current_step)
        };
        println!("{}  {title}  [{status}]", draft.id);
    }
    Ok(())
}

async fn cmd_download(config: &Config, draft_id: &str, output: Option<PathBuf>) -> Result<()> {
    let client = HttpDraftClient::new(&config.backend.base_url)?;

    let path = match output {
        Some(path) => path,
        None => {
            // Derive the filename from the draft title, like the TUI does.
            let draft = client.get_draft(draft_id).await?;
            let dir = config.downloads_path();
            std::fs::create_dir_all(&dir)?;
            dir.join(PreviewEditor::download_file_name(&draft))
        }
    };

    let bytes = client.download_document(draft_id).await?;
    std::fs::write(&path, &bytes)?;
    println!("Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
