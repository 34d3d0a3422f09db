use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use huddle_client::config::loader;
use huddle_client::resources::{Document, Folder, User, Workspace};
use huddle_client::session;
use huddle_client::utils::logging::{self, LogLevel};
use huddle_client::RemoteResource;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "huddle.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// Overrides `default_authorization_code` from the config file
    #[arg(long, env = "HUDDLE_AUTHORIZATION_CODE")]
    authorization_code: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the authenticated user and their workspaces
    Whoami,
    /// Show a workspace and the top of its document library
    Workspace { id: u64 },
    /// List a folder's subfolders and documents
    Folder { id: u64 },
    /// Show a document, optionally downloading its content
    Document {
        id: u64,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let args = Args::parse();
    let configuration = loader::file_to_config(Path::new(&args.config)).await?;
    logging::run(&configuration, args.log_level);

    // -------------------------------
    // 2. Authenticate and install the default session
    // -------------------------------

    let session = session::authenticate(Arc::new(configuration), args.authorization_code.as_deref())
        .await
        .context("authentication failed")?;
    info!("authenticated; token expires in {}s", session.expires_in().await.num_seconds());

    // -------------------------------
    // 3. Walk the API
    // -------------------------------

    match args.command {
        Command::Whoami => {
            let user = User::current(session).await?;
            println!("{}", user.name()?.unwrap_or_else(|| "<unnamed>".to_owned()));
            for workspace in user.workspaces().await?.iter() {
                print_workspace(workspace);
            }
        }
        Command::Workspace { id } => {
            let workspace = Arc::new(Workspace::find_by_id(session, id).await?);
            print_workspace(&workspace);
            let library = workspace.document_library_folder().await?;
            print_folder(&library).await?;
        }
        Command::Folder { id } => {
            let folder = Arc::new(Folder::find_by_id(session, id).await?);
            print_folder(&folder).await?;
        }
        Command::Document { id, output } => {
            let document = Document::find_by_id(session, id).await?;
            println!(
                "{} [{}] {}",
                document.title().unwrap_or("<untitled>"),
                document.id().map(|id| id.to_string()).unwrap_or_default(),
                document.description().unwrap_or_default()
            );
            if let Some(path) = output {
                let content = document.content().await?;
                tokio::fs::write(&path, &content)
                    .await
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("saved {} bytes to {}", content.len(), path.display());
            }
        }
    }

    Ok(())
}

fn print_workspace(workspace: &Workspace) {
    println!(
        "workspace {} [{}] {}",
        workspace.id().map(|id| id.to_string()).unwrap_or_default(),
        workspace.workspace_type().unwrap_or("?"),
        workspace.title().unwrap_or("<untitled>")
    );
}

async fn print_folder(folder: &Arc<Folder>) -> Result<()> {
    println!("folder {}", folder.name().unwrap_or("<unnamed>"));
    for child in folder.folders().await?.iter() {
        println!("  [dir] {}", child.name().unwrap_or("<unnamed>"));
    }
    for document in folder.documents().await?.iter() {
        println!("  {}", document.title().unwrap_or("<untitled>"));
    }
    Ok(())
}
