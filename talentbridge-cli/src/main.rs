//! CLI entry point for TalentBridge AI chat

mod client;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use console::style;
use dialoguer::Input;
use std::path::PathBuf;
use talentbridge_chat::{Intent, SendOutcome};
use talentbridge_core::chat::Role;
use talentbridge_core::config::{Config, ConfigLoader};
use talentbridge_core::logging::init_logging;
use talentbridge_core::utils::{ensure_dir, format_relative};
use tracing::{debug, info};

use crate::client::{build_runtime, CliRuntime};

#[derive(Parser)]
#[command(name = "talentbridge")]
#[command(about = "Chat with the TalentBridge AI assistant from the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration directory
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,

    /// Do not ask before deleting conversations
    #[arg(short, long, global = true)]
    yes: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List your conversations
    Sessions,
    /// Show the messages of a conversation
    History {
        /// Conversation to show (defaults to the most recent one)
        session_id: Option<String>,
    },
    /// Ask the assistant a question
    Send {
        /// Question to ask
        message: String,
        /// Conversation to ask in (defaults to the most recent one)
        #[arg(short, long)]
        session: Option<String>,
    },
    /// Start a new conversation
    New,
    /// Delete a conversation
    Delete {
        /// Conversation to delete
        session_id: String,
    },
    /// Delete every conversation
    DeleteAll,
    /// Interactive chat
    Chat {
        /// Conversation to continue
        #[arg(short, long)]
        session: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_loader = if let Some(dir) = cli.config_dir {
        ConfigLoader::with_dir(dir)
    } else {
        ConfigLoader::new()
    };
    let config = config_loader.load()?;

    ensure_dir(&config.logging.dir);
    let _log_guard = init_logging(&config.logging);

    let mut runtime = build_runtime(&config, cli.yes);
    open_widget(&mut runtime, &config).await?;

    match cli.command {
        Commands::Sessions => {
            info!("Listing sessions");
            print_sessions(&runtime, &config);
        }
        Commands::History { session_id } => {
            if let Some(id) = session_id {
                select(&mut runtime, id).await?;
            }
            print_messages(&runtime, 0);
        }
        Commands::Send { message, session } => {
            if let Some(id) = session {
                select(&mut runtime, id).await?;
            }
            send(&mut runtime, message).await?;
        }
        Commands::New => {
            runtime.dispatch(Intent::Create)?;
            runtime.run_until_idle().await;
            if let Some(active) = runtime.state().active_session() {
                println!("{} {}", style("Active conversation:").bold(), active);
            }
        }
        Commands::Delete { session_id } => {
            runtime.dispatch(Intent::Delete(session_id))?;
            runtime.run_until_idle().await;
        }
        Commands::DeleteAll => {
            runtime.dispatch(Intent::DeleteAll)?;
            runtime.run_until_idle().await;
        }
        Commands::Chat { session } => {
            if let Some(id) = session {
                select(&mut runtime, id).await?;
            }
            run_chat(&mut runtime, &config).await?;
        }
    }

    runtime.dispatch(Intent::Close)?;
    Ok(())
}

/// Open the widget for the configured user and wait for the directory
async fn open_widget(runtime: &mut CliRuntime, config: &Config) -> Result<()> {
    runtime.dispatch(Intent::Open {
        user: config.auth.user(),
    })?;
    runtime.run_until_idle().await;
    Ok(())
}

async fn select(runtime: &mut CliRuntime, session_id: String) -> Result<()> {
    if !runtime.state().directory().contains(&session_id) {
        anyhow::bail!("Conversation {} not found", session_id);
    }
    runtime.dispatch(Intent::Select(session_id))?;
    runtime.run_until_idle().await;
    Ok(())
}

/// Send one question and print the reply
async fn send(runtime: &mut CliRuntime, message: String) -> Result<()> {
    if runtime.state().active_session().is_none() {
        anyhow::bail!("No conversation yet. Run `talentbridge new` first");
    }
    let before = runtime.state().messages().len();
    runtime.dispatch(Intent::SetInput(message))?;
    runtime.dispatch(Intent::Submit)?;
    runtime.run_until_idle().await;

    if runtime.state().send().last_outcome() == Some(SendOutcome::RolledBack) {
        anyhow::bail!("Message was not delivered");
    }
    print_messages(runtime, before + 1);
    Ok(())
}

fn print_sessions(runtime: &CliRuntime, config: &Config) {
    let state = runtime.state();
    if state.directory().is_empty() {
        println!("{}", style("No conversations yet.").dim());
        return;
    }

    println!("{}", style("Conversations").bold().cyan());
    for session in state.directory().sessions() {
        let marker = if state.directory().is_active(&session.session_id) {
            style("*").green().bold()
        } else {
            style(" ")
        };
        println!(
            "{} {}  {}",
            marker,
            session.preview_label(config.chat.preview_chars, runtime.locale()),
            style(&session.session_id).dim()
        );
    }
}

/// Print the active log starting at `from`
fn print_messages(runtime: &CliRuntime, from: usize) {
    let now = Utc::now();
    let locale = runtime.locale();
    for message in runtime.state().messages().messages().iter().skip(from) {
        let who = match message.role {
            Role::User => style("You").bold().blue(),
            Role::Assistant => style("Assistant").bold().magenta(),
        };
        let when = if message.is_provisional() {
            style("sending".to_string()).dim()
        } else {
            style(format_relative(message.created_at, now, locale)).dim()
        };
        println!("{} {}\n{}\n", who, when, message.content);
    }
}

/// Interactive loop with slash commands
async fn run_chat(runtime: &mut CliRuntime, config: &Config) -> Result<()> {
    println!(
        "{}",
        style("TalentBridge AI chat. /new /use <id> /sessions /delete [id] /delete-all /quit")
            .cyan()
    );
    if runtime.state().active_session().is_some() {
        print_messages(runtime, 0);
    }

    loop {
        let line: String = Input::new()
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()?;
        let line = line.trim();
        debug!("Chat input: {} chars", line.chars().count());

        let (command, arg) = match line.split_once(' ') {
            Some((command, arg)) => (command, Some(arg.trim().to_string())),
            None => (line, None),
        };

        match command {
            "" => continue,
            "/quit" | "/exit" => break,
            "/sessions" => print_sessions(runtime, config),
            "/new" => {
                runtime.dispatch(Intent::Create)?;
                runtime.run_until_idle().await;
            }
            "/use" => match arg {
                Some(id) => {
                    if let Err(e) = select(runtime, id).await {
                        eprintln!("{} {}", style("✗").red(), e);
                    } else {
                        print_messages(runtime, 0);
                    }
                }
                None => eprintln!("Usage: /use <session id>"),
            },
            "/delete" => {
                let target = arg.or_else(|| runtime.state().active_session().map(str::to_string));
                match target {
                    Some(id) => {
                        runtime.dispatch(Intent::Delete(id))?;
                        runtime.run_until_idle().await;
                    }
                    None => eprintln!("Usage: /delete <session id>"),
                }
            }
            "/delete-all" => {
                if let Err(e) = runtime.dispatch(Intent::DeleteAll) {
                    eprintln!("{} {}", style("✗").red(), e);
                }
                runtime.run_until_idle().await;
            }
            other if other.starts_with('/') => eprintln!("Unknown command: {}", other),
            _ => {
                if let Err(e) = send(runtime, line.to_string()).await {
                    eprintln!("{} {}", style("✗").red(), e);
                }
            }
        }
    }

    Ok(())
}
