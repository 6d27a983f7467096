use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{ChatController, ChatOptions, WsChannel};
use shared::domain::ChatIdentity;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod input;
mod terminal;

use config::load_settings;
use input::LineFeeder;
use terminal::TerminalPage;

const QUIT_COMMAND: &str = "/quit";

/// Terminal chat client. End a line with `\` to continue the message on the next line.
#[derive(Parser, Debug)]
#[command(name = "chat")]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    username: Option<String>,
    /// Opaque user identifier; a random one is generated when omitted.
    #[arg(long)]
    user_id: Option<String>,
    /// Start muted, as if the server's spam guard was already active.
    #[arg(long)]
    timed_out: bool,
    #[arg(long)]
    columns: Option<usize>,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(v) = args.server_url {
        settings.server_url = v;
    }
    if let Some(v) = args.username {
        settings.username = Some(v);
    }
    if let Some(v) = args.user_id {
        settings.user_id = Some(v);
    }
    if let Some(v) = args.columns {
        settings.columns = v;
    }
    settings.timed_out |= args.timed_out;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let username = settings
        .username
        .clone()
        .context("a username is required (--username, CHAT_USERNAME or chat.toml)")?;
    let user_id = settings
        .user_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string());
    let identity = ChatIdentity::new(username, user_id);

    let (channel, mut inbound) = WsChannel::connect(&settings.server_url)
        .await
        .with_context(|| format!("failed to join chat at {}", settings.server_url))?;

    let options = ChatOptions {
        composer: settings.composer(),
        timed_out: settings.timed_out,
    };
    let mut chat = ChatController::new(channel, TerminalPage::new(io::stdout()), identity, options);
    info!(
        username = %chat.identity().username,
        user_id = %chat.identity().user_id,
        "joined chat"
    );
    chat.focus_in();

    let mut feeder = LineFeeder::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                if line.trim() == QUIT_COMMAND {
                    break;
                }
                if let Err(err) = feeder.feed(&mut chat, &line) {
                    if err.is_channel_closed() {
                        warn!("connection lost: {err}");
                        break;
                    }
                    return Err(err.into());
                }
            }
            event = inbound.recv() => {
                let Some(event) = event else {
                    info!("server closed the connection");
                    break;
                };
                chat.handle_event(event);
            }
        }
    }

    if !feeder.draft().is_empty() {
        warn!("discarding unsent draft");
    }
    let (channel, _) = chat.into_parts();
    channel.close().await;
    Ok(())
}
