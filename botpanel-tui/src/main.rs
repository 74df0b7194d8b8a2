// Operator console for the bot panel
use std::io::{stdout, Write};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::unbounded_channel;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use botpanel_common_ui::{
    ControlPanel, DefaultHttpTransport, PanelConfig, PanelRenderer, PushClient, MAX_ACTIVITY_ENTRIES,
};
use botpanel_tui::{parse_line, ConsoleCommand, TerminalRenderer};

/// Command-line arguments. Anything left unset comes from the BOTPANEL_*
/// environment (or `.env`) through `PanelConfig::from_env`.
#[derive(Parser, Debug, Clone)]
#[command(name = "botpanel-tui")]
#[command(author, version, about = "Control panel for the subreddit bot")]
struct Args {
    /// Base URL of the bot-control service
    #[arg(long)]
    api_url: Option<String>,

    /// WebSocket URL of the push channel
    #[arg(long)]
    push_url: Option<String>,

    /// Seconds between push-channel reconnect attempts
    #[arg(long)]
    reconnect_secs: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> anyhow::Result<PanelConfig> {
    let base = PanelConfig::from_env()?;
    let api_url = args.api_url.clone().unwrap_or_else(|| base.api_url.to_string());
    let push_url = args.push_url.clone().unwrap_or_else(|| base.push_url.to_string());
    let reconnect_delay = args
        .reconnect_secs
        .map(Duration::from_secs)
        .unwrap_or(base.reconnect_delay);
    Ok(PanelConfig::new(&api_url, &push_url, reconnect_delay)?)
}

/// Prints each activity entry exactly once, oldest first, whichever task
/// (push events or a finished action) notices it.
#[derive(Clone, Default)]
struct FeedPrinter {
    mark: Arc<Mutex<u64>>,
}

impl FeedPrinter {
    fn flush(&self, panel: &ControlPanel) {
        let mut mark = self.mark.lock();
        let (next, entries) = panel.activity_since(*mark);
        *mark = next;
        if entries.is_empty() {
            return;
        }
        let mut renderer = TerminalRenderer::new(stdout());
        if let Err(e) = renderer.render_activity(&entries) {
            error!("render failed: {}", e);
        }
    }
}

fn print_latest(panel: &ControlPanel, count: usize) {
    let entries = panel.recent_activity(count);
    let mut renderer = TerminalRenderer::new(stdout());
    if let Err(e) = renderer.render_activity(&entries) {
        error!("render failed: {}", e);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = load_config(&args)?;
    info!("Bot panel starting; api={}, push={}", config.api_url, config.push_url);

    let transport = DefaultHttpTransport::new(config.api_url.clone());
    let panel = ControlPanel::new(Arc::new(transport));

    let printer = FeedPrinter::default();
    let (event_tx, mut event_rx) = unbounded_channel();
    let push_handle = PushClient::new(config.push_url.clone(), config.reconnect_delay).start(event_tx);
    let event_handle = tokio::spawn({
        let panel = panel.clone();
        let printer = printer.clone();
        async move {
            while let Some(event) = event_rx.recv().await {
                panel.handle_event(event);
                printer.flush(&panel);
            }
        }
    });

    let status = panel.initialize().await;
    printer.flush(&panel);
    println!("Bot status: {}. Type 'help' for available commands.", status);

    let mut reader = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("panel> ");
        stdout().flush()?;

        let line = match reader.next_line().await? {
            Some(line) => line,
            None => break, // EOF
        };

        let Some(command) = parse_line(&line) else {
            continue;
        };

        match command {
            ConsoleCommand::Help(text) | ConsoleCommand::Invalid(text) => println!("{}", text),
            ConsoleCommand::Set(field, value) => {
                panel.edit_field(field, value);
                println!("{} set", field);
            }
            ConsoleCommand::Control(control) => {
                let panel = panel.clone();
                let printer = printer.clone();
                tokio::spawn(async move {
                    let result = panel.execute(control.clone()).await;
                    printer.flush(&panel);
                    match result {
                        Ok(summary) => info!("{:?}: {}", control, summary),
                        Err(e) => info!("{:?} failed: {}", control, e),
                    }
                });
            }
            ConsoleCommand::Status => {
                let mut renderer = TerminalRenderer::new(stdout());
                renderer.render_status(&panel.snapshot())?;
            }
            ConsoleCommand::Log(n) => print_latest(&panel, n.min(MAX_ACTIVITY_ENTRIES)),
            ConsoleCommand::Quit => break,
        }
    }

    push_handle.abort();
    event_handle.abort();
    println!("Goodbye!");
    Ok(())
}
