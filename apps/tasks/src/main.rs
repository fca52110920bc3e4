//! Terminal front end for the tasklet to-do list.
//!
//! Reads one command per line from stdin and prints the active tab to
//! stdout after each. Logs go to stderr.

use anyhow::Context;
use tasklet::views::Markers;
use tasklet::{AppConfig, Outcome, Shell, TaskEnvironment, TaskStore};
use tasklet_runtime::StoreConfig;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_filter).context("invalid log filter")?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(?config, "Configuration loaded");

    let store = TaskStore::with_config(
        TaskEnvironment::production(),
        StoreConfig::new("tasks", config.subscriber_warn_threshold),
    );

    let mut changes = store.subscribe();
    let logger = tokio::spawn(async move {
        while let Ok(snapshot) = changes.changed().await {
            debug!(
                version = snapshot.version(),
                tasks = snapshot.len(),
                completed = snapshot.completed_count(),
                "Snapshot committed"
            );
        }
        debug!("Store closed, snapshot logger stopping");
    });

    let markers = if config.ascii {
        Markers::Ascii
    } else {
        Markers::Unicode
    };
    let mut shell = Shell::new(&store)
        .with_tab(config.start_tab)
        .with_markers(markers);

    let mut stdout = tokio::io::stdout();
    print_screen(&mut stdout, &shell.render()).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match shell.execute(&line) {
            Outcome::Continue(screen) => print_screen(&mut stdout, &screen).await?,
            Outcome::Quit => break,
        }
    }

    let version = store.snapshot().version();
    drop(shell);
    drop(store);
    logger.await?;

    info!(version, "Goodbye");
    Ok(())
}

async fn print_screen(stdout: &mut tokio::io::Stdout, screen: &str) -> std::io::Result<()> {
    stdout.write_all(screen.as_bytes()).await?;
    stdout.write_all(b"\n\n").await?;
    stdout.flush().await
}
