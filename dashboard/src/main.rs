use anyhow::{bail, Result};
use clap::Parser;
use log::info;
use statify::config::{init_logger, load_environment};
use statify::{DashboardConfig, DashboardSession, QueryPipeline, QueryState, YouTubeClient};

/// Print the analytics dashboard of a YouTube channel as JSON
#[derive(Parser, Debug)]
#[command(name = "statify")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Channel name (e.g. "MKBHD") or channel id (UC...)
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,
}

impl Cli {
    fn query(&self) -> String {
        self.query.join(" ")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_environment();
    init_logger();

    let query = cli.query();
    if query.trim().is_empty() {
        bail!("channel name or id must not be blank");
    }

    let config = DashboardConfig::from_env()?;
    info!("API: \"{}\"", config.api_base_url);

    let mut pipeline = QueryPipeline::new(YouTubeClient::new(config)?);
    let mut session = DashboardSession::new();

    match session.submit(&mut pipeline, &query).await {
        QueryState::Ready(view) => println!("{}", serde_json::to_string_pretty(view)?),
        QueryState::Failed(message) => bail!("{message}"),
        state => bail!("submission ended in unexpected state {state:?}"),
    }

    Ok(())
}
