use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use paraiso_feed::{Config, FeedProxy, GraphClient};

#[derive(Parser, Debug)]
struct Args {
    /// Address to bind the proxy to. Overrides FEED_BIND_ADDR.
    /// Ex: 127.0.0.1:3030
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = Config::load_env_config()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    if let Err(err) = config.credentials() {
        log::warn!("{err}; /api/instagram will answer 500 until it is set");
    }

    let source = GraphClient::new(&config)?;
    FeedProxy::new(config, source).start().await;
    Ok(())
}
