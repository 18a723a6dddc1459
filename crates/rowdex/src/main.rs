mod cli;
mod commands;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;

use rowdex_search::{BackendConfig, SearchClient};

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = if cli.verbose { true } else { logging::env_flag() };
    logging::init(verbose);

    let mut config = BackendConfig::from_env();
    if let Some(url) = cli.url {
        config.url = url;
    }
    if let Some(index) = cli.index {
        config.index = index;
    }

    let client = SearchClient::new(&config);
    let cluster = client
        .info()
        .with_context(|| format!("cannot reach the search backend at {}", config.url))?;
    logging::info(format!(
        "connected to {} ({}), node {}",
        cluster.cluster_name, cluster.version, cluster.node_name
    ));

    match cli.command {
        Command::Import {
            file,
            sequential,
            recreate,
            schema,
        } => commands::import(&client, &config.index, &file, sequential, recreate, &schema),
        Command::Search {
            query,
            min,
            max,
            from,
            to,
            limit,
        } => commands::search(&client, &config.index, query, min, max, from, to, limit),
        Command::Similar { id, limit } => commands::similar(&client, &config.index, &id, limit),
        Command::Delete { ids } => commands::delete(&client, &config.index, &ids),
    }
}
