use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rowdex", about = "CSV import and query front-end for a search index")]
pub struct Cli {
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,
    /// Backend base URL; overrides ROWDEX_URL.
    #[arg(long, global = true)]
    pub url: Option<String>,
    /// Target index; overrides ROWDEX_INDEX.
    #[arg(long, global = true)]
    pub index: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import a CSV file into the index.
    Import {
        file: String,
        /// Index one row at a time with sequential identifiers instead of
        /// one bulk request.
        #[arg(long, default_value_t = false)]
        sequential: bool,
        /// Drop and recreate the index before importing.
        #[arg(long, default_value_t = false)]
        recreate: bool,
        #[arg(long, default_value = "declared")]
        schema: String,
    },
    /// Search the index.
    Search {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        min: Option<i64>,
        #[arg(long)]
        max: Option<i64>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Find documents similar to the given one.
    Similar {
        id: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Delete documents by identifier.
    Delete { ids: Vec<String> },
}
