mod catalog;
mod taxonomy;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::catalog::FilterArgs;

#[derive(Debug, Parser)]
#[command(name = "stockroom")]
#[command(about = "Stockroom product matching command line interface")]
struct Cli {
    /// Synonym feed path (overrides `STOCKROOM_SYNONYM_FEED_PATH`)
    #[arg(long, global = true)]
    synonyms: Option<PathBuf>,

    /// Catalog code feed path (overrides `STOCKROOM_CODE_FEED_PATH`)
    #[arg(long, global = true)]
    codes: Option<PathBuf>,

    /// Match settings YAML (overrides `STOCKROOM_MATCH_SETTINGS_PATH`)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Filter a product export with structured search-panel criteria
    Filter {
        /// JSON array of products
        #[arg(long)]
        products: PathBuf,

        #[command(flatten)]
        args: FilterArgs,
    },
    /// Rank products against a vision-analysis guess
    Rank {
        /// JSON array of products
        #[arg(long)]
        products: PathBuf,
        /// Detected item name, e.g. "roses"
        #[arg(long)]
        name: String,
        /// Detected dominant color, e.g. "dusty pink"
        #[arg(long, default_value = "")]
        color: String,
    },
    /// Expand a term to its synonym family
    Expand { term: String },
    /// Look up the catalog code for a category/subcategory pair
    Code {
        category: String,
        sub_category: String,
    },
    /// List categories, or the subcategories of one category
    Categories {
        #[arg(long)]
        category: Option<String>,
    },
    /// Suggest a cluster color for free-text color descriptions
    Cluster {
        #[arg(required = true)]
        colors: Vec<String>,
    },
    /// Print the specific-term vocabulary offered to the vision service
    Vocabulary,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = stockroom_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = cli.synonyms {
        config.synonym_feed_path = path;
    }
    if let Some(path) = cli.codes {
        config.code_feed_path = path;
    }
    if let Some(path) = cli.settings {
        config.match_settings_path = Some(path);
    }
    tracing::debug!(env = %config.env, "stockroom configured");

    let Some(command) = cli.command else {
        println!("stockroom: no command given; see --help");
        return Ok(());
    };

    match command {
        Commands::Filter { products, args } => catalog::run_filter(&products, &args),
        Commands::Rank {
            products,
            name,
            color,
        } => catalog::run_rank(&config, &products, &name, &color),
        Commands::Expand { term } => taxonomy::run_expand(&config, &term),
        Commands::Code {
            category,
            sub_category,
        } => taxonomy::run_code(&config, &category, &sub_category),
        Commands::Categories { category } => {
            taxonomy::run_categories(&config, category.as_deref())
        }
        Commands::Cluster { colors } => catalog::run_cluster(&colors),
        Commands::Vocabulary => taxonomy::run_vocabulary(&config),
    }
}
