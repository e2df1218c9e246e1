use anyhow::{Context, Result};
use clap::Parser;
use estate_browser::config::AppConfig;
use estate_browser::listings::{sample_properties, FilterState, PropertyCatalog, TypeFilter};
use estate_browser::models::Property;
use estate_browser::store::{DocumentStore, FileStorage};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "estate-browser")]
#[command(about = "Search and filter property listings", long_about = None)]
struct Cli {
    /// Free-text search over title, location and description
    search: Vec<String>,

    /// Listing type: all, rent or sale
    #[arg(long = "type", default_value = "all")]
    kind: String,

    #[arg(long)]
    min_price: Option<i64>,

    #[arg(long)]
    max_price: Option<i64>,

    #[arg(long)]
    min_bedrooms: Option<u32>,

    /// Show a single listing by id
    #[arg(long)]
    id: Option<String>,

    /// Overrides ESTATE_DATA_DIR
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn parse_type(kind: &str) -> Result<TypeFilter> {
    match kind.trim().to_ascii_lowercase().as_str() {
        "all" => Ok(TypeFilter::All),
        "rent" => Ok(TypeFilter::Rent),
        "sale" => Ok(TypeFilter::Sale),
        other => anyhow::bail!("unknown listing type '{}' (expected all, rent or sale)", other),
    }
}

fn print_property(index: usize, property: &Property) {
    println!("{}. {} ({})", index, property.title, property.price);
    println!("   {} · for {}", property.location, property.kind.as_str());
    println!(
        "   {} bd, {} ba, {} sqft{}",
        property.bedrooms,
        property.bathrooms,
        property.area,
        if property.featured { " · featured" } else { "" }
    );
    println!("   ID: {}", property.id);
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::from_env().context("Invalid configuration")?;
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_filter).context("Invalid log filter")?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🏠 Estate Browser");
    info!("Data directory: {}", config.data_dir.display());

    let store = DocumentStore::with_id_generator(
        Arc::new(FileStorage::new(config.data_dir.clone())),
        config.id_strategy.build(),
    );

    let seed = if config.seed_sample_listings {
        sample_properties()
    } else {
        Vec::new()
    };
    let mut catalog = PropertyCatalog::load_with_seed(&store, seed)
        .await
        .context("Failed to load properties")?;

    if let Some(id) = &cli.id {
        match catalog.get_property_by_id(id) {
            Some(property) => {
                print_property(1, property);
                println!("   {}", property.description);
            }
            None => println!("No listing with id {}", id),
        }
        return Ok(());
    }

    catalog.set_search_term(cli.search.join(" "));
    catalog.set_filters(FilterState {
        min_price: cli.min_price,
        max_price: cli.max_price,
        kind: parse_type(&cli.kind)?,
        min_bedrooms: cli.min_bedrooms,
    });

    let visible = catalog.visible();
    info!(
        "Showing {} of {} listings",
        visible.len(),
        catalog.properties().len()
    );
    for (i, property) in visible.iter().enumerate() {
        print_property(i + 1, property);
    }

    Ok(())
}
