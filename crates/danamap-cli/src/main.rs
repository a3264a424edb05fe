use clap::{Parser, Subcommand};
use danamap_core::load_app_config;
use danamap_explorer::Explorer;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Debug, Parser)]
#[command(name = "danamap")]
#[command(about = "Đà Nẵng map explorer command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the administrative districts available for filtering
    Districts,
    /// Free-text search suggestions (minimum 2 characters)
    Search { query: String },
    /// Show one place in detail, as a suggestion pick would
    Show { id: i64 },
    /// Filter by category near the fixed origin (wire name or Vietnamese label)
    Category { name: String },
    /// Filter by district, drawing its boundary
    District { name: String },
    /// Filter within a radius of the fixed origin (5, 10, or 15 km)
    Radius { km: u32 },
    /// Driving route from the fixed origin to a place
    Route { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();
    let mut explorer = Explorer::new(&config)?;

    match cli.command {
        Commands::Districts => {
            explorer.load_districts().await;
            render::districts(&explorer);
        }
        Commands::Search { query } => {
            explorer.search(&query).await;
            render::suggestions(&explorer);
        }
        Commands::Show { id } => {
            explorer.pick_suggestion(id).await;
            render::view(&explorer);
        }
        Commands::Category { name } => {
            explorer.set_category_named(&name).await;
            render::view(&explorer);
        }
        Commands::District { name } => {
            explorer.set_district(&name).await;
            render::view(&explorer);
        }
        Commands::Radius { km } => {
            explorer.set_radius(km).await;
            render::view(&explorer);
        }
        Commands::Route { id } => {
            explorer.pick_suggestion(id).await;
            if let Some(place) = explorer.results().single().cloned() {
                explorer.route_to(&place).await;
            }
            render::route(&explorer);
        }
    }
    render::notices(&mut explorer);

    Ok(())
}
