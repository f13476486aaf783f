use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use brushmatch::api;
use brushmatch::assets::{AssetCategory, AssetLoader, CatalogSource};
use brushmatch::models::{PaintRef, SourceColor};
use brushmatch::server;
use paint_match::{ColorFamily, DeltaEAlgorithm, MatchQuality};

#[derive(Parser)]
#[command(name = "brushmatch")]
#[command(about = "Brushmatch - cross-brand paint matching and mixing recipes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by the query commands
#[derive(clap::Args)]
struct QueryArgs {
    /// Restrict candidates to a brand (repeatable)
    #[arg(short, long = "brand")]
    brands: Vec<String>,

    /// Distance formula: ciede2000 or euclidean
    #[arg(short, long)]
    algorithm: Option<DeltaEAlgorithm>,

    /// Allow paints of any type
    #[arg(long)]
    any_type: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Find catalog paints closest to a paint or color
    Similar {
        /// Stable paint id, or a hex color like '#9A1115'
        source: String,

        #[command(flatten)]
        query: QueryArgs,

        /// Only match paints with the same finish
        #[arg(long)]
        same_finish: bool,

        /// Maximum number of matches
        #[arg(short, long)]
        limit: Option<usize>,

        /// Worst quality tier to show: excellent, good, fair or poor
        #[arg(short = 'q', long)]
        min_quality: Option<MatchQuality>,
    },
    /// Search for paint blends approximating a paint or color
    Mix {
        /// Stable paint id, or a hex color like '#7A4E2D'
        target: String,

        #[command(flatten)]
        query: QueryArgs,

        /// Maximum paints per recipe (2 or 3)
        #[arg(short = 'n', long)]
        max_components: Option<usize>,

        /// Smallest share of any component, in percent
        #[arg(short, long)]
        min_percentage: Option<f64>,

        /// Maximum number of recipes
        #[arg(short = 'r', long)]
        max_results: Option<usize>,
    },
    /// List catalog brands
    Brands,
    /// Keyword search over the catalog
    Search {
        /// Keywords (all must match)
        keywords: Vec<String>,

        /// Restrict to one brand
        #[arg(short, long)]
        brand: Option<String>,

        /// Restrict to one paint type (Base, Layer, Shade, ...)
        #[arg(short = 't', long = "type")]
        paint_type: Option<String>,

        /// Restrict to a color family (repeatable): red, orange, yellow,
        /// green, blue, purple, pink, brown, grey, black, white
        #[arg(short, long)]
        family: Vec<ColorFamily>,

        /// Maximum results (at most 100)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract the sample paint catalog
        #[arg(long)]
        catalog: bool,

        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Brushmatch API",
        description = "Cross-brand paint matching and mixing recipes",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_brands,
        api::handle_search,
        api::handle_paint,
        api::handle_reload,
        api::handle_similar,
        api::handle_recipes,
    ),
    components(schemas(
        PaintRef,
        SourceColor,
        api::BrandsResponse,
        api::SearchResponse,
        api::ReloadResponse,
        api::SimilarRequest,
        api::SimilarResponse,
        api::RecipeRequest,
        api::RecipeResponse,
    )),
    tags(
        (name = "Catalog", description = "Paint catalog browsing"),
        (name = "Matching", description = "Similar paints and mixing recipes")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Similar {
            source,
            query,
            same_finish,
            limit,
            min_quality,
        }) => run_similar_command(&source, query, same_finish, limit, min_quality).await,
        Some(Commands::Mix {
            target,
            query,
            max_components,
            min_percentage,
            max_results,
        }) => run_mix_command(&target, query, max_components, min_percentage, max_results).await,
        Some(Commands::Brands) => run_brands_command().await,
        Some(Commands::Search {
            keywords,
            brand,
            paint_type,
            family,
            limit,
        }) => {
            let params = api::SearchParams {
                q: keywords.join(" "),
                brand,
                paint_type,
                family: (!family.is_empty()).then(|| {
                    family
                        .into_iter()
                        .map(ColorFamily::as_str)
                        .collect::<Vec<_>>()
                        .join(",")
                }),
                limit,
            };
            run_search_command(params).await
        }
        Some(Commands::Init {
            catalog,
            config,
            all,
            force,
            list,
        }) => run_init_command(catalog, config, all, force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brushmatch=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Load config and catalog the same way the server does
fn cli_state() -> anyhow::Result<server::AppState> {
    init_cli_tracing();
    server::create_app_state(Arc::new(AssetLoader::from_env()))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn describe_source(source: &SourceColor) -> String {
    match (&source.name, &source.brand) {
        (Some(name), Some(brand)) => format!("{name} ({brand}) {}", source.hex),
        _ => source.hex.clone(),
    }
}

/// Find similar paints from the command line
async fn run_similar_command(
    source: &str,
    args: QueryArgs,
    same_finish: bool,
    limit: Option<usize>,
    min_quality: Option<MatchQuality>,
) -> anyhow::Result<()> {
    let state = cli_state()?;
    let request = api::SimilarRequest {
        source: PaintRef::parse_arg(source),
        target_brands: (!args.brands.is_empty()).then_some(args.brands),
        algorithm: args.algorithm,
        require_same_type: args.any_type.then_some(false),
        require_same_finish: same_finish.then_some(true),
        limit,
        min_quality,
    };
    let query = request.to_query(state.service.config());
    let outcome = state.service.find_similar(&request.source, &query).await?;

    if args.json {
        return print_json(&api::SimilarResponse {
            source: outcome.source,
            matches: outcome.matches,
        });
    }

    println!("Matches for {}:\n", describe_source(&outcome.source));
    if outcome.matches.is_empty() {
        println!("  (none)");
    }
    for (rank, m) in outcome.matches.iter().enumerate() {
        println!(
            "{:>3}. {:<28} {:<18} {}  ΔE {:>6.2}  {:>5.1}%  {}",
            rank + 1,
            m.paint.name,
            m.paint.brand,
            m.paint.hex,
            m.distance,
            m.confidence * 100.0,
            m.quality.description()
        );
    }
    Ok(())
}

/// Search mixing recipes from the command line
async fn run_mix_command(
    target: &str,
    args: QueryArgs,
    max_components: Option<usize>,
    min_percentage: Option<f64>,
    max_results: Option<usize>,
) -> anyhow::Result<()> {
    let state = cli_state()?;
    let request = api::RecipeRequest {
        target: PaintRef::parse_arg(target),
        source_brands: (!args.brands.is_empty()).then_some(args.brands),
        algorithm: args.algorithm,
        require_same_type: args.any_type.then_some(false),
        max_components,
        min_percentage,
        max_results,
    };
    let query = request.to_query(state.service.config());
    let outcome = state.service.find_recipes(&request.target, &query).await?;

    if args.json {
        return print_json(&api::RecipeResponse {
            target: outcome.target,
            recipes: outcome.recipes,
        });
    }

    println!("Recipes for {}:\n", describe_source(&outcome.target));
    if outcome.recipes.is_empty() {
        println!("  (none)");
    }
    for (rank, recipe) in outcome.recipes.iter().enumerate() {
        println!(
            "{:>3}. {}  ΔE {:.2}  {:.1}%  {}{}",
            rank + 1,
            recipe.resulting_hex,
            recipe.distance,
            recipe.confidence * 100.0,
            recipe.quality.description(),
            if recipe.is_practical {
                ""
            } else {
                "  (contains a very small share)"
            }
        );
        for c in &recipe.components {
            println!(
                "       {:>5.1}%  {} ({}) {}",
                c.percentage, c.name, c.brand, c.hex
            );
        }
    }
    Ok(())
}

async fn run_brands_command() -> anyhow::Result<()> {
    let state = cli_state()?;
    for brand in state.service.brands().await {
        println!("{brand}");
    }
    Ok(())
}

async fn run_search_command(params: api::SearchParams) -> anyhow::Result<()> {
    let state = cli_state()?;
    let filter = params.filter()?;
    let paints = state.service.search(&params.q, &filter, params.limit).await;
    for p in &paints {
        println!("{:<40} {:<28} {:<18} {}", p.stable_id, p.name, p.brand, p.hex);
    }
    println!("\n{} {}", paints.len(), if paints.len() == 1 { "paint" } else { "paints" });
    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(
    catalog: bool,
    config: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Catalog:");
        for f in AssetLoader::list_embedded(AssetCategory::Catalog) {
            println!("  {f}");
        }
        println!("\nConfig:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        return Ok(());
    }

    let mut categories = Vec::new();
    if all || catalog {
        categories.push(AssetCategory::Catalog);
    }
    if all || config {
        categories.push(AssetCategory::Config);
    }

    if categories.is_empty() {
        eprintln!("No categories specified. Use --all, --catalog, or --config");
        eprintln!("\nRun 'brushmatch init --list' to see embedded assets.");
        std::process::exit(1);
    }

    let loader = AssetLoader::from_env();
    let report = loader.init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let catalog_dir = std::env::var("CATALOG_DIR").ok();

    println!("Brushmatch v{VERSION}");
    println!("Cross-brand paint matching and mixing recipes\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  CATALOG_DIR = {}",
        catalog_dir.as_deref().unwrap_or("(not set)")
    );

    println!("\nAsset Sources:");

    let loader = AssetLoader::from_env();

    let config_source = match config_file {
        Some(ref path) if std::path::Path::new(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config:  {config_source}");

    fn plural(n: usize) -> &'static str {
        if n == 1 {
            "file"
        } else {
            "files"
        }
    }

    let files = loader.read_catalog().len();
    let embedded = AssetLoader::list_embedded(AssetCategory::Catalog).len();
    match loader.catalog_source() {
        CatalogSource::Directory(dir) => println!(
            "  Catalog: {} ({files} {}, {embedded} embedded)",
            dir.display(),
            plural(files)
        ),
        CatalogSource::Embedded if catalog_dir.is_some() => println!(
            "  Catalog: embedded ({embedded} {}, directory has no JSON files)",
            plural(embedded)
        ),
        CatalogSource::Embedded => {
            println!("  Catalog: embedded ({embedded} {})", plural(embedded))
        }
    }

    println!("\nCommands:");
    println!("  brushmatch serve     Start the HTTP server");
    println!("  brushmatch similar   Find paints closest to a paint or color");
    println!("  brushmatch mix       Search mixing recipes for a paint or color");
    println!("  brushmatch brands    List catalog brands");
    println!("  brushmatch search    Keyword search over the catalog");
    println!("  brushmatch init      Extract embedded assets");
    println!("\nRun 'brushmatch --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brushmatch=debug,paint_match=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    match asset_loader.seed_if_configured() {
        Ok(report) if !report.is_empty() => {
            tracing::info!(
                catalog = report.catalog_seeded.len(),
                config = report.config_seeded,
                "Seeded empty locations with embedded assets"
            );
        }
        Err(e) => {
            tracing::warn!(%e, "Failed to seed assets");
        }
        _ => {}
    }

    tracing::info!(
        catalog = %asset_loader.catalog_source(),
        config = %std::env::var("CONFIG_FILE").unwrap_or_else(|_| "embedded".to_string()),
        "Asset sources configured"
    );

    let state = server::create_app_state(asset_loader)?;

    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Brushmatch server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
