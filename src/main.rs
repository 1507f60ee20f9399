use anyhow::{Context, Result};
use clap::Parser;
use moviedeck::browse::{FetchTarget, RenderController, RenderResult};
use moviedeck::catalog::{Fetcher, Providers};
use moviedeck::config::Config;
use moviedeck::logging::init_tracing;
use moviedeck::shutdown::ShutdownHandle;
use moviedeck::ui::runtime::{self, SessionOptions};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "moviedeck")]
#[command(version, about = "Browse, search and page through movie listings")]
#[command(long_about = r#"Browse, search and page through movie listings in the terminal.

EXAMPLES:
    # Popular movies, first page
    moviedeck

    # Start on a search
    moviedeck --query "blade runner" --page 2

    # Print one page and exit (no terminal UI)
    moviedeck --print --query alien

    # Offline, from a local JSON catalog
    moviedeck --catalog movies.json

EXIT CODES:
    0 - Success (including empty results)
    1 - Error (bad config, no API key, fetch failed in --print mode)
"#)]
struct Args {
    /// Config file to load instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Start with a title search instead of the listing
    #[arg(short, long, value_name = "TEXT")]
    query: Option<String>,

    /// Page to open first
    #[arg(short, long, default_value_t = 1, value_name = "N")]
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    /// Print one page to stdout and exit
    #[arg(long)]
    print: bool,

    /// Read listings from a local JSON catalog instead of the metadata API
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load config")?;

    let providers = Providers::from_config(&config, args.catalog)?;
    info!(source = providers.fetcher.name(), "Providers ready");

    let initial = FetchTarget {
        page: args.page,
        query: args.query.unwrap_or_default().trim().to_string(),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let shutdown = ShutdownHandle::new();
    let signal_shutdown = shutdown.clone();
    runtime.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_shutdown.signal();
        }
    });

    if args.print {
        let image_base_url = config.metadata.image_base_url.clone();
        let printed = runtime.block_on(async {
            tokio::select! {
                printed = print_page(providers.fetcher, initial, &image_base_url) => printed,
                _ = shutdown.wait() => false,
            }
        });
        if !printed {
            std::process::exit(1);
        }
        return Ok(());
    }

    let options = SessionOptions {
        initial,
        image_base_url: config.metadata.image_base_url.clone(),
        listing_label: config.defaults.listing.label(),
    };
    runtime::run(providers, options, runtime.handle().clone(), shutdown)
        .context("Terminal UI failed")?;
    Ok(())
}

/// Render one page to stdout. Returns `false` when the fetch failed.
async fn print_page(fetcher: Arc<dyn Fetcher>, target: FetchTarget, image_base_url: &str) -> bool {
    let mut controller = RenderController::new(fetcher);
    let result = controller.render(target.page, &target.query).await;

    let state = controller.state();
    let items = match result {
        RenderResult::Ok(items) => items,
        RenderResult::Empty => {
            println!("No results found.");
            return true;
        }
        RenderResult::Failed(err) => {
            error!(error = %err, "Fetch failed");
            eprintln!("{} ({})", err.user_message(), err);
            return false;
        }
    };

    if state.is_listing() {
        println!("Page {} of {}", state.page(), state.total_pages());
    } else {
        println!(
            "Search \"{}\": page {} of {}",
            state.query(),
            state.page(),
            state.total_pages()
        );
    }
    for item in items {
        let poster = item
            .poster
            .as_ref()
            .map(|poster| poster.url(image_base_url))
            .unwrap_or_default();
        println!(
            "{}\t{}\t{}\t{}",
            item.title,
            item.year_label(),
            item.rating_label(),
            poster
        );
    }
    true
}
