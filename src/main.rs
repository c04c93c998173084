use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use page_carousel::assets::{AssetLoader, FileAssetLoader};
use page_carousel::constants::*;
use page_carousel::visitor::Visitor;
use page_carousel::{Page, PageConfig, Signal};

/// Runs the page's carousels headless (or in a window with the `window`
/// feature) and prints their final state.
#[derive(Debug, Parser)]
#[command(name = "page-carousel", version)]
struct Args {
    /// TOML page description; the stock page is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated run length in seconds (headless mode)
    #[arg(long, default_value_t = 10.0)]
    seconds: f32,

    /// Let a random visitor click, hover and scroll during the run
    #[arg(long)]
    visitor: bool,

    /// Seed for the random visitor
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Chance per frame that the visitor does something
    #[arg(long, default_value_t = 0.05)]
    activity: f64,

    /// Open an interactive window instead of running headless
    #[arg(long)]
    window: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PageConfig::load(path)
            .with_context(|| format!("loading page config from {}", path.display()))?,
        None => PageConfig::default(),
    };

    let mut page = Page::build(&config, || Box::new(FileAssetLoader) as Box<dyn AssetLoader>);

    if args.window {
        run_window(&mut page, &config)?;
    } else {
        run_headless(&mut page, &args);
    }

    let status = serde_json::to_string_pretty(&page.status()).context("serializing page status")?;
    println!("{status}");

    page.destroy();
    Ok(())
}

fn run_headless(page: &mut Page, args: &Args) {
    // Without a real viewport everything counts as on screen.
    for id in page.widget_ids() {
        page.handle(Signal::Intersection(id, true));
    }
    page.handle(Signal::Resize {
        width: RENDER_WIDTH as f32,
    });

    let mut visitor = args
        .visitor
        .then(|| Visitor::new(args.seed, page.widget_ids(), args.activity));

    let frames = (args.seconds.max(0.0) / FRAME_TIME).ceil() as u64;
    info!(frames, seconds = args.seconds, visitor = args.visitor, "headless run");
    for _ in 0..frames {
        if let Some(signal) = visitor.as_mut().and_then(Visitor::next_signal) {
            page.handle(signal);
        }
        page.update(FRAME_TIME);
    }
}

#[cfg(feature = "window")]
fn run_window(page: &mut Page, config: &PageConfig) -> Result<()> {
    page_carousel::render::run(page, config);
    Ok(())
}

#[cfg(not(feature = "window"))]
fn run_window(_page: &mut Page, _config: &PageConfig) -> Result<()> {
    anyhow::bail!("this build has no window support; rebuild with `--features window`")
}
