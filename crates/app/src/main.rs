//! VoxCart demo: drives the engine against an in-memory storefront.
//!
//! Each stdin line is treated as one spoken utterance. Lines starting with
//! `:` are host controls (`:trigger`, `:continuous`, `:quit`).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use voxcart_app::feedback::LogSurface;
use voxcart_app::runtime::{ControlMsg, VoiceEngine};
use voxcart_dom::{Element, MemoryPage};
use voxcart_foundation::EngineOptions;
use voxcart_speech::{LogPlayback, ScriptedCapture};

#[derive(Parser, Debug)]
#[command(name = "voxcart", about = "Voice control engine demo")]
struct Cli {
    /// TOML file with engine options.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Recognition language tag.
    #[arg(long)]
    language: Option<String>,

    /// Start with continuous mode on.
    #[arg(long)]
    continuous: bool,

    /// Disable per-utterance page discovery.
    #[arg(long)]
    no_discover: bool,
}

fn init_logging() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(log_level).init();
}

fn load_options(cli: &Cli) -> anyhow::Result<EngineOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => EngineOptions::default(),
    };
    if let Some(language) = &cli.language {
        options.language = language.clone();
    }
    if cli.continuous {
        options.continuous_mode = true;
    }
    if cli.no_discover {
        options.auto_discover = false;
    }
    Ok(options)
}

/// A small storefront for the engine to act on.
fn demo_page() -> MemoryPage {
    let page = MemoryPage::new();
    page.insert(Element::new("button").attr("aria-label", "Menu").text("Menu"));
    page.insert(
        Element::new("a")
            .class("product-link")
            .attr("href", "/products/aurora-lamp")
            .text("Aurora Lamp"),
    );
    page.insert(Element::new("div").class("product-price").text("$49.00"));
    page.insert(
        Element::new("div")
            .class("product-description")
            .text("A dimmable bedside lamp with a warm aurora glow."),
    );
    page.insert(Element::new("button").attr("name", "add").text("Add to cart"));
    page.insert(Element::new("button").attr("name", "checkout").text("Buy now"));
    page.insert(
        Element::new("input")
            .attr("type", "search")
            .attr("name", "q")
            .attr("placeholder", "Search products"),
    );
    page.insert(Element::new("div").class("cart__total").text("$49.00"));
    page.insert(Element::new("a").attr("href", "/pages/contact").text("Contact"));
    page.insert(Element::new("a").attr("href", "/collections/all").text("Collections"));
    page.insert(
        Element::new("input")
            .attr("type", "email")
            .class("newsletter-input")
            .attr("placeholder", "Email address"),
    );
    page.insert(Element::new("button").class("subscribe-button").text("Subscribe"));
    page.insert(Element::new("input").attr("type", "checkbox").id("gift-wrap"));
    page.insert(Element::new("label").attr("for", "gift-wrap").text("Gift wrap"));
    page.insert(Element::new("select").id("size"));
    page.insert(Element::new("label").attr("for", "size").text("Size"));
    page
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let options = load_options(&cli)?;
    tracing::info!("starting voxcart demo with {options:?}");

    let page = Arc::new(demo_page());
    let (capture_tx, capture_rx) = mpsc::channel(32);
    let capture = Arc::new(ScriptedCapture::new(capture_tx));

    let (engine, handle) = VoiceEngine::new(
        options,
        page,
        Arc::clone(&capture) as _,
        capture_rx,
        Arc::new(LogPlayback),
        Arc::new(LogSurface),
    );
    let engine_task = tokio::spawn(engine.run());

    // Press the trigger once so the first utterance is captured.
    handle.control.send(ControlMsg::TriggerPressed).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        match line.as_str() {
            "" => continue,
            ":quit" => break,
            ":trigger" => handle.control.send(ControlMsg::TriggerPressed).await?,
            ":continuous" => handle.control.send(ControlMsg::ToggleContinuous).await?,
            _ => {
                if !capture.is_active() {
                    handle.control.send(ControlMsg::TriggerPressed).await?;
                    // Let the engine process the start before the utterance.
                    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                }
                capture.utter(&line, 0.92).await;
            }
        }
    }

    handle.control.send(ControlMsg::Shutdown).await?;
    engine_task.await?;

    let snapshot = handle.metrics.snapshot();
    tracing::info!(
        "session summary: {} utterances, {} matched, {} unmatched",
        snapshot.utterances,
        snapshot.matched,
        snapshot.no_match
    );
    Ok(())
}
