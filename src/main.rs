//! sectionfold: replay collapse interactions against Markdown documents.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use sectionfold::config::Config;
use sectionfold::formats::markdown::MarkdownFormat;
use sectionfold::host::markdown::{MarkdownHost, StyleSheet};
use sectionfold::input;
use sectionfold::page::{Page, PageEvent, PageSnapshot};
use sectionfold::persistence::{CookieJar, FileStore};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "sectionfold")]
#[command(about = "Collapsible section state for hierarchical documents", long_about = None)]
struct Args {
    /// Files or directories to open
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<PathBuf>,

    /// Session file holding remembered collapse state
    #[arg(long)]
    session: Option<PathBuf>,

    /// Cookie string the first page opens with
    #[arg(long, default_value = "")]
    cookie: String,

    /// Viewport width in columns
    #[arg(long, short = 'w')]
    width: Option<u32>,

    /// Activate every section header with this label (repeatable, applied in order)
    #[arg(long, value_name = "LABEL")]
    toggle: Vec<String>,

    /// Activate every side panel menu item with this label (repeatable, applied in order)
    #[arg(long, value_name = "LABEL")]
    toggle_menu: Vec<String>,

    /// Activate the side panel's collapse button
    #[arg(long)]
    toggle_sidebar: bool,

    /// Resize the viewport after the toggles and let it settle
    #[arg(long, value_name = "WIDTH")]
    resize: Option<u32>,

    /// Open pages without a side panel
    #[arg(long)]
    no_sidebar: bool,

    /// Configuration file to use instead of ./sectionfold.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Report<'a> {
    path: PathBuf,
    page: PageSnapshot,
    styles: &'a StyleSheet,
}

fn main() -> sectionfold::Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr)
        .init();

    let mut cfg = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions.clone_from(&args.ext);
    }
    if let Some(width) = args.width {
        cfg.wrap_width = width;
    }

    let documents = input::find_documents(args.paths.clone(), &cfg.file_extensions)?;
    if documents.is_empty() {
        eprintln!("No matching files found");
        return Ok(());
    }

    let session_path = args
        .session
        .clone()
        .unwrap_or_else(|| PathBuf::from(&cfg.session_file));
    let mut store = FileStore::open(session_path);
    let mut cookies = CookieJar::new(args.cookie.as_str());

    let mut out = Vec::new();
    for doc in &documents {
        let outline = input::extract_outline(doc, &MarkdownFormat)?;
        let mut host = MarkdownHost::new(outline, cfg.wrap_width);
        if args.no_sidebar {
            host = host.without_side_panel();
        }

        let mut page = Page::open(host, &mut store, cookies, &cfg);
        replay(&mut page, &args, &cfg);

        let report = Report {
            path: doc.clone(),
            page: page.snapshot(),
            styles: page.host().styles(),
        };
        out.push(serde_json::to_value(&report).map_err(io::Error::other)?);

        let (_, _, jar) = page.close();
        cookies = jar;
    }

    let json = serde_json::to_string_pretty(&out).map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}

/// Feeds the requested interactions to a page as host events.
fn replay(page: &mut Page<MarkdownHost, &mut FileStore>, args: &Args, cfg: &Config) {
    let now = Instant::now();

    // A label names every header carrying it; each one is activated in document order.
    for label in &args.toggle {
        let headers = page.sections().tree().headers_labelled(label);
        let hits = headers
            .into_iter()
            .filter(|&header| page.dispatch(PageEvent::Activate(header), now))
            .count();
        if hits == 0 {
            tracing::warn!(label = %label, "no collapsible section with this label");
        }
    }
    for label in &args.toggle_menu {
        let headers = page
            .menu()
            .map(|menu| menu.tree().headers_labelled(label))
            .unwrap_or_default();
        let hits = headers
            .into_iter()
            .filter(|&header| page.dispatch(PageEvent::ActivateMenu(header), now))
            .count();
        if hits == 0 {
            tracing::warn!(label = %label, "no collapsible menu item with this label");
        }
    }
    if args.toggle_sidebar && !page.dispatch(PageEvent::ToggleSidebar, now) {
        tracing::warn!("page has no side panel");
    }
    if let Some(width) = args.resize {
        page.dispatch(PageEvent::Resize(width), now);
        page.poll(now + cfg.debounce());
    }
}
