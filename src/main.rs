//! Codingg - A multi-tab text editor for the terminal.
//!
//! # Usage
//!
//! ```bash
//! codingg notes.txt src/main.rs
//! codingg --wrap none --gutter line-count Cargo.toml
//! codingg --tab-size 2 --save
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use codingg::app::App;
use codingg::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use codingg::editor::WrapMode;
use codingg::gutter::GutterMode;
use codingg::perf;

/// A multi-tab text editor for the terminal
#[derive(Parser, Debug)]
#[command(name = "codingg", version, about, long_about = None)]
struct Cli {
    /// Files to open, one tab each
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Tab stop width, and spaces inserted by Tab
    #[arg(long, value_name = "N")]
    tab_size: Option<usize>,

    /// Insert a tab character instead of spaces
    #[arg(long)]
    no_expand_tabs: bool,

    /// Do not open the welcome tab when no files are given
    #[arg(long)]
    no_welcome: bool,

    /// How long lines are wrapped
    #[arg(long, value_enum)]
    wrap: Option<WrapMode>,

    /// How the line-number gutter follows the text
    #[arg(long, value_enum)]
    gutter: Option<GutterMode>,

    /// Enable startup performance logging
    #[arg(long)]
    perf: bool,

    /// Write detailed event/frame debug events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf);
    let debug_log_path = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("CODINGG_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(debug_log_path.as_deref()) {
        eprintln!(
            "[warn] Failed to initialize debug log {}: {}",
            debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    let app = App::new(cli.files).with_config(effective.editor_config());

    app.run().context("Application error")
}
