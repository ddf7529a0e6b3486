//! Textblocks - split text into titles and paragraphs in the terminal.
//!
//! # Usage
//!
//! ```bash
//! textblocks notes.txt
//! pbpaste | textblocks -
//! textblocks --dump outline notes.txt
//! textblocks --api-url http://localhost:9000/tts --save
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use textblocks::app::App;
use textblocks::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use textblocks::dump::{DumpFormat, dump};
use textblocks::session::Session;

/// Split text into numbered titles and paragraphs
#[derive(Parser, Debug)]
#[command(name = "textblocks", version, about, long_about = None)]
struct Cli {
    /// Text file to open, or `-` to read stdin
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Print the segmented text instead of opening the editor
    #[arg(long, value_enum, value_name = "FORMAT")]
    dump: Option<DumpFormat>,

    /// Start with the outline pane hidden
    #[arg(long)]
    no_outline: bool,

    /// Start with the outline pane visible
    #[arg(long)]
    outline: bool,

    /// Endpoint that receives exported requests
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// HTTP method of exported requests
    #[arg(long, value_name = "METHOD")]
    method: Option<String>,

    /// Language used to name audio files
    #[arg(long, value_name = "LANGUAGE")]
    language: Option<String>,

    /// Environment variable that holds the API key
    #[arg(long, value_name = "VAR")]
    api_key_env: Option<String>,

    /// Write log events to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    Ok(())
}

/// Read the input text. `-` reads stdin; no file starts empty.
fn read_input(file: Option<&Path>) -> Result<(Option<PathBuf>, String)> {
    match file {
        None => Ok((None, String::new())),
        Some(path) if path == Path::new("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok((None, text))
        }
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("File not found: {}", path.display());
            }
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok((Some(path.to_path_buf()), text))
        }
    }
}

fn main() -> Result<()> {
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

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    let (file_path, text) = read_input(cli.file.as_deref())?;
    let api = effective.api_settings();

    if let Some(format) = cli.dump {
        let mut session = Session::from_text(&text);
        let out = dump(&mut session, format, &api, effective.language(), Utc::now())?;
        println!("{out}");
        return Ok(());
    }

    let mut app = App::new(file_path, text)
        .with_outline_visible(effective.outline_visible())
        .with_api_settings(api)
        .with_language(effective.language())
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
