//! # CLI Layer
//!
//! Responsibilities:
//! 1. **Logging**: install a `tracing` subscriber on stderr (`RUST_LOG`, `-v`)
//! 2. **Config**: resolve a [`StoreConfig`] from file, environment and flags
//! 3. **Dispatch**: run the selected command against a [`FileSystemStore`]
//! 4. **Output**: print through `render` and return the exit code

use super::render;
use super::setup::{Cli, Commands};
use anyhow::{Context, Result};
use clap::Parser;
use pagestore::codec::{decode_name, encode_name};
use pagestore::{FileSystemStore, Page, PageProvider, StoreConfig, Version};
use std::io::Read;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = resolve_config(&cli)?;

    // Codec commands only need the charset, not a page directory
    match &cli.command {
        Commands::Encode { name } => {
            println!("{}", encode_name(name, config.charset()?)?);
            return Ok(0);
        }
        Commands::Decode { stem } => {
            println!("{}", decode_name(stem, config.charset()?)?);
            return Ok(0);
        }
        _ => {}
    }

    let store = FileSystemStore::open(&config).context("Failed to open page directory")?;
    dispatch(&store, cli.command)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_config(cli: &Cli) -> Result<StoreConfig> {
    let mut config = StoreConfig::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.dir {
        config.page_dir = Some(dir.clone());
    }
    if let Some(encoding) = &cli.encoding {
        config.encoding = encoding.clone();
    }
    if let Some(ext) = &cli.ext {
        config.file_ext = ext.clone();
    }
    debug!(
        dir = ?config.page_dir,
        encoding = %config.encoding,
        ext = %config.file_ext,
        "Resolved store configuration"
    );
    Ok(config)
}

fn dispatch(store: &FileSystemStore, command: Commands) -> Result<i32> {
    match command {
        Commands::List { json } => {
            let pages = store.list()?;
            if json {
                println!("{}", render::render_list_json(&pages)?);
            } else {
                print!("{}", render::render_list(&pages));
            }
        }
        Commands::Cat { name } => {
            let page = store.get(&name, Version::Latest)?;
            print!("{}", page.content);
        }
        Commands::Info { name, json } => {
            let page = store.get(&name, Version::Latest)?;
            let file = store.content_path(&name)?;
            if json {
                println!("{}", render::render_info_json(&page, &file)?);
            } else {
                print!("{}", render::render_info(&page, &file));
            }
        }
        Commands::Put {
            name,
            text,
            author,
            attrs,
        } => {
            let content = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read page content from stdin")?;
                    buf
                }
            };
            let mut page = Page::new(&name).with_content(content);
            page.author = author;
            page.attributes.extend(attrs);

            store.put(&page)?;
            println!("Saved {}", store.content_path(&name)?.display());
        }
        Commands::Rm { name } => {
            store.delete(&name)?;
            println!("Deleted {}", name);
        }
        Commands::Mv { from, to } => {
            store.rename(&from, &to)?;
            println!("Renamed {} to {}", from, to);
        }
        Commands::Exists { name } => {
            return Ok(if store.exists(&name)? { 0 } else { 1 });
        }
        Commands::Encode { .. } | Commands::Decode { .. } => {}
    }
    Ok(0)
}
