use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pagestore",
    bin_name = "pagestore",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Inspect and edit a wiki page directory", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Page directory (overrides config and PAGESTORE_PAGE_DIR)
    #[arg(short, long, global = true, help_heading = "Store")]
    pub dir: Option<PathBuf>,

    /// Charset for filenames and content: ISO-8859-1 or UTF-8
    #[arg(short, long, global = true, help_heading = "Store")]
    pub encoding: Option<String>,

    /// Content file extension
    #[arg(long, global = true, help_heading = "Store")]
    pub ext: Option<String>,

    /// TOML configuration file
    #[arg(short, long, global = true, help_heading = "Store")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all pages
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the content of a page
    #[command(display_order = 2)]
    Cat { name: String },

    /// Show author, attributes and file details of a page
    #[command(display_order = 3)]
    Info {
        name: String,

        #[arg(long)]
        json: bool,
    },

    /// Create or overwrite a page (reads stdin when TEXT is omitted)
    #[command(display_order = 4)]
    Put {
        name: String,

        text: Option<String>,

        #[arg(short, long)]
        author: Option<String>,

        /// Attribute as KEY=VALUE; only keys starting with '@' are stored
        #[arg(long = "attr", value_name = "KEY=VALUE", value_parser = parse_attr)]
        attrs: Vec<(String, String)>,
    },

    /// Delete a page and its properties
    #[command(alias = "delete", display_order = 5)]
    Rm { name: String },

    /// Rename a page
    #[command(alias = "rename", display_order = 6)]
    Mv { from: String, to: String },

    /// Exit with 0 if the page exists, 1 otherwise
    #[command(display_order = 7)]
    Exists { name: String },

    /// Print the filename stem a page name maps to
    #[command(display_order = 8)]
    Encode { name: String },

    /// Print the page name a filename stem maps to
    #[command(display_order = 9)]
    Decode { stem: String },
}

fn parse_attr(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))
}
