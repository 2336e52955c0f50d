use clap::Parser;
use std::path::PathBuf;

const PAGES_HELP: &str = "Pages to include, 1-based. Tokens are separated by commas and/or \
whitespace. Supported: single numbers (3), ranges (5-9), stepped ranges (9-53:4, 9..53..4, \
range(9,53,4)) and descending stepped ranges (53-9:-4). Order and repeats are kept.";

#[derive(Parser)]
#[command(name = "pdfselect")]
#[command(about = "Select, reorder and repeat pages of a PDF into a new PDF")]
#[command(version)]
pub struct Cli {
    /// PDF file to select pages from
    #[arg(required_unless_present = "mcp")]
    pub input: Option<PathBuf>,

    #[arg(required_unless_present = "mcp", help = PAGES_HELP)]
    pub pages: Option<String>,

    /// Output file (default: <input>.selected.pdf, numbered if taken)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only print the expanded page numbers (1-based), then exit
    #[arg(long)]
    pub print_only: bool,

    /// Log debug details to stderr (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,

    /// Run as MCP server on stdio instead
    #[arg(long, conflicts_with_all = ["input", "pages", "output", "print_only"])]
    pub mcp: bool,
}
