use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the menu file (a PDF, or plain text with --text)
    #[arg(short, long)]
    pub menu_file: String,

    /// Treat the input as already-extracted menu text, skipping the
    /// PDF-conversion API
    #[arg(long)]
    pub text: bool,

    /// Use the deterministic line scanner instead of the LLM extractor
    /// (implies --text; works without an OpenAI key)
    #[arg(long)]
    pub scan: bool,

    /// Load raw strategies from a JSON file instead of calling the LLM
    #[arg(long)]
    pub strategies_file: Option<String>,

    /// Strategy id to leave disabled (repeatable), e.g. --disable strategy_2
    #[arg(long = "disable", value_name = "STRATEGY_ID")]
    pub disabled: Vec<String>,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
