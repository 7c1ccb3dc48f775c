use std::path::PathBuf;

use clap::Parser;

use crate::derivation::SearchLimits;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar
    pub file: PathBuf,

    /// Sentence to derive instead of prompting (repeatable)
    #[arg(short, long, value_name = "SENTENCE")]
    pub sentence: Vec<String>,

    /// Generate this many random sentences and derive each one
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub generate: Option<u32>,

    /// Expansions allowed when generating a sentence
    #[arg(long, value_name = "STEPS", default_value_t = 1000)]
    pub generate_steps: usize,

    /// How far one rule may be used ahead of its alternatives (default: sentence length)
    #[arg(long, value_name = "USES")]
    pub flex: Option<usize>,

    /// How many tokens longer than the sentence a sentential form may grow
    #[arg(long, value_name = "TOKENS", default_value_t = 1)]
    pub slack: usize,

    /// Recursion ceiling for the search
    #[arg(long, value_name = "DEPTH", default_value_t = 4096)]
    pub max_depth: usize,

    /// Do not print the grammar before deriving
    #[arg(short, long)]
    pub quiet: bool
}

impl Cli {
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            flex: self.flex,
            slack: self.slack,
            max_depth: self.max_depth
        }
    }
}
