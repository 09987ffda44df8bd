use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// More log output on stderr (repeatable, RUST_LOG takes precedence)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Find the Chomsky type of a list of rules, one `A->B` per line
    Classify {
        /// File containing the rules (default: stdin)
        file: Option<PathBuf>,

        /// Start symbol
        #[arg(short, long, value_name = "SYMBOL", default_value_t = 'S')]
        start: char,
    },

    /// Check whether a string can be derived, showing the search
    Derive {
        /// String to derive
        target: String,

        /// File containing the grammar (default: S->AB, A->Ca|Ba, B->Cb|b, C->cb|ε)
        #[arg(short, long, value_name = "FILE")]
        grammar: Option<PathBuf>,

        /// Start symbol (default: first in the file)
        #[arg(short, long, value_name = "SYMBOL")]
        start: Option<char>,

        /// Most substitutions along one branch of the search
        #[arg(long, value_name = "N", default_value_t = 64)]
        max_depth: usize,

        /// Longest sentential form the search will follow
        #[arg(long, value_name = "N", default_value_t = 256)]
        max_length: usize,

        /// Most sentential forms the whole search will visit
        #[arg(long, value_name = "N", default_value_t = 100_000)]
        max_steps: usize,
    },

    /// Generate random strings of the grammar
    Sample {
        /// File containing the grammar (default: the demonstration grammar)
        #[arg(short, long, value_name = "FILE")]
        grammar: Option<PathBuf>,

        /// Start symbol (default: first in the file)
        #[arg(short, long, value_name = "SYMBOL")]
        start: Option<char>,

        /// Amount to generate
        #[arg(short = 'n', long, value_name = "AMOUNT", default_value_t = 1)]
        amount: u32,

        /// Seed for repeatable output
        #[arg(long)]
        seed: Option<u64>,

        /// How deeply nonterminals may nest before giving up
        #[arg(long, value_name = "N", default_value_t = 32)]
        max_depth: usize,
    },
}
