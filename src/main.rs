mod cli;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use chomsky::classifier::classify;
use chomsky::derivation::{Limits, Searcher};
use chomsky::generator;
use chomsky::grammar::{display_form, Grammar};
use chomsky::parser::{self, CompileErrors};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

const EXIT_REJECTED: u8 = 1;
const EXIT_BAD_INPUT: u8 = 2;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn report(errors: CompileErrors) -> ExitCode {
    for error in errors {
        eprintln!("{}", error);
    }
    ExitCode::from(EXIT_BAD_INPUT)
}

fn load_grammar(file: Option<PathBuf>, start: Option<char>) -> Result<Grammar, CompileErrors> {
    match file {
        Some(path) => {
            info!(path = %path.display(), "loading grammar");
            parser::parse_grammar_file(&path, start)
        }
        None => {
            let mut grammar = Grammar::demonstration();
            if let Some(start) = start {
                grammar.start_symbol = start;
            }
            Ok(grammar)
        }
    }
}

fn run_classify(file: Option<PathBuf>, start: char) -> ExitCode {
    let lines = match file {
        Some(path) => parser::read_rule_file(&path),
        None => parser::read_rule_lines(std::io::stdin().lock())
            .map_err(|e| vec![parser::CompileError {
                location: chomsky::error_handling::Location::file(PathBuf::from("<stdin>")),
                error: parser::CompileErrorType::FileError(e)
            }]),
    };
    let lines = match lines {
        Ok(lines) => lines,
        Err(errors) => return report(errors),
    };

    if lines.is_empty() {
        eprintln!("No rules given. Write one rule per line, for example: S->aAB");
        return ExitCode::from(EXIT_BAD_INPUT);
    }

    let result = classify(lines.as_slice(), start);

    println!("=== Rule by rule ===");
    println!();
    print!("{}", result.trace);
    println!();
    println!("=== Result ===");
    println!("Grammar is {}", result.grammar_type);
    println!("{}", result.grammar_type.explanation());

    ExitCode::SUCCESS
}

fn run_derive(target: String, grammar: Grammar, limits: Limits) -> ExitCode {
    let derivation = Searcher::new(&grammar, limits).derive(&target);

    print!("{}", derivation.trace);
    println!();
    if derivation.accepted {
        println!("`{}` is in the language", display_form(&target));
        ExitCode::SUCCESS
    } else {
        if derivation.pruned {
            println!("`{}` was not derived within the search limits", display_form(&target));
        } else {
            println!("`{}` is not in the language", display_form(&target));
        }
        ExitCode::from(EXIT_REJECTED)
    }
}

// Prints each sample to `out` and each failure to `err`, returning the exit status
fn write_samples(
    grammar: &Grammar,
    rng: &mut impl Rng,
    amount: u32,
    max_depth: usize,
    out: &mut impl Write,
    err: &mut impl Write,
) -> std::io::Result<u8> {
    let mut status = 0;
    for _ in 0..amount {
        match generator::sample(grammar, &mut *rng, max_depth) {
            Ok(sentence) => writeln!(out, "{}", display_form(&sentence))?,
            Err(error) => {
                writeln!(err, "{}", error)?;
                status = EXIT_BAD_INPUT;
            }
        }
    }
    Ok(status)
}

fn run_sample(grammar: Grammar, amount: u32, seed: Option<u64>, max_depth: usize) -> ExitCode {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let status = write_samples(
        &grammar,
        &mut rng,
        amount,
        max_depth,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    );
    match status {
        Ok(status) => ExitCode::from(status),
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::from(EXIT_BAD_INPUT)
        }
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Classify { file, start } => run_classify(file, start),
        Command::Derive { target, grammar, start, max_depth, max_length, max_steps } => {
            match load_grammar(grammar, start) {
                Ok(grammar) => run_derive(target, grammar, Limits { max_depth, max_form_len: max_length, max_steps }),
                Err(errors) => report(errors),
            }
        }
        Command::Sample { grammar, start, amount, seed, max_depth } => {
            match load_grammar(grammar, start) {
                Ok(grammar) => run_sample(grammar, amount, seed, max_depth),
                Err(errors) => report(errors),
            }
        }
    }
}
