/*
    This module reads rule lines and derivation grammars
*/

pub mod lexer;
mod verifier;

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use thiserror::Error;

use crate::error_handling::*;
use crate::grammar::*;
use verifier::verify_rules;

#[derive(Debug, Error)]
pub enum CompileErrorType {
    // A line which should contain a rule has no arrow
    #[error("Expected `->` or `→` between the two sides of the rule")]
    MissingArrow,
    // Derivation grammars are context-free, so the left side must be one nonterminal
    #[error("Left side `{0}` is not a single uppercase nonterminal")]
    InvalidLeftSide(String),
    // A nonterminal is used but never given alternatives
    #[error("Could not find definition for `{0}`")]
    UndefinedNonterminal(char),
    // The requested start symbol has no alternatives
    #[error("Start symbol `{0}` has no rules")]
    UndefinedStart(char),
    // Nothing but blank lines and comments
    #[error("Grammar contains no rules")]
    EmptyGrammar,
    // There was an issue with reading a file
    #[error("File error: {0}")]
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            (CompileErrorType::InvalidLeftSide(a), CompileErrorType::InvalidLeftSide(b)) => a == b,
            (CompileErrorType::UndefinedNonterminal(a), CompileErrorType::UndefinedNonterminal(b)) => a == b,
            (CompileErrorType::UndefinedStart(a), CompileErrorType::UndefinedStart(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

fn io_error(error: std::io::Error, file: &Path) -> CompileError {
    CompileError {
        location: Location::file(file.to_path_buf()),
        error: CompileErrorType::FileError(error)
    }
}

fn is_rule_line(line: &str) -> bool {
    !line.is_empty() && !line.starts_with(';')
}

// Lines of a rule listing, trimmed and without blanks or `;` comments
pub fn read_rule_lines(reader: impl Read) -> std::io::Result<Vec<String>> {
    BufReader::new(reader)
        .lines()
        .map_ok(|line| line.trim().to_string())
        .filter_ok(|line| is_rule_line(line))
        .collect()
}

pub fn read_rule_file(path: &Path) -> FileResult<Vec<String>> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path)])?;
    read_rule_lines(file).map_err(|e| vec![io_error(e, path)])
}

#[derive(PartialEq, Debug)]
struct GrammarLine {
    symbol: char,
    rewrite: Rewrite,
    location: Location
}

fn parse_line(line: &str, location: Location) -> Result<GrammarLine> {
    let (left, right) = lexer::split_rule(line).ok_or(CompileErrorType::MissingArrow)?;

    let mut left_chars = left.chars();
    let symbol = match (left_chars.next(), left_chars.next()) {
        (Some(c), None) if is_nonterminal(c) => c,
        _ => return Err(CompileErrorType::InvalidLeftSide(left.to_string())),
    };

    Ok(GrammarLine {
        symbol,
        rewrite: lexer::lex_alternatives(right),
        location
    })
}

fn parse_located_line(line: &str, location: Location) -> LineResult<GrammarLine> {
    parse_line(line, location.clone())
        .map_err(|error| CompileError { location, error })
}

fn grammar_from_lines(lines: Vec<GrammarLine>, start: Option<char>, file: &Path) -> FileResult<Grammar> {
    let start_symbol = match (start, lines.first()) {
        (Some(start), _) => start,
        (None, Some(first)) => first.symbol,
        (None, None) => return Err(vec![CompileError {
            location: Location::file(file.to_path_buf()),
            error: CompileErrorType::EmptyGrammar
        }]),
    };

    verify_rules(&lines, start_symbol, file)?;

    let mut grammar = Grammar::new(start_symbol);
    for line in lines {
        grammar.rules.entry(line.symbol).or_default().extend(line.rewrite);
    }

    Ok(grammar)
}

/// Parses a derivation grammar, one `A -> x | y` rule per line. The first
/// left side is the start symbol unless `start` overrides it.
pub fn parse_grammar_str(text: &str, start: Option<char>, file: &Path) -> FileResult<Grammar> {
    let parsed_lines = text.lines()
        .enumerate()
        .map(|(num, line)| (num + 1, line.trim()))
        .filter(|(_, line)| is_rule_line(line))
        .map(|(num, line)| parse_located_line(line, Location {
            file: file.to_path_buf(),
            line: num
        }));

    let (lines, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    if !errors.is_empty() {
        return Err(errors);
    }

    grammar_from_lines(lines, start, file)
}

pub fn parse_grammar_file(path: &PathBuf, start: Option<char>) -> FileResult<Grammar> {
    let mut text = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut text))
        .map_err(|e| vec![io_error(e, path)])?;

    parse_grammar_str(&text, start, path)
}
