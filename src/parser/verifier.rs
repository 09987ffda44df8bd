use std::collections::HashSet;
use std::path::Path;

use itertools::Itertools;

use crate::grammar::Symbol::Nonterminal;
use crate::grammar::{Rewrite, Symbol};
use super::CompileErrorType::{UndefinedNonterminal, UndefinedStart};
use super::{CompileError, CompileErrors, FileResult, GrammarLine, Location};

fn get_rewrite_undefined_symbols(rewrite: &Rewrite, location: &Location, defined: &HashSet<char>) -> CompileErrors {
    // Pull the nonterminals out of every alternative, keep the undefined
    // ones, and report each only once per line
    rewrite.iter()
        .flat_map(|alternative| alternative.chars().map(Symbol::of))
        .filter_map(|symbol| match symbol {
            Nonterminal(c) => Some(c),
            _ => None
        })
        .filter(|c| !defined.contains(c))
        .unique()
        .map(|c| CompileError {
            location: location.to_owned(),
            error: UndefinedNonterminal(c)
        })
        .collect()
}

pub(super) fn verify_rules(lines: &[GrammarLine], start_symbol: char, file: &Path) -> FileResult<()> {
    let defined: HashSet<char> = lines.iter().map(|line| line.symbol).collect();

    let mut errors: CompileErrors = lines.iter()
        .flat_map(|line| get_rewrite_undefined_symbols(&line.rewrite, &line.location, &defined))
        .collect();

    if !defined.contains(&start_symbol) {
        errors.push(CompileError {
            location: Location::file(file.to_path_buf()),
            error: UndefinedStart(start_symbol)
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
