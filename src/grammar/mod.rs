/*
    This module is for storing grammars and the symbol convention they share
*/

use std::collections::BTreeMap;
use std::fmt::Display;

use itertools::Itertools;

pub const EPSILON: &str = "ε";

// The base unit in a grammar rule. Uppercase letters are nonterminals,
// every other character is a terminal.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Symbol {
    Terminal(char),
    Nonterminal(char),
}

impl Symbol {
    pub fn of(c: char) -> Self {
        if is_nonterminal(c) {
            Symbol::Nonterminal(c)
        } else {
            Symbol::Terminal(c)
        }
    }
}

pub fn is_nonterminal(c: char) -> bool {
    c.is_uppercase()
}

// Renders a (possibly empty) string of symbols, using ε for the empty one
pub fn display_form(form: &str) -> &str {
    if form.is_empty() { EPSILON } else { form }
}

// A single production as written, `lhs -> rhs`. An empty rhs is epsilon.
#[derive(Debug, PartialEq, Clone)]
pub struct Rule {
    pub lhs: String,
    pub rhs: String,
}

// The alternatives of a nonterminal, in the order they should be tried
pub type Rewrite = Vec<String>;

#[derive(Debug, PartialEq, Clone)]
pub struct Grammar {
    pub start_symbol: char,
    pub rules: BTreeMap<char, Rewrite>,
}

impl Grammar {
    pub fn new(start_symbol: char) -> Self {
        Grammar {
            start_symbol,
            rules: BTreeMap::new(),
        }
    }

    /// The grammar `S→AB; A→Ca|Ba; B→Cb|b; C→cb|ε` used when no grammar
    /// file is given.
    pub fn demonstration() -> Self {
        let mut grammar = Grammar::new('S');
        grammar.add('S', &["AB"]);
        grammar.add('A', &["Ca", "Ba"]);
        grammar.add('B', &["Cb", "b"]);
        grammar.add('C', &["cb", ""]);
        grammar
    }

    // Appends alternatives after any already registered for the symbol
    pub fn add(&mut self, symbol: char, alternatives: &[&str]) {
        self.rules
            .entry(symbol)
            .or_default()
            .extend(alternatives.iter().map(|a| a.to_string()));
    }

    pub fn alternatives(&self, symbol: char) -> &[String] {
        self.rules.get(&symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    // Start symbol first, the rest in symbol order
    fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        let start = self.start_symbol;
        std::iter::once(start)
            .filter(move |s| self.rules.contains_key(s))
            .chain(self.rules.keys().copied().filter(move |&s| s != start))
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for symbol in self.symbols() {
            let alternatives = self.alternatives(symbol)
                .iter()
                .map(|a| display_form(a))
                .join(" | ");
            writeln!(f, "{} -> {}", symbol, alternatives)?;
        }
        Ok(())
    }
}
