/*
    This module generates random sentences of a derivation grammar
*/

use rand::prelude::*;
use thiserror::Error;

use crate::error_handling::ErrorType;
use crate::grammar::*;

#[derive(Debug, PartialEq, Error)]
pub enum GenerateErrorType {
    // A nonterminal without alternatives was reached
    #[error("No definition for nonterminal `{0}`")]
    UndefinedNonterminal(char),
    // Expansion kept going past the depth limit
    #[error("Gave up after nesting {0} expansions deep")]
    TooDeep(usize),
}

impl ErrorType for GenerateErrorType {}

pub type GenResult = Result<String, GenerateErrorType>;

struct Generator<'g, R: Rng> {
    grammar: &'g Grammar,
    rng: R,
    max_depth: usize,
}

/// Generates a sentence from the grammar's start symbol, choosing
/// alternatives uniformly at random. Nonterminals may nest at most
/// `max_depth` deep.
pub fn sample(grammar: &Grammar, rng: &mut impl Rng, max_depth: usize) -> GenResult {
    let mut generator = Generator { grammar, rng, max_depth };
    generator.generate_nonterminal(grammar.start_symbol, 0)
}

impl<R: Rng> Generator<'_, R> {
    fn generate_nonterminal(&mut self, nonterminal: char, depth: usize) -> GenResult {
        if depth >= self.max_depth {
            return Err(GenerateErrorType::TooDeep(self.max_depth));
        }
        let grammar = self.grammar;
        let alternative = grammar.alternatives(nonterminal)
            .choose(&mut self.rng)
            .ok_or(GenerateErrorType::UndefinedNonterminal(nonterminal))?;

        self.generate_alternative(alternative, depth + 1)
    }

    fn generate_alternative(&mut self, alternative: &str, depth: usize) -> GenResult {
        let mut result = String::new();
        for c in alternative.chars() {
            result.push_str(&self.generate_symbol(Symbol::of(c), depth)?);
        }

        Ok(result)
    }

    fn generate_symbol(&mut self, symbol: Symbol, depth: usize) -> GenResult {
        match symbol {
            Symbol::Nonterminal(c) => self.generate_nonterminal(c, depth),
            Symbol::Terminal(c) => Ok(c.to_string()),
        }
    }
}
