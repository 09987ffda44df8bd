/*
    This module searches for a leftmost derivation of a string
*/

use tracing::{debug, warn};

use crate::grammar::{display_form, is_nonterminal, Grammar};
use crate::trace::Trace;

// Bounds on the search. A branch past the depth or length limit is
// abandoned, which keeps grammars like `S -> Sa | a` from recursing forever.
// Once `max_steps` forms have been visited the whole search stops, which
// caps grammars like `S -> SS | a` whose branching grows exponentially.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    // Substitutions along a single branch
    pub max_depth: usize,
    // Characters in a sentential form
    pub max_form_len: usize,
    // Sentential forms visited in total
    pub max_steps: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_depth: 64,
            max_form_len: 256,
            max_steps: 100_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    pub accepted: bool,
    // Whether some branch was cut off by the limits, in which case a
    // rejection is not conclusive
    pub pruned: bool,
    pub trace: Trace,
}

pub struct Searcher<'g> {
    grammar: &'g Grammar,
    limits: Limits,
}

struct Search<'t> {
    target: &'t str,
    trace: Trace,
    pruned: bool,
    steps: usize,
    exhausted: bool,
}

impl<'g> Searcher<'g> {
    pub fn new(grammar: &'g Grammar, limits: Limits) -> Self {
        Searcher { grammar, limits }
    }

    /// Depth-first search from the start symbol, always expanding the
    /// leftmost nonterminal and trying its alternatives in order. Stops at
    /// the first success.
    pub fn derive(&self, target: &str) -> Derivation {
        self.derive_from(self.grammar.start_symbol, target)
    }

    pub fn derive_from(&self, start_symbol: char, target: &str) -> Derivation {
        let mut search = Search {
            target,
            trace: Trace::new(),
            pruned: false,
            steps: 0,
            exhausted: false,
        };

        let start = start_symbol.to_string();
        let accepted = self.expand(&start, 0, &mut search);

        if search.pruned {
            warn!(query = target, limits = ?self.limits, "derivation search hit its limits");
        }
        debug!(query = target, accepted, steps = search.steps, lines = search.trace.len(), "derivation search finished");

        Derivation {
            accepted,
            pruned: search.pruned,
            trace: search.trace,
        }
    }

    fn expand(&self, form: &str, depth: usize, search: &mut Search<'_>) -> bool {
        let pad = "  ".repeat(depth);
        if search.steps >= self.limits.max_steps {
            if !search.exhausted {
                search.exhausted = true;
                search.pruned = true;
                search.trace.push(format!("{}abandoned: search budget of {} forms spent", pad, self.limits.max_steps));
            }
            return false;
        }
        search.steps += 1;
        search.trace.push(format!("{}{}", pad, display_form(form)));

        // A finished form is always compared, whatever its length
        let Some((index, symbol)) = form.char_indices().find(|&(_, c)| is_nonterminal(c)) else {
            return form == search.target;
        };

        if depth > self.limits.max_depth {
            search.pruned = true;
            search.trace.push(format!("{}abandoned: more than {} substitutions", pad, self.limits.max_depth));
            return false;
        }
        if form.chars().count() > self.limits.max_form_len {
            search.pruned = true;
            search.trace.push(format!("{}abandoned: longer than {} symbols", pad, self.limits.max_form_len));
            return false;
        }

        let alternatives = self.grammar.alternatives(symbol);
        if alternatives.is_empty() {
            search.trace.push(format!("{}no rules for {}", pad, symbol));
        }

        let before = &form[..index];
        let after = &form[index + symbol.len_utf8()..];
        for alternative in alternatives {
            search.trace.push(format!("{}try {} → {}", pad, symbol, display_form(alternative)));

            let candidate = format!("{}{}{}", before, alternative, after);
            if self.expand(&candidate, depth + 1, search) {
                search.trace.push(format!(
                    "{}replaced {} → {}, giving {}",
                    pad, symbol, display_form(alternative), display_form(&candidate)
                ));
                return true;
            }
            if search.exhausted {
                return false;
            }
        }

        false
    }
}

/// Searches `grammar` for `target` with the default limits.
pub fn derive(grammar: &Grammar, target: &str) -> Derivation {
    Searcher::new(grammar, Limits::default()).derive(target)
}
