/*
    This module places a list of rules in the Chomsky hierarchy
*/

use std::fmt::Display;

use tracing::debug;

use crate::grammar::{display_form, is_nonterminal, Rule};
use crate::parser::lexer::{normalize_rhs, split_rule};
use crate::trace::Trace;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum ChomskyType {
    Unrestricted = 0,
    ContextSensitive = 1,
    ContextFree = 2,
    Regular = 3,
}

impl ChomskyType {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            ChomskyType::Regular => "regular",
            ChomskyType::ContextFree => "context-free",
            ChomskyType::ContextSensitive => "context-sensitive",
            ChomskyType::Unrestricted => "unrestricted",
        }
    }

    // Why a grammar of this type got this verdict
    pub fn explanation(self) -> &'static str {
        match self {
            ChomskyType::Regular => "Every rule has the form A -> x, A -> xB (or A -> Bx throughout) or A -> ε, \
                where A and B are single nonterminals and x is a string of terminals.",
            ChomskyType::ContextFree => "Every rule has the form A -> α, where A is a single nonterminal \
                and α is any (possibly empty) string of terminals and nonterminals.",
            ChomskyType::ContextSensitive => "Every rule satisfies |α| <= |β|, the right side being no shorter \
                than the left, allowing S -> ε only while S appears on no right side.",
            ChomskyType::Unrestricted => "The rules fit none of the more restricted classes.",
        }
    }
}

impl Display for ChomskyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "type {} ({})", self.code(), self.label())
    }
}

// The running verdicts. They start out true and are only ever cleared.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Flags {
    pub regular_candidate: bool,
    pub right_linear: bool,
    pub left_linear: bool,
    pub context_free: bool,
    pub context_sensitive: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Flags {
            regular_candidate: true,
            right_linear: true,
            left_linear: true,
            context_free: true,
            context_sensitive: true,
        }
    }
}

impl Flags {
    fn as_array(self) -> [bool; 5] {
        [self.regular_candidate, self.right_linear, self.left_linear, self.context_free, self.context_sensitive]
    }

    /// True when every flag set here is also set in `earlier`.
    pub fn no_more_than(self, earlier: Flags) -> bool {
        self.as_array().iter().zip(earlier.as_array()).all(|(&now, then)| !now || then)
    }

    fn decide(self) -> ChomskyType {
        if self.regular_candidate {
            ChomskyType::Regular
        } else if self.context_free {
            ChomskyType::ContextFree
        } else if self.context_sensitive {
            ChomskyType::ContextSensitive
        } else {
            ChomskyType::Unrestricted
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub grammar_type: ChomskyType,
    pub flags: Flags,
    // Flags as they stood after each rule, before post-processing
    pub history: Vec<Flags>,
    pub trace: Trace,
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn holds(value: bool) -> &'static str {
    if value { "holds" } else { "FAILS" }
}

#[derive(Default)]
struct Scan {
    flags: Flags,
    has_start_epsilon: bool,
    start_in_rhs: bool,
}

impl Scan {
    fn malformed(&mut self, number: usize, raw: &str, trace: &mut Trace) {
        trace.push(format!("Rule {}: malformed '{}' (expected 'A->B'), skipping.", number, raw));
        self.flags.regular_candidate = false;
        self.flags.context_free = false;
        self.flags.context_sensitive = false;
    }

    fn check(&mut self, number: usize, rule: &Rule, start_symbol: char, trace: &mut Trace) {
        let left = rule.lhs.as_str();
        let right = rule.rhs.as_str();

        let left_len = left.chars().count();
        let right_len = right.chars().count();
        let left_upper = left.chars().filter(|&c| is_nonterminal(c)).count();
        let right_upper = right.chars().filter(|&c| is_nonterminal(c)).count();
        let left_single = left_len == 1 && left.chars().all(is_nonterminal);

        trace.push(format!("Rule {}: '{}' -> '{}'", number, left, display_form(right)));
        trace.push(format!(
            "  - left side: length {}, {} uppercase (single nonterminal? {})",
            left_len, left_upper, yes_no(left_single)
        ));
        trace.push(format!("  - right side: length {}, {} uppercase", right_len, right_upper));

        if !left_single {
            self.flags.context_free = false;
        }

        if !right.is_empty() {
            if right_upper > 1 {
                self.flags.regular_candidate = false;
                trace.push("  - regularity: FAILS (more than one nonterminal on the right side)");
            } else if right_upper == 1 {
                let index = right.chars().position(is_nonterminal).unwrap_or(0);

                let right_ok = index == right_len - 1;
                if !right_ok {
                    self.flags.right_linear = false;
                }
                trace.push(format!("  - right-linear form: {} (nonterminal at position {})", holds(right_ok), index));

                let left_ok = index == 0;
                if !left_ok {
                    self.flags.left_linear = false;
                }
                trace.push(format!("  - left-linear form: {} (nonterminal at position {})", holds(left_ok), index));
            } else {
                trace.push("  - right side is terminals only, fits either linear form");
            }
        }

        if right.is_empty() && left.chars().eq(std::iter::once(start_symbol)) {
            self.has_start_epsilon = true;
            trace.push(format!(
                "  - {}->ε found, allowed for now if {} appears on no right side",
                start_symbol, start_symbol
            ));
        } else if right_len < left_len {
            self.flags.context_sensitive = false;
            trace.push("  - context-sensitive length check: FAILS (right side shorter than left)");
        } else {
            trace.push("  - context-sensitive length check: holds (|right| >= |left|)");
        }

        if right.contains(start_symbol) {
            self.start_in_rhs = true;
        }
    }

    fn finish(&mut self, start_symbol: char, trace: &mut Trace) {
        if self.has_start_epsilon && self.start_in_rhs {
            self.flags.context_sensitive = false;
            trace.push(format!(
                "{}->ε is present but {} appears on a right side, so the grammar is not context-sensitive.",
                start_symbol, start_symbol
            ));
        }

        if !self.flags.context_free {
            self.flags.regular_candidate = false;
            trace.push("Some left side is not a single nonterminal, so the grammar is not context-free and cannot be regular.");
        } else if !(self.flags.right_linear || self.flags.left_linear) {
            self.flags.regular_candidate = false;
            trace.push("The rules are neither all right-linear nor all left-linear, so the grammar is not regular.");
        }
    }
}

// Parses one raw line, None when there is no arrow or nothing before it
fn parse_rule(raw: &str) -> Option<Rule> {
    split_rule(raw).filter(|(left, _)| !left.is_empty()).map(|(left, right)| Rule {
        lhs: left.to_string(),
        rhs: normalize_rhs(right).to_string(),
    })
}

/// Classifies `rules` (one `A->B` rule per entry) with the given start
/// symbol. Malformed entries never abort the run; they are logged and push
/// the verdict towards type 0.
pub fn classify<S: AsRef<str>>(rules: &[S], start_symbol: char) -> Classification {
    let mut trace = Trace::new();
    let mut scan = Scan::default();
    let mut history = Vec::with_capacity(rules.len());

    trace.push(format!("Start symbol: {}", start_symbol));
    trace.push(format!("Rule count: {}", rules.len()));
    trace.blank();

    for (index, raw) in rules.iter().enumerate() {
        let raw = raw.as_ref();
        match parse_rule(raw) {
            Some(rule) => {
                scan.check(index + 1, &rule, start_symbol, &mut trace);
                trace.blank();
            }
            None => scan.malformed(index + 1, raw, &mut trace),
        }
        debug!(rule = index + 1, flags = ?scan.flags, "classified rule");
        history.push(scan.flags);
    }

    scan.finish(start_symbol, &mut trace);

    let flags = scan.flags;
    trace.blank();
    trace.push("Flag summary:");
    trace.push(format!("  regular candidate = {}", flags.regular_candidate));
    trace.push(format!("  context-free = {}", flags.context_free));
    trace.push(format!("  context-sensitive = {}", flags.context_sensitive));

    let grammar_type = flags.decide();
    trace.blank();
    trace.push(format!("Result: {}", grammar_type));
    debug!(%grammar_type, rules = rules.len(), "classification finished");

    Classification {
        grammar_type,
        flags,
        history,
        trace,
    }
}

#[cfg(test)]
mod tests {
    use std::iter::zip;
    use std::path::Path;

    use super::*;
    use crate::parser::read_rule_file;

    fn classify_type(rules: &[&str]) -> ChomskyType {
        classify(rules, 'S').grammar_type
    }

    #[test]
    fn scenario_types() {
        let grammars: Vec<Vec<&str>> = vec![
            vec!["S->aS", "S->b"],
            vec!["S->AB", "A->a", "B->b"],
            vec!["AB->a"],
            vec!["S->ε"],
        ];
        let answers = vec![
            ChomskyType::Regular,
            ChomskyType::ContextFree,
            ChomskyType::Unrestricted,
            ChomskyType::Regular,
        ];

        for (rules, answer) in zip(grammars, answers) {
            assert_eq!(classify_type(&rules), answer, "{:?}", rules);
        }
    }

    #[test]
    fn left_linear_is_regular() {
        assert_eq!(classify_type(&["S->Sa", "S->b"]), ChomskyType::Regular);
    }

    #[test]
    fn mixed_linearity_is_context_free() {
        let result = classify(&["S->aA", "A->Sb", "A->b"], 'S');
        assert_eq!(result.grammar_type, ChomskyType::ContextFree);
        assert!(!result.flags.right_linear);
        assert!(!result.flags.left_linear);
        assert!(result.trace.contains("neither all right-linear nor all left-linear"));
    }

    #[test]
    fn middle_nonterminal_breaks_both_forms() {
        let result = classify(&["S->aSb", "S->ab"], 'S');
        assert_eq!(result.grammar_type, ChomskyType::ContextFree);
        assert!(!result.flags.right_linear && !result.flags.left_linear);
    }

    #[test]
    fn context_sensitive_rules() {
        let rules = ["S->aSBC", "S->aBC", "CB->BC", "aB->ab", "bB->bb", "bC->bc", "cC->cc"];
        let result = classify(&rules, 'S');
        assert_eq!(result.grammar_type, ChomskyType::ContextSensitive);
        assert!(!result.flags.context_free);
        assert!(!result.flags.regular_candidate);
    }

    #[test]
    fn start_epsilon_with_start_on_right_side() {
        // Context sensitivity is lost but context freedom is untouched
        let result = classify(&["S->ε", "S->aSb"], 'S');
        assert_eq!(result.grammar_type, ChomskyType::ContextFree);
        assert!(!result.flags.context_sensitive);

        let result = classify(&["S->ε", "AB->SS"], 'S');
        assert_eq!(result.grammar_type, ChomskyType::Unrestricted);
    }

    #[test]
    fn start_epsilon_without_start_on_right_side() {
        let result = classify(&["S->eps", "AB->BA", "S->AB"], 'S');
        assert_eq!(result.grammar_type, ChomskyType::ContextSensitive);
    }

    #[test]
    fn repeated_start_epsilon_rules() {
        let result = classify(&["S->", "S->λ", "S->a"], 'S');
        assert_eq!(result.grammar_type, ChomskyType::Regular);
        assert!(result.flags.context_sensitive);
    }

    #[test]
    fn non_start_epsilon_is_not_context_sensitive() {
        let result = classify(&["S->aA", "A->ε"], 'S');
        assert_eq!(result.grammar_type, ChomskyType::Regular);
        assert!(!result.flags.context_sensitive);
    }

    #[test]
    fn start_symbol_is_a_parameter() {
        let result = classify(&["X->ε", "S->a"], 'X');
        assert!(result.flags.context_sensitive);
        assert!(result.trace.lines()[0].ends_with('X'));

        let result = classify(&["X->ε", "S->a"], 'S');
        assert!(!result.flags.context_sensitive);
    }

    #[test]
    fn empty_left_side_is_malformed() {
        let grammars: Vec<Vec<&str>> = vec![
            vec!["->a"],
            vec!["S->a", " -> ab"],
            vec!["→"],
        ];

        for rules in grammars {
            let result = classify(&rules, 'S');
            assert_eq!(result.grammar_type, ChomskyType::Unrestricted, "{:?}", rules);
            assert!(!result.flags.context_sensitive);
            assert!(result.trace.contains("malformed"));
        }
    }

    #[test]
    fn malformed_rule_downgrades_run() {
        let result = classify(&["S->aS", "S aS", "S->b"], 'S');
        assert_eq!(result.grammar_type, ChomskyType::Unrestricted);
        assert!(result.trace.contains("Rule 2: malformed 'S aS'"));
        // Later rules are still checked
        assert!(result.trace.contains("Rule 3: 'S' -> 'b'"));
        assert_eq!(result.history.len(), 3);
    }

    #[test]
    fn flags_are_monotone() {
        let grammars: Vec<Vec<&str>> = vec![
            vec!["S->aS", "S->Sa", "AB->a", "S->b", "S->ε", "B->aBb"],
            vec!["S->aSBC", "broken", "CB->BC", "S->ε"],
            vec!["S->b", "S->aS", "S->bA", "A->Aa"],
        ];

        for rules in grammars {
            let result = classify(&rules, 'S');
            let mut previous = Flags::default();
            for flags in result.history.iter().copied().chain(std::iter::once(result.flags)) {
                assert!(flags.no_more_than(previous), "{:?} after {:?}", flags, previous);
                previous = flags;
            }
        }
    }

    #[test]
    fn result_is_highest_type_whose_flag_holds() {
        let grammars: Vec<Vec<&str>> = vec![
            vec!["S->aS"],
            vec!["S->SS"],
            vec!["SA->SAA"],
            vec!["SA->S"],
            vec!["oops"],
        ];

        for rules in grammars {
            let result = classify(&rules, 'S');
            let flags = result.flags;
            let expected = [
                (flags.regular_candidate, ChomskyType::Regular),
                (flags.context_free, ChomskyType::ContextFree),
                (flags.context_sensitive, ChomskyType::ContextSensitive),
            ]
            .into_iter()
            .find(|(holds, _)| *holds)
            .map_or(ChomskyType::Unrestricted, |(_, t)| t);
            assert_eq!(result.grammar_type, expected);
        }
    }

    #[test]
    fn rerun_is_identical() {
        let rules = ["S->aSBC", "CB->BC", "S->ε", "junk"];
        assert_eq!(classify(&rules, 'S'), classify(&rules, 'S'));
    }

    #[test]
    fn empty_rule_list_is_regular() {
        let result = classify::<&str>(&[], 'S');
        assert_eq!(result.grammar_type, ChomskyType::Regular);
        assert!(result.history.is_empty());
    }

    #[test]
    fn trace_describes_each_check() {
        let trace = classify(&["S->aS", "AB->a"], 'S').trace;
        let answers = vec![
            "Start symbol: S",
            "Rule count: 2",
            "Rule 1: 'S' -> 'aS'",
            "  - left side: length 1, 1 uppercase (single nonterminal? yes)",
            "  - right side: length 2, 1 uppercase",
            "  - right-linear form: holds (nonterminal at position 1)",
            "  - left-linear form: FAILS (nonterminal at position 1)",
            "  - context-sensitive length check: holds (|right| >= |left|)",
            "Rule 2: 'AB' -> 'a'",
            "  - left side: length 2, 2 uppercase (single nonterminal? no)",
            "  - right side is terminals only, fits either linear form",
            "  - context-sensitive length check: FAILS (right side shorter than left)",
            "  regular candidate = false",
            "Result: type 0 (unrestricted)",
        ];

        for answer in answers {
            assert!(trace.lines().iter().any(|line| line == answer), "missing {:?}", answer);
        }
    }

    #[test]
    fn classify_rule_files() {
        let files = vec!["example_data/regular.rules", "example_data/context_sensitive.rules"];
        let answers = vec![ChomskyType::Regular, ChomskyType::ContextSensitive];

        for (file, answer) in zip(files, answers) {
            let lines = read_rule_file(Path::new(file)).unwrap();
            assert_eq!(classify(&lines, 'S').grammar_type, answer, "{}", file);
        }
    }

    #[test]
    fn type_codes_and_labels() {
        let types = [
            ChomskyType::Unrestricted,
            ChomskyType::ContextSensitive,
            ChomskyType::ContextFree,
            ChomskyType::Regular,
        ];
        let labels = ["unrestricted", "context-sensitive", "context-free", "regular"];

        for (code, (t, label)) in zip(types, labels).enumerate() {
            assert_eq!(t.code() as usize, code);
            assert_eq!(t.label(), label);
        }
        assert_eq!(ChomskyType::ContextFree.to_string(), "type 2 (context-free)");
    }
}
