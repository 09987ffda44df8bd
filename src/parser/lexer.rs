use itertools::Itertools;

// Accepted between the two sides of a rule
pub const ARROWS: [&str; 2] = ["->", "→"];

// Right sides which all mean the empty production
const EPSILON_GLYPHS: [&str; 3] = ["λ", "Λ", "ε"];
const EPSILON_WORDS: [&str; 2] = ["eps", "epsilon"];

// Splits a rule on the first arrow, whichever glyph comes first. Both sides
// are trimmed. Returns None if there is no arrow at all.
pub fn split_rule(line: &str) -> Option<(&str, &str)> {
    let (index, arrow) = ARROWS.iter()
        .filter_map(|arrow| line.find(arrow).map(|index| (index, *arrow)))
        .min_by_key(|(index, _)| *index)?;

    let left = line[..index].trim();
    let right = line[index + arrow.len()..].trim();
    Some((left, right))
}

pub fn is_epsilon_alias(raw: &str) -> bool {
    raw.is_empty()
        || EPSILON_GLYPHS.contains(&raw)
        || EPSILON_WORDS.iter().any(|word| raw.eq_ignore_ascii_case(word))
}

pub fn normalize_rhs(raw: &str) -> &str {
    let raw = raw.trim();
    if is_epsilon_alias(raw) { "" } else { raw }
}

// Splits the right side of a derivation grammar line on `|`
pub fn lex_alternatives(right: &str) -> Vec<String> {
    right.split('|')
        .map(normalize_rhs)
        .map(str::to_string)
        .collect_vec()
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    #[test]
    fn split_normal_rule() {
        let lines = vec![
            "S->aS",
            "  S  ->  aS  ",
            "S → aS",
            "AB->a",
            "S->",
            "S->a->b",
            "S→a->b",
        ];
        let answers = vec![
            ("S", "aS"),
            ("S", "aS"),
            ("S", "aS"),
            ("AB", "a"),
            ("S", ""),
            ("S", "a->b"),
            ("S", "a->b"),
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(split_rule(line), Some(answer));
        }
    }

    #[test]
    fn split_malformed_rule() {
        for line in ["S aS", "S=aS", "S-aS", "", "S >aS"] {
            assert_eq!(split_rule(line), None);
        }
    }

    #[test]
    fn epsilon_aliases() {
        for raw in ["", "λ", "Λ", "ε", "eps", "EPS", "Epsilon", "epsilon", "  eps  "] {
            assert_eq!(normalize_rhs(raw), "", "{:?} should be epsilon", raw);
        }
        for raw in ["a", "aS", "epsilonS", "e", "εa"] {
            assert_eq!(normalize_rhs(raw), raw);
        }
    }

    #[test]
    fn lex_normal_alternatives() {
        let lines = vec!["Ca | Ba", "cb|ε", "AB", "a | eps | "];
        let answers = vec![
            vec!["Ca", "Ba"],
            vec!["cb", ""],
            vec!["AB"],
            vec!["a", "", ""],
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_alternatives(line), answer);
        }
    }
}
