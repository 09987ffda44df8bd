//! An ordered, append-only log of human readable lines.
//!
//! Both the classifier and the derivation searcher take a `&mut Trace` and
//! push into it as they go, so the caller owns the whole record once the
//! call returns.

use std::fmt::Display;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Trace {
    lines: Vec<String>,
}

impl Trace {
    pub fn new() -> Self {
        Trace::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::trace!(target: "chomsky::trace", "{}", line);
        self.lines.push(line);
    }

    pub fn blank(&mut self) {
        self.push(String::new());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl Display for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_push_order() {
        let mut trace = Trace::new();
        trace.push("first");
        trace.blank();
        trace.push(format!("{}", "third"));

        assert_eq!(trace.len(), 3);
        assert_eq!(trace.lines(), &["first", "", "third"]);
        assert_eq!(trace.to_string(), "first\n\nthird\n");
        assert!(trace.contains("hir"));
        assert!(!trace.contains("fourth"));
    }
}
