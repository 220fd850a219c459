//! Captured demo output.
//!
//! Demos never print directly. Each one writes lines into a [`Report`], and
//! the driver (or a test) decides what to do with the captured text. This is
//! what lets the test suite assert on demo output without scraping stdout.

/// An append-only buffer of output lines from a single demo run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line of output.
    pub fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    /// Append an empty line, used for visual grouping.
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Append a batch of already-formatted lines.
    pub fn extend(&mut self, lines: impl IntoIterator<Item = String>) {
        self.lines.extend(lines);
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_lines_in_order() {
        let mut report = Report::new();
        report.line("first");
        report.blank();
        report.line(format!("then {}", 2));

        assert_eq!(report.lines(), &["first", "", "then 2"]);
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn extend_appends_after_existing_lines() {
        let mut report = Report::new();
        report.line("head");
        report.extend(vec!["a".to_string(), "b".to_string()]);

        assert_eq!(report.lines(), &["head", "a", "b"]);
    }
}
