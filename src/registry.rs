//! The example registry.
//!
//! Every demo is registered as a named callable that fills a [`Report`].
//! The driver walks the catalog group by group; tests can do the same and
//! assert on the captured output of any single example.

use crate::error::TourError;
use crate::report::Report;
use crate::{edition2015, edition2018, edition2021};

/// Signature every demo shares: fill the report, or explain why you couldn't.
pub type RunFn = fn(&mut Report) -> Result<(), TourError>;

/// One named, independently runnable demo.
pub struct Example {
    pub name: &'static str,
    pub summary: &'static str,
    pub run: RunFn,
}

impl Example {
    pub const fn new(name: &'static str, summary: &'static str, run: RunFn) -> Self {
        Self { name, summary, run }
    }

    /// Run the demo and hand back its captured output.
    pub fn capture(&self) -> Result<Report, TourError> {
        let mut report = Report::new();
        (self.run)(&mut report)?;
        Ok(report)
    }
}

/// A batch of demos that arrived with the same language generation.
///
/// Grouping is cosmetic: no example depends on another's state, and the
/// driver could run them in any order.
pub struct Group {
    pub title: &'static str,
    pub examples: Vec<Example>,
}

/// The full tour, in driver order.
pub fn catalog() -> Vec<Group> {
    vec![
        Group {
            title: "Edition 2015",
            examples: edition2015::examples(),
        },
        Group {
            title: "Edition 2018",
            examples: edition2018::examples(),
        },
        Group {
            title: "Edition 2021",
            examples: edition2021::examples(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_three_generations() {
        let groups = catalog();
        let titles: Vec<_> = groups.iter().map(|g| g.title).collect();
        assert_eq!(titles, ["Edition 2015", "Edition 2018", "Edition 2021"]);
        assert!(groups.iter().all(|g| !g.examples.is_empty()));
    }

    #[test]
    fn example_names_are_unique_across_groups() {
        let mut seen = HashSet::new();
        for group in catalog() {
            for example in &group.examples {
                assert!(
                    seen.insert(example.name),
                    "duplicate example name: {}",
                    example.name
                );
            }
        }
    }
}
