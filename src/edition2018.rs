//! Demos for the second generation: ergonomics and library polish.
//!
//! Field defaults, numeric literal niceties, move captures, generic
//! constants, comparator-driven sorting, and the reader/writer-locked
//! counter shared between threads.

use std::cmp::Reverse;
use std::sync::Mutex;
use std::thread;

use itertools::Itertools;

use crate::counter::ReadersWriterCounter;
use crate::error::TourError;
use crate::registry::Example;
use crate::report::Report;

pub fn examples() -> Vec<Example> {
    vec![
        Example::new("field_defaults", "struct defaults and update syntax", field_defaults),
        Example::new("numeric_literals", "binary literals and digit separators", numeric_literals),
        Example::new("inferred_returns", "generic functions deduce their output", inferred_returns),
        Example::new("move_captures", "closures that take ownership", move_captures),
        Example::new("generic_constants", "one constant, many numeric types", generic_constants),
        Example::new("tuple_access", "tuples addressed by position", tuple_access),
        Example::new("heap_construction", "boxed values and boxed slices", heap_construction),
        Example::new("comparator_sorts", "sorting both directions, subset checks", comparator_sorts),
        Example::new("shared_lock_counter", "many readers, one writer", shared_lock_counter),
        Example::new("deprecation", "steering callers away from an old API", deprecation),
    ]
}

// ---------------------------------------------------------------------------
// Defaults and literals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rectangle {
    length: f64,
    width: f64,
}

impl Default for Rectangle {
    fn default() -> Self {
        Self {
            length: 1.0,
            width: 1.0,
        }
    }
}

fn field_defaults(report: &mut Report) -> Result<(), TourError> {
    let unit = Rectangle::default();
    report.line(format!("default: {} x {}", unit.length, unit.width));

    // Update syntax: override one field, keep the defaults for the rest.
    let wide = Rectangle {
        width: 2.0,
        ..Rectangle::default()
    };
    report.line(format!("widened: {} x {}", wide.length, wide.width));
    Ok(())
}

fn numeric_literals(report: &mut Report) -> Result<(), TourError> {
    let mut bits = 0b1010;
    report.line(format!("0b1010      = {bits}"));

    bits = 0b1111_0000;
    report.line(format!("0b1111_0000 = {bits}"));

    bits = 0b1011_0010;
    report.line(format!("0b1011_0010 = {bits}"));

    let population = 2_132_673_462_i64;
    report.line(format!("2_132_673_462 = {population}"));

    let tiny = 0.000_015_3;
    report.line(format!("0.000_015_3 = {tiny}"));
    Ok(())
}

// ---------------------------------------------------------------------------
// Inference
// ---------------------------------------------------------------------------

fn product<T, U>(lhs: T, rhs: U) -> T::Output
where
    T: std::ops::Mul<U>,
{
    lhs * rhs
}

fn inferred_returns(report: &mut Report) -> Result<(), TourError> {
    report.line(format!("product(3, 4) = {}", product(3, 4)));
    report.line(format!("product(2.5, 4.0) = {}", product(2.5, 4.0)));

    // The closure's concrete type is unnameable; the compiler knows it anyway.
    let combine = |x: &str, y: &str| format!("{x}{y}");
    report.line(format!(
        "closure type: {}",
        std::any::type_name_of_val(&combine)
    ));
    report.line(format!("combine(\"a\", \"b\") = {}", combine("a", "b")));
    Ok(())
}

fn move_captures(report: &mut Report) -> Result<(), TourError> {
    // Initialize-and-capture: the closure owns `value` outright.
    let value = 1;
    let capture_copy = move || value;
    report.line(format!("captured copy: {}", capture_copy()));

    // Capture by move: the Box (and its heap allocation) lives inside the
    // closure now; the original binding is gone.
    let boxed = Box::new(10);
    let capture_move = move || *boxed;
    report.line(format!("captured box: {}", capture_move()));
    report.line(format!("captured box, again: {}", capture_move()));
    Ok(())
}

// ---------------------------------------------------------------------------
// Generic constants
// ---------------------------------------------------------------------------

const PI: f64 = std::f64::consts::PI;
const PI_LABEL: &str = "pi";

fn circular_area<T: Into<f64>>(radius: T) -> f64 {
    let r = radius.into();
    PI * r * r
}

fn generic_constants(report: &mut Report) -> Result<(), TourError> {
    report.line(format!("{PI_LABEL} = {PI}"));
    report.line(format!("area(r = 3.0) = {}", circular_area(3.0)));
    report.line(format!("area(r = 3i32) = {}", circular_area(3)));
    Ok(())
}

fn tuple_access(report: &mut Report) -> Result<(), TourError> {
    let record = ("foo", "bar", 7);

    // Positions are unambiguous even when two fields share a type; there is
    // no by-type lookup to be ambiguous about.
    report.line(format!("record.2 = {}", record.2));
    report.line(format!("record.0 = {}", record.0));
    report.line(format!("all: {} {} {}", record.0, record.1, record.2));
    Ok(())
}

// ---------------------------------------------------------------------------
// Heap construction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
struct Fraction {
    numerator: i32,
    denominator: i32,
}

impl Fraction {
    fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

impl std::fmt::Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

fn heap_construction(report: &mut Report) -> Result<(), TourError> {
    let single = Box::new(Fraction::new(3, 5));
    report.line(format!("boxed fraction: {single}"));

    // A boxed slice of defaults, the array-allocation analog.
    let many: Box<[Fraction]> = vec![Fraction::new(0, 1); 4].into_boxed_slice();
    report.line(format!("first of {}: {}", many.len(), many[0]));
    Ok(())
}

/// True when every element of `needles` appears in sorted `haystack`.
fn sorted_includes(haystack: &[i32], needles: &[i32]) -> bool {
    needles
        .iter()
        .all(|needle| haystack.binary_search(needle).is_ok())
}

fn comparator_sorts(report: &mut Report) -> Result<(), TourError> {
    let mut foo = [10, 20, 5, 15, 25];
    let mut bar = [15, 10, 20];
    foo.sort_unstable();
    bar.sort_unstable();
    if sorted_includes(&foo, &bar) {
        report.line("foo includes bar");
    }

    let mut numbers = [20, 40, 50, 10, 30];
    numbers.sort_unstable_by_key(|&n| Reverse(n));
    report.line(format!("descending: {}", numbers.iter().join(" ")));
    Ok(())
}

// ---------------------------------------------------------------------------
// Shared locking
// ---------------------------------------------------------------------------

fn shared_lock_counter(report: &mut Report) -> Result<(), TourError> {
    let counter = ReadersWriterCounter::new();
    let observed = Mutex::new(Vec::new());

    // Two writers interleave increments; every read happens under the shared
    // (reader) side of the lock. Joined by the scope before we report.
    thread::scope(|s| {
        for id in 0..2 {
            let counter = &counter;
            let observed = &observed;
            s.spawn(move || {
                for _ in 0..3 {
                    let Ok(after) = counter.increment() else { return };
                    if let Ok(mut log) = observed.lock() {
                        log.push(format!("writer {id} saw {after}"));
                    }
                }
            });
        }
    });

    report.extend(observed.into_inner().map_err(|_| TourError::PoisonedLock)?);
    report.line(format!("final value: {}", counter.get()?));
    Ok(())
}

#[deprecated(note = "use the registry-driven tour instead")]
fn old_entry_point() -> &'static str {
    "still works, but the compiler will nag you"
}

fn deprecation(report: &mut Report) -> Result<(), TourError> {
    // The attribute warns at every call site; silenced here on purpose
    // because calling it is the whole demo.
    #[allow(deprecated)]
    let message = old_entry_point();
    report.line(message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rectangle_is_the_unit_square() {
        let r = Rectangle::default();
        assert_eq!((r.length, r.width), (1.0, 1.0));
    }

    #[test]
    fn circular_area_accepts_any_convertible_radius() {
        assert!((circular_area(3.0) - 28.274_333_882_308_138).abs() < 1e-9);
        assert_eq!(circular_area(3), circular_area(3.0));
    }

    #[test]
    fn sorted_includes_finds_subsets_only() {
        assert!(sorted_includes(&[5, 10, 15, 20, 25], &[10, 15, 20]));
        assert!(!sorted_includes(&[5, 10, 15], &[10, 11]));
    }

    #[test]
    fn shared_lock_counter_lands_on_six() {
        let mut report = Report::new();
        shared_lock_counter(&mut report).unwrap();
        assert_eq!(report.lines().last().unwrap(), "final value: 6");
        // Six increments observed, in some interleaving.
        assert_eq!(report.len(), 7);
    }

    #[test]
    fn every_example_here_runs_clean() {
        for example in examples() {
            let report = example.capture().unwrap();
            assert!(!report.is_empty(), "{} produced no output", example.name);
        }
    }
}
