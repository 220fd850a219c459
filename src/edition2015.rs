//! Demos for the first stable generation of the language.
//!
//! Ownership and moves, closures, enums with discriminants, tuples, boxed
//! values, trait objects, hash maps, regular expressions, random sampling,
//! and the two threading demos: the chunked parallel computation and the
//! producer/consumer pipeline.

use std::collections::HashMap;
use std::mem;
use std::sync::Arc;
use std::thread;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::RegexBuilder;

use crate::error::TourError;
use crate::fixed_map::FixedMap;
use crate::partition::{self, SQUARE_RANGE};
use crate::pipeline::{self, ITEM_COUNT};
use crate::registry::Example;
use crate::report::Report;

/// Sum any non-empty list of expressions with `+`, left to right.
///
/// The closest analog of a variadic sum: it works for integers and equally
/// for a `String` followed by string slices.
macro_rules! adder {
    ($first:expr $(, $rest:expr)* $(,)?) => {
        $first $(+ $rest)*
    };
}

pub fn examples() -> Vec<Example> {
    vec![
        Example::new("move_semantics", "ownership moves between bindings", move_semantics),
        Example::new("initializer_lists", "building a FixedMap from bracketed lists", initializer_lists),
        Example::new("for_each_styles", "four ways to walk a collection", for_each_styles),
        Example::new("enum_discriminants", "field-less enums with explicit values", enum_discriminants),
        Example::new("closures", "capture modes and closure-returning closures", closures),
        Example::new("random_numbers", "seeded and OS-seeded sampling", random_numbers),
        Example::new("tuples", "returning and unpacking tuples", tuples),
        Example::new("boxed_values", "unique ownership on the heap", boxed_values),
        Example::new("trait_objects", "one vec, many concrete types", trait_objects),
        Example::new("variadic_sum", "folding an argument pack with a macro", variadic_sum),
        Example::new("color_table", "hash-map inserts and lookups", color_table),
        Example::new("regex_tour", "search, count, filter, replace", regex_tour),
        Example::new("parallel_squares", "fork-join squares over chunked ranges", parallel_squares),
        Example::new("producer_consumer", "channel pipeline with a net counter", producer_consumer),
        Example::new("type_sizes", "size_of for the primitive types", type_sizes),
        Example::new("background_worker", "running a method on another thread", background_worker),
        Example::new("const_assertions", "assertions checked at compile time", const_assertions),
    ]
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

struct Holder {
    member: String,
}

fn move_semantics(report: &mut Report) -> Result<(), TourError> {
    let mut source = Holder {
        member: String::from("heap payload"),
    };

    // Move-assignment analog: take the member out, leaving an empty string.
    let target = Holder {
        member: mem::take(&mut source.member),
    };
    report.line(format!("target owns {:?}", target.member));
    report.line(format!("source left with {:?}", source.member));

    // Whole-value move: `target` is unusable past this point, enforced by
    // the compiler rather than by programmer discipline.
    let relocated = target;
    report.line(format!("relocated still owns {:?}", relocated.member));
    Ok(())
}

fn initializer_lists(report: &mut Report) -> Result<(), TourError> {
    let mut map = FixedMap::from([5, 4, 3, 2, 1]);
    report.line(format!("constructed: {}", map.iter().join(" ")));

    map.assign(&[1, 3, 5, 7, 9, 11]);
    report.line(format!("reassigned:  {}", map.iter().join(" ")));

    map[0] = 100;
    report.line(format!("map[0] = {}, map[5] = {}", map[0], map[5]));
    Ok(())
}

fn for_each_styles(report: &mut Report) -> Result<(), TourError> {
    let map = FixedMap::from([1, 2, 3, 4, 5]);

    // Explicit iterator, the long way around.
    let mut iterated = String::new();
    let mut it = map.iter();
    while let Some(value) = it.next() {
        iterated.push_str(&value.to_string());
    }
    report.line(format!("while-let:  {iterated}"));

    // Borrowing for-loop, no copies.
    let mut looped = String::new();
    for value in &map {
        looped.push_str(&value.to_string());
    }
    report.line(format!("for-loop:   {looped}"));

    // Closure-driven traversal.
    let mut folded = String::new();
    map.iter().for_each(|value| folded.push_str(&value.to_string()));
    report.line(format!("for_each:   {folded}"));

    report.line(format!("collected:  {}", map.iter().join("")));
    Ok(())
}

// ---------------------------------------------------------------------------
// Language basics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeekDay {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
}

fn day_number(day: WeekDay) -> i64 {
    day as i64
}

fn enum_discriminants(report: &mut Report) -> Result<(), TourError> {
    for day in [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
    ] {
        report.line(format!("{day:?} = {}", day_number(day)));
    }
    Ok(())
}

fn closures(report: &mut Report) -> Result<(), TourError> {
    // Borrowing capture.
    let threshold = 10;
    let below = |value: i32| value < threshold;
    report.line(format!("below(3) = {}, below(12) = {}", below(3), below(12)));

    // Generic over the closure, monomorphized per call site.
    fn compare<A, B, F>(a: A, b: B, cmp: F) -> bool
    where
        F: Fn(A, B) -> bool,
    {
        cmp(a, b)
    }
    let less = |a: i32, b: f64| f64::from(a) < b;
    report.line(format!("compare(3, 3.14, less) = {}", compare(3, 3.14, less)));

    // A closure factory: the returned closure owns its formatting closure.
    let make_printer = |prefix: &'static str| move |a: i32, b: char, c: f64| format!("{prefix}{a}{b}{c}");
    let printer = make_printer(">> ");
    let line = printer(1, 'a', 3.14);
    report.line(line.clone());
    report.line(line); // calling the stored result twice, like a nullary lambda
    Ok(())
}

fn random_numbers(report: &mut Report) -> Result<(), TourError> {
    let (min, max) = (1, 6);

    // Fixed seed: same dice roll on every run.
    let mut seeded = StdRng::seed_from_u64(42);
    let pseudo: i32 = seeded.gen_range(min..=max);
    report.line(format!("seeded roll: {pseudo}"));

    // OS entropy: a different roll each run.
    let entropy: i32 = rand::thread_rng().gen_range(min..=max);
    report.line(format!("entropy roll in [{min}, {max}]: {entropy}"));
    Ok(())
}

fn pair_factory() -> (i32, f64) {
    (5, 6.7)
}

fn tuples(report: &mut Report) -> Result<(), TourError> {
    let pair = pair_factory();
    report.line(format!("by position: {} {}", pair.0, pair.1));

    let (a, b) = pair_factory();
    report.line(format!("destructured: {a} {b}"));
    Ok(())
}

fn boxed_values(report: &mut Report) -> Result<(), TourError> {
    let boxed = Box::new(Holder {
        member: String::from("on the heap"),
    });
    // Deref is automatic; the Box is dropped (and the heap freed) at scope end.
    report.line(format!("boxed member: {:?}", boxed.member));
    Ok(())
}

// ---------------------------------------------------------------------------
// Trait objects
// ---------------------------------------------------------------------------

trait Valued {
    fn name(&self) -> &'static str;
    fn value(&self) -> i32;
}

struct Base {
    value: i32,
}

struct Derived {
    value: i32,
}

impl Valued for Base {
    fn name(&self) -> &'static str {
        "Base"
    }
    fn value(&self) -> i32 {
        self.value
    }
}

impl Valued for Derived {
    fn name(&self) -> &'static str {
        "Derived"
    }
    fn value(&self) -> i32 {
        self.value
    }
}

fn trait_objects(report: &mut Report) -> Result<(), TourError> {
    let base = Base { value: 5 };
    let derived = Derived { value: 6 };

    // No slicing: the vec stores fat pointers, each element keeps its type.
    let values: Vec<&dyn Valued> = vec![&base, &derived];
    for item in &values {
        report.line(format!("class = {} value = {}", item.name(), item.value()));
    }
    Ok(())
}

fn variadic_sum(report: &mut Report) -> Result<(), TourError> {
    let total = adder!(1, 2, 3, 8, 7);
    report.line(format!("1+2+3+8+7 = {total}"));

    let joined = adder!(String::from("x"), "aa", "bb", "yy");
    report.line(format!("concatenated: {joined}"));
    Ok(())
}

fn color_table(report: &mut Report) -> Result<(), TourError> {
    let mut colors = HashMap::from([
        ("RED", "#FF0000"),
        ("GREEN", "#00FF00"),
        ("BLUE", "#0000FF"),
    ]);

    for (name, hex) in colors.iter().sorted() {
        report.line(format!("key:[{name}] value:[{hex}]"));
    }

    colors.insert("BLACK", "#000000");
    colors.insert("WHITE", "#FFFFFF");

    report.line(format!("RED is [{}]", colors["RED"]));
    report.line(format!("BLACK is [{}]", colors["BLACK"]));
    Ok(())
}

fn regex_tour(report: &mut Report) -> Result<(), TourError> {
    let corpus = "Some people, when confronted with a problem, think \
                  \"I know, I'll use regular expressions.\" \
                  Now they have two problems.";

    let self_regex = RegexBuilder::new("REGULAR EXPRESSIONS")
        .case_insensitive(true)
        .build()?;
    if self_regex.is_match(corpus) {
        report.line("text contains the phrase 'regular expressions'");
    }

    let words = regex::Regex::new(r"\S+")?;
    report.line(format!("found {} words", words.find_iter(corpus).count()));

    let limit = 6;
    report.line(format!("words longer than {limit} characters:"));
    for word in words.find_iter(corpus) {
        if word.as_str().len() > limit {
            report.line(format!("  {}", word.as_str()));
        }
    }

    let long_words = regex::Regex::new(r"\w{7,}")?;
    report.line(long_words.replace_all(corpus, "[$0]").into_owned());
    Ok(())
}

// ---------------------------------------------------------------------------
// Threading
// ---------------------------------------------------------------------------

fn parallel_squares(report: &mut Report) -> Result<(), TourError> {
    // Serial baseline first.
    report.line("serial:");
    for i in 0..SQUARE_RANGE {
        report.line(format!("  {}", i * i));
    }

    // Then the fork-join version: one worker per chunk, results recorded
    // under a shared lock, joined before we read anything back.
    let workers = partition::worker_count();
    report.line(format!("parallel ({workers} threads):"));
    for (task, square) in partition::squares_by_chunk(SQUARE_RANGE, workers)? {
        report.line(format!("  task {task}: {square}"));
    }
    Ok(())
}

fn producer_consumer(report: &mut Report) -> Result<(), TourError> {
    let net = pipeline::run_pipeline(ITEM_COUNT)?;
    report.line(format!("{ITEM_COUNT} items through the channel"));
    report.line(format!("net: {net}"));
    Ok(())
}

fn type_sizes(report: &mut Report) -> Result<(), TourError> {
    report.line(format!("bool:  {} bytes", mem::size_of::<bool>()));
    report.line(format!("char:  {} bytes", mem::size_of::<char>()));
    report.line(format!("u8:    {} bytes", mem::size_of::<u8>()));
    report.line(format!("i16:   {} bytes", mem::size_of::<i16>()));
    report.line(format!("i32:   {} bytes", mem::size_of::<i32>()));
    report.line(format!("i64:   {} bytes", mem::size_of::<i64>()));
    report.line(format!("i128:  {} bytes", mem::size_of::<i128>()));
    report.line(format!("f32:   {} bytes", mem::size_of::<f32>()));
    report.line(format!("f64:   {} bytes", mem::size_of::<f64>()));
    report.line(format!("usize: {} bytes", mem::size_of::<usize>()));
    Ok(())
}

struct Worker {
    label: &'static str,
}

impl Worker {
    fn run(&self) -> String {
        format!("worker '{}' did its work", self.label)
    }
}

fn background_worker(report: &mut Report) -> Result<(), TourError> {
    let worker = Arc::new(Worker { label: "shared" });

    // The spawned thread shares ownership of the worker and calls a method
    // on it; join hands the method's return value back.
    let clone = Arc::clone(&worker);
    let handle = thread::spawn(move || clone.run());
    let line = handle.join().map_err(|_| TourError::WorkerPanicked)?;
    report.line(line);

    report.line(worker.run().replace("did", "also did"));
    Ok(())
}

fn const_assertions(report: &mut Report) -> Result<(), TourError> {
    // Checked when this crate compiles; a violation is a build error, not a
    // runtime surprise.
    const _: () = assert!(mem::size_of::<i32>() == 4);
    const _: () = assert!(mem::size_of::<i64>() >= mem::size_of::<i32>());

    report.line("compile-time assertions held (or you would not be reading this)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_discriminants_match_their_positions() {
        assert_eq!(day_number(WeekDay::Monday), 1);
        assert_eq!(day_number(WeekDay::Friday), 5);
    }

    #[test]
    fn adder_macro_folds_left_to_right() {
        assert_eq!(adder!(1, 2, 3, 8, 7), 21);
        assert_eq!(adder!(String::from("x"), "aa", "bb", "yy"), "xaabbyy");
    }

    #[test]
    fn seeded_rolls_are_reproducible() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let roll_a: i32 = a.gen_range(1..=6);
        let roll_b: i32 = b.gen_range(1..=6);
        assert_eq!(roll_a, roll_b);
    }

    #[test]
    fn tuple_factory_is_fixed() {
        assert_eq!(pair_factory(), (5, 6.7));
    }

    #[test]
    fn regex_tour_matches_the_corpus() {
        let mut report = Report::new();
        regex_tour(&mut report).unwrap();
        assert!(report
            .lines()
            .iter()
            .any(|l| l.contains("contains the phrase")));
        assert!(report.lines().iter().any(|l| l == "found 19 words"));
    }

    #[test]
    fn parallel_squares_reports_serial_and_parallel_sections() {
        let mut report = Report::new();
        parallel_squares(&mut report).unwrap();
        let text = report.lines().join("\n");
        assert!(text.contains("serial:"));
        assert!(text.contains("parallel ("));
        // Eleven serial squares and eleven parallel ones.
        assert_eq!(text.matches("  100").count(), 1);
        assert_eq!(text.matches(": 100").count(), 1);
    }

    #[test]
    fn producer_consumer_nets_to_zero() {
        let mut report = Report::new();
        producer_consumer(&mut report).unwrap();
        assert!(report.lines().iter().any(|l| l == "net: 0"));
    }

    #[test]
    fn every_example_here_runs_clean() {
        for example in examples() {
            let report = example.capture().unwrap();
            assert!(!report.is_empty(), "{} produced no output", example.name);
        }
    }
}
