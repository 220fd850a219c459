//! Demos for the third generation: library breadth.
//!
//! Type-erased storage, byte conversions, filesystem access, optional and
//! sum-type access, fold-style reductions, drop behavior during unwinding,
//! and data-parallel iterators.

use std::any::Any;
use std::env;
use std::fs;
use std::mem;
use std::panic;
use std::sync::Mutex;
use std::thread;

use rayon::prelude::*;

use crate::error::TourError;
use crate::registry::Example;
use crate::report::Report;

/// Append every argument's `Display` form to a single string.
macro_rules! fold_print {
    ($($arg:expr),+ $(,)?) => {{
        let mut folded = String::new();
        $( folded.push_str(&$arg.to_string()); )+
        folded
    }};
}

pub fn examples() -> Vec<Example> {
    vec![
        Example::new("feature_probes", "asking the build what it supports", feature_probes),
        Example::new("assertions", "runtime, debug, and compile-time checks", assertions),
        Example::new("any_storage", "one slot, any type, checked casts", any_storage),
        Example::new("byte_conversions", "bytes to integers and back", byte_conversions),
        Example::new("filesystem_tour", "nested dirs created and removed", filesystem_tour),
        Example::new("optional_factories", "factories that may return nothing", optional_factories),
        Example::new("sum_types", "typed access to a value-carrying enum", sum_types),
        Example::new("fold_expressions", "reducing packs of values", fold_expressions),
        Example::new("unwind_observer", "drops during unwinding vs normal exit", unwind_observer),
        Example::new("structured_bindings", "unpacking multiple returns at once", structured_bindings),
        Example::new("binding_initializers", "bind-and-test in one expression", binding_initializers),
        Example::new("utf8_literals", "strings are UTF-8, always", utf8_literals),
        Example::new("inferred_construction", "constructors deduce their generics", inferred_construction),
        Example::new("data_parallel", "parallel iterators over a shared pool", data_parallel),
    ]
}

// ---------------------------------------------------------------------------
// Build probing and assertions
// ---------------------------------------------------------------------------

const HIGH_MASK: u8 = 0b1100_0000;
const LOW_MASK: u8 = 0b0000_0111;

/// 1 when a high bit is set, 2 when a low bit is, 0 otherwise.
fn classify(bits: u8) -> u8 {
    if bits & HIGH_MASK != 0 {
        1
    } else if bits & LOW_MASK != 0 {
        2
    } else {
        0
    }
}

fn feature_probes(report: &mut Report) -> Result<(), TourError> {
    // cfg! answers at compile time, with no preprocessor in sight.
    report.line(format!("64-bit pointers: {}", cfg!(target_pointer_width = "64")));
    report.line(format!("debug assertions: {}", cfg!(debug_assertions)));
    report.line(format!("unix family: {}", cfg!(unix)));

    for bits in [0b1000_0000, 0b0000_0100, 0b0001_1000, 0b0000_0000] {
        report.line(format!("classify({bits:#010b}) = {}", classify(bits)));
    }
    Ok(())
}

fn assertions(report: &mut Report) -> Result<(), TourError> {
    assert!(true, "could not be found in database");
    debug_assert!(mem::size_of::<u8>() == 1);

    // No message needed; the condition is the message.
    const _: () = assert!(mem::size_of::<i32>() == 4);

    report.line("runtime, debug, and const assertions all held");
    Ok(())
}

// ---------------------------------------------------------------------------
// Type-erased storage
// ---------------------------------------------------------------------------

fn describe(value: &dyn Any) -> String {
    if let Some(int) = value.downcast_ref::<i32>() {
        format!("i32: {int}")
    } else if let Some(float) = value.downcast_ref::<f64>() {
        format!("f64: {float}")
    } else if let Some(flag) = value.downcast_ref::<bool>() {
        format!("bool: {flag}")
    } else {
        String::from("something else entirely")
    }
}

fn any_storage(report: &mut Report) -> Result<(), TourError> {
    let mut slot: Option<Box<dyn Any>> = Some(Box::new(1_i32));
    if let Some(value) = slot.as_deref() {
        report.line(describe(value));
    }

    slot = Some(Box::new(3.14_f64));
    if let Some(value) = slot.as_deref() {
        report.line(describe(value));
    }

    slot = Some(Box::new(true));
    if let Some(value) = slot.as_deref() {
        report.line(describe(value));
    }

    // A wrong-type cast is an Option::None, not an exception.
    slot = Some(Box::new(1_i32));
    let as_f32 = slot.as_deref().and_then(|value| value.downcast_ref::<f32>());
    report.line(format!("as f32? {as_f32:?}"));

    // Reset, then check for a value.
    slot = None;
    if slot.is_none() {
        report.line("no value");
    }

    // Borrowing the contained data directly.
    slot = Some(Box::new(7_i32));
    if let Some(int) = slot.as_deref().and_then(|value| value.downcast_ref::<i32>()) {
        report.line(format!("borrowed contained i32: {int}"));
    }
    Ok(())
}

fn byte_conversions(report: &mut Report) -> Result<(), TourError> {
    let n = 7_i32;
    let byte = n as u8;
    report.line(format!("7 as a byte: {byte:#010b}"));

    let back = i32::from(byte);
    report.line(format!("widened back: {back}"));

    let shifted = byte << 2;
    report.line(format!("byte << 2 = {shifted}"));
    Ok(())
}

fn filesystem_tour(report: &mut Report) -> Result<(), TourError> {
    // Rooted in a temp dir so the demo never litters the real filesystem.
    let root = tempfile::tempdir()?;
    let nested = root.path().join("a/b/c/d/e/f");

    if !nested.exists() {
        fs::create_dir_all(&nested)?;
        report.line("created a/b/c/d/e/f");
    }
    report.line(format!("nested dir exists: {}", nested.is_dir()));

    fs::remove_dir_all(root.path().join("a"))?;
    report.line(format!("after removal: {}", nested.exists()));

    report.line(format!("current dir: {}", env::current_dir()?.display()));
    Ok(())
}

// ---------------------------------------------------------------------------
// Optionals and sum types
// ---------------------------------------------------------------------------

fn monster(found: bool) -> Option<String> {
    found.then(|| String::from("Godzilla"))
}

fn optional_factories(report: &mut Report) -> Result<(), TourError> {
    report.line(format!(
        "monster(false) returned {}",
        monster(false).unwrap_or_else(|| String::from("empty"))
    ));

    // Option works directly as an if condition, no sentinel values.
    if let Some(name) = monster(true) {
        report.line(format!("monster(true) returned {name}"));
    }

    // Mutating through the borrowed contents of an optional.
    let mut stored = monster(true);
    if let Some(name) = stored.as_mut() {
        *name = String::from("Mothra");
    }
    report.line(format!("after mutation: {stored:?}"));
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
enum Number {
    Int(i32),
    Float(f32),
}

impl Number {
    fn as_int(&self) -> Option<i32> {
        match self {
            Number::Int(value) => Some(*value),
            Number::Float(_) => None,
        }
    }

    fn as_float(&self) -> Option<f32> {
        match self {
            Number::Float(value) => Some(*value),
            Number::Int(_) => None,
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(value)
    }
}

fn sum_types(report: &mut Report) -> Result<(), TourError> {
    let v: Number = 12.into();
    report.line(format!("v holds int {:?}", v.as_int()));

    let w = v.clone();
    report.line(format!("w copied the variant: {w:?}"));

    // Asking for the wrong variant is a None, not a crash.
    report.line(format!("w as float? {:?}", w.as_float()));

    let x = Number::Float(2.5);
    report.line(format!("x holds float {:?}", x.as_float()));
    Ok(())
}

fn fold_expressions(report: &mut Report) -> Result<(), TourError> {
    let numbers = [1, 2, 3, 4, 5, 6, 7];

    let with_init: i32 = numbers.iter().fold(0, |acc, &n| acc + n);
    report.line(format!("fold with init: {with_init}"));

    let without_init = numbers.iter().copied().reduce(|a, b| a + b).unwrap_or(0);
    report.line(format!("reduce, no init: {without_init}"));

    report.line(fold_print!("hello", ", ", 10, ", ", 90.0));

    let mut packed = Vec::new();
    packed.extend([1, 2, 3, 4]);
    report.line(format!("packed: {packed:?}"));
    Ok(())
}

// ---------------------------------------------------------------------------
// Unwinding
// ---------------------------------------------------------------------------

struct DropObserver<'a> {
    log: &'a Mutex<Vec<String>>,
    label: &'static str,
}

impl Drop for DropObserver<'_> {
    fn drop(&mut self) {
        let how = if thread::panicking() {
            "during unwinding"
        } else {
            "normally"
        };
        if let Ok(mut log) = self.log.lock() {
            log.push(format!("{} dropped {how}", self.label));
        }
    }
}

fn unwind_observer(report: &mut Report) -> Result<(), TourError> {
    let log = Mutex::new(Vec::new());

    {
        let _outer = DropObserver {
            log: &log,
            label: "outer",
        };

        // The panic below is the demo; keep its default backtrace chatter
        // off the console while it unwinds.
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|_| {}));
        let caught = panic::catch_unwind(|| {
            let _inner = DropObserver {
                log: &log,
                label: "inner",
            };
            panic!("test panic");
        });
        panic::set_hook(previous);

        if let Err(payload) = caught {
            let message = payload
                .downcast_ref::<&str>()
                .copied()
                .unwrap_or("opaque panic payload");
            report.line(format!("caught: {message}"));
        }
    }

    report.extend(log.into_inner().map_err(|_| TourError::PoisonedLock)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Bindings and inference
// ---------------------------------------------------------------------------

fn measurement() -> (i32, f64) {
    (5, 6.7)
}

fn structured_bindings(report: &mut Report) -> Result<(), TourError> {
    let (count, reading) = measurement();
    report.line(format!("count = {count}, reading = {reading}"));
    Ok(())
}

fn binding_initializers(report: &mut Report) -> Result<(), TourError> {
    // Bind and range-test in one step.
    if let digit @ 0..=9 = measurement().0 {
        report.line(format!("single digit: {digit}"));
    }

    match measurement().0 {
        five @ 5 => report.line(format!("matched and bound: {five}")),
        other => report.line(format!("unexpected: {other}")),
    }
    Ok(())
}

fn utf8_literals(report: &mut Report) -> Result<(), TourError> {
    let greeting = "Hello Wörld";
    report.line(format!("text: {greeting}"));
    report.line(format!("chars: {}", greeting.chars().count()));
    report.line(format!("bytes: {}", greeting.len()));
    Ok(())
}

struct Pair<A, B> {
    first: A,
    second: B,
}

impl<A, B> Pair<A, B> {
    fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

fn inferred_construction(report: &mut Report) -> Result<(), TourError> {
    // No type annotations anywhere; both parameters are deduced.
    let pair = Pair::new(5.0, false);
    report.line(format!("{} {}", pair.first, pair.second));
    report.line(format!("deduced: {}", std::any::type_name_of_val(&pair)));
    Ok(())
}

fn data_parallel(report: &mut Report) -> Result<(), TourError> {
    let data: Vec<i64> = (0..1_000).collect();

    let serial: i64 = data.iter().map(|&x| x * x).sum();
    let parallel: i64 = data.par_iter().map(|&x| x * x).sum();

    report.line(format!("pool threads: {}", rayon::current_num_threads()));
    report.line(format!("serial sum:   {serial}"));
    report.line(format!("parallel sum: {parallel}"));
    report.line(format!("sums agree: {}", serial == parallel));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_prefers_the_high_mask() {
        assert_eq!(classify(0b1000_0000), 1);
        assert_eq!(classify(0b0000_0100), 2);
        assert_eq!(classify(0b0001_1000), 0);
        assert_eq!(classify(0b1100_0111), 1);
        assert_eq!(classify(0), 0);
    }

    #[test]
    fn describe_names_known_types() {
        assert_eq!(describe(&1_i32), "i32: 1");
        assert_eq!(describe(&3.5_f64), "f64: 3.5");
        assert_eq!(describe(&true), "bool: true");
        assert_eq!(describe(&"str"), "something else entirely");
    }

    #[test]
    fn monster_factory_respects_its_flag() {
        assert_eq!(monster(true).as_deref(), Some("Godzilla"));
        assert_eq!(monster(false), None);
    }

    #[test]
    fn number_getters_refuse_the_wrong_variant() {
        let n = Number::from(12);
        assert_eq!(n.as_int(), Some(12));
        assert_eq!(n.as_float(), None);
        assert_eq!(Number::Float(2.5).as_float(), Some(2.5));
    }

    #[test]
    fn fold_print_concatenates_display_forms() {
        assert_eq!(fold_print!("hello", ", ", 10, ", ", 90.0), "hello, 10, 90");
    }

    #[test]
    fn unwind_observer_sees_both_drop_paths() {
        let mut report = Report::new();
        unwind_observer(&mut report).unwrap();
        let text = report.lines().join("\n");
        assert!(text.contains("caught: test panic"));
        assert!(text.contains("inner dropped during unwinding"));
        assert!(text.contains("outer dropped normally"));
    }

    #[test]
    fn filesystem_tour_cleans_up_after_itself() {
        let mut report = Report::new();
        filesystem_tour(&mut report).unwrap();
        assert!(report.lines().iter().any(|l| l == "after removal: false"));
    }

    #[test]
    fn data_parallel_matches_the_serial_sum() {
        let mut report = Report::new();
        data_parallel(&mut report).unwrap();
        assert!(report.lines().iter().any(|l| l == "sums agree: true"));
    }

    #[test]
    fn every_example_here_runs_clean() {
        for example in examples() {
            let report = example.capture().unwrap();
            assert!(!report.is_empty(), "{} produced no output", example.name);
        }
    }
}
