//! A guided tour of Rust language and library features.
//!
//! Each demo is a small, independent function registered in a catalog of
//! three generation-themed groups. Demos write their output into a
//! [`report::Report`] instead of printing, so the driver and the test suite
//! consume exactly the same captured lines.
//!
//! The two demos with real observable behavior live in their own modules:
//! [`partition`] (fork-join squares over chunked ranges) and [`pipeline`]
//! (a producer/consumer channel with a net counter).

pub mod counter;
pub mod edition2015;
pub mod edition2018;
pub mod edition2021;
pub mod error;
pub mod fixed_map;
pub mod partition;
pub mod pipeline;
pub mod registry;
pub mod report;

pub use error::TourError;
pub use registry::{catalog, Example, Group};
pub use report::Report;
