//! Tour driver: run every registered demo and print what it captured.
//!
//! Run with: cargo run

use anyhow::{bail, Result};
use colored::Colorize;

use modern_rust_tour::catalog;

fn main() -> Result<()> {
    println!("{}", "Hello, modern Rust!".bold());

    let mut failures = 0;
    for group in catalog() {
        println!("\n{}", format!("=== {} ===", group.title).cyan().bold());

        for example in &group.examples {
            println!("\n{} — {}", example.name.green(), example.summary.dimmed());
            match example.capture() {
                Ok(report) => {
                    for line in report.lines() {
                        println!("  {line}");
                    }
                }
                Err(err) => {
                    failures += 1;
                    eprintln!("  {} {err}", "error:".red().bold());
                }
            }
        }
    }

    if failures > 0 {
        bail!("{failures} example(s) failed");
    }
    Ok(())
}
