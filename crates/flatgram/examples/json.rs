//! JSON pretty-printer over stdin.
//!
//! Run with: cargo run --example json
//!
//! Reads one JSON value and prints it re-indented.

use std::io::Read;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let value = flatgram::json::from_str(&input)?;
    println!("{value:#}");
    Ok(())
}
