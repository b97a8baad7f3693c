//! Line-oriented calculator over stdin.
//!
//! Run with: cargo run --example calc
//!
//! Each newline-terminated expression prints its value; the first syntax
//! error stops the run.

use flatgram::calc::Calculator;
use std::io::Read;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let calc = Calculator::new();
    for value in calc.eval(&input)? {
        println!("= {value}");
    }
    Ok(())
}
