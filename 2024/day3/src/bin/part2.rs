use anyhow::{Context, Result};
use clap::Parser;
use day3::CLIArgs;

fn main() -> Result<()> {
    day3::init_tracing();
    let args = CLIArgs::parse();
    let memory = day3::read_memory(&args.input_path).with_context(|| {
        format!(
            "Failed to read instructions from given file({}).",
            args.input_path.display()
        )
    })?;

    let sum = day3::multiply(&memory.enabled_mul_pairs());
    println!("The total sum of enabled multiply instructions is {}.", sum);

    Ok(())
}
