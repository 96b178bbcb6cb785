use anyhow::{Context, Result};
use clap::Parser;
use day6::CLIArgs;

fn main() -> Result<()> {
    day6::init_tracing();
    let args = CLIArgs::parse();
    let lab = day6::read_lab(&args.input_path).with_context(|| {
        format!(
            "Failed to read laboratory from given file({}).",
            args.input_path.display()
        )
    })?;

    let loop_positions = lab
        .loop_obstructions()
        .context("Failed to search obstruction positions in laboratory.")?;
    println!(
        "There is(are) {} location(s) which can make guard loops in given laboratory.",
        loop_positions.len()
    );

    Ok(())
}
