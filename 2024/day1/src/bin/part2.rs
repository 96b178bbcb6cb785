use anyhow::{Context, Result};
use clap::Parser;
use day1::CLIArgs;

fn main() -> Result<()> {
    day1::init_tracing();
    let args = CLIArgs::parse();
    let lists = day1::read_lists(&args.input_path).with_context(|| {
        format!(
            "Failed to read location ID lists from given input file({}).",
            args.input_path.display()
        )
    })?;

    println!(
        "The similarity score between two given list is {}.",
        lists.similarity_score()
    );

    Ok(())
}
