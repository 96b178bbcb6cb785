use anyhow::{Context, Result};
use clap::Parser;
use day5::CLIArgs;

fn main() -> Result<()> {
    day5::init_tracing();
    let args = CLIArgs::parse();
    let (rules, updates) = day5::read_printer_settings(&args.input_path).with_context(|| {
        format!(
            "Failed to read printer settings from given file({}).",
            args.input_path.display()
        )
    })?;

    let page_n_sum = updates
        .iter()
        .map(Vec::as_slice)
        .filter(|up| rules.is_valid(up))
        .filter_map(day5::middle)
        .sum::<usize>();
    println!(
        "The sum of middle page number in updates which satisfy given rules is {}.",
        page_n_sum
    );

    Ok(())
}
