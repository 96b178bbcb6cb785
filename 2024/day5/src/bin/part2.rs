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

    let mut page_n_sum = 0;
    for update in updates.iter().filter(|up| !rules.is_valid(up)) {
        let corrected = rules
            .correct(update)
            .with_context(|| format!("Failed to correct update({:?}).", update))?;
        page_n_sum += day5::middle(&corrected).unwrap_or(0);
    }
    println!(
        "The sum of middle page number in corrected updates is {}.",
        page_n_sum
    );

    Ok(())
}
