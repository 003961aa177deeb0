//! Diff command implementation.

use crate::{input, output};
use converge_core::{compare_resources, CompareOptions};

pub fn run(
    before: String,
    after: String,
    strict: bool,
    ignore_metadata: Vec<String>,
    exit_code: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let before = input::read_document(Some(before.as_str()))?;
    let after = input::read_document(Some(after.as_str()))?;

    let base = if strict {
        CompareOptions::strict()
    } else {
        CompareOptions::default()
    };
    let options = ignore_metadata
        .into_iter()
        .fold(base, |options, key| options.ignore_metadata_key(key));

    let comparison = compare_resources(&before, &after, &options);
    println!("{}", output::format_comparison(&comparison));

    if exit_code && !comparison.matches {
        std::process::exit(2);
    }

    Ok(())
}
