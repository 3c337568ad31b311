use anyhow::{Context, Result};
use filekit_expand::{FileMapping, MappingOptions};

use crate::MapArgs;

/// One `dest <- src, src` line per mapping entry.
fn render(mappings: &[FileMapping]) -> String {
    mappings
        .iter()
        .map(|m| format!("{} <- {}", m.dest, m.src.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run the `map` command: print the source-to-destination mapping.
#[tracing::instrument(skip_all, name = "map")]
pub fn run(args: &MapArgs) -> Result<bool> {
    let options = MappingOptions::from(args);
    let mappings = filekit_expand::expand_mapping(args.patterns.clone(), &args.dest, &options);
    if mappings.is_empty() {
        return Ok(true);
    }
    if args.json {
        let json = serde_json::to_string_pretty(&mappings).context("failed to serialize mapping")?;
        println!("{json}");
    } else {
        println!("{}", render(&mappings));
    }
    Ok(false)
}
