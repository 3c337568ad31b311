use std::io::BufRead;

use anyhow::{Context, Result};
use filekit_expand::GlobOptions;

use crate::MatchArgs;

/// Run the `match` command against the given paths, or stdin when none are
/// given.
#[tracing::instrument(skip_all, name = "match")]
pub fn run(args: &MatchArgs) -> Result<bool> {
    let candidates = if args.candidates.is_empty() {
        std::io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .context("failed to read paths from stdin")?
    } else {
        args.candidates.clone()
    };

    let options = GlobOptions {
        match_base: args.match_base,
        dot: args.dot,
        ..GlobOptions::default()
    };
    let matched = filekit_expand::match_paths(&options, args.patterns.clone(), &candidates);
    for path in &matched {
        println!("{path}");
    }
    Ok(matched.is_empty())
}
