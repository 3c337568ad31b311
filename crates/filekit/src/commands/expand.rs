use anyhow::Result;
use filekit_expand::ExpandOptions;

use crate::ExpandArgs;

/// Run the `expand` command: print every resolved path, one per line.
///
/// Reports `true` (nothing matched) when the result is empty.
#[tracing::instrument(skip_all, name = "expand")]
pub fn run(args: &ExpandArgs) -> Result<bool> {
    let options = ExpandOptions::from(&args.resolve);
    let paths = filekit_expand::expand(&options, args.patterns.clone());
    for path in &paths {
        println!("{path}");
    }
    Ok(paths.is_empty())
}
