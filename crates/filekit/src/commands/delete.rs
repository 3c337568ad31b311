use anyhow::Result;
use filekit_expand::ExpandOptions;
use filekit_fs::{DeleteOptions, FileKit};

use crate::DeleteArgs;

/// Run the `delete` command: expand the patterns, then delete every match.
///
/// Refused or missing paths are reported and counted, not fatal. Matches
/// below an already deleted directory are skipped.
#[tracing::instrument(skip_all, name = "delete")]
pub fn run(kit: &FileKit, args: &DeleteArgs) -> Result<bool> {
    let options = ExpandOptions::default().cwd(kit.cwd());
    let paths = filekit_expand::expand(&options, args.patterns.clone());
    if paths.is_empty() {
        eprintln!("Nothing matched.");
        return Ok(true);
    }

    let verb = if kit.settings().no_write { "Would delete" } else { "Deleted" };
    let mut failures = 0usize;
    let mut deleted: Vec<&str> = Vec::new();
    for path in &paths {
        let under_deleted = deleted.iter().any(|d| {
            path.strip_prefix(d)
                .is_some_and(|rest| rest.starts_with('/') || d.ends_with('/'))
        });
        if under_deleted {
            tracing::debug!(path, "already removed with its directory");
            continue;
        }
        match kit.delete(path, &DeleteOptions::default()) {
            Ok(true) => {
                println!("{verb} {path}");
                deleted.push(path);
            }
            Ok(false) => failures += 1,
            Err(e) => {
                eprintln!("error: {path}: {e}");
                failures += 1;
            }
        }
    }
    Ok(failures > 0)
}
