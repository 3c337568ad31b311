use anyhow::{Context, Result};
use filekit_fs::{CopyOptions, FileKit};

use crate::CopyArgs;

/// Run the `copy` command.
#[tracing::instrument(skip_all, name = "copy")]
pub fn run(kit: &FileKit, args: &CopyArgs) -> Result<bool> {
    if !kit.exists(&args.src) {
        eprintln!("error: {} does not exist", args.src.display());
        return Ok(true);
    }
    let mut options = CopyOptions::default();
    options.encoding.clone_from(&args.encoding);
    kit.copy(&args.src, &args.dest, &options)
        .with_context(|| format!("failed to copy {}", args.src.display()))?;
    let verb = if kit.settings().no_write { "Would copy" } else { "Copied" };
    eprintln!("{verb} {} -> {}", args.src.display(), args.dest.display());
    Ok(false)
}
