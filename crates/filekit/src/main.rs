use std::path::PathBuf;
use std::process::ExitCode;

use bpaf::Bpaf;
use filekit_config::Settings;
use filekit_expand::{ExpandOptions, ExtDot, Filter, GlobOptions, MappingOptions};
use filekit_fs::FileKit;
use tracing_subscriber::prelude::*;

mod commands;

#[derive(Debug, Clone, Bpaf)]
pub struct GlobalOptions {
    /// Log every file operation to stderr
    #[bpaf(short('v'), long("verbose"), switch)]
    pub verbose: bool,

    /// Report writes and deletes without performing them
    #[bpaf(long("no-write"), switch)]
    pub no_write: bool,

    /// Allow deleting the working directory or paths outside it
    #[bpaf(long("force"), switch)]
    pub force: bool,

    /// Settings file to use instead of the nearest filekit.toml
    #[bpaf(long("config"), argument("FILE"))]
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// Settings from the config file, with command-line flags applied on top.
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => filekit_config::load_file(path)?,
            None => filekit_config::load()?,
        };
        settings.no_write |= self.no_write;
        settings.force |= self.force;
        Ok(settings)
    }

    fn kit(&self) -> anyhow::Result<FileKit> {
        Ok(FileKit::new(self.settings()?)?)
    }
}

#[derive(Debug, Clone, Bpaf)]
#[allow(clippy::struct_excessive_bools)]
pub struct ResolveArgs {
    /// Directory patterns are resolved against
    #[bpaf(long("cwd"), argument("DIR"))]
    pub cwd: Option<PathBuf>,

    /// Keep only paths passing a stat check: isFile, isDirectory or isSymbolicLink
    #[bpaf(long("filter"), argument("FILTER"))]
    pub filter: Option<Filter>,

    /// Append a slash to every directory
    #[bpaf(long("mark"), switch)]
    pub mark: bool,

    /// Let patterns without a slash match file names at any depth
    #[bpaf(long("match-base"), switch)]
    pub match_base: bool,

    /// Keep patterns that match nothing
    #[bpaf(long("nonull"), switch)]
    pub nonull: bool,

    /// Let wildcards match names starting with a dot
    #[bpaf(long("dot"), switch)]
    pub dot: bool,
}

impl From<&ResolveArgs> for ExpandOptions {
    fn from(args: &ResolveArgs) -> Self {
        ExpandOptions {
            glob: GlobOptions {
                cwd: args.cwd.clone(),
                mark: args.mark,
                match_base: args.match_base,
                nonull: args.nonull,
                dot: args.dot,
            },
            filter: args.filter.clone(),
        }
    }
}

#[derive(Debug, Clone, Bpaf)]
pub struct ExpandArgs {
    #[bpaf(external(resolve_args))]
    pub resolve: ResolveArgs,

    #[bpaf(positional("PATTERN"))]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Bpaf)]
pub struct MatchArgs {
    /// Pattern to apply, in order; prefix with ! to exclude
    #[bpaf(short('p'), long("pattern"), argument("PATTERN"))]
    pub patterns: Vec<String>,

    /// Let patterns without a slash match file names at any depth
    #[bpaf(long("match-base"), switch)]
    pub match_base: bool,

    /// Let wildcards match names starting with a dot
    #[bpaf(long("dot"), switch)]
    pub dot: bool,

    /// Paths to match; read from stdin, one per line, when omitted
    #[bpaf(positional("PATH"))]
    pub candidates: Vec<String>,
}

#[derive(Debug, Clone, Bpaf)]
pub struct MapArgs {
    #[bpaf(external(resolve_args))]
    pub resolve: ResolveArgs,

    /// Replace the extension of every destination
    #[bpaf(long("ext"), argument("EXT"))]
    pub ext: Option<String>,

    /// Where the replaced extension starts
    #[bpaf(
        long("ext-dot"),
        argument("first|last"),
        fallback(ExtDot::First),
        display_fallback
    )]
    pub ext_dot: ExtDot,

    /// Map every source by its file name alone
    #[bpaf(long("flatten"), switch)]
    pub flatten: bool,

    /// Print the mapping as JSON
    #[bpaf(long("json"), switch)]
    pub json: bool,

    #[bpaf(positional("DEST"))]
    pub dest: String,

    #[bpaf(positional("PATTERN"))]
    pub patterns: Vec<String>,
}

impl From<&MapArgs> for MappingOptions {
    fn from(args: &MapArgs) -> Self {
        let mut options = MappingOptions::default();
        options.expand = ExpandOptions::from(&args.resolve);
        options.ext.clone_from(&args.ext);
        options.ext_dot = args.ext_dot;
        options.flatten = args.flatten;
        options
    }
}

#[derive(Debug, Clone, Bpaf)]
pub struct CopyArgs {
    /// Encoding used when a file is decoded
    #[bpaf(long("encoding"), argument("LABEL"))]
    pub encoding: Option<String>,

    #[bpaf(positional("SRC"))]
    pub src: PathBuf,

    #[bpaf(positional("DEST"))]
    pub dest: PathBuf,
}

#[derive(Debug, Clone, Bpaf)]
pub struct DeleteArgs {
    /// Paths or patterns to delete
    #[bpaf(positional("PATTERN"))]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Bpaf)]
#[bpaf(options, version, fallback_to_usage)]
/// Expand glob patterns, map them to destinations, and copy or delete files
struct Cli {
    #[bpaf(external(global_options))]
    global: GlobalOptions,

    #[bpaf(external(commands))]
    command: Commands,
}

#[derive(Debug, Clone, Bpaf)]
enum Commands {
    #[bpaf(command("expand"))]
    /// Resolve patterns against the filesystem
    Expand(#[bpaf(external(expand_args))] ExpandArgs),

    #[bpaf(command("match"))]
    /// Filter a list of paths through patterns
    Match(#[bpaf(external(match_args))] MatchArgs),

    #[bpaf(command("map"))]
    /// Map resolved sources to destination paths
    Map(#[bpaf(external(map_args))] MapArgs),

    #[bpaf(command("copy"))]
    /// Copy a file or directory
    Copy(#[bpaf(external(copy_args))] CopyArgs),

    #[bpaf(command("delete"))]
    /// Delete files and directories matching patterns
    Delete(#[bpaf(external(delete_args))] DeleteArgs),

    #[bpaf(command("version"))]
    /// Print version information
    Version,
}

fn init_tracing(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_env("FILEKIT_LOG").unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::registry()
        .with(
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(verbose)
                .with_bracketed_fields(true)
                .with_indent_lines(true)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = cli().run();
    init_tracing(cli.global.verbose);

    let result = match cli.command {
        Commands::Expand(args) => commands::expand::run(&args),
        Commands::Match(args) => commands::matches::run(&args),
        Commands::Map(args) => commands::map::run(&args),
        Commands::Copy(args) => cli
            .global
            .kit()
            .and_then(|kit| commands::copy::run(&kit, &args)),
        Commands::Delete(args) => cli
            .global
            .kit()
            .and_then(|kit| commands::delete::run(&kit, &args)),
        Commands::Version => {
            println!("filekit {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
    };

    match result {
        Ok(had_errors) => {
            if had_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_expand_with_resolve_options() -> anyhow::Result<()> {
        let cli = cli()
            .run_inner(&[
                "expand",
                "--cwd",
                "src",
                "--filter",
                "isFile",
                "--match-base",
                "*.js",
                "!f*.js",
            ])
            .map_err(|e| anyhow::anyhow!("{e:?}"))?;
        match cli.command {
            Commands::Expand(args) => {
                assert_eq!(args.patterns, vec!["*.js", "!f*.js"]);
                assert_eq!(args.resolve.cwd, Some(PathBuf::from("src")));
                assert!(matches!(args.resolve.filter, Some(Filter::IsFile)));
                assert!(args.resolve.match_base);
                assert!(!args.resolve.mark);
                assert!(!args.resolve.nonull);

                let options = ExpandOptions::from(&args.resolve);
                assert_eq!(options.glob.cwd, Some(PathBuf::from("src")));
                assert!(options.glob.match_base);
            }
            _ => panic!("expected Expand"),
        }
        Ok(())
    }

    #[test]
    fn rejects_unknown_filter() {
        assert!(cli().run_inner(&["expand", "--filter", "isFIFO", "*"]).is_err());
    }

    #[test]
    fn parses_match_patterns_and_candidates() -> anyhow::Result<()> {
        let cli = cli()
            .run_inner(&["match", "-p", "*.js", "--pattern", "!f*.js", "foo.js", "bar.js"])
            .map_err(|e| anyhow::anyhow!("{e:?}"))?;
        match cli.command {
            Commands::Match(args) => {
                assert_eq!(args.patterns, vec!["*.js", "!f*.js"]);
                assert_eq!(args.candidates, vec!["foo.js", "bar.js"]);
            }
            _ => panic!("expected Match"),
        }
        Ok(())
    }

    #[test]
    fn parses_map_options() -> anyhow::Result<()> {
        let cli = cli()
            .run_inner(&[
                "map",
                "--flatten",
                "--ext",
                ".min.js",
                "--ext-dot",
                "last",
                "dist",
                "**/*.js",
            ])
            .map_err(|e| anyhow::anyhow!("{e:?}"))?;
        match cli.command {
            Commands::Map(args) => {
                assert_eq!(args.dest, "dist");
                assert_eq!(args.patterns, vec!["**/*.js"]);
                let options = MappingOptions::from(&args);
                assert!(options.flatten);
                assert_eq!(options.ext.as_deref(), Some(".min.js"));
                assert_eq!(options.ext_dot, ExtDot::Last);
            }
            _ => panic!("expected Map"),
        }
        Ok(())
    }

    #[test]
    fn ext_dot_defaults_to_first() -> anyhow::Result<()> {
        let cli = cli()
            .run_inner(&["map", "dist", "*.js"])
            .map_err(|e| anyhow::anyhow!("{e:?}"))?;
        match cli.command {
            Commands::Map(args) => assert_eq!(args.ext_dot, ExtDot::First),
            _ => panic!("expected Map"),
        }
        Ok(())
    }

    #[test]
    fn rejects_unknown_ext_dot() {
        assert!(
            cli()
                .run_inner(&["map", "--ext-dot", "middle", "dist", "*.js"])
                .is_err()
        );
    }

    #[test]
    fn global_flags_come_before_the_command() -> anyhow::Result<()> {
        let cli = cli()
            .run_inner(&["--no-write", "--force", "-v", "delete", "dist"])
            .map_err(|e| anyhow::anyhow!("{e:?}"))?;
        assert!(cli.global.no_write);
        assert!(cli.global.force);
        assert!(cli.global.verbose);
        assert!(cli.global.config.is_none());
        match cli.command {
            Commands::Delete(args) => assert_eq!(args.patterns, vec!["dist"]),
            _ => panic!("expected Delete"),
        }
        Ok(())
    }

    #[test]
    fn flags_override_config_file() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let config = tmp.path().join("filekit.toml");
        std::fs::write(&config, "encoding = \"latin1\"\nforce = true\n")?;
        let global = GlobalOptions {
            verbose: false,
            no_write: true,
            force: false,
            config: Some(config),
        };
        let settings = global.settings()?;
        assert!(settings.no_write);
        assert!(settings.force);
        assert_eq!(settings.encoding, "latin1");
        Ok(())
    }

    #[test]
    fn parses_copy() -> anyhow::Result<()> {
        let cli = cli()
            .run_inner(&["copy", "--encoding", "latin1", "a.txt", "out/a.txt"])
            .map_err(|e| anyhow::anyhow!("{e:?}"))?;
        match cli.command {
            Commands::Copy(args) => {
                assert_eq!(args.src, PathBuf::from("a.txt"));
                assert_eq!(args.dest, PathBuf::from("out/a.txt"));
                assert_eq!(args.encoding.as_deref(), Some("latin1"));
            }
            _ => panic!("expected Copy"),
        }
        Ok(())
    }
}
