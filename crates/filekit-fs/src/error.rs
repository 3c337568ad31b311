use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error type returned by a copy process hook.
pub type BoxError = Box<dyn core::error::Error + Send + Sync>;

#[derive(Debug, Error, Diagnostic)]
pub enum FsError {
    #[error("unable to read \"{}\"", path.display())]
    #[diagnostic(code(filekit::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to write \"{}\"", path.display())]
    #[diagnostic(code(filekit::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to create directory \"{}\"", path.display())]
    #[diagnostic(code(filekit::mkdir))]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to delete \"{}\"", path.display())]
    #[diagnostic(code(filekit::delete))]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to list \"{}\"", path.display())]
    #[diagnostic(code(filekit::read_dir))]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to walk \"{}\"", path.display())]
    #[diagnostic(code(filekit::walk))]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("unable to parse \"{}\" as JSON", path.display())]
    #[diagnostic(code(filekit::parse_json))]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unable to parse \"{}\" as YAML", path.display())]
    #[diagnostic(code(filekit::parse_yaml))]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported encoding '{0}'")]
    #[diagnostic(
        code(filekit::encoding),
        help("use a WHATWG encoding label such as 'utf-8', 'utf-16le' or 'latin1'")
    )]
    UnsupportedEncoding(String),

    #[error("error while processing \"{}\"", path.display())]
    #[diagnostic(code(filekit::process))]
    Process {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("cannot delete the current working directory")]
    #[diagnostic(code(filekit::delete_cwd), help("pass --force to delete it anyway"))]
    DeleteCwd { path: PathBuf },

    #[error("cannot delete files outside the current working directory: \"{}\"", path.display())]
    #[diagnostic(code(filekit::delete_outside_cwd), help("pass --force to delete it anyway"))]
    DeleteOutsideCwd { path: PathBuf },

    #[error("cannot determine the current directory")]
    #[diagnostic(code(filekit::current_dir))]
    CurrentDir(#[source] std::io::Error),
}
