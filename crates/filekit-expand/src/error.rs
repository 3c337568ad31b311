use miette::Diagnostic;
use thiserror::Error;

/// Failure to parse a textual option value (CLI flag or config entry).
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseOptionError {
    #[error("unknown extDot policy '{0}', expected 'first' or 'last'")]
    #[diagnostic(code(filekit::invalid_ext_dot))]
    ExtDot(String),

    #[error("unknown filter '{0}', expected 'isFile', 'isDirectory', or 'isSymbolicLink'")]
    #[diagnostic(code(filekit::invalid_filter))]
    Filter(String),
}
