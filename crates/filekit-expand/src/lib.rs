#![doc = include_str!("../README.md")]

extern crate alloc;

mod engine;
mod error;
mod mapping;
mod options;
pub mod paths;
mod pattern;
pub mod provider;

pub use crate::engine::{expand, expand_with, is_match, match_paths};
pub use crate::error::ParseOptionError;
pub use crate::mapping::{FileMapping, expand_mapping, expand_mapping_with, rewrite_ext};
pub use crate::options::{ExpandOptions, ExtDot, Filter, JoinRename, MappingOptions, Rename};
pub use crate::pattern::{Patterns, process_patterns};
pub use crate::provider::{FsGlob, GlobOptions, GlobProvider};
