//! Shell Module
//!
//! Command-line plumbing between raw input and the tree:
//! - tokenizer: quoting, escaping and `$VAR` substitution
//! - path_resolver: absolute, `~` and relative path resolution
//! - errors: error taxonomy surfaced by command handlers

pub mod errors;
pub mod path_resolver;
pub mod tokenizer;

pub use errors::ShellError;
pub use path_resolver::{normalize, resolve, split_parent, ResolutionContext, Resolved};
pub use tokenizer::{expand_variables, tokenize};
