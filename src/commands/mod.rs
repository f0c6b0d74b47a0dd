// src/commands/mod.rs
pub mod cat;
pub mod cd_cmd;
pub mod clear_cmd;
pub mod curl;
pub mod date;
pub mod echo;
pub mod env;
pub mod exit_cmd;
pub mod export_cmd;
pub mod help_cmd;
pub mod hostname_cmd;
pub mod ls;
pub mod mkdir;
pub mod pwd;
pub mod registry;
pub mod touch;
pub mod types;
pub mod whoami_cmd;

pub use registry::{create_default_registry, CommandRegistry};
pub use types::{Command, CommandContext, CommandResult, DeferredOutput, FetchFn, FetchFuture, FetchResponse, HostEvent};
