//! vfs-shell - A virtual file system with an explorer API and a shell
//!
//! The tree lives entirely in memory (optionally snapshotted to disk) and is
//! driven either through `fs::TreeStore` directly or through the line-based
//! shell in `session::ShellSession`.

pub mod commands;
pub mod fs;
pub mod network;
pub mod session;
pub mod shell;

pub use commands::{CommandResult, HostEvent};
pub use fs::{FsError, Node, TreeStore};
pub use session::{SessionOptions, ShellSession};
pub use shell::ShellError;
