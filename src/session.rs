//! Shell Session
//!
//! Main entry point for the interactive shell.
//! Ties together the tokenizer, the command registry and the tree.

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::commands::registry::{create_default_registry, CommandRegistry};
use crate::commands::types::{CommandContext, CommandResult, FetchFn};
use crate::fs::{shell_tree, TreeStore};
use crate::shell::{
    expand_variables, resolve, split_parent, tokenize, ResolutionContext, Resolved, ShellError,
};

const DEFAULT_HOME: &str = "/home/user";

/// Environment every new session starts with.
pub fn default_env() -> IndexMap<String, String> {
    [
        ("HOME", DEFAULT_HOME),
        ("USER", "user"),
        ("HOSTNAME", "vfs-shell"),
        ("PATH", "/usr/local/bin:/usr/bin:/bin"),
        ("SHELL", "/bin/bash"),
        ("TERM", "xterm-256color"),
        ("PWD", DEFAULT_HOME),
        ("LANG", "en_US.UTF-8"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Mutable state handed to every command.
pub struct SessionState {
    pub tree: TreeStore,
    pub cwd: String,
    pub env: IndexMap<String, String>,
}

impl SessionState {
    /// Value of `name`, or the empty string when unset.
    pub fn var(&self, name: &str) -> &str {
        self.env.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn home(&self) -> &str {
        match self.var("HOME") {
            "" => "/",
            home => home,
        }
    }

    pub fn resolution_context(&self) -> ResolutionContext<'_> {
        ResolutionContext {
            cwd: &self.cwd,
            home: self.home(),
        }
    }

    /// Resolve a shell path against the tree.
    pub fn resolve(&self, raw: &str) -> Result<Resolved<'_>, ShellError> {
        resolve(&self.tree, raw, &self.resolution_context())
    }

    /// Directory that would hold a new entry at `raw`, and the entry's name.
    pub fn creation_target<'r>(&self, raw: &'r str) -> Result<(String, &'r str), ShellError> {
        let trimmed = raw.trim_end_matches('/');
        let (parent, name) = split_parent(trimmed);
        let parent = parent.unwrap_or(".");

        let resolved = self.resolve(parent)?;
        if !resolved.node.is_directory() {
            return Err(ShellError::NotADirectory { path: parent.to_string() });
        }
        Ok((resolved.node.id.clone(), name))
    }

    /// Change the working directory and keep `PWD` in step.
    pub fn set_cwd(&mut self, path: String) {
        self.env.insert("PWD".to_string(), path.clone());
        self.cwd = path;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            tree: TreeStore::new(shell_tree()),
            cwd: DEFAULT_HOME.to_string(),
            env: default_env(),
        }
    }
}

/// Options for creating a shell session.
#[derive(Default)]
pub struct SessionOptions {
    /// Environment variables, merged over the defaults
    pub env: Option<IndexMap<String, String>>,
    /// Working directory (defaults to `$HOME`)
    pub cwd: Option<String>,
    /// Tree the session works on (defaults to the shell tree)
    pub tree: Option<TreeStore>,
    /// HTTP transport for curl; without one, requests fail
    pub fetch_fn: Option<FetchFn>,
}

/// An interactive shell over a virtual tree.
pub struct ShellSession {
    state: SessionState,
    registry: CommandRegistry,
    fetch_fn: Option<FetchFn>,
}

impl ShellSession {
    /// Create a new shell session.
    pub fn new(options: SessionOptions) -> Self {
        let mut env = default_env();
        if let Some(user_env) = options.env {
            env.extend(user_env);
        }

        let tree = options.tree.unwrap_or_else(|| TreeStore::new(shell_tree()));
        let mut state = SessionState {
            tree,
            cwd: "/".to_string(),
            env,
        };

        let requested = options.cwd.unwrap_or_else(|| state.home().to_string());
        let cwd = match state.resolve(&requested) {
            Ok(resolved) if resolved.node.is_directory() => resolved.path,
            _ => {
                warn!(cwd = %requested, "working directory does not exist, using /");
                "/".to_string()
            }
        };
        state.set_cwd(cwd);

        info!(cwd = %state.cwd, nodes = state.tree.node_count(), "shell session started");
        Self {
            state,
            registry: create_default_registry(),
            fetch_fn: options.fetch_fn,
        }
    }

    /// Run one input line.
    pub async fn execute(&mut self, line: &str) -> CommandResult {
        let words = expand_variables(tokenize(line), &self.state.env);
        let Some((name, args)) = words.split_first() else {
            return CommandResult::success(String::new());
        };
        let name = name.to_lowercase();

        let Some(command) = self.registry.get(&name) else {
            debug!(command = %name, "unknown command");
            return CommandResult::with_exit_code(
                String::new(),
                format!("{}\n", ShellError::CommandNotFound { name }),
                127,
            );
        };

        debug!(command = %name, args = args.len(), "dispatching");
        let ctx = CommandContext {
            args: args.to_vec(),
            state: &mut self.state,
            fetch_fn: self.fetch_fn.clone(),
        };
        command.execute(ctx).await
    }

    /// `user@host:path$ ` with the home directory shown as `~`.
    pub fn prompt(&self) -> String {
        let home = self.state.home();
        let cwd = &self.state.cwd;
        let shown = if home != "/" && cwd == home {
            "~".to_string()
        } else if let Some(rest) = cwd.strip_prefix(home).filter(|r| home != "/" && r.starts_with('/')) {
            format!("~{}", rest)
        } else {
            cwd.clone()
        };
        format!("{}@{}:{}$ ", self.state.var("USER"), self.state.var("HOSTNAME"), shown)
    }

    pub fn cwd(&self) -> &str {
        &self.state.cwd
    }

    pub fn env(&self) -> &IndexMap<String, String> {
        &self.state.env
    }

    pub fn tree(&self) -> &TreeStore {
        &self.state.tree
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }
}
