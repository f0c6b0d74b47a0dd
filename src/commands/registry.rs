// src/commands/registry.rs
use std::collections::HashMap;
use std::sync::Arc;
use super::types::Command;

pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command under its name and every alias.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        let cmd: Arc<dyn Command> = Arc::from(cmd);
        for alias in cmd.aliases() {
            self.commands.insert(alias.to_string(), Arc::clone(&cmd));
        }
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use super::cat::CatCommand;
use super::cd_cmd::CdCommand;
use super::clear_cmd::ClearCommand;
use super::curl::CurlCommand;
use super::date::DateCommand;
use super::echo::EchoCommand;
use super::env::EnvCommand;
use super::exit_cmd::ExitCommand;
use super::export_cmd::ExportCommand;
use super::help_cmd::HelpCommand;
use super::hostname_cmd::HostnameCommand;
use super::ls::LsCommand;
use super::mkdir::MkdirCommand;
use super::pwd::PwdCommand;
use super::touch::TouchCommand;
use super::whoami_cmd::WhoamiCommand;

/// Register every shell command
pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(Box::new(HelpCommand));
    registry.register(Box::new(ClearCommand));
    registry.register(Box::new(EchoCommand));
    registry.register(Box::new(PwdCommand));
    registry.register(Box::new(CdCommand));
    registry.register(Box::new(LsCommand));
    registry.register(Box::new(CatCommand));
    registry.register(Box::new(TouchCommand));
    registry.register(Box::new(MkdirCommand));
    registry.register(Box::new(WhoamiCommand));
    registry.register(Box::new(HostnameCommand));
    registry.register(Box::new(DateCommand));
    registry.register(Box::new(EnvCommand));
    registry.register(Box::new(ExportCommand));
    registry.register(Box::new(CurlCommand));
    registry.register(Box::new(ExitCommand));
}

/// Create a registry holding every shell command
pub fn create_default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    register_all(&mut registry);
    registry
}
