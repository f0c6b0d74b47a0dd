//! cd - Change directory
//!
//! Supports:
//! - cd [dir] - change to directory
//! - cd - change to home directory
//! - cd - - change to previous directory (OLDPWD)

use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::shell::ShellError;

pub struct CdCommand;

#[async_trait]
impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let state = ctx.state;
        let mut print_path = false;

        let target = match ctx.args.first().map(String::as_str) {
            Some("--help") => {
                return CommandResult::success("cd - change the working directory\n\nUsage: cd [DIR]\n".to_string());
            }
            None => state.home().to_string(),
            Some("-") => match state.env.get("OLDPWD") {
                Some(previous) => {
                    print_path = true;
                    previous.clone()
                }
                None => return CommandResult::error("cd: OLDPWD not set\n".to_string()),
            },
            Some(dir) => dir.to_string(),
        };

        let new_dir = match state.resolve(&target) {
            Ok(resolved) if resolved.node.is_directory() => resolved.path,
            Ok(_) => {
                return CommandResult::error(format!("cd: {}\n", ShellError::NotADirectory { path: target }));
            }
            Err(err) => return CommandResult::error(format!("cd: {}\n", err)),
        };

        let previous = std::mem::take(&mut state.cwd);
        state.env.insert("OLDPWD".to_string(), previous);
        state.set_cwd(new_dir);

        if print_path {
            CommandResult::success(format!("{}\n", state.cwd))
        } else {
            CommandResult::success(String::new())
        }
    }
}
