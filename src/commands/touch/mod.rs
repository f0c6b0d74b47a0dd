// src/commands/touch/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::session::SessionState;
use crate::shell::ShellError;

pub struct TouchCommand;

/// Create an empty file at `raw` unless something already lives there.
fn touch_one(state: &mut SessionState, raw: &str) -> Result<(), ShellError> {
    if state.resolve(raw).is_ok() {
        return Ok(());
    }
    let (parent_id, name) = state.creation_target(raw)?;
    state.tree.create_file(&parent_id, name, "")?;
    Ok(())
}

#[async_trait]
impl Command for TouchCommand {
    fn name(&self) -> &'static str {
        "touch"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: touch [OPTION]... FILE...\n\n\
                 Create each FILE as an empty file. Existing entries are left unchanged.\n\n\
                 Options:\n\
                   -c, --no-create    do not create any files\n\
                       --help         display this help and exit\n".to_string()
            );
        }

        let mut files: Vec<&str> = Vec::new();
        let mut no_create = false;

        let mut args = ctx.args.iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--" => {
                    files.extend(args.by_ref().map(String::as_str));
                    break;
                }
                "-c" | "--no-create" => no_create = true,
                _ => files.push(arg),
            }
        }

        if files.is_empty() {
            return CommandResult::error(format!("touch: {}\n", ShellError::MissingOperand));
        }
        if no_create {
            return CommandResult::success(String::new());
        }

        let mut stderr = String::new();
        let mut exit_code = 0;

        for file in files {
            if let Err(err) = touch_one(ctx.state, file) {
                stderr.push_str(&format!("touch: {}\n", err));
                exit_code = 1;
            }
        }

        CommandResult::with_exit_code(String::new(), stderr, exit_code)
    }
}
