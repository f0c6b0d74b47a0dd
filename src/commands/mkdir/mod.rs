// src/commands/mkdir/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::session::SessionState;
use crate::shell::{normalize, ShellError};

pub struct MkdirCommand;

fn make_dir(state: &mut SessionState, raw: &str) -> Result<(), ShellError> {
    if state.resolve(raw).is_ok() {
        return Err(ShellError::AlreadyExists { path: raw.to_string() });
    }
    let (parent_id, name) = state.creation_target(raw)?;
    state.tree.create_directory(&parent_id, name)?;
    Ok(())
}

/// `-p`: create every missing directory along the path; existing ones are fine.
fn make_parents(state: &mut SessionState, raw: &str) -> Result<(), ShellError> {
    let segments = normalize(raw, &state.resolution_context());
    let mut current = state.tree.root_id().to_string();
    let mut path = String::new();

    for segment in segments {
        path.push('/');
        path.push_str(&segment);
        let existing = state
            .tree
            .get(&current)
            .and_then(|node| node.child_named(&segment))
            .map(|child| (child.id.clone(), child.is_directory()));

        current = match existing {
            Some((id, true)) => id,
            Some((_, false)) => return Err(ShellError::NotADirectory { path }),
            None => state.tree.create_directory(&current, &segment)?.id,
        };
    }
    Ok(())
}

#[async_trait]
impl Command for MkdirCommand {
    fn name(&self) -> &'static str {
        "mkdir"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: mkdir [OPTION]... DIRECTORY...\n\n\
                 Create the DIRECTORY(ies), if they do not already exist.\n\n\
                 Options:\n\
                   -p, --parents    no error if existing, make parent directories as needed\n\
                   -v, --verbose    print a message for each created directory\n\
                       --help       display this help and exit\n".to_string()
            );
        }

        let mut parents = false;
        let mut verbose = false;
        let mut dirs: Vec<&str> = Vec::new();

        for arg in &ctx.args {
            match arg.as_str() {
                "--parents" => parents = true,
                "--verbose" => verbose = true,
                _ if arg.starts_with("--") => {
                    return CommandResult::error(format!("mkdir: unrecognized option '{}'\n", arg));
                }
                _ if arg.starts_with('-') && arg.len() > 1 => {
                    for ch in arg[1..].chars() {
                        match ch {
                            'p' => parents = true,
                            'v' => verbose = true,
                            _ => {
                                return CommandResult::error(format!("mkdir: invalid option -- '{}'\n", ch));
                            }
                        }
                    }
                }
                _ => dirs.push(arg),
            }
        }

        if dirs.is_empty() {
            return CommandResult::error(format!("mkdir: {}\n", ShellError::MissingOperand));
        }

        let mut stdout = String::new();
        let mut stderr = String::new();
        let mut exit_code = 0;

        for dir in dirs {
            let outcome = if parents {
                make_parents(ctx.state, dir)
            } else {
                make_dir(ctx.state, dir)
            };
            match outcome {
                Ok(()) => {
                    if verbose {
                        stdout.push_str(&format!("mkdir: created directory '{}'\n", dir));
                    }
                }
                Err(err) => {
                    stderr.push_str(&format!("mkdir: {}\n", err));
                    exit_code = 1;
                }
            }
        }

        CommandResult::with_exit_code(stdout, stderr, exit_code)
    }
}
