// src/commands/cat/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::shell::ShellError;

pub struct CatCommand;

#[async_trait]
impl Command for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let args = &ctx.args;

        if args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: cat [OPTION]... FILE...\n\n\
                 Concatenate FILE(s) to standard output.\n\n\
                 Options:\n\
                   -n, --number     number all output lines\n\
                       --help       display this help and exit\n".to_string()
            );
        }

        let mut show_line_numbers = false;
        let mut files: Vec<&str> = Vec::new();

        for arg in args {
            match arg.as_str() {
                "-n" | "--number" => show_line_numbers = true,
                _ => files.push(arg),
            }
        }

        if files.is_empty() {
            return CommandResult::error(format!("cat: {}\n", ShellError::MissingOperand));
        }

        let mut stdout = String::new();
        let mut stderr = String::new();
        let mut exit_code = 0;
        let mut line_number = 1;

        for file in files {
            let content = match ctx.state.resolve(file) {
                Ok(resolved) => match resolved.node.content() {
                    Some(c) => c,
                    None => {
                        let err = ShellError::IsADirectory { path: file.to_string() };
                        stderr.push_str(&format!("cat: {}\n", err));
                        exit_code = 1;
                        continue;
                    }
                },
                Err(err) => {
                    stderr.push_str(&format!("cat: {}\n", err));
                    exit_code = 1;
                    continue;
                }
            };

            // Each file ends on its own line
            let mut content = content.to_string();
            if !content.ends_with('\n') {
                content.push('\n');
            }

            if show_line_numbers {
                let (numbered, next_line) = add_line_numbers(&content, line_number);
                stdout.push_str(&numbered);
                line_number = next_line;
            } else {
                stdout.push_str(&content);
            }
        }

        CommandResult::with_exit_code(stdout, stderr, exit_code)
    }
}

fn add_line_numbers(content: &str, start_line: usize) -> (String, usize) {
    let lines: Vec<&str> = content.lines().collect();
    let numbered: String = lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>6}\t{}\n", start_line + i, line))
        .collect();
    (numbered, start_line + lines.len())
}
