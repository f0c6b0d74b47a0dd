//! export - Set environment variables
//!
//! Usage:
//!   export              - List all variables
//!   export NAME=value   - Set variable
//!   export NAME+=value  - Append value to variable

use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct ExportCommand;

/// Check if a string is a valid variable name.
fn is_valid_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

enum Assignment<'a> {
    Set(&'a str, &'a str),
    Append(&'a str, &'a str),
}

fn parse_assignment(arg: &str) -> Option<Assignment<'_>> {
    let eq_idx = arg.find('=')?;
    let (name, value) = (&arg[..eq_idx], &arg[eq_idx + 1..]);
    match name.strip_suffix('+') {
        Some(base) if is_valid_var_name(base) => Some(Assignment::Append(base, value)),
        _ if is_valid_var_name(name) => Some(Assignment::Set(name, value)),
        _ => None,
    }
}

#[async_trait]
impl Command for ExportCommand {
    fn name(&self) -> &'static str {
        "export"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let state = ctx.state;
        let args: Vec<&String> = ctx.args.iter().filter(|a| *a != "-p" && *a != "--").collect();

        if args.iter().any(|a| *a == "--help") {
            return CommandResult::success(
                "export - set environment variables\n\nUsage: export [NAME=VALUE]...\n\nWithout arguments, list all variables.\n".to_string()
            );
        }

        if args.is_empty() {
            let stdout: String = state
                .env
                .iter()
                .map(|(name, value)| {
                    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
                    format!("declare -x {}=\"{}\"\n", name, escaped)
                })
                .collect();
            return CommandResult::success(stdout);
        }

        let mut stdout = String::new();
        let mut stderr = String::new();
        let mut exit_code = 0;

        for arg in args {
            match parse_assignment(arg) {
                Some(Assignment::Set(name, value)) => {
                    state.env.insert(name.to_string(), value.to_string());
                    stdout.push_str(&format!("Variable set: {}={}\n", name, value));
                }
                Some(Assignment::Append(name, value)) => {
                    let entry = state.env.entry(name.to_string()).or_default();
                    entry.push_str(value);
                    stdout.push_str(&format!("Variable set: {}={}\n", name, entry));
                }
                None if arg.contains('=') => {
                    stderr.push_str(&format!("export: `{}': not a valid identifier\n", arg));
                    exit_code = 1;
                }
                None => {
                    stderr.push_str(&format!("export: {}: expected NAME=VALUE\n", arg));
                    exit_code = 1;
                }
            }
        }

        CommandResult::with_exit_code(stdout, stderr, exit_code)
    }
}
