// src/commands/env/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct EnvCommand;

/// `NAME=VALUE` lines in insertion order.
pub(crate) fn format_env<'a>(vars: impl Iterator<Item = (&'a String, &'a String)>) -> String {
    vars.map(|(k, v)| format!("{}={}\n", k, v)).collect()
}

#[async_trait]
impl Command for EnvCommand {
    fn name(&self) -> &'static str {
        "env"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let args = &ctx.args;

        if args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: env [OPTION]...\n\n\
                 Print the environment.\n\n\
                 Options:\n\
                   -u NAME, --unset=NAME     leave NAME out of the listing\n\
                       --help                display this help and exit\n".to_string()
            );
        }

        let mut unset_vars: Vec<&str> = Vec::new();

        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];
            if arg == "-u" && i + 1 < args.len() {
                i += 1;
                unset_vars.push(&args[i]);
            } else if let Some(name) = arg.strip_prefix("--unset=") {
                unset_vars.push(name);
            } else if arg.starts_with("-u") && arg.len() > 2 {
                unset_vars.push(&arg[2..]);
            } else {
                return CommandResult::with_exit_code(
                    String::new(),
                    format!("env: unrecognized argument '{}'\n", arg),
                    1,
                );
            }
            i += 1;
        }

        let listed = ctx
            .state
            .env
            .iter()
            .filter(|(k, _)| !unset_vars.contains(&k.as_str()));
        CommandResult::success(format_env(listed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;

    fn make_ctx<'a>(state: &'a mut SessionState, args: Vec<&str>) -> CommandContext<'a> {
        CommandContext {
            args: args.into_iter().map(String::from).collect(),
            state,
            fetch_fn: None,
        }
    }

    #[tokio::test]
    async fn test_env_insertion_order() {
        let mut state = SessionState::default();
        let result = EnvCommand.execute(make_ctx(&mut state, vec![])).await;
        let names: Vec<&str> = result.stdout.lines().filter_map(|l| l.split('=').next()).collect();
        assert_eq!(names, vec!["HOME", "USER", "HOSTNAME", "PATH", "SHELL", "TERM", "PWD", "LANG"]);
        assert!(result.stdout.starts_with("HOME=/home/user\n"));
    }

    #[tokio::test]
    async fn test_env_new_variable_last() {
        let mut state = SessionState::default();
        state.env.insert("ZZZ".to_string(), "1".to_string());
        state.env.insert("AAA".to_string(), "2".to_string());
        let result = EnvCommand.execute(make_ctx(&mut state, vec![])).await;
        assert!(result.stdout.ends_with("ZZZ=1\nAAA=2\n"));
    }

    #[tokio::test]
    async fn test_env_unset() {
        let mut state = SessionState::default();
        let result = EnvCommand.execute(make_ctx(&mut state, vec!["-u", "PATH", "--unset=TERM"])).await;
        assert!(!result.stdout.contains("PATH="));
        assert!(!result.stdout.contains("TERM="));
        assert!(result.stdout.contains("USER=user"));
        // listing does not change the session
        assert!(state.env.contains_key("PATH"));
    }

    #[tokio::test]
    async fn test_env_bad_argument() {
        let mut state = SessionState::default();
        let result = EnvCommand.execute(make_ctx(&mut state, vec!["ls"])).await;
        assert_eq!(result.exit_code, 1);
    }
}
