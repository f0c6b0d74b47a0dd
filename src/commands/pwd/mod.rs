// src/commands/pwd/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct PwdCommand;

#[async_trait]
impl Command for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "pwd - print name of current/working directory\n\nUsage: pwd\n".to_string()
            );
        }

        CommandResult::success(format!("{}\n", ctx.state.cwd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;

    fn make_ctx<'a>(state: &'a mut SessionState, args: Vec<&str>, cwd: &str) -> CommandContext<'a> {
        state.set_cwd(cwd.to_string());
        CommandContext {
            args: args.into_iter().map(String::from).collect(),
            state,
            fetch_fn: None,
        }
    }

    #[tokio::test]
    async fn test_pwd_default() {
        let mut state = SessionState::default();
        let result = PwdCommand.execute(make_ctx(&mut state, vec![], "/home/user")).await;
        assert_eq!(result.stdout, "/home/user\n");
        assert_eq!(result.exit_code, 0);
    }

    #[tokio::test]
    async fn test_pwd_root() {
        let mut state = SessionState::default();
        let result = PwdCommand.execute(make_ctx(&mut state, vec![], "/")).await;
        assert_eq!(result.stdout, "/\n");
    }

    #[tokio::test]
    async fn test_pwd_ignores_arguments() {
        let mut state = SessionState::default();
        let result = PwdCommand.execute(make_ctx(&mut state, vec!["extra"], "/etc")).await;
        assert_eq!(result.stdout, "/etc\n");
    }
}
