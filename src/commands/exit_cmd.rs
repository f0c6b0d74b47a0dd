use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult, HostEvent};

pub struct ExitCommand;

#[async_trait]
impl Command for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "exit - close the terminal\n\nUsage: exit\n".to_string()
            );
        }

        CommandResult::success("Closing terminal...\n".to_string()).with_event(HostEvent::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;

    #[tokio::test]
    async fn test_exit_emits_event() {
        let mut state = SessionState::default();
        let ctx = CommandContext { args: vec![], state: &mut state, fetch_fn: None };
        let result = ExitCommand.execute(ctx).await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.event, Some(HostEvent::Exit));
        assert!(result.stdout.contains("Closing"));
    }
}
