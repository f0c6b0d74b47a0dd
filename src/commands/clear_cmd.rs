use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult, HostEvent};

pub struct ClearCommand;

#[async_trait]
impl Command for ClearCommand {
    fn name(&self) -> &'static str {
        "clear"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "clear - clear the terminal screen\n\nUsage: clear\n\nOptions:\n    --help display this help and exit\n".to_string()
            );
        }

        // The host owns the screen; it clears on this event.
        CommandResult::success(String::new()).with_event(HostEvent::ClearScreen)
    }
}
