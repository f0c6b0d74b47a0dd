use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct WhoamiCommand;

#[async_trait]
impl Command for WhoamiCommand {
    fn name(&self) -> &'static str {
        "whoami"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        CommandResult::success(format!("{}\n", ctx.state.var("USER")))
    }
}
