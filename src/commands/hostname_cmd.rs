use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct HostnameCommand;

#[async_trait]
impl Command for HostnameCommand {
    fn name(&self) -> &'static str {
        "hostname"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        CommandResult::success(format!("{}\n", ctx.state.var("HOSTNAME")))
    }
}
