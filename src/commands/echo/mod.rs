// src/commands/echo/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct EchoCommand;

#[async_trait]
impl Command for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let args = &ctx.args;
        let mut no_newline = false;
        let mut start_index = 0;

        // Leading -n flags only; anything else starts the text
        while start_index < args.len() && args[start_index] == "-n" {
            no_newline = true;
            start_index += 1;
        }

        let mut output = args[start_index..].join(" ");
        if !no_newline {
            output.push('\n');
        }

        CommandResult::success(output)
    }
}
