use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct HelpCommand;

const COMMANDS: &[(&str, &str)] = &[
    ("help", "list available commands"),
    ("clear", "clear the screen"),
    ("echo [TEXT]...", "print text"),
    ("pwd", "show the current directory"),
    ("ls [PATH]...", "list directory contents"),
    ("cd [PATH]", "change directory"),
    ("cat FILE...", "show file contents"),
    ("touch FILE...", "create empty files"),
    ("mkdir DIR...", "create directories"),
    ("whoami", "show the user name"),
    ("hostname", "show the host name"),
    ("date [+FORMAT]", "show the current date and time"),
    ("env", "show environment variables"),
    ("export NAME=VALUE", "set an environment variable"),
    ("curl URL [OPTIONS]", "send an HTTP request (also: http, fetch)"),
    ("exit", "close the terminal"),
];

const CURL_OPTIONS: &[(&str, &str)] = &[
    ("-X, --request METHOD", "request method (GET, POST, ...)"),
    ("-H, --header \"Name: Value\"", "add a header"),
    ("-d, --data DATA", "send DATA as the request body"),
    ("--json DATA", "send DATA as a JSON body"),
    ("-u, --user USER:PASS", "basic authentication"),
];

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &'static str { "help" }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help" || a == "-h") {
            return CommandResult::success(
                "help - display available commands\n\nUsage: help\n\nOptions:\n  -h, --help    Show this help message\n".to_string()
            );
        }

        let mut stdout = String::from("Available commands:\n\n");

        for (usage, summary) in COMMANDS {
            stdout.push_str(&format!("  {:<20} {}\n", usage, summary));
        }
        stdout.push_str("\ncurl options:\n");
        for (flag, summary) in CURL_OPTIONS {
            stdout.push_str(&format!("  {:<28} {}\n", flag, summary));
        }

        stdout.push_str("\nUse '<command> --help' for details on a specific command.\n");

        CommandResult::success(stdout)
    }
}
