// src/commands/date/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone, Utc};

pub struct DateCommand;

const HELP: &str = "Usage: date [OPTION]... [+FORMAT]\n\n\
Display the current time in the given FORMAT.\n\n\
Options:\n  -u         print UTC\n  -I         output in ISO 8601 format\n  -R         output in RFC 5322 format\n      --help display this help\n\n\
FORMAT controls the output. Common sequences:\n  %Y year  %m month  %d day  %H hour  %M minute  %S second\n  %F full date  %T full time  %a weekday  %b month name  %s timestamp\n";

/// Default rendering, e.g. `Wed Oct 14 2026 09:30:00 GMT+0000`
const DEFAULT_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

#[derive(Debug, Default)]
struct DateOptions {
    utc: bool,
    iso: bool,
    rfc: bool,
    format: Option<String>,
}

fn parse_args(args: &[String]) -> Result<DateOptions, String> {
    let mut opts = DateOptions::default();
    for a in args {
        match a.as_str() {
            "-u" | "--utc" | "--universal" => opts.utc = true,
            "-I" | "--iso-8601" => opts.iso = true,
            "-R" | "--rfc-2822" | "--rfc-email" => opts.rfc = true,
            _ if a.starts_with('+') => opts.format = Some(a[1..].to_string()),
            _ if a.starts_with("--") => return Err(format!("date: unrecognized option '{}'\n", a)),
            _ if a.starts_with('-') && a.len() > 1 => {
                for ch in a[1..].chars() {
                    match ch {
                        'u' => opts.utc = true,
                        'I' => opts.iso = true,
                        'R' => opts.rfc = true,
                        _ => return Err(format!("date: invalid option -- '{}'\n", ch)),
                    }
                }
            }
            _ => return Err(format!("date: invalid date '{}'\n", a)),
        }
    }
    Ok(opts)
}

fn format_with<Tz: TimeZone>(dt: &DateTime<Tz>, fmt: &str) -> Result<String, String>
where
    Tz::Offset: std::fmt::Display,
{
    let items: Vec<Item<'_>> = StrftimeItems::new(fmt).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(format!("date: invalid format '{}'\n", fmt));
    }
    Ok(dt.format_with_items(items.into_iter()).to_string())
}

fn render_in<Tz: TimeZone>(dt: &DateTime<Tz>, opts: &DateOptions) -> Result<String, String>
where
    Tz::Offset: std::fmt::Display,
{
    let fmt = if opts.iso {
        "%Y-%m-%dT%H:%M:%S%:z"
    } else if opts.rfc {
        "%a, %d %b %Y %H:%M:%S %z"
    } else if let Some(fmt) = &opts.format {
        fmt.as_str()
    } else {
        DEFAULT_FORMAT
    };
    format_with(dt, fmt)
}

fn render(now: DateTime<Utc>, opts: &DateOptions) -> Result<String, String> {
    let text = if opts.utc {
        render_in(&now, opts)?
    } else {
        render_in(&now.with_timezone(&Local), opts)?
    };
    Ok(format!("{}\n", text))
}

#[async_trait]
impl Command for DateCommand {
    fn name(&self) -> &'static str { "date" }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(HELP.into());
        }

        let rendered = parse_args(&ctx.args).and_then(|opts| render(Utc::now(), &opts));
        match rendered {
            Ok(out) => CommandResult::success(out),
            Err(err) => CommandResult::error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;

    fn fixed() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 45).unwrap()
    }

    fn opts(args: &[&str]) -> DateOptions {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse_args(&args).unwrap()
    }

    #[test]
    fn test_default_format_utc() {
        let out = render(fixed(), &opts(&["-u"])).unwrap();
        assert_eq!(out, "Mon Jan 15 2024 12:30:45 GMT+0000\n");
    }

    #[test]
    fn test_iso_utc() {
        let out = render(fixed(), &opts(&["-u", "-I"])).unwrap();
        assert_eq!(out, "2024-01-15T12:30:45+00:00\n");
        let combined = render(fixed(), &opts(&["-uI"])).unwrap();
        assert_eq!(combined, out);
    }

    #[test]
    fn test_rfc_utc() {
        let out = render(fixed(), &opts(&["-u", "-R"])).unwrap();
        assert_eq!(out, "Mon, 15 Jan 2024 12:30:45 +0000\n");
    }

    #[test]
    fn test_custom_format() {
        let out = render(fixed(), &opts(&["-u", "+%Y-%m-%d %H:%M"])).unwrap();
        assert_eq!(out, "2024-01-15 12:30\n");
        let out = render(fixed(), &opts(&["-u", "+%s"])).unwrap();
        assert_eq!(out, "1705321845\n");
    }

    #[test]
    fn test_invalid_format() {
        assert!(render(fixed(), &opts(&["+%Q"])).is_err());
    }

    #[test]
    fn test_invalid_options() {
        let args = vec!["-x".to_string()];
        assert_eq!(parse_args(&args).unwrap_err(), "date: invalid option -- 'x'\n");
        let args = vec!["--bogus".to_string()];
        assert!(parse_args(&args).unwrap_err().contains("unrecognized option"));
    }

    #[tokio::test]
    async fn test_date_command_runs() {
        let mut state = SessionState::default();
        let ctx = CommandContext { args: vec!["+%Y".to_string()], state: &mut state, fetch_fn: None };
        let result = DateCommand.execute(ctx).await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout.trim().len(), 4);
    }

    #[tokio::test]
    async fn test_date_help() {
        let mut state = SessionState::default();
        let ctx = CommandContext { args: vec!["--help".to_string()], state: &mut state, fetch_fn: None };
        let result = DateCommand.execute(ctx).await;
        assert!(result.stdout.contains("Usage: date"));
    }
}
