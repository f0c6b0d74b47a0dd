// src/commands/ls/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::Node;

pub struct LsCommand;

fn format_mode(node: &Node) -> &'static str {
    if node.is_directory() { "drwxr-xr-x" } else { "-rw-r--r--" }
}

/// Characters of content for files, entry count for directories.
fn entry_size(node: &Node) -> usize {
    match node.content() {
        Some(content) => content.chars().count(),
        None => node.children().len(),
    }
}

fn display_name(node: &Node) -> String {
    if node.is_directory() {
        format!("{}/", node.name)
    } else {
        node.name.clone()
    }
}

fn format_entry(node: &Node, shown: &str, long_format: bool) -> String {
    if long_format {
        format!("{} 1 user user {:>5} {}\n", format_mode(node), entry_size(node), shown)
    } else {
        format!("{}\n", shown)
    }
}

#[async_trait]
impl Command for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: ls [OPTION]... [PATH]...\n\n\
                 List directory contents. Directories are shown with a trailing /.\n\n\
                 Options:\n\
                   -l                 use a long listing format\n\
                   -r, --reverse      reverse listing order\n\
                       --help         display this help and exit\n".to_string()
            );
        }

        let mut long_format = false;
        let mut reverse = false;
        let mut paths: Vec<&str> = Vec::new();

        for arg in &ctx.args {
            match arg.as_str() {
                "--reverse" => reverse = true,
                "-" => paths.push(arg),
                _ if arg.starts_with("--") => {
                    return CommandResult::with_exit_code(
                        String::new(),
                        format!("ls: unrecognized option '{}'\n", arg),
                        2,
                    );
                }
                _ if arg.starts_with('-') => {
                    for ch in arg[1..].chars() {
                        match ch {
                            'l' => long_format = true,
                            'r' => reverse = true,
                            // hidden entries do not exist in the tree
                            'a' | 'A' => {}
                            _ => {
                                return CommandResult::with_exit_code(
                                    String::new(),
                                    format!("ls: invalid option -- '{}'\n", ch),
                                    2,
                                );
                            }
                        }
                    }
                }
                _ => paths.push(arg),
            }
        }

        if paths.is_empty() {
            paths.push(".");
        }

        let mut stdout = String::new();
        let mut stderr = String::new();
        let mut exit_code = 0;
        let show_path_header = paths.len() > 1;

        for (idx, path) in paths.iter().enumerate() {
            let resolved = match ctx.state.resolve(path) {
                Ok(r) => r,
                Err(err) => {
                    stderr.push_str(&format!("ls: {}\n", err));
                    exit_code = 2;
                    continue;
                }
            };

            // A file argument lists as itself, spelled as given
            if resolved.node.is_file() {
                stdout.push_str(&format_entry(resolved.node, path, long_format));
                continue;
            }

            if show_path_header {
                if idx > 0 { stdout.push('\n'); }
                stdout.push_str(&format!("{}:\n", path));
            }

            // Insertion order
            let mut entries: Vec<&Node> = resolved.node.children().iter().collect();
            if reverse {
                entries.reverse();
            }

            for entry in entries {
                stdout.push_str(&format_entry(entry, &display_name(entry), long_format));
            }
        }

        CommandResult::with_exit_code(stdout, stderr, exit_code)
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
    async fn test_ls_current_directory() {
        let mut state = SessionState::default();
        let result = LsCommand.execute(make_ctx(&mut state, vec![])).await;
        assert_eq!(result.stdout, "documents/\ndownloads/\n");
        assert_eq!(result.stderr, "");
        assert_eq!(result.exit_code, 0);
    }

    #[tokio::test]
    async fn test_ls_root() {
        let mut state = SessionState::default();
        let result = LsCommand.execute(make_ctx(&mut state, vec!["/"])).await;
        assert_eq!(result.stdout, "home/\netc/\nvar/\n");
    }

    #[tokio::test]
    async fn test_ls_insertion_order() {
        let mut state = SessionState::default();
        state.tree.create_file("/home/user", "zeta.txt", "").unwrap();
        state.tree.create_file("/home/user", "alpha.txt", "").unwrap();
        let result = LsCommand.execute(make_ctx(&mut state, vec![])).await;
        assert_eq!(result.stdout, "documents/\ndownloads/\nzeta.txt\nalpha.txt\n");
    }

    #[tokio::test]
    async fn test_ls_reverse() {
        let mut state = SessionState::default();
        let result = LsCommand.execute(make_ctx(&mut state, vec!["-r", "/"])).await;
        assert_eq!(result.stdout, "var/\netc/\nhome/\n");
    }

    #[tokio::test]
    async fn test_ls_combined_short_flags() {
        let mut state = SessionState::default();
        for flags in ["-la", "-al", "-lr"] {
            let result = LsCommand.execute(make_ctx(&mut state, vec![flags, "/etc"])).await;
            assert_eq!(result.stdout, "-rw-r--r-- 1 user user    33 hosts\n", "{}", flags);
            assert_eq!(result.exit_code, 0);
        }
    }

    #[tokio::test]
    async fn test_ls_invalid_option() {
        let mut state = SessionState::default();
        let result = LsCommand.execute(make_ctx(&mut state, vec!["-lz", "/etc"])).await;
        assert_eq!(result.stderr, "ls: invalid option -- 'z'\n");
        assert_eq!(result.exit_code, 2);
        assert!(result.stdout.is_empty());
    }

    #[tokio::test]
    async fn test_ls_file_prints_itself() {
        let mut state = SessionState::default();
        let result = LsCommand.execute(make_ctx(&mut state, vec!["documents/readme.txt"])).await;
        assert_eq!(result.stdout, "documents/readme.txt\n");
    }

    #[tokio::test]
    async fn test_ls_long() {
        let mut state = SessionState::default();
        let result = LsCommand.execute(make_ctx(&mut state, vec!["-l", "/etc"])).await;
        assert_eq!(result.stdout, "-rw-r--r-- 1 user user    33 hosts\n");
        let result = LsCommand.execute(make_ctx(&mut state, vec!["-l", "/home"])).await;
        assert!(result.stdout.starts_with("drwxr-xr-x"));
        assert!(result.stdout.ends_with("user/\n"));
    }

    #[tokio::test]
    async fn test_ls_nonexistent() {
        let mut state = SessionState::default();
        let result = LsCommand.execute(make_ctx(&mut state, vec!["/nonexistent"])).await;
        assert_eq!(result.stderr, "ls: /nonexistent: No such file or directory\n");
        assert_eq!(result.exit_code, 2);
    }

    #[tokio::test]
    async fn test_ls_multiple_paths() {
        let mut state = SessionState::default();
        let result = LsCommand.execute(make_ctx(&mut state, vec!["/etc", "/var"])).await;
        assert_eq!(result.stdout, "/etc:\nhosts\n\n/var:\nlog/\n");
    }

    #[tokio::test]
    async fn test_ls_empty_directory() {
        let mut state = SessionState::default();
        let result = LsCommand.execute(make_ctx(&mut state, vec!["downloads"])).await;
        assert_eq!(result.stdout, "");
        assert_eq!(result.exit_code, 0);
    }
}
