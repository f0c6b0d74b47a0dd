use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{IsTerminal, Read, Write};
use std::path::PathBuf;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::info;
use vfs_shell::commands::{CommandResult, HostEvent};
use vfs_shell::fs::{explorer_tree, FileSnapshotStore, FsError, TreeStore, SNAPSHOT_KEY};
use vfs_shell::network::{create_http_fetch_fn, NetworkConfig, NetworkError};
use vfs_shell::session::{SessionOptions, ShellSession};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

#[derive(Parser)]
#[command(name = "vfs-shell")]
#[command(about = "A virtual file system with an explorer and a shell")]
#[command(version)]
struct Cli {
    /// Execute commands from the command line argument, one per line
    #[arg(short = 'c')]
    script: Option<String>,

    /// Working directory within the virtual tree
    #[arg(long = "cwd")]
    cwd: Option<String>,

    /// Output results as JSON (stdout, stderr, exitCode)
    #[arg(long = "json")]
    json: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "VFS_SHELL_LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// HTTP request timeout for curl, in milliseconds
    #[arg(long, default_value_t = 30_000)]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Operate on the persisted explorer tree; results are printed as JSON
    Tree {
        /// Directory holding the snapshot file
        #[arg(long, env = "VFS_SHELL_DATA_DIR", default_value = ".vfs-shell")]
        data_dir: PathBuf,

        #[command(subcommand)]
        op: TreeOp,
    },
}

#[derive(Subcommand)]
enum TreeOp {
    /// Print the whole tree
    Show,
    /// Print one node
    Get { id: String },
    /// Print the parent of a node (null for the root)
    Parent { id: String },
    /// Find nodes whose name, or file content, contains QUERY, ignoring case
    Search { query: String },
    /// Print folder, file and size totals
    Stats,
    /// Create a directory
    Mkdir { parent: String, name: String },
    /// Create a file
    Touch { parent: String, name: String, content: Option<String> },
    /// Rename a node
    Rename { id: String, name: String },
    /// Replace a file's content
    Edit { id: String, content: String },
    /// Delete a node and its subtree
    Rm { id: String },
    /// Move a node under another directory
    Mv { id: String, dest: String },
    /// Copy a node under another directory
    Cp { id: String, dest: String },
    /// Restore the default tree
    Reset,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Fs(#[from] FsError),
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error("cannot encode output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read input: {0}")]
    Io(#[from] std::io::Error),
}

fn init_tracing(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn run_tree(data_dir: PathBuf, op: TreeOp) -> Result<String, CliError> {
    let mut store = TreeStore::open(explorer_tree(), Box::new(FileSnapshotStore::new(data_dir)), SNAPSHOT_KEY);

    let output = match op {
        TreeOp::Show => to_json(store.file_system())?,
        TreeOp::Get { id } => match store.get(&id) {
            Some(node) => to_json(node)?,
            None => return Err(FsError::NotFound { id }.into()),
        },
        TreeOp::Parent { id } => {
            if !store.contains(&id) {
                return Err(FsError::NotFound { id }.into());
            }
            to_json(&store.parent_of(&id))?
        }
        TreeOp::Search { query } => to_json(&store.search(&query))?,
        TreeOp::Stats => to_json(&store.statistics())?,
        TreeOp::Mkdir { parent, name } => to_json(&store.create_directory(&parent, &name)?)?,
        TreeOp::Touch { parent, name, content } => {
            to_json(&store.create_file(&parent, &name, content.as_deref().unwrap_or(""))?)?
        }
        TreeOp::Rename { id, name } => to_json(&store.rename(&id, &name)?)?,
        TreeOp::Edit { id, content } => to_json(&store.edit_content(&id, &content)?)?,
        TreeOp::Rm { id } => to_json(&store.delete(&id)?)?,
        TreeOp::Mv { id, dest } => to_json(&store.move_node(&id, &dest)?)?,
        TreeOp::Cp { id, dest } => to_json(&store.copy_node(&id, &dest)?)?,
        TreeOp::Reset => to_json(store.reset())?,
    };

    // The mutation itself succeeded; a failed save is reported, not fatal
    if let Some(err) = store.last_persist_error() {
        eprintln!("vfs-shell: warning: {}", err);
    }
    Ok(output)
}

fn write_result(stdout: &str, stderr: &str) {
    if !stdout.is_empty() {
        print!("{}", stdout);
    }
    if !stderr.is_empty() {
        eprint!("{}", stderr);
    }
    std::io::stdout().flush().ok();
}

fn handle_event(event: Option<HostEvent>) {
    if event == Some(HostEvent::ClearScreen) {
        print!("{}", CLEAR_SCREEN);
    }
}

/// Run every line in order, waiting for deferred output before the next one.
async fn run_script(session: &mut ShellSession, script: &str, json: bool) -> Result<i32, CliError> {
    let mut stdout = String::new();
    let mut stderr = String::new();
    let mut exit_code = 0;

    for line in script.lines() {
        let result: CommandResult = session.execute(line).await.settle().await;
        stdout.push_str(&result.stdout);
        stderr.push_str(&result.stderr);
        exit_code = result.exit_code;
        if result.event == Some(HostEvent::Exit) {
            break;
        }
    }

    if json {
        println!("{}", serde_json::json!({
            "stdout": stdout,
            "stderr": stderr,
            "exitCode": exit_code,
        }));
    } else {
        write_result(&stdout, &stderr);
    }
    Ok(exit_code)
}

/// Interactive loop. Deferred output is printed when it settles, followed by
/// a fresh prompt; input keeps being accepted meanwhile.
async fn repl(mut session: ShellSession) -> Result<i32, CliError> {
    let (prompt_tx, prompt_rx) = watch::channel(session.prompt());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Welcome to vfs-shell. Type 'help' for a list of commands.");
    write_result(&prompt_rx.borrow(), "");

    while let Some(line) = lines.next_line().await? {
        let CommandResult { stdout, stderr, event, deferred, .. } = session.execute(&line).await;
        handle_event(event);
        write_result(&stdout, &stderr);
        if event == Some(HostEvent::Exit) {
            break;
        }

        prompt_tx.send_replace(session.prompt());
        match deferred {
            Some(deferred) => {
                let prompt_rx = prompt_rx.clone();
                tokio::spawn(async move {
                    let later = deferred.wait().await;
                    write_result(&later.stdout, &later.stderr);
                    write_result(&prompt_rx.borrow(), "");
                });
            }
            None => write_result(&prompt_rx.borrow(), ""),
        }
    }

    Ok(0)
}

async fn run_shell(cli: Cli) -> Result<i32, CliError> {
    let fetch_fn = create_http_fetch_fn(NetworkConfig {
        timeout_ms: cli.timeout_ms,
        ..Default::default()
    })?;

    let mut session = ShellSession::new(SessionOptions {
        cwd: cli.cwd,
        fetch_fn: Some(fetch_fn),
        ..Default::default()
    });

    if let Some(script) = cli.script {
        return run_script(&mut session, &script, cli.json).await;
    }

    if std::io::stdin().is_terminal() {
        info!("starting interactive shell");
        return repl(session).await;
    }

    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    run_script(&mut session, &buf, cli.json).await
}

#[tokio::main]
async fn main() {
    let mut cli = Cli::parse();
    init_tracing(&cli.log_level);

    let outcome = match cli.command.take() {
        Some(Commands::Tree { data_dir, op }) => run_tree(data_dir, op).map(|output| {
            println!("{}", output);
            0
        }),
        None => run_shell(cli).await,
    };

    match outcome {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("vfs-shell: {}", e);
            std::process::exit(1);
        }
    }
}
