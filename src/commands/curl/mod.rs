//! curl - Transfer data from or to a server
//!
//! The request summary is printed right away; status, headers and body
//! arrive as deferred output once the response settles.

pub mod types;
pub mod parse;
pub mod response_formatting;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;
use crate::commands::{Command, CommandContext, CommandResult, DeferredOutput, FetchResponse};
use crate::network::HttpMethod;
use crate::shell::ShellError;
use self::parse::parse_options;
use self::response_formatting::{default_status_text, format_body, format_headers};
use self::types::CurlOptions;

pub struct CurlCommand;

const HELP: &str = "Usage: curl URL [OPTIONS]\n\n\
Send an HTTP request and show the response. Also available as http and fetch.\n\n\
Options:\n\
  -X, --request METHOD      request method (GET, POST, ...)\n\
  -H, --header \"K: V\"       add a request header\n\
  -d, --data DATA           send form data (implies POST)\n\
      --json DATA           send a JSON body (implies POST)\n\
  -T, --upload-file FILE    send a virtual file as the body (implies PUT)\n\
  -u, --user USER:PASS      basic authentication\n\
  -A, --user-agent NAME     set the User-Agent header\n\
  -s, --silent              do not print the request summary\n\
      --help                display this help and exit\n";

/// Add `https://` when the URL names no scheme
fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Request headers from options, including auth
fn prepare_headers(options: &CurlOptions) -> Vec<(String, String)> {
    let mut prepared = options.clone();
    if let Some(ref user) = options.user {
        let encoded = STANDARD.encode(user.as_bytes());
        prepared.set_header("Authorization", &format!("Basic {}", encoded));
    }
    prepared.headers
}

/// What is printed before the request goes out
fn request_summary(url: &str, method: &str, headers: &[(String, String)], body: Option<&str>) -> String {
    let mut output = format!("Sending request to {}...\n", url);
    output.push_str(&format!("Method: {}\n", method));
    if !headers.is_empty() {
        output.push_str("Headers:\n");
        output.push_str(&format_headers(headers));
    }
    if let Some(body) = body.filter(|b| !b.is_empty()) {
        output.push_str("Request body:\n");
        output.push_str(&format!("  {}\n", body));
    }
    output
}

/// Build output string from response
fn build_output(response: &FetchResponse) -> String {
    let status_text = if response.status_text.is_empty() {
        default_status_text(response.status)
    } else {
        response.status_text.as_str()
    };

    let mut output = format!("Status: {} {}\n", response.status, status_text);
    output.push_str("Response headers:\n");
    output.push_str(&format_headers(&response.headers));
    output.push_str("Response body:\n");
    output.push_str(&format_body(&response.body));
    if !output.ends_with('\n') {
        output.push('\n');
    }
    output
}

#[async_trait]
impl Command for CurlCommand {
    fn name(&self) -> &'static str {
        "curl"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["http", "fetch"]
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(HELP.to_string());
        }

        // Parse options
        let mut options = match parse_options(&ctx.args) {
            Ok(opts) => opts,
            Err(e) => {
                return CommandResult::with_exit_code(String::new(), format!("{}\n", e), 2);
            }
        };

        // Check for URL
        let url = match options.url {
            Some(ref u) => normalize_url(u),
            None => {
                return CommandResult::with_exit_code(
                    String::new(),
                    "curl: no URL specified\n".to_string(),
                    2,
                );
            }
        };

        let method = match options.method.parse::<HttpMethod>() {
            Ok(m) => m,
            Err(e) => {
                return CommandResult::with_exit_code(String::new(), format!("curl: {}\n", e), 2);
            }
        };

        // Handle -T/--upload-file
        if let Some(ref upload_file) = options.upload_file {
            let content = match ctx.state.resolve(upload_file) {
                Ok(resolved) => match resolved.node.content() {
                    Some(c) => c.to_string(),
                    None => {
                        let err = ShellError::IsADirectory { path: upload_file.clone() };
                        return CommandResult::with_exit_code(String::new(), format!("curl: (26) {}\n", err), 26);
                    }
                },
                Err(err) => {
                    return CommandResult::with_exit_code(String::new(), format!("curl: (26) {}\n", err), 26);
                }
            };
            options.data = Some(content);
        }

        // Check for fetch_fn
        let fetch_fn = match ctx.fetch_fn {
            Some(ref f) => f.clone(),
            None => {
                return CommandResult::with_exit_code(
                    String::new(),
                    "curl: (6) Could not resolve host (network not available)\n".to_string(),
                    6,
                );
            }
        };

        let headers = prepare_headers(&options);
        let body = options.data.clone();
        let summary = if options.silent {
            String::new()
        } else {
            request_summary(&url, method.as_str(), &headers, body.as_deref())
        };

        debug!(%method, %url, headers = headers.len(), "curl request");

        // The deferred part owns only request data
        let deferred = DeferredOutput::new(async move {
            match fetch_fn(url, method.to_string(), headers, body).await {
                Ok(response) => CommandResult::success(build_output(&response)),
                Err(message) => {
                    CommandResult::with_exit_code(String::new(), format!("Error: {}\n", message), 7)
                }
            }
        });

        CommandResult::success(summary).with_deferred(deferred)
    }
}
