/// Option parsing for curl command

use super::types::CurlOptions;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const JSON_CONTENT_TYPE: &str = "application/json";

fn set_post_if_get(options: &mut CurlOptions) {
    if options.method == "GET" {
        options.method = "POST".to_string();
    }
}

/// `Name: Value`; the value may itself contain colons. Malformed headers are ignored.
fn parse_header_str(header: &str, options: &mut CurlOptions) {
    if let Some(colon_idx) = header.find(':') {
        let name = header[..colon_idx].trim();
        if !name.is_empty() {
            options.set_header(name, header[colon_idx + 1..].trim());
        }
    }
}

fn accumulate_data(options: &mut CurlOptions, new_data: &str) {
    if let Some(ref existing) = options.data {
        options.data = Some(format!("{}&{}", existing, new_data));
    } else {
        options.data = Some(new_data.to_string());
    }
}

fn add_form_data(options: &mut CurlOptions, data: &str) {
    accumulate_data(options, data);
    if options.header("Content-Type").is_none() {
        options.set_header("Content-Type", FORM_CONTENT_TYPE);
    }
    set_post_if_get(options);
}

fn add_json_data(options: &mut CurlOptions, data: &str) {
    options.data = Some(data.to_string());
    options.set_header("Content-Type", JSON_CONTENT_TYPE);
    set_post_if_get(options);
}

fn required<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("curl: option {}: requires an argument", flag))
}

/// Parse curl command-line arguments
pub fn parse_options(args: &[String]) -> Result<CurlOptions, String> {
    let mut options = CurlOptions::default();
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_str();

        if arg == "-X" || arg == "--request" {
            i += 1;
            options.method = required(args, i, arg)?.to_uppercase();
        } else if arg.starts_with("-X") && arg.len() > 2 {
            options.method = arg[2..].to_uppercase();
        } else if let Some(val) = arg.strip_prefix("--request=") {
            options.method = val.to_uppercase();
        } else if arg == "-H" || arg == "--header" {
            i += 1;
            parse_header_str(required(args, i, arg)?, &mut options);
        } else if let Some(val) = arg.strip_prefix("--header=") {
            parse_header_str(val, &mut options);
        } else if arg == "-d" || arg == "--data" || arg == "--data-raw" {
            i += 1;
            add_form_data(&mut options, required(args, i, arg)?);
        } else if arg.starts_with("-d") && arg.len() > 2 {
            add_form_data(&mut options, &arg[2..]);
        } else if let Some(val) = arg.strip_prefix("--data=") {
            add_form_data(&mut options, val);
        } else if arg == "--json" {
            i += 1;
            add_json_data(&mut options, required(args, i, arg)?);
        } else if let Some(val) = arg.strip_prefix("--json=") {
            add_json_data(&mut options, val);
        } else if arg == "-T" || arg == "--upload-file" {
            i += 1;
            options.upload_file = Some(required(args, i, arg)?.to_string());
            if options.method == "GET" {
                options.method = "PUT".to_string();
            }
        } else if arg == "-u" || arg == "--user" {
            i += 1;
            options.user = Some(required(args, i, arg)?.to_string());
        } else if arg.starts_with("-u") && arg.len() > 2 {
            options.user = Some(arg[2..].to_string());
        } else if let Some(val) = arg.strip_prefix("--user=") {
            options.user = Some(val.to_string());
        } else if arg == "-A" || arg == "--user-agent" {
            i += 1;
            options.set_header("User-Agent", required(args, i, arg)?);
        } else if arg == "-s" || arg == "--silent" {
            options.silent = true;
        } else if arg.starts_with("--") {
            return Err(format!("curl: unknown option: {}", arg));
        } else if arg.starts_with('-') && arg.len() > 1 {
            return Err(format!("curl: unknown option: {}", arg));
        } else {
            options.url = Some(arg.to_string());
        }

        i += 1;
    }

    Ok(options)
}
