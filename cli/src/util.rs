use std::io::Read;

use serde_json::json;
use toxscore_core::error::exit;

/// Print a structured error to stderr.
pub fn print_error(error: &str, message: &str, docs_hint: Option<&str>) {
    let mut err = json!({
        "error": error,
        "message": message
    });
    if let Some(hint) = docs_hint {
        err["docs_hint"] = json!(hint);
    }
    eprintln!("{}", to_pretty(&err));
}

pub fn exit_error(message: &str, docs_hint: Option<&str>) -> ! {
    print_error("cli_error", message, docs_hint);
    std::process::exit(exit::USAGE_ERROR);
}

pub fn to_pretty(value: &impl serde::Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}

/// Read text from a file path or stdin (when path is "-").
pub fn read_text_from_file(path: &str) -> Result<String, String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {e}"))?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read file '{path}': {e}"))
}
