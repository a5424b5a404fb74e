use serde_json::Value;

use crate::cli::client::ApiReply;
use crate::cli::OutputFormat;

/// Print an API reply; non-success statuses become an error
pub fn output_response(
    output_format: OutputFormat,
    reply: &ApiReply,
    summary: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reply.body)?);
        }
        OutputFormat::Text if reply.is_success() => {
            println!("✓ {}", summary);
        }
        OutputFormat::Text => {}
    }

    if !reply.is_success() {
        anyhow::bail!("{} ({})", reply.error_message(), reply.status);
    }
    Ok(())
}

pub fn describe_settings(base_id: &str, body: &Value) -> String {
    let settings = &body["settings"];
    let enabled = settings["auto_sync_enabled"].as_bool().unwrap_or(false);
    match settings["auto_sync_interval_minutes"].as_i64() {
        Some(minutes) if enabled => format!("{}: auto-sync every {} minutes", base_id, minutes),
        None if enabled => format!("{}: auto-sync enabled, no interval set", base_id),
        _ => format!("{}: auto-sync disabled", base_id),
    }
}
