use anyhow::{Context, Result, bail};
use colored::Colorize;
use credscope_core::RecordsApi;

use crate::cli::UploadArgs;

/// Post a log file to the backend's bulk import endpoint.
pub async fn execute(api: &dyn RecordsApi, args: &UploadArgs) -> Result<()> {
    let file_name = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string);
    let Some(file_name) = file_name else {
        bail!("invalid file name: {}", args.file.display());
    };

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    if bytes.is_empty() {
        bail!("{} is empty", args.file.display());
    }

    println!(
        "Uploading {} ({} bytes)...",
        file_name.bold(),
        bytes.len()
    );
    tracing::info!(file = %file_name, size = bytes.len(), "starting upload");

    let ack = api
        .upload(&file_name, bytes, &args.filter)
        .await
        .context("upload failed")?;

    if ack.is_empty() {
        println!("{} Upload accepted", "✓".green());
    } else {
        println!("{} {}", "✓".green(), ack);
    }
    Ok(())
}
