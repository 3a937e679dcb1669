use std::path::Path;

use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flow_core::entities::Attachment;

/// Read a whole input file.
pub async fn read_input(path: &str) -> anyhow::Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {path}"))
}

/// Write an output file, creating parent directories.
pub async fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}

/// MIME type guessed from the file extension.
#[must_use]
pub fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// Load a file as a base64 attachment.
pub async fn read_attachment(path: &str) -> anyhow::Result<Attachment> {
    let bytes = read_input(path).await?;
    let path = Path::new(path);
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("attachment path has no file name")?
        .to_string();
    Ok(Attachment {
        name,
        mime_type: mime_type(path).to_string(),
        data: STANDARD.encode(bytes),
    })
}
