use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::utils::error::{AppError, AppResult};

/// Reads an image file and embeds it as a `data:` URL suitable for `imageUrl`.
pub async fn data_url_from_file(path: impl AsRef<Path>) -> AppResult<String> {
    let path = path.as_ref();
    let mime = mime_for(path).ok_or_else(|| {
        AppError::ValidationError(format!(
            "'{}' is not a supported image type",
            path.display()
        ))
    })?;

    let bytes = tokio::fs::read(path).await?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Embedded image");
    Ok(data_url(mime, &bytes))
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => return None,
    };
    Some(mime)
}
