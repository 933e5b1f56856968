use bytes::Bytes;
use tracing::{debug, warn};

/// Best-effort plain text of an uploaded resume, used to seed `parsed.text`.
/// Only `.txt` and `.pdf` are read; anything else, or a failed read, yields `None`.
pub async fn extract_text(extension: &str, bytes: Bytes) -> Option<String> {
    let text = match extension {
        "txt" => String::from_utf8_lossy(&bytes).into_owned(),
        "pdf" => {
            let extracted =
                tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                    .await;
            match extracted {
                Ok(Ok(text)) => text,
                Ok(Err(e)) => {
                    warn!("PDF text extraction failed: {e}");
                    return None;
                }
                Err(e) => {
                    warn!("PDF text extraction task aborted: {e}");
                    return None;
                }
            }
        }
        other => {
            debug!("No text extractor for .{other} resumes");
            return None;
        }
    };

    let text = normalize_whitespace(&text);
    (!text.is_empty()).then_some(text)
}

/// Collapses runs of whitespace to single spaces.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
