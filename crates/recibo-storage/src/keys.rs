//! Shared key generation for blob storage backends.
//!
//! Key format: `receipts/{uuid}_{sanitized_filename}`.

use uuid::Uuid;

/// Generate a storage key for an uploaded file.
///
/// A fresh UUID prefix makes the key unique regardless of the original name;
/// the sanitized name is kept as a suffix so keys stay recognizable in
/// listings. All backends must use this format for consistency.
pub fn generate_blob_key(filename: &str) -> String {
    format!("receipts/{}_{}", Uuid::new_v4(), sanitize_filename(filename))
}

/// Keep only characters that are safe in a storage key; everything else
/// becomes an underscore.
fn sanitize_filename(filename: &str) -> String {
    let mut sanitized: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    // ".." never survives; keys containing it are rejected by every backend
    while sanitized.contains("..") {
        sanitized = sanitized.replace("..", "_");
    }

    if sanitized.is_empty() {
        "unnamed".to_string()
    } else {
        sanitized
    }
}
