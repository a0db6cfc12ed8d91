use base64::{Engine, engine::general_purpose::STANDARD};

use crate::domain::types::ImageUpload;

const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Decode a `data:image/<ext>;base64,<payload>` string.
///
/// Returns `None` for anything that is not a base64 image of a known type.
pub fn parse_data_uri(value: &str) -> Option<ImageUpload> {
    let rest = value.trim().strip_prefix("data:image/")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    let extension = mime.to_ascii_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return None;
    }
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    if bytes.is_empty() {
        return None;
    }
    let extension = if extension == "jpeg" {
        "jpg".to_owned()
    } else {
        extension
    };
    Some(ImageUpload { extension, bytes })
}
