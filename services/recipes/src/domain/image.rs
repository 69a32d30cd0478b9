//! Data-URI image payloads (`data:image/<ext>;base64,<payload>`).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::domain::types::DecodedImage;
use crate::error::RecipesServiceError;

const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpeg", "jpg", "gif", "webp"];

pub fn decode_data_uri(uri: &str) -> Result<DecodedImage, RecipesServiceError> {
    let rest = uri
        .trim()
        .strip_prefix("data:image/")
        .ok_or(RecipesServiceError::InvalidImage)?;
    let (extension, payload) = rest
        .split_once(";base64,")
        .ok_or(RecipesServiceError::InvalidImage)?;

    let extension = extension.to_ascii_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(RecipesServiceError::InvalidImage);
    }

    let bytes = STANDARD
        .decode(payload)
        .map_err(|_| RecipesServiceError::InvalidImage)?;
    if bytes.is_empty() {
        return Err(RecipesServiceError::InvalidImage);
    }
    Ok(DecodedImage { bytes, extension })
}
