use std::io::Cursor;

use ::image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};

use crate::domain::ai::model::InlineImage;
use crate::utils::errors::ApiError;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const HEIC_BRANDS: [&[u8; 4]; 4] = [b"heic", b"heix", b"hevc", b"hevx"];
const HEIF_BRANDS: [&[u8; 4]; 4] = [b"mif1", b"msf1", b"heim", b"heis"];

/// Phone cameras write HEIC; the model reads it natively so it goes through untouched.
fn heif_mime_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() < 12 || &bytes[4..8] != b"ftyp" {
        return None;
    }
    let brand = &bytes[8..12];
    if HEIC_BRANDS.iter().any(|known| known.as_slice() == brand) {
        Some("image/heic")
    } else if HEIF_BRANDS.iter().any(|known| known.as_slice() == brand) {
        Some("image/heif")
    } else {
        None
    }
}

fn invalid(error: impl std::fmt::Display) -> ApiError {
    ApiError::InvalidData(format!("Unreadable image: {}", error))
}

/// Turns an uploaded photo into what the model receives: raster formats are
/// decoded, rotated upright from their EXIF orientation, flattened to RGB and
/// re-encoded as JPEG.
pub fn prepare_photo(bytes: &[u8]) -> Result<InlineImage, ApiError> {
    if bytes.is_empty() {
        return Err(ApiError::InvalidData("Image upload is empty".to_string()));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::InvalidData("Image is larger than 10 MiB".to_string()));
    }

    if let Some(mime_type) = heif_mime_type(bytes) {
        return Ok(InlineImage { mime_type: mime_type.to_string(), data: bytes.to_vec() });
    }

    let format = ::image::guess_format(bytes).map_err(invalid)?;
    if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP) {
        return Err(ApiError::InvalidData(format!(
            "Unsupported image format {:?}, send JPEG, PNG, WebP or HEIC",
            format
        )));
    }

    let mut decoder = ImageReader::with_format(Cursor::new(bytes), format)
        .into_decoder()
        .map_err(invalid)?;
    let orientation = decoder.orientation().map_err(invalid)?;
    let mut photo = DynamicImage::from_decoder(decoder).map_err(invalid)?;
    photo.apply_orientation(orientation);

    let mut encoded = Vec::new();
    DynamicImage::ImageRgb8(photo.to_rgb8())
        .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Jpeg)
        .map_err(|e| ApiError::InternalServerError(format!("Failed to encode image: {}", e)))?;

    Ok(InlineImage { mime_type: "image/jpeg".to_string(), data: encoded })
}
