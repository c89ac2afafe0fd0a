//! Upload checks and image decoding, run before the core ever sees pixels.

use tracing::debug;

use crate::error::LoadError;
use crate::pixels::PixelBuffer;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Reject oversized or non-image uploads.
///
/// When the caller knows the MIME type it must start with `image/`;
/// otherwise the format is sniffed from the leading bytes.
pub fn validate_upload(bytes: &[u8], mime: Option<&str>) -> Result<(), LoadError> {
    match mime {
        Some(m) if !m.starts_with("image/") => return Err(LoadError::NotAnImage),
        Some(_) => {}
        None => {
            image::guess_format(bytes).map_err(|_| LoadError::NotAnImage)?;
        }
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(LoadError::TooLarge {
            size: bytes.len(),
            max: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

pub fn decode_pixels(bytes: &[u8]) -> Result<PixelBuffer, LoadError> {
    let img = image::load_from_memory(bytes)?;
    debug!(width = img.width(), height = img.height(), "decoded image");
    Ok(PixelBuffer::from_image(&img))
}

/// Validate then decode.
pub fn load_upload(bytes: &[u8], mime: Option<&str>) -> Result<PixelBuffer, LoadError> {
    validate_upload(bytes, mime)?;
    decode_pixels(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, Rgba(px));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn rejects_non_image_mime() {
        let bytes = png(1, 1, [0, 0, 0, 255]);
        assert!(matches!(
            validate_upload(&bytes, Some("text/plain")),
            Err(LoadError::NotAnImage)
        ));
        assert!(validate_upload(&bytes, Some("image/png")).is_ok());
    }

    #[test]
    fn sniffs_format_without_mime() {
        assert!(validate_upload(&png(1, 1, [0, 0, 0, 255]), None).is_ok());
        assert!(matches!(
            validate_upload(b"hello world", None),
            Err(LoadError::NotAnImage)
        ));
    }

    #[test]
    fn rejects_oversized() {
        let bytes = vec![0u8; MAX_UPLOAD_BYTES + 1];
        assert!(matches!(
            validate_upload(&bytes, Some("image/png")),
            Err(LoadError::TooLarge { .. })
        ));
    }

    #[test]
    fn decodes_png_to_pixels() {
        let buf = load_upload(&png(3, 2, [12, 34, 56, 255]), Some("image/png")).unwrap();
        assert_eq!(buf.len(), 6);
        assert!(buf.as_slice().iter().all(|c| c.to_tuple() == (12, 34, 56)));
    }

    #[test]
    fn garbage_with_image_mime_fails_decode() {
        assert!(matches!(
            load_upload(b"not really a png", Some("image/png")),
            Err(LoadError::Decode(_))
        ));
    }
}
