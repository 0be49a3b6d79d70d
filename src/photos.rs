/// Photo decoding helpers
///
/// Turns raw photo bytes (picked from disk or fetched from the service)
/// into iced image handles. Card thumbnails are downscaled up front so a
/// grid of large phone photos does not hold full-size decodes in memory.

use iced::widget::image::Handle;
use image::imageops::FilterType;
use log::debug;

/// Bounding size of card and preview thumbnails (square)
pub const THUMBNAIL_SIZE: u32 = 256;

/// Decode photo bytes and downscale them into a thumbnail handle.
/// Returns None when the bytes are not a decodable image.
pub fn thumbnail(bytes: &[u8]) -> Option<Handle> {
    let decoded = match image::load_from_memory(bytes) {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!("could not decode photo ({} bytes): {}", bytes.len(), e);
            return None;
        }
    };

    let scaled = decoded.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3);
    let rgba = scaled.to_rgba8();
    let (width, height) = rgba.dimensions();
    Some(Handle::from_rgba(width, height, rgba.into_raw()))
}

/// Full-size handle for the detail view; iced decodes these lazily.
pub fn full_size(bytes: Vec<u8>) -> Handle {
    Handle::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::new_rgba8(width, height);
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_thumbnail_decodes_valid_images() {
        assert!(thumbnail(&png_bytes(640, 480)).is_some());
    }

    #[test]
    fn test_thumbnail_rejects_garbage_bytes() {
        assert!(thumbnail(&[0xde, 0xad, 0xbe, 0xef]).is_none());
    }
}
