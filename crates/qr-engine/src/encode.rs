//! PNG encoding.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

use crate::EngineError;

/// Encode an image as PNG bytes.
pub fn to_png_bytes(image: &DynamicImage) -> Result<Vec<u8>, EngineError> {
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, ImageFormat::Png)?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn png_bytes_carry_the_png_signature() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));
        let bytes = to_png_bytes(&img).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n']);
    }
}
