//! QR code rendering with the generator's fixed configuration.

use image::{DynamicImage, GrayImage, Luma};
use qrcode::{EcLevel, QrCode};

use crate::EngineError;

/// Target edge length of a rendered QR code in pixels.
pub const QR_TARGET_WIDTH: u32 = 150;

/// Quiet-zone margin around the code, in modules.
pub const QR_MARGIN_MODULES: u32 = 2;

/// Render `payload` as a black-on-white grayscale QR image.
///
/// Uses error-correction level L and draws modules at the largest integer
/// scale that keeps the image within [`QR_TARGET_WIDTH`]. The quiet zone is
/// part of the rendered image, so the edge length covers
/// `modules + 2 * QR_MARGIN_MODULES` cells.
pub fn render_qr(payload: &str) -> Result<DynamicImage, EngineError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::L)
        .map_err(|e| EngineError::QrEncode(e.to_string()))?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;
    let total_modules = module_count + 2 * QR_MARGIN_MODULES;

    let scale = (QR_TARGET_WIDTH / total_modules).max(1);
    let img_size = total_modules * scale;

    let mut img = GrayImage::from_pixel(img_size, img_size, Luma([255u8]));

    for (i, color) in modules.iter().enumerate() {
        if *color != qrcode::Color::Dark {
            continue;
        }
        let x = (i as u32 % module_count + QR_MARGIN_MODULES) * scale;
        let y = (i as u32 / module_count + QR_MARGIN_MODULES) * scale;
        for dx in 0..scale {
            for dy in 0..scale {
                img.put_pixel(x + dx, y + dy, Luma([0u8]));
            }
        }
    }

    Ok(DynamicImage::ImageLuma8(img))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_qr_produces_square_image() {
        let img = render_qr(r#"{"Dom":"DSQRASSET","ID":"AB00"}"#).unwrap();
        assert!(img.width() > 0);
        assert_eq!(img.width(), img.height());
        assert!(img.width() <= QR_TARGET_WIDTH);
    }

    #[test]
    fn render_qr_is_deterministic() {
        let payload = r#"{"Dom":"DSQRASSET","ID":"ZZFF"}"#;
        let a = render_qr(payload).unwrap();
        let b = render_qr(payload).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn render_qr_keeps_quiet_zone_white() {
        let img = render_qr("test").unwrap().to_luma8();
        // The margin rows and columns must stay blank.
        for x in 0..img.width() {
            assert_eq!(img.get_pixel(x, 0), &Luma([255u8]));
        }
        for y in 0..img.height() {
            assert_eq!(img.get_pixel(0, y), &Luma([255u8]));
        }
        // The body must contain dark modules.
        assert!(img.pixels().any(|p| p[0] == 0));
    }

    #[test]
    fn render_qr_rejects_oversized_payload() {
        let payload = "x".repeat(8000);
        assert!(matches!(
            render_qr(&payload),
            Err(EngineError::QrEncode(_))
        ));
    }
}
