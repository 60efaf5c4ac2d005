//! Caption compositing below a rendered QR code.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

use crate::EngineError;

/// Caption font size in pixels.
pub const LABEL_FONT_SIZE: u32 = 16;

/// Gap between the bottom of the QR code and the caption.
pub const LABEL_PADDING: u32 = 5;

/// Extra whitespace below the caption.
pub const LABEL_EXTRA_PADDING: u32 = 5;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Output height of a labeled image over a QR code of `qr_height` pixels.
pub fn labeled_height(qr_height: u32) -> u32 {
    qr_height + LABEL_FONT_SIZE + LABEL_PADDING + LABEL_EXTRA_PADDING
}

/// Draw `label` centered below `qr` on a white canvas.
///
/// The canvas keeps the QR width and grows by [`labeled_height`]'s caption
/// block. The caption top edge sits at `qr_height + LABEL_PADDING - 5`.
pub fn compose_labeled(
    qr: &DynamicImage,
    label: &str,
    font_data: &[u8],
) -> Result<DynamicImage, EngineError> {
    let font = FontRef::try_from_slice(font_data).map_err(|_| EngineError::FontParse)?;
    let scale = PxScale::from(LABEL_FONT_SIZE as f32);

    let width = qr.width();
    let height = labeled_height(qr.height());
    let mut canvas = RgbaImage::from_pixel(width, height, WHITE);

    copy_onto(&mut canvas, qr, 0, 0);

    let caption_y = (qr.height() + LABEL_PADDING) as i32 - 5;
    draw_centered_text(&mut canvas, &font, scale, caption_y, label, BLACK);

    Ok(DynamicImage::ImageRgba8(canvas))
}

/// Copy `src` onto `dst` at the given position, clipping at the edges.
fn copy_onto(dst: &mut RgbaImage, src: &DynamicImage, x: u32, y: u32) {
    let rgba = src.to_rgba8();
    for (dx, dy, pixel) in rgba.enumerate_pixels() {
        if x + dx < dst.width() && y + dy < dst.height() {
            dst.put_pixel(x + dx, y + dy, *pixel);
        }
    }
}

/// Measure the pixel width of `text` at the given scale, kerning included.
pub fn measure_text_width(font: &FontRef<'_>, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil() as u32
}

/// Draw horizontally centered text with its top edge at `y`.
fn draw_centered_text(
    img: &mut RgbaImage,
    font: &FontRef<'_>,
    scale: PxScale,
    y: i32,
    text: &str,
    color: Rgba<u8>,
) {
    let text_width = measure_text_width(font, scale, text) as i32;
    let x = ((img.width() as i32) - text_width).max(0) / 2;
    draw_text_mut(img, color, x, y, scale, font, text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{font, qr};

    #[test]
    fn labeled_height_adds_caption_block() {
        assert_eq!(labeled_height(150), 176);
        assert_eq!(
            labeled_height(0),
            LABEL_FONT_SIZE + LABEL_PADDING + LABEL_EXTRA_PADDING
        );
    }

    #[test]
    fn copy_onto_clips_at_edges() {
        let mut dst = RgbaImage::from_pixel(20, 20, WHITE);
        let src = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, BLACK));
        copy_onto(&mut dst, &src, 15, 15);
        assert_eq!(dst.get_pixel(19, 19), &BLACK);
        assert_eq!(dst.get_pixel(10, 10), &WHITE);
    }

    #[test]
    fn labeled_output_keeps_width_and_grows_by_caption_block() {
        // Requires a system font; environments without one skip the body.
        let Ok(font_data) = font::load_label_font_data(None) else {
            return;
        };
        let qr = qr::render_qr(r#"{"Dom":"DSQRASSET","ID":"AB00"}"#).unwrap();
        let labeled = compose_labeled(&qr, "AB00", &font_data).unwrap();
        assert_eq!(labeled.width(), qr.width());
        assert_eq!(labeled.height(), qr.height() + 26);
    }

    #[test]
    fn compose_labeled_rejects_bad_font_data() {
        let qr = qr::render_qr("test").unwrap();
        let result = compose_labeled(&qr, "AB00", b"not a font");
        assert!(matches!(result, Err(EngineError::FontParse)));
    }
}
