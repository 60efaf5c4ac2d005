//! QR rendering and caption compositing for asset label images.
//!
//! Produces fixed-configuration QR codes (error-correction level L,
//! 2-module margin, 150px target width, black on white) and optionally
//! composites a centered caption below the code before PNG encoding.

pub mod encode;
pub mod font;
pub mod label;
pub mod qr;

// Re-exports for convenience
pub use encode::to_png_bytes;
pub use font::load_label_font_data;
pub use label::{compose_labeled, labeled_height};
pub use qr::render_qr;

/// Errors that can occur while rendering or compositing images.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("QR encode error: {0}")]
    QrEncode(String),

    #[error("failed to parse caption font data (TTF/OTF)")]
    FontParse,

    #[error("failed to read caption font {path}: {source}")]
    FontRead {
        path: String,
        source: std::io::Error,
    },

    #[error("no usable caption font found (set QR_LABEL_FONT or install system fonts)")]
    FontNotFound,

    #[error("PNG encode error: {0}")]
    PngEncode(#[from] image::ImageError),
}
