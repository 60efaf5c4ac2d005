//! Caption font discovery.

use std::path::Path;

use crate::EngineError;

/// Load TTF/OTF bytes for caption rendering.
///
/// An explicit `custom_path` wins; otherwise the per-OS candidate list is
/// probed in order. Bold faces come first since captions render bold.
pub fn load_label_font_data(custom_path: Option<&Path>) -> Result<Vec<u8>, EngineError> {
    if let Some(path) = custom_path {
        return std::fs::read(path).map_err(|e| EngineError::FontRead {
            path: path.display().to_string(),
            source: e,
        });
    }

    for path in system_font_candidates() {
        if let Ok(data) = std::fs::read(path) {
            tracing::debug!(path = %path, "Using system font for QR captions");
            return Ok(data);
        }
    }
    Err(EngineError::FontNotFound)
}

fn system_font_candidates() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &[
            "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/System/Library/Fonts/Supplemental/Helvetica.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
        ]
    }
    #[cfg(target_os = "windows")]
    {
        &[
            "C:\\Windows\\Fonts\\arialbd.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
            "C:\\Windows\\Fonts\\segoeui.ttf",
        ]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        ]
    }
}
