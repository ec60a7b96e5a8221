use serde::{Deserialize, Serialize};

/// Inline speech-bubble glyph rendered inside the launcher icon.
pub const ICON_GLYPH_SVG: &str = concat!(
    r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="white">"#,
    r#"<path d="M20 2H4c-1.1 0-2 .9-2 2v18l4-4h14c1.1 0 2-.9 2-2V4c0-1.1-.9-2-2-2z"></path>"#,
    "</svg>"
);

pub const DEFAULT_ICON_SIZE_PX: u32 = 60;
pub const DEFAULT_ICON_MARGIN_PX: u32 = 20;
pub const DEFAULT_ICON_Z_INDEX: i32 = 1000;
pub const DEFAULT_ICON_BACKGROUND: &str = "#4a90e2";

/// Scale applied right after the icon is attached.
pub const ENTRANCE_START_SCALE: f32 = 0.0;
/// Scale the deferred entrance task settles on.
pub const ENTRANCE_END_SCALE: f32 = 1.0;

/// Visual parameters of the launcher icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconStyle {
    pub size_px: u32,
    pub margin_px: u32,
    pub z_index: i32,
    pub background: String,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            size_px: DEFAULT_ICON_SIZE_PX,
            margin_px: DEFAULT_ICON_MARGIN_PX,
            z_index: DEFAULT_ICON_Z_INDEX,
            background: DEFAULT_ICON_BACKGROUND.to_string(),
        }
    }
}

impl IconStyle {
    /// Inline CSS properties for the icon, in application order.
    #[must_use]
    pub fn css_properties(&self) -> Vec<(&'static str, String)> {
        let size = format!("{}px", self.size_px);
        let margin = format!("{}px", self.margin_px);
        vec![
            ("position", "fixed".to_string()),
            ("bottom", margin.clone()),
            ("right", margin),
            ("width", size.clone()),
            ("height", size),
            ("background-color", self.background.clone()),
            ("border-radius", "50%".to_string()),
            ("cursor", "pointer".to_string()),
            ("box-shadow", "0 2px 10px rgba(0,0,0,0.2)".to_string()),
            ("display", "flex".to_string()),
            ("align-items", "center".to_string()),
            ("justify-content", "center".to_string()),
            ("z-index", self.z_index.to_string()),
            ("transition", "transform 0.3s ease".to_string()),
        ]
    }
}

/// CSS `transform` value for a uniform scale.
#[must_use]
pub fn scale_transform(scale: f32) -> String {
    format!("scale({scale})")
}
