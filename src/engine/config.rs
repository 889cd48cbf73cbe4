//! Host-supplied configuration, parsed from a JSON string.

use serde::{Deserialize, Serialize};

/// Mount-time configuration. Every field has a default so the host can
/// pass a partial object, or nothing at all. Element ids are looked up
/// lazily and missing ones just skip their side effect.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackdropConfig {
    /// Canvas element id the backdrop paints into.
    pub canvas_id: String,
    /// Element whose bounding rect is excluded from rendering.
    pub mask_id: Option<String>,
    /// Text nodes for the stats display.
    pub population_id: Option<String>,
    pub generation_id: Option<String>,
    pub zoom_id: Option<String>,
    /// Simulation rate ceiling, clamped to [1, 60].
    pub target_fps: u32,
    /// Initial alive probability per cell, clamped to [0, 1].
    pub density: f32,
    pub live_color: String,
    pub background_color: String,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            canvas_id: "life-backdrop".to_string(),
            mask_id: None,
            population_id: None,
            generation_id: None,
            zoom_id: None,
            target_fps: 10,
            density: 0.25,
            live_color: "#233041".to_string(),
            background_color: "#0d1117".to_string(),
        }
    }
}

impl BackdropConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid backdrop config: {e}"))
    }
}
