// crates/stillkit-core/src/tools.rs
//
// The tool directory shown on the home screen. Adding a tool:
//   1. Add a ToolId variant and a TOOLS entry here
//   2. Create its screen module in stillkit-ui/src/modules/
//   3. Add one dispatch arm in app.rs

/// Stable identity of one tool screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolId {
    TransparentPixel,
    StillToVideo,
    ImageAudioMixer,
}

/// Directory grouping. All shipped tools are media tools; the other
/// categories exist so the registry shape doesn't change when one isn't.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCategory {
    Media,
    Document,
    Dev,
    Utility,
}

impl ToolCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ToolCategory::Media    => "Media",
            ToolCategory::Document => "Documents",
            ToolCategory::Dev      => "Developer",
            ToolCategory::Utility  => "Utilities",
        }
    }
}

/// One home-screen card.
pub struct ToolInfo {
    pub id:          ToolId,
    pub name:        &'static str,
    pub description: &'static str,
    pub glyph:       &'static str,
    pub category:    ToolCategory,
}

/// Directory order is display order.
pub const TOOLS: &[ToolInfo] = &[
    ToolInfo {
        id:          ToolId::TransparentPixel,
        name:        "Transparent Pixel PNG",
        description: "Make one pixel ~1% transparent so uploads stay PNG instead of being recompressed.",
        glyph:       "🖼",
        category:    ToolCategory::Media,
    },
    ToolInfo {
        id:          ToolId::StillToVideo,
        name:        "Image to Video",
        description: "Turn a still image into a 2-second silent MP4 that survives video pipelines.",
        glyph:       "🎞",
        category:    ToolCategory::Media,
    },
    ToolInfo {
        id:          ToolId::ImageAudioMixer,
        name:        "Image + Audio Mixer",
        description: "Combine a picture with a trimmed, faded audio clip into one MP4.",
        glyph:       "🎵",
        category:    ToolCategory::Media,
    },
];

/// Registry lookup. Every ToolId has an entry; the directory and the screens
/// are added together.
pub fn tool_info(id: ToolId) -> &'static ToolInfo {
    TOOLS
        .iter()
        .find(|t| t.id == id)
        .unwrap_or(&TOOLS[0])
}

impl ToolId {
    /// Whether the tool drives the external engine (and therefore needs it
    /// loaded before its convert action enables).
    pub fn needs_engine(&self) -> bool {
        match self {
            ToolId::TransparentPixel => false,
            ToolId::StillToVideo | ToolId::ImageAudioMixer => true,
        }
    }
}
