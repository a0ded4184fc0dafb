/// Processing parameters for the render pipeline
///
/// This struct stores every user-tunable knob that shapes the output.
/// It is immutable by replacement: each user action swaps in a fresh
/// snapshot, and every snapshot change triggers a full recompute.

/// Default filename used when the original name cannot be resolved
pub const DEFAULT_FILENAME: &str = "image.JPG";

/// Suffix inserted before the extension of every exported file
pub const EXPORT_SUFFIX: &str = "_edit";

/// Largest number of vertical panels offered in the UI
pub const MAX_SECTION_COUNT: u32 = 10;

/// Target aspect ratio for the padded canvas
///
/// `Original` leaves the image untouched, `Auto` is resolved into the
/// best-fitting `Value` at selection time (it never reaches the pipeline),
/// and `Value` pads the image out to `width:height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Original,
    Auto,
    Value { width: u32, height: u32 },
}

impl AspectRatio {
    /// Every ratio offered in the UI, in selection order
    pub const ALL: [AspectRatio; 12] = [
        AspectRatio::Original,
        AspectRatio::Auto,
        AspectRatio::Value { width: 3, height: 4 },
        AspectRatio::Value { width: 5, height: 6 },
        AspectRatio::Value { width: 1, height: 1 },
        AspectRatio::Value { width: 6, height: 5 },
        AspectRatio::Value { width: 4, height: 3 },
        AspectRatio::Value { width: 7, height: 5 },
        AspectRatio::Value { width: 3, height: 2 },
        AspectRatio::Value { width: 16, height: 9 },
        AspectRatio::Value { width: 20, height: 9 },
        AspectRatio::Value { width: 24, height: 9 },
    ];

    pub const SQUARE: AspectRatio = AspectRatio::Value {
        width: 1,
        height: 1,
    };

    /// Button label shown in the aspect ratio grid
    pub fn label(&self) -> String {
        match self {
            AspectRatio::Original => "Orig".to_string(),
            AspectRatio::Auto => "Auto".to_string(),
            AspectRatio::Value { width, height } => format!("{}:{}", width, height),
        }
    }
}

/// Clockwise rotation in quarter turns, cycled by the Rotate button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Quarter,
    Half,
    ThreeQuarters,
}

impl Rotation {
    pub fn quarter_turns(self) -> u32 {
        match self {
            Rotation::None => 0,
            Rotation::Quarter => 1,
            Rotation::Half => 2,
            Rotation::ThreeQuarters => 3,
        }
    }

    /// Advance to the next quarter turn, wrapping back to none
    pub fn increase(self) -> Self {
        match self {
            Rotation::None => Rotation::Quarter,
            Rotation::Quarter => Rotation::Half,
            Rotation::Half => Rotation::ThreeQuarters,
            Rotation::ThreeQuarters => Rotation::None,
        }
    }
}

/// A padding color with its display label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillColor {
    pub rgba: [u8; 4],
    pub label: &'static str,
}

/// The fill palette offered in the UI: black through grey steps to white
pub const PALETTE: [FillColor; 10] = [
    FillColor { rgba: [0, 0, 0, 255], label: "Black" },
    FillColor { rgba: [13, 13, 13, 255], label: "05% Grey" },
    FillColor { rgba: [26, 26, 26, 255], label: "10% Grey" },
    FillColor { rgba: [51, 51, 51, 255], label: "20% Grey" },
    FillColor { rgba: [77, 77, 77, 255], label: "30% Grey" },
    FillColor { rgba: [128, 128, 128, 255], label: "50% Grey" },
    FillColor { rgba: [179, 179, 179, 255], label: "70% Grey" },
    FillColor { rgba: [204, 204, 204, 255], label: "80% Grey" },
    FillColor { rgba: [230, 230, 230, 255], label: "90% Grey" },
    FillColor { rgba: [255, 255, 255, 255], label: "White" },
];

/// Snapshot of all processing parameters
///
/// `screen_dimensions` is the preview viewport in pixels; the other fields
/// map one-to-one onto the pipeline stages (rotate, pad, slice).
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessParams {
    pub aspect_ratio: AspectRatio,
    pub bg_color: FillColor,
    pub screen_dimensions: (f32, f32),
    pub turns: Rotation,
    pub section_count: u32,
}

impl Default for ProcessParams {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::Original,
            bg_color: PALETTE[0],
            screen_dimensions: (1920.0, 1080.0),
            turns: Rotation::None,
            section_count: 1,
        }
    }
}

impl ProcessParams {
    /// Snapshot used right after importing a new image: transform choices go
    /// back to neutral, while fill color and viewport carry over.
    pub fn reset_for_import(&self) -> Self {
        Self {
            aspect_ratio: AspectRatio::Original,
            turns: Rotation::None,
            section_count: 1,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        let params = ProcessParams::default();
        assert_eq!(params.aspect_ratio, AspectRatio::Original);
        assert_eq!(params.turns, Rotation::None);
        assert_eq!(params.section_count, 1);
        assert_eq!(params.bg_color, PALETTE[0]);
    }

    #[test]
    fn test_reset_preserves_color_and_viewport() {
        let mut params = ProcessParams::default();
        params.aspect_ratio = AspectRatio::SQUARE;
        params.turns = Rotation::Half;
        params.section_count = 3;
        params.bg_color = PALETTE[9];
        params.screen_dimensions = (800.0, 600.0);

        let reset = params.reset_for_import();

        assert_eq!(reset.aspect_ratio, AspectRatio::Original);
        assert_eq!(reset.turns, Rotation::None);
        assert_eq!(reset.section_count, 1);
        assert_eq!(reset.bg_color, PALETTE[9]);
        assert_eq!(reset.screen_dimensions, (800.0, 600.0));
    }

    #[test]
    fn test_rotation_cycles_through_all_turns() {
        let mut rotation = Rotation::None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            rotation = rotation.increase();
            seen.push(rotation.quarter_turns());
        }
        assert_eq!(seen, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(AspectRatio::Original.label(), "Orig");
        assert_eq!(AspectRatio::Auto.label(), "Auto");
        assert_eq!(AspectRatio::Value { width: 16, height: 9 }.label(), "16:9");
    }
}
