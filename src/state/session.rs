/// Session state for the render pipeline
///
/// Tracks the imported source image and the derived outputs as an explicit
/// state machine: Idle (nothing imported), Rendering (recompute in flight),
/// Ready (outputs consistent with the current parameters).

use image::RgbaImage;
use std::sync::Arc;

/// The decoded source image plus the name used for export suggestions
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub image: Arc<RgbaImage>,
    pub display_name: String,
}

/// The paired outputs of one pipeline run
///
/// `hires` is the full composited result, `lores` its viewport-scaled
/// preview. They are always replaced together, in a single assignment, so
/// observers never see one without the other.
#[derive(Debug, Clone)]
pub struct RenderedOutput {
    pub hires: Arc<RgbaImage>,
    pub lores: Arc<RgbaImage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPhase {
    #[default]
    Idle,
    Rendering,
    Ready,
}

/// Which overlay dialog is currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogStyle {
    #[default]
    None,
    Busy,
    Error,
}

#[derive(Debug, Default)]
pub struct Session {
    pub source: Option<SourceImage>,
    pub output: Option<RenderedOutput>,
    pub phase: RenderPhase,
}

impl Session {
    /// Install a freshly imported image and enter the Rendering phase
    pub fn set_source(&mut self, image: Arc<RgbaImage>, display_name: String) {
        self.source = Some(SourceImage {
            image,
            display_name,
        });
        self.output = None;
        self.phase = RenderPhase::Rendering;
    }

    /// Drop the source and both outputs, e.g. after a failed decode
    pub fn clear(&mut self) {
        self.source = None;
        self.output = None;
        self.phase = RenderPhase::Idle;
    }

    /// Store the paired outputs of a completed render.
    ///
    /// A result arriving after the session was cleared is discarded: outputs
    /// must never exist without a source.
    pub fn store_output(&mut self, output: RenderedOutput) {
        if self.source.is_none() {
            return;
        }
        self.output = Some(output);
        self.phase = RenderPhase::Ready;
    }

    pub fn output_available(&self) -> bool {
        self.output.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_output() -> RenderedOutput {
        let bitmap = Arc::new(RgbaImage::new(4, 4));
        RenderedOutput {
            hires: bitmap.clone(),
            lores: bitmap,
        }
    }

    #[test]
    fn test_starts_idle() {
        let session = Session::default();
        assert_eq!(session.phase, RenderPhase::Idle);
        assert!(session.source.is_none());
        assert!(!session.output_available());
    }

    #[test]
    fn test_import_enters_rendering() {
        let mut session = Session::default();
        session.set_source(Arc::new(RgbaImage::new(4, 4)), "a.jpg".to_string());
        assert_eq!(session.phase, RenderPhase::Rendering);
        assert!(!session.output_available());
    }

    #[test]
    fn test_output_enters_ready() {
        let mut session = Session::default();
        session.set_source(Arc::new(RgbaImage::new(4, 4)), "a.jpg".to_string());
        session.store_output(test_output());
        assert_eq!(session.phase, RenderPhase::Ready);
        assert!(session.output_available());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = Session::default();
        session.set_source(Arc::new(RgbaImage::new(4, 4)), "a.jpg".to_string());
        session.store_output(test_output());
        session.clear();
        assert_eq!(session.phase, RenderPhase::Idle);
        assert!(session.source.is_none());
        assert!(!session.output_available());
    }

    #[test]
    fn test_stale_output_after_clear_is_dropped() {
        let mut session = Session::default();
        session.set_source(Arc::new(RgbaImage::new(4, 4)), "a.jpg".to_string());
        session.clear();
        session.store_output(test_output());
        assert_eq!(session.phase, RenderPhase::Idle);
        assert!(!session.output_available());
    }

    #[test]
    fn test_new_import_discards_previous_output() {
        let mut session = Session::default();
        session.set_source(Arc::new(RgbaImage::new(4, 4)), "a.jpg".to_string());
        session.store_output(test_output());
        session.set_source(Arc::new(RgbaImage::new(8, 8)), "b.jpg".to_string());
        assert_eq!(session.phase, RenderPhase::Rendering);
        assert!(!session.output_available());
    }
}
