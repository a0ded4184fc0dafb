/// Image render pipeline
///
/// The stages that turn an imported bitmap into export-ready output:
/// - Aspect-fit geometry (geometry.rs)
/// - Rotation and pad-to-canvas compositing (compose.rs)
/// - Viewport preview with section separators (preview.rs)
/// - Vertical section slicing for export (sections.rs)

pub mod compose;
pub mod geometry;
pub mod preview;
pub mod sections;
