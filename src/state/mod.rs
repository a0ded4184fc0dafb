/// State management module
///
/// This module handles all application state, including:
/// - Processing parameter snapshots (params.rs)
/// - The source image and derived outputs (session.rs)

pub mod params;
pub mod session;
