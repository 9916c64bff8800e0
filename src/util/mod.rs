//! Small presentation helpers shared by the views and the renderer.

pub mod format;
