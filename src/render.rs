//! Preview rendering interface
//!
//! The markdown-to-HTML pipeline is an external service consumed for
//! preview only; classification never depends on its output. Preview
//! state is request/response — the renderer is handed the file per
//! call, there is no process-wide "current preview file".

use std::io;
use std::path::Path;

/// Output of the external rendering service.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPreview {
    pub html: String,
    pub table_of_contents: Vec<String>,
}

/// Rendering collaborator. Implementations wrap whatever preview
/// server the app runs; the core only defines the call shape.
pub trait Renderer {
    fn render(&self, path: &Path) -> io::Result<RenderedPreview>;
}
