//! Template adapters.

mod placeholder_renderer;

pub use placeholder_renderer::PlaceholderRenderer;
