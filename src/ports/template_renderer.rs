//! Template renderer port - localized string rendering.

use std::collections::HashMap;

/// Port for the templating collaborator.
pub trait TemplateRenderer: Send + Sync {
    /// Substitute `vars` into `template`.
    fn render(&self, template: &str, vars: &HashMap<&str, String>) -> String;
}
