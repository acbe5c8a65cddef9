//! `[+name+]` placeholder substitution.

use std::collections::HashMap;

use crate::ports::TemplateRenderer;

/// Replaces `[+name+]` with the value of `name`.
///
/// Unknown placeholders are replaced with an empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRenderer;

impl PlaceholderRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, template: &str, vars: &HashMap<&str, String>) -> String {
        let mut output = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("[+") {
            output.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];

            match after_open.find("+]") {
                Some(end) => {
                    let name = after_open[..end].trim();
                    if let Some(value) = vars.get(name) {
                        output.push_str(value);
                    }
                    rest = &after_open[end + 2..];
                }
                None => {
                    output.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        output.push_str(rest);
        output
    }
}
