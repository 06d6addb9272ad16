//! Template rendering for craft.
//! Executes a composed template set against a data payload and returns the
//! rendered bytes of one destination.
use crate::error::{Error, Result};
use crate::template::CompiledTemplateSet;
use minijinja::Value;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a composed template set with the given data.
    ///
    /// # Arguments
    /// * `set` - Composed template set
    /// * `data` - Payload bound during execution; passed through untouched
    /// * `entry_point` - Block to render instead of the root template
    ///
    /// # Returns
    /// * `Result<Vec<u8>>` - Complete rendered content
    fn render(
        &self,
        set: &CompiledTemplateSet,
        data: &Value,
        entry_point: Option<&str>,
    ) -> Result<Vec<u8>>;
}

/// MiniJinja-based template rendering engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct MiniJinjaRenderer;

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders the root template of `set`, or only the `entry_point` block.
    ///
    /// The entry block is taken from the last composed fragment declaring it,
    /// so a block overridden by a later layer renders in its overridden form.
    ///
    /// # Errors
    /// * `Error::RenderError` if:
    ///   - no composed fragment declares `entry_point`
    ///   - the payload lacks a referenced value
    ///   - a fragment raises a failure while executing
    fn render(
        &self,
        set: &CompiledTemplateSet,
        data: &Value,
        entry_point: Option<&str>,
    ) -> Result<Vec<u8>> {
        let render_error = |e: minijinja::Error| Error::RenderError {
            name: set.name().to_string(),
            reason: e.to_string(),
        };

        let output = match entry_point {
            Some(block) => {
                let owner = set.block_owner(block).ok_or_else(|| Error::RenderError {
                    name: set.name().to_string(),
                    reason: format!("unknown entry point '{}'", block),
                })?;
                let tmpl = set.environment().get_template(owner).map_err(render_error)?;
                let mut state = tmpl.eval_to_state(data).map_err(render_error)?;
                state.render_block(block).map_err(render_error)?
            }
            None => {
                let tmpl = set.environment().get_template(set.root()).map_err(render_error)?;
                tmpl.render(data).map_err(render_error)?
            }
        };

        Ok(output.into_bytes())
    }
}
