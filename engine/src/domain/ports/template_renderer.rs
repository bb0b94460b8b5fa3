//! Port for the template-rendering collaborator.

use async_trait::async_trait;

use crate::domain::mapper::FieldMap;

use super::define_port_error;

define_port_error! {
    /// Errors raised by template renderer adapters.
    pub enum TemplateRendererError {
        /// The named template does not exist in the rendering service.
        UnknownTemplate { template_name: String } =>
            "template '{template_name}' is not known to the renderer",
        /// Rendering itself failed.
        Rendering { message: String } =>
            "template rendering failed: {message}",
    }
}

/// Port rendering a field map into a binary document.
///
/// Treated as a pure function from the engine's perspective: no
/// validation responsibility, same fields in, same bytes out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateRenderer: Send + Sync {
    /// Render `fields` into the named template.
    async fn render(
        &self,
        template_name: &str,
        fields: &FieldMap,
    ) -> Result<Vec<u8>, TemplateRendererError>;
}

/// Fixture renderer for tests that do not inspect the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTemplateRenderer;

#[async_trait]
impl TemplateRenderer for FixtureTemplateRenderer {
    async fn render(
        &self,
        template_name: &str,
        _fields: &FieldMap,
    ) -> Result<Vec<u8>, TemplateRendererError> {
        Ok(template_name.as_bytes().to_vec())
    }
}
