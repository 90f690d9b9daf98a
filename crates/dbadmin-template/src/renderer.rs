//! Tera-based template renderer

use once_cell::sync::Lazy;
use serde_json::Value;
use std::borrow::Cow;
use tera::{Context, Tera};

/// Templates compiled into the binary, by name
const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
	("message", include_str!("../templates/message.tera")),
	(
		"database/structure/confirm_form",
		include_str!("../templates/database/structure/confirm_form.tera"),
	),
	(
		"database/structure/drop_form",
		include_str!("../templates/database/structure/drop_form.tera"),
	),
	(
		"database/structure/empty_form",
		include_str!("../templates/database/structure/empty_form.tera"),
	),
];

// Embedded templates are constants: failing to parse them is a build defect
static TERA: Lazy<Tera> = Lazy::new(|| {
	let mut tera = Tera::default();
	tera.add_raw_templates(EMBEDDED_TEMPLATES.iter().copied())
		.expect("Failed to register embedded templates");
	tera
});

/// Errors raised while rendering a template
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
	#[error("Template not found: {0}")]
	NotFound(String),

	#[error("Template variables must be a JSON object, got {0}")]
	InvalidContext(String),

	#[error("Failed to render {name}: {source}")]
	Render {
		name: String,
		#[source]
		source: tera::Error,
	},
}

/// Renders a named template with a map of variables
pub trait TemplateRenderer: Send + Sync {
	fn render(&self, template_name: &str, variables: &Value) -> Result<String, TemplateError>;
}

/// Runtime template renderer backed by Tera
///
/// A renderer borrows the shared embedded instance until a template is added
/// to it, at which point it owns a private copy.
#[derive(Debug, Clone)]
pub struct TeraRenderer {
	tera: Cow<'static, Tera>,
}

impl TeraRenderer {
	/// Creates a renderer over the embedded templates
	pub fn new() -> Self {
		Self {
			tera: Cow::Borrowed(&*TERA),
		}
	}

	/// Adds (or replaces) a template from source
	///
	/// # Examples
	///
	/// ```
	/// use dbadmin_template::{TemplateRenderer, TeraRenderer};
	/// use serde_json::json;
	///
	/// let renderer = TeraRenderer::new()
	///     .with_template("greeting", "Hello {{ name }}")
	///     .unwrap();
	/// assert_eq!(renderer.render("greeting", &json!({"name": "pma"})).unwrap(), "Hello pma");
	/// ```
	pub fn with_template(mut self, name: &str, source: &str) -> Result<Self, TemplateError> {
		self.tera
			.to_mut()
			.add_raw_template(name, source)
			.map_err(|source| TemplateError::Render {
				name: name.to_string(),
				source,
			})?;
		Ok(self)
	}

	/// Whether a template with this name is registered
	pub fn has_template(&self, name: &str) -> bool {
		self.tera.get_template_names().any(|n| n == name)
	}
}

impl Default for TeraRenderer {
	fn default() -> Self {
		Self::new()
	}
}

impl TemplateRenderer for TeraRenderer {
	fn render(&self, template_name: &str, variables: &Value) -> Result<String, TemplateError> {
		if !self.has_template(template_name) {
			return Err(TemplateError::NotFound(template_name.to_string()));
		}
		if !variables.is_object() {
			return Err(TemplateError::InvalidContext(variables.to_string()));
		}

		let context =
			Context::from_value(variables.clone()).map_err(|source| TemplateError::Render {
				name: template_name.to_string(),
				source,
			})?;

		self.tera
			.render(template_name, &context)
			.map_err(|source| {
				tracing::warn!(template = template_name, error = %source, "template rendering failed");
				TemplateError::Render {
					name: template_name.to_string(),
					source,
				}
			})
	}
}
