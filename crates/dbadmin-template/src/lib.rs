//! Template rendering for dbadmin
//!
//! Templates ship inside the binary and are registered once in a lazily
//! initialised Tera instance. Consumers depend on the [`TemplateRenderer`]
//! trait; [`TeraRenderer`] is the production implementation.
//!
//! ```
//! use dbadmin_template::{TemplateRenderer, TeraRenderer};
//! use serde_json::json;
//!
//! let renderer = TeraRenderer::new();
//! let html = renderer
//!     .render("message", &json!({"context": "success", "message": "Done"}))
//!     .unwrap();
//! assert!(html.contains(r#"<div class="alert alert-success" role="alert">"#));
//! assert!(html.contains("Done"));
//! ```

pub mod renderer;

pub use renderer::{TemplateError, TemplateRenderer, TeraRenderer};
