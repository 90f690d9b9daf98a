//! Message compilation errors

use crate::format::FormatError;
use dbadmin_template::TemplateError;

/// Errors raised while compiling or displaying a message
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
	/// Parameters do not fit the placeholders of the template
	#[error("Failed to substitute message parameters: {0}")]
	Format(#[from] FormatError),

	#[error("Failed to render message template: {0}")]
	Template(#[from] TemplateError),
}

/// Result type for message operations
pub type MessageResult<T> = Result<T, MessageError>;
