//! Response builder used by controllers

use dbadmin_messages::{Message, MessageContext, MessageError};
use serde::Serialize;
use serde_json::{Map, Value};

/// Errors raised while building a response
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
	#[error("Failed to serialize JSON member `{key}`: {source}")]
	Serialization {
		key: String,
		#[source]
		source: serde_json::Error,
	},

	#[error(transparent)]
	Message(#[from] MessageError),
}

/// Collects what a controller answers with
///
/// A response is successful unless marked otherwise. JSON members and HTML
/// fragments accumulate in insertion order.
///
/// # Examples
///
/// ```
/// use dbadmin_http::ResponseRenderer;
/// use serde_json::json;
///
/// let mut response = ResponseRenderer::new();
/// response.add_json("rows", &3).unwrap();
///
/// assert_eq!(response.into_json_body(), json!({"rows": 3, "success": true}));
/// ```
#[derive(Debug, Clone)]
pub struct ResponseRenderer {
	success: bool,
	json: Map<String, Value>,
	html: String,
}

impl ResponseRenderer {
	pub fn new() -> Self {
		Self {
			success: true,
			json: Map::new(),
			html: String::new(),
		}
	}

	/// Mark the request as succeeded or failed
	pub fn set_request_status(&mut self, success: bool) {
		self.success = success;
	}

	pub fn is_success(&self) -> bool {
		self.success
	}

	/// Add (or replace) a JSON member
	pub fn add_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), ResponseError> {
		let value = serde_json::to_value(value).map_err(|source| ResponseError::Serialization {
			key: key.to_string(),
			source,
		})?;
		self.json.insert(key.to_string(), value);
		Ok(())
	}

	/// Add a message as a JSON member, in its display form
	pub fn add_json_message(
		&mut self,
		key: &str,
		message: &mut Message,
		ctx: &MessageContext,
	) -> Result<(), ResponseError> {
		let html = message.display(ctx)?;
		self.json.insert(key.to_string(), Value::String(html));
		Ok(())
	}

	/// Append an HTML fragment to the page body
	pub fn add_html(&mut self, html: &str) {
		self.html.push_str(html);
	}

	pub fn json(&self) -> &Map<String, Value> {
		&self.json
	}

	pub fn html(&self) -> &str {
		&self.html
	}

	/// Body of an asynchronous response
	///
	/// The `success` flag is merged into the JSON members. A successful
	/// response without a `message` member carries the collected HTML as its
	/// message; a failed one reports its `message` member as `error`.
	pub fn into_json_body(self) -> Value {
		let mut body = self.json;

		if self.success {
			if !body.contains_key("message") && !self.html.is_empty() {
				body.insert("message".to_string(), Value::String(self.html));
			}
		} else if let Some(message) = body.remove("message") {
			body.insert("error".to_string(), message);
		}

		tracing::debug!(
			success = self.success,
			members = body.len(),
			"response body assembled"
		);
		body.insert("success".to_string(), Value::Bool(self.success));
		Value::Object(body)
	}
}

impl Default for ResponseRenderer {
	fn default() -> Self {
		Self::new()
	}
}
