//! The status message value object

use crate::context::MessageContext;
use crate::error::MessageResult;
use crate::format::sprintf;
use crate::level::Level;
use crate::param::{Child, Param};
use md5::{Digest, Md5};
use once_cell::unsync::OnceCell;
use serde_json::json;

/// Default text of [`Message::success`]
pub const DEFAULT_SUCCESS_TEXT: &str = "Your SQL query has been executed successfully.";

/// Default text of [`Message::error`]
pub const DEFAULT_ERROR_TEXT: &str = "Error";

/// Name of the template used by [`Message::display`]
pub const MESSAGE_TEMPLATE: &str = "message";

#[derive(Debug, Clone, PartialEq)]
enum Template {
	Text(String),
	/// Plain text, HTML-escaped before lookup
	Escaped(String),
	Plural {
		singular: String,
		plural: String,
		count: u64,
	},
}

impl Template {
	/// Source-language form, used as lookup key and hash input
	fn key(&self) -> &str {
		match self {
			Template::Text(text) | Template::Escaped(text) => text,
			Template::Plural {
				singular,
				plural,
				count,
			} => {
				if *count == 1 {
					singular
				} else {
					plural
				}
			}
		}
	}

	fn localize(&self, ctx: &MessageContext) -> String {
		match self {
			Template::Text(text) | Template::Escaped(text) if text.is_empty() => String::new(),
			Template::Text(text) => ctx.localizer().gettext(text),
			Template::Escaped(text) => ctx.localizer().gettext(&ctx.escaper().escape(text)),
			Template::Plural {
				singular,
				plural,
				count,
			} => ctx.localizer().ngettext(singular, plural, *count),
		}
	}
}

impl Default for Template {
	fn default() -> Self {
		Template::Text(String::new())
	}
}

/// A user-facing status message
///
/// The message text is either a localizable template or a fixed raw text.
/// Parameters are substituted printf-style, BB-code markup is decoded when
/// decoration is on, and child messages are appended after the body.
///
/// The hash is computed on first access and kept for the lifetime of the
/// instance, so later changes to the level or text do not affect it.
///
/// # Examples
///
/// ```
/// use dbadmin_messages::{Message, MessageContext};
///
/// let ctx = MessageContext::default();
///
/// let mut message = Message::error("Table %1$s could not be dropped.");
/// message.add_param("<users>");
/// message.add_message(Message::raw_notice("<a href=\"#\">Retry</a>"), " ");
///
/// assert_eq!(
///     message.compile(&ctx).unwrap(),
///     "Table &lt;users&gt; could not be dropped. <a href=\"#\">Retry</a>"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Message {
	level: Level,
	template: Template,
	raw_text: String,
	use_decoration: bool,
	params: Vec<Param>,
	children: Vec<Child>,
	displayed: bool,
	hash: OnceCell<String>,
}

impl Default for Message {
	fn default() -> Self {
		Self {
			level: Level::Notice,
			template: Template::default(),
			raw_text: String::new(),
			use_decoration: true,
			params: Vec::new(),
			children: Vec::new(),
			displayed: false,
			hash: OnceCell::new(),
		}
	}
}

impl Message {
	/// Create a message from a localizable template
	pub fn new(level: Level, template_key: impl Into<String>) -> Self {
		Self {
			level,
			template: Template::Text(template_key.into()),
			..Self::default()
		}
	}

	/// Create a message from a template and its parameters
	pub fn with_params<P, I>(level: Level, template_key: impl Into<String>, params: I) -> Self
	where
		P: Into<Param>,
		I: IntoIterator<Item = P>,
	{
		let mut message = Self::new(level, template_key);
		message.set_params(params);
		message
	}

	/// Success message; an empty text selects the default success text
	pub fn success(text: impl Into<String>) -> Self {
		Self::new(Level::Success, or_default(text.into(), DEFAULT_SUCCESS_TEXT))
	}

	/// Error message; an empty text selects the default error text
	pub fn error(text: impl Into<String>) -> Self {
		Self::new(Level::Error, or_default(text.into(), DEFAULT_ERROR_TEXT))
	}

	/// Notice message
	pub fn notice(text: impl Into<String>) -> Self {
		Self::new(Level::Notice, text)
	}

	/// Message with a fixed text, without localization or decoration
	pub fn raw(text: impl Into<String>, level: Level) -> Self {
		Self {
			level,
			raw_text: text.into(),
			use_decoration: false,
			..Self::default()
		}
	}

	pub fn raw_success(text: impl Into<String>) -> Self {
		Self::raw(text, Level::Success)
	}

	pub fn raw_notice(text: impl Into<String>) -> Self {
		Self::raw(text, Level::Notice)
	}

	pub fn raw_error(text: impl Into<String>) -> Self {
		Self::raw(text, Level::Error)
	}

	/// "N row(s) affected." success message
	///
	/// # Examples
	///
	/// ```
	/// use dbadmin_messages::{Message, MessageContext};
	///
	/// let ctx = MessageContext::default();
	/// assert_eq!(Message::for_affected_rows(1).compile(&ctx).unwrap(), "1 row affected.");
	/// assert_eq!(Message::for_affected_rows(0).compile(&ctx).unwrap(), "0 rows affected.");
	/// ```
	pub fn for_affected_rows(rows: u64) -> Self {
		Self::row_count("%1$d row affected.", "%1$d rows affected.", rows)
	}

	/// "N row(s) deleted." success message
	pub fn for_deleted_rows(rows: u64) -> Self {
		Self::row_count("%1$d row deleted.", "%1$d rows deleted.", rows)
	}

	/// "N row(s) inserted." success message
	pub fn for_inserted_rows(rows: u64) -> Self {
		Self::row_count("%1$d row inserted.", "%1$d rows inserted.", rows)
	}

	fn row_count(singular: &str, plural: &str, rows: u64) -> Self {
		let mut message = Self::new(Level::Success, "");
		message.template = Template::Plural {
			singular: singular.to_string(),
			plural: plural.to_string(),
			count: rows,
		};
		message.add_param(rows);
		message
	}

	pub fn set_level(&mut self, level: Level) {
		self.level = level;
	}

	pub fn set_template_key(&mut self, template_key: impl Into<String>) {
		self.template = Template::Text(template_key.into());
	}

	/// Set the fixed text, which takes precedence over the template
	pub fn set_message_text(&mut self, text: impl Into<String>) {
		self.raw_text = text.into();
	}

	pub fn set_use_decoration(&mut self, use_decoration: bool) {
		self.use_decoration = use_decoration;
	}

	/// Replace all parameters
	pub fn set_params<P, I>(&mut self, params: I)
	where
		P: Into<Param>,
		I: IntoIterator<Item = P>,
	{
		self.params = params.into_iter().map(Into::into).collect();
	}

	/// Add a parameter
	///
	/// Numbers and messages are substituted as they are; text is
	/// HTML-escaped when the message is compiled.
	pub fn add_param(&mut self, param: impl Into<Param>) {
		self.params.push(param.into());
	}

	/// Add a trusted HTML fragment as a parameter
	pub fn add_param_html(&mut self, html: impl Into<String>) {
		self.params.push(Param::Message(Box::new(Self::raw_notice(html))));
	}

	/// Append a message, preceded by `separator` unless it is empty
	pub fn add_message(&mut self, message: Message, separator: &str) {
		if !separator.is_empty() {
			self.children.push(Child::Separator(separator.to_string()));
		}
		self.children.push(Child::Message(message));
	}

	/// Append several messages with the same separator
	pub fn add_messages<I>(&mut self, messages: I, separator: &str)
	where
		I: IntoIterator<Item = Message>,
	{
		for message in messages {
			self.add_message(message, separator);
		}
	}

	/// Append plain text as a notice, HTML-escaped and localized when compiled
	pub fn add_text(&mut self, text: impl Into<String>, separator: &str) {
		let mut message = Self::notice("");
		message.template = Template::Escaped(text.into());
		self.add_message(message, separator);
	}

	/// Append a trusted HTML fragment
	pub fn add_html(&mut self, html: impl Into<String>, separator: &str) {
		self.add_message(Self::raw_notice(html), separator);
	}

	pub fn is_success(&self) -> bool {
		self.level == Level::Success
	}

	pub fn is_notice(&self) -> bool {
		self.level == Level::Notice
	}

	pub fn is_error(&self) -> bool {
		self.level == Level::Error
	}

	/// Whether the message has `level`, switching to it first when `set` is true
	pub fn check_level(&mut self, level: Level, set: bool) -> bool {
		if set {
			self.level = level;
		}
		self.level == level
	}

	pub fn level(&self) -> Level {
		self.level
	}

	/// `success`, `notice` or `error`
	pub fn level_name(&self) -> &'static str {
		self.level.as_str()
	}

	/// Severity tag used by the alert markup
	pub fn context_name(&self) -> &'static str {
		self.level.context()
	}

	/// Source-language template, or the form selected by the count for
	/// row-count messages
	pub fn template_key(&self) -> &str {
		self.template.key()
	}

	pub fn message_text(&self) -> &str {
		&self.raw_text
	}

	pub fn params(&self) -> &[Param] {
		&self.params
	}

	pub fn children(&self) -> &[Child] {
		&self.children
	}

	pub fn use_decoration(&self) -> bool {
		self.use_decoration
	}

	pub fn is_displayed(&self) -> bool {
		self.displayed
	}

	/// Mark the message as displayed; later compiles carry the level icon
	pub fn mark_displayed(&mut self) {
		self.displayed = true;
	}

	/// MD5 hex digest of level code, template key and raw text
	pub fn hash(&self) -> &str {
		self.hash.get_or_init(|| {
			let input = format!("{}{}{}", self.level.code(), self.template.key(), self.raw_text);
			hex::encode(Md5::digest(input.as_bytes()))
		})
	}

	/// Compile the message text
	///
	/// Steps, in order: base text (raw text, else the localized template),
	/// level icon when already displayed, parameter substitution, BB-code
	/// decoding when decoration is on, appended children.
	pub fn compile(&self, ctx: &MessageContext) -> MessageResult<String> {
		let mut message = self.base_text(ctx);

		if self.displayed {
			message = if self.params.is_empty() {
				self.message_with_icon(ctx, &message)
			} else {
				// A `%` in the icon markup is not a directive
				let icon = ctx.icons().icon_for(self.level).replace('%', "%%");
				format!("{} {}", icon, message)
			};
		}

		if !self.params.is_empty() {
			let args = self
				.params
				.iter()
				.map(|param| param.to_format_arg(ctx))
				.collect::<MessageResult<Vec<_>>>()?;
			message = sprintf(&message, &args)?;
		}

		if self.use_decoration {
			message = ctx.decoder().decode(&message);
		}

		for child in &self.children {
			match child {
				Child::Separator(separator) => message.push_str(separator),
				Child::Message(child) => message.push_str(&child.compile(ctx)?),
			}
		}

		Ok(message)
	}

	/// Render the message for display
	///
	/// Marks the message as displayed, then renders the `message` template
	/// with the severity tag and the compiled text.
	pub fn display(&mut self, ctx: &MessageContext) -> MessageResult<String> {
		self.displayed = true;
		let variables = json!({
			"context": self.context_name(),
			"message": self.compile(ctx)?,
		});
		Ok(ctx.renderer().render(MESSAGE_TEMPLATE, &variables)?)
	}

	/// `text` prefixed with the icon of the message level
	pub fn message_with_icon(&self, ctx: &MessageContext, text: &str) -> String {
		format!("{} {}", ctx.icons().icon_for(self.level), text)
	}

	fn base_text(&self, ctx: &MessageContext) -> String {
		if self.raw_text.is_empty() {
			self.template.localize(ctx)
		} else {
			self.raw_text.clone()
		}
	}
}

fn or_default(text: String, default: &str) -> String {
	if text.is_empty() {
		default.to_string()
	} else {
		text
	}
}
