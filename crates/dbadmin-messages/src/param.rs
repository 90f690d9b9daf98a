//! Substitution parameters and appended children

use crate::context::MessageContext;
use crate::error::MessageResult;
use crate::format::FormatArg;
use crate::message::Message;

/// A value substituted into a message template
#[derive(Debug, Clone)]
pub enum Param {
	Int(i64),
	Float(f64),
	/// Plain text, HTML-escaped when the message is compiled
	Text(String),
	/// Nested message, compiled in place
	Message(Box<Message>),
}

impl Param {
	pub(crate) fn to_format_arg(&self, ctx: &MessageContext) -> MessageResult<FormatArg> {
		Ok(match self {
			Param::Int(v) => FormatArg::Int(*v),
			Param::Float(v) => FormatArg::Float(*v),
			Param::Text(text) => FormatArg::Str(ctx.escaper().escape(text)),
			Param::Message(message) => FormatArg::Str(message.compile(ctx)?),
		})
	}
}

macro_rules! impl_from_int {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Param {
				fn from(value: $ty) -> Self {
					Param::Int(i64::from(value))
				}
			}
		)*
	};
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Param {
	fn from(value: u64) -> Self {
		Param::Int(i64::try_from(value).unwrap_or(i64::MAX))
	}
}

impl From<usize> for Param {
	fn from(value: usize) -> Self {
		Param::Int(i64::try_from(value).unwrap_or(i64::MAX))
	}
}

impl From<f32> for Param {
	fn from(value: f32) -> Self {
		Param::Float(f64::from(value))
	}
}

impl From<f64> for Param {
	fn from(value: f64) -> Self {
		Param::Float(value)
	}
}

impl From<&str> for Param {
	fn from(value: &str) -> Self {
		Param::Text(value.to_string())
	}
}

impl From<String> for Param {
	fn from(value: String) -> Self {
		Param::Text(value)
	}
}

impl From<&String> for Param {
	fn from(value: &String) -> Self {
		Param::Text(value.clone())
	}
}

impl From<Message> for Param {
	fn from(value: Message) -> Self {
		Param::Message(Box::new(value))
	}
}

/// An entry appended after the message body
#[derive(Debug, Clone)]
pub enum Child {
	Separator(String),
	Message(Message),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_numeric_conversions() {
		assert!(matches!(Param::from(5_i32), Param::Int(5)));
		assert!(matches!(Param::from(7_usize), Param::Int(7)));
		assert!(matches!(Param::from(u64::MAX), Param::Int(i64::MAX)));
		assert!(matches!(Param::from(1.5_f64), Param::Float(v) if v == 1.5));
	}

	#[rstest]
	fn test_text_is_escaped_when_converted() {
		// Arrange
		let ctx = MessageContext::default();
		let param = Param::from("<b>\"x\" & 'y'</b>");

		// Act
		let arg = param.to_format_arg(&ctx).unwrap();

		// Assert
		assert_eq!(
			arg,
			FormatArg::Str("&lt;b&gt;&quot;x&quot; &amp; 'y'&lt;/b&gt;".to_string())
		);
	}

	#[rstest]
	fn test_nested_message_is_compiled() {
		let ctx = MessageContext::default();
		let param = Param::from(Message::raw_notice("<i>kept</i>"));
		assert_eq!(
			param.to_format_arg(&ctx).unwrap(),
			FormatArg::Str("<i>kept</i>".to_string())
		);
	}
}
