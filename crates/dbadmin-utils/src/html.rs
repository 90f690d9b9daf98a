//! HTML utilities for escaping and URL encoding

/// Escapes text for embedding in HTML
pub trait HtmlEscaper: Send + Sync {
	fn escape(&self, text: &str) -> String;
}

/// Escape HTML special characters in "compatible" mode
///
/// Double quotes are escaped, single quotes are left alone and existing
/// entities are encoded again.
///
/// # Examples
///
/// ```
/// use dbadmin_utils::html::escape_compat;
///
/// assert_eq!(escape_compat("<b>"), "&lt;b&gt;");
/// assert_eq!(escape_compat(r#"say "hi""#), "say &quot;hi&quot;");
/// assert_eq!(escape_compat("it's"), "it's");
/// assert_eq!(escape_compat("&amp;"), "&amp;amp;");
/// ```
pub fn escape_compat(text: &str) -> String {
	let mut result = String::with_capacity(text.len() + 10);
	for ch in text.chars() {
		match ch {
			'&' => result.push_str("&amp;"),
			'<' => result.push_str("&lt;"),
			'>' => result.push_str("&gt;"),
			'"' => result.push_str("&quot;"),
			_ => result.push(ch),
		}
	}
	result
}

/// [`HtmlEscaper`] backed by [`escape_compat`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CompatEscaper;

impl HtmlEscaper for CompatEscaper {
	fn escape(&self, text: &str) -> String {
		escape_compat(text)
	}
}

/// Quote an SQL identifier with backticks, doubling embedded backticks
///
/// # Examples
///
/// ```
/// use dbadmin_utils::html::backquote;
///
/// assert_eq!(backquote("users"), "`users`");
/// assert_eq!(backquote("we`ird"), "`we``ird`");
/// assert_eq!(backquote(""), "");
/// ```
pub fn backquote(identifier: &str) -> String {
	if identifier.is_empty() {
		return String::new();
	}
	format!("`{}`", identifier.replace('`', "``"))
}

/// Form-encode a string (`application/x-www-form-urlencoded` rules)
///
/// # Examples
///
/// ```
/// use dbadmin_utils::html::url_encode;
///
/// assert_eq!(url_encode("https://example.com/a b"), "https%3A%2F%2Fexample.com%2Fa+b");
/// assert_eq!(url_encode("safe-_.~"), "safe-_.%7E");
/// ```
pub fn url_encode(text: &str) -> String {
	let mut result = String::with_capacity(text.len() * 3);
	for byte in text.bytes() {
		match byte {
			b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' => {
				result.push(byte as char)
			}
			b' ' => result.push('+'),
			_ => result.push_str(&format!("%{:02X}", byte)),
		}
	}
	result
}
