//! BB-code decoding for status messages
//!
//! Supported markup:
//!
//! | Markup                | Output                                        |
//! |-----------------------|-----------------------------------------------|
//! | `[em]`, `[/em]`       | `<em>`, `</em>`                               |
//! | `[strong]`, `[/strong]` | `<strong>`, `</strong>`                     |
//! | `[code]`, `[/code]`   | `<code>`, `</code>`                           |
//! | `[kbd]`, `[/kbd]`     | `<kbd>`, `</kbd>`                             |
//! | `[sup]`, `[/sup]`     | `<sup>`, `</sup>`                             |
//! | `[br]`                | `<br>`                                        |
//! | `[/a]`, `[/doc]`      | `</a>`                                        |
//! | `[dochelpicon]`       | help icon                                     |
//! | `[a@url@target]`      | `<a href="url" target="target">` (allowed links only) |
//! | `[doc@page@anchor]`   | link into the documentation                   |
//!
//! The input is trusted: no escaping happens here.

use crate::html::url_encode;
use crate::icons::IconSet;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static LINK_REGEX: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r#"\[a@([^\]"@]*)(@([^\]"]*))?\]"#).expect("Invalid link markup regex")
});

static DOC_REGEX: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"\[doc@([a-zA-Z0-9_-]+)(@[a-zA-Z0-9_.-]+)?\]").expect("Invalid doc markup regex")
});

const SIMPLE_TAGS: &[(&str, &str)] = &[
	("[em]", "<em>"),
	("[/em]", "</em>"),
	("[strong]", "<strong>"),
	("[/strong]", "</strong>"),
	("[code]", "<code>"),
	("[/code]", "</code>"),
	("[kbd]", "<kbd>"),
	("[/kbd]", "</kbd>"),
	("[br]", "<br>"),
	("[/a]", "</a>"),
	("[/doc]", "</a>"),
	("[sup]", "<sup>"),
	("[/sup]", "</sup>"),
];

/// Turns inline markup into HTML
pub trait MarkupDecoder: Send + Sync {
	fn decode(&self, text: &str) -> String;
}

/// Decoder for the BB-code subset listed in the module docs
#[derive(Debug, Clone)]
pub struct BbCodeDecoder {
	docs_url: String,
	allowed_link_prefixes: Vec<String>,
	icons: IconSet,
}

impl BbCodeDecoder {
	/// Create a decoder
	///
	/// * `docs_url` - base URL `[doc@page]` links point into (`{docs_url}{page}.html`)
	/// * `allowed_link_prefixes` - `[a@url]` links are only expanded when `url`
	///   starts with one of these
	/// * `icons` - icon builder for `[dochelpicon]`
	pub fn new(
		docs_url: impl Into<String>,
		allowed_link_prefixes: Vec<String>,
		icons: IconSet,
	) -> Self {
		Self {
			docs_url: docs_url.into(),
			allowed_link_prefixes,
			icons,
		}
	}

	/// Whether `[a@url]` may be expanded for `url`
	pub fn is_allowed_link(&self, url: &str) -> bool {
		self.allowed_link_prefixes
			.iter()
			.any(|prefix| url.starts_with(prefix.as_str()))
	}

	/// Link to a documentation page, routed through the redirector
	///
	/// ```
	/// use dbadmin_utils::BbCodeDecoder;
	///
	/// let decoder = BbCodeDecoder::default();
	/// assert_eq!(
	///     decoder.documentation_link("config", Some("cfg_Servers")),
	///     "./url.php?url=https%3A%2F%2Fdocs.phpmyadmin.net%2Fen%2Flatest%2Fconfig.html%23cfg_Servers"
	/// );
	/// ```
	pub fn documentation_link(&self, page: &str, anchor: Option<&str>) -> String {
		let mut url = format!("{}{}.html", self.docs_url, page);
		if let Some(anchor) = anchor.filter(|a| !a.is_empty()) {
			url.push('#');
			url.push_str(anchor);
		}
		external_link(&url)
	}

	fn replace_link(&self, caps: &Captures<'_>) -> String {
		let url = &caps[1];
		if !self.is_allowed_link(url) {
			tracing::debug!(url, "link markup to a disallowed target left as is");
			return caps[0].to_string();
		}

		let mut target = String::new();
		if let Some(name) = caps.get(3).map(|m| m.as_str()).filter(|t| !t.is_empty()) {
			target = format!(" target=\"{}\"", name);
			if name == "_blank" {
				target.push_str(" rel=\"noopener noreferrer\"");
			}
		}

		let href = if url.starts_with("http") {
			external_link(url)
		} else {
			url.to_string()
		};
		format!("<a href=\"{}\"{}>", href, target)
	}

	fn replace_doc(&self, caps: &Captures<'_>) -> String {
		let anchor = caps.get(2).map(|m| &m.as_str()[1..]);
		format!(
			"<a href=\"{}\" target=\"documentation\">",
			self.documentation_link(&caps[1], anchor)
		)
	}
}

impl Default for BbCodeDecoder {
	fn default() -> Self {
		Self::new(
			"https://docs.phpmyadmin.net/en/latest/",
			vec![
				"./url.php?url=https%3a%2f%2f".to_string(),
				"./doc/html/".to_string(),
				"./index.php?route=/changelog".to_string(),
				"./index.php?route=/license".to_string(),
				"https://www.phpmyadmin.net/".to_string(),
				"https://docs.phpmyadmin.net/".to_string(),
				"https://dev.mysql.com/".to_string(),
				"https://mariadb.com/".to_string(),
			],
			IconSet::default(),
		)
	}
}

impl MarkupDecoder for BbCodeDecoder {
	fn decode(&self, text: &str) -> String {
		let mut decoded = text.to_string();
		for (markup, html) in SIMPLE_TAGS {
			if decoded.contains(markup) {
				decoded = decoded.replace(markup, html);
			}
		}
		if decoded.contains("[dochelpicon]") {
			decoded = decoded.replace("[dochelpicon]", &self.icons.image("b_help", "Documentation"));
		}

		let decoded = LINK_REGEX.replace_all(&decoded, |caps: &Captures<'_>| self.replace_link(caps));
		DOC_REGEX
			.replace_all(&decoded, |caps: &Captures<'_>| self.replace_doc(caps))
			.into_owned()
	}
}

/// Route an external URL through the redirector page
fn external_link(url: &str) -> String {
	format!("./url.php?url={}", url_encode(url))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("[em]a[/em]", "<em>a</em>")]
	#[case("[strong]b[/strong] [code]c[/code]", "<strong>b</strong> <code>c</code>")]
	#[case("x[br]y", "x<br>y")]
	#[case("[kbd]Ctrl[/kbd][sup]2[/sup]", "<kbd>Ctrl</kbd><sup>2</sup>")]
	#[case("no markup", "no markup")]
	#[case("<b>html passes through</b>", "<b>html passes through</b>")]
	fn test_simple_tags(#[case] input: &str, #[case] expected: &str) {
		let decoder = BbCodeDecoder::default();
		assert_eq!(decoder.decode(input), expected);
	}

	#[rstest]
	fn test_allowed_external_link() {
		// Arrange
		let decoder = BbCodeDecoder::default();

		// Act
		let html = decoder.decode("[a@https://www.phpmyadmin.net/@_blank]site[/a]");

		// Assert
		assert_eq!(
			html,
			"<a href=\"./url.php?url=https%3A%2F%2Fwww.phpmyadmin.net%2F\" target=\"_blank\" rel=\"noopener noreferrer\">site</a>"
		);
	}

	#[rstest]
	fn test_allowed_relative_link_without_target() {
		let decoder = BbCodeDecoder::default();
		assert_eq!(
			decoder.decode("[a@./doc/html/index.html]docs[/a]"),
			"<a href=\"./doc/html/index.html\">docs</a>"
		);
	}

	#[rstest]
	fn test_disallowed_link_left_verbatim() {
		let decoder = BbCodeDecoder::default();
		assert_eq!(
			decoder.decode("[a@https://evil.example/]x[/a]"),
			"[a@https://evil.example/]x</a>"
		);
	}

	#[rstest]
	fn test_doc_link_with_and_without_anchor() {
		// Arrange
		let decoder = BbCodeDecoder::new("https://docs.example/", vec![], IconSet::default());

		// Act
		let with_anchor = decoder.decode("[doc@faq@faq1-1]FAQ[/doc]");
		let without_anchor = decoder.decode("[doc@setup]Setup[/doc]");

		// Assert
		assert_eq!(
			with_anchor,
			"<a href=\"./url.php?url=https%3A%2F%2Fdocs.example%2Ffaq.html%23faq1-1\" target=\"documentation\">FAQ</a>"
		);
		assert_eq!(
			without_anchor,
			"<a href=\"./url.php?url=https%3A%2F%2Fdocs.example%2Fsetup.html\" target=\"documentation\">Setup</a>"
		);
	}

	#[rstest]
	fn test_dochelpicon() {
		let decoder = BbCodeDecoder::default();
		assert_eq!(
			decoder.decode("[dochelpicon]"),
			"<img src=\"themes/dot.gif\" title=\"Documentation\" alt=\"Documentation\" class=\"icon ic_b_help\">"
		);
	}
}
