//! Sprite icon markup
//!
//! Icons are rendered as a transparent image carrying an `ic_<name>` class;
//! the theme stylesheet maps that class to a sprite position.

use crate::html::escape_compat;

/// Builder of icon `<img>` tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSet {
	blank_image: String,
}

impl IconSet {
	/// Create an icon set using `blank_image` as the `src` of every icon
	pub fn new(blank_image: impl Into<String>) -> Self {
		Self {
			blank_image: blank_image.into(),
		}
	}

	/// The image used as `src`
	pub fn blank_image(&self) -> &str {
		&self.blank_image
	}

	/// Render the icon `name` with an alternate text
	///
	/// The `title` attribute is only emitted for a non-empty alternate text.
	///
	/// # Examples
	///
	/// ```
	/// use dbadmin_utils::IconSet;
	///
	/// let icons = IconSet::default();
	/// assert_eq!(
	///     icons.image("s_error", ""),
	///     r#"<img src="themes/dot.gif" alt="" class="icon ic_s_error">"#
	/// );
	/// assert_eq!(
	///     icons.image("b_help", "Documentation"),
	///     r#"<img src="themes/dot.gif" title="Documentation" alt="Documentation" class="icon ic_b_help">"#
	/// );
	/// ```
	pub fn image(&self, name: &str, alternate: &str) -> String {
		let alternate = escape_compat(alternate);
		let title = if alternate.is_empty() {
			String::new()
		} else {
			format!(" title=\"{}\"", alternate)
		};
		format!(
			"<img src=\"{}\"{} alt=\"{}\" class=\"icon ic_{}\">",
			self.blank_image, title, alternate, name
		)
	}
}

impl Default for IconSet {
	fn default() -> Self {
		Self::new("themes/dot.gif")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_custom_blank_image() {
		let icons = IconSet::new("static/blank.png");
		assert_eq!(
			icons.image("s_success", ""),
			"<img src=\"static/blank.png\" alt=\"\" class=\"icon ic_s_success\">"
		);
	}

	#[rstest]
	fn test_alternate_is_escaped() {
		let icons = IconSet::default();
		let html = icons.image("s_notice", "<Note>");
		assert!(html.contains("alt=\"&lt;Note&gt;\""));
		assert!(html.contains("title=\"&lt;Note&gt;\""));
	}
}
