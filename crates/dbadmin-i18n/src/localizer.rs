//! Translation lookup abstraction

/// Translation lookup used while compiling user-facing text
///
/// Implementations fall back to the source text when no translation exists.
pub trait Localizer: Send + Sync {
	/// Translate `msgid`
	fn gettext(&self, msgid: &str) -> String;

	/// Translate a message with a plural form selected by `n`
	fn ngettext(&self, singular: &str, plural: &str, n: u64) -> String;
}

/// Localizer returning the source text, with the English plural rule
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLocalizer;

impl Localizer for IdentityLocalizer {
	fn gettext(&self, msgid: &str) -> String {
		msgid.to_string()
	}

	fn ngettext(&self, singular: &str, plural: &str, n: u64) -> String {
		let form = if n == 1 { singular } else { plural };
		form.to_string()
	}
}
