//! Message catalog for storing translations

use crate::localizer::Localizer;
use std::collections::HashMap;

/// Translations for a single locale
///
/// # Example
/// ```
/// use dbadmin_i18n::MessageCatalog;
///
/// let mut catalog = MessageCatalog::new("pl");
/// catalog.add_plural("%1$d row inserted.", vec!["wiersz", "wiersze", "wierszy"]);
///
/// assert_eq!(catalog.get_plural("%1$d row inserted.", 1), Some("wiersz"));
/// assert_eq!(catalog.get_plural("%1$d row inserted.", 3), Some("wiersze"));
/// assert_eq!(catalog.get_plural("%1$d row inserted.", 5), Some("wierszy"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
	locale: String,
	messages: HashMap<String, String>,
	plurals: HashMap<String, Vec<String>>,
}

impl MessageCatalog {
	/// Create an empty catalog for `locale`
	pub fn new(locale: &str) -> Self {
		Self {
			locale: locale.to_string(),
			messages: HashMap::new(),
			plurals: HashMap::new(),
		}
	}

	pub fn locale(&self) -> &str {
		&self.locale
	}

	/// Number of singular and plural entries
	pub fn len(&self) -> usize {
		self.messages.len() + self.plurals.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Add a simple translation
	pub fn add_translation(&mut self, msgid: impl Into<String>, translation: impl Into<String>) {
		self.messages.insert(msgid.into(), translation.into());
	}

	/// Add the plural forms of `singular`, ordered by plural index
	pub fn add_plural<S: Into<String>>(&mut self, singular: impl Into<String>, forms: Vec<S>) {
		self.plurals.insert(
			singular.into(),
			forms.into_iter().map(Into::into).collect(),
		);
	}

	/// Get a translation, ignoring empty (untranslated) entries
	pub fn get(&self, msgid: &str) -> Option<&str> {
		self.messages
			.get(msgid)
			.map(String::as_str)
			.filter(|s| !s.is_empty())
	}

	/// Get the plural form of `singular` selected by `count`
	pub fn get_plural(&self, singular: &str, count: u64) -> Option<&str> {
		let forms = self.plurals.get(singular)?;
		forms
			.get(plural_index(&self.locale, count))
			.map(String::as_str)
			.filter(|s| !s.is_empty())
	}
}

impl Localizer for MessageCatalog {
	fn gettext(&self, msgid: &str) -> String {
		self.get(msgid).unwrap_or(msgid).to_string()
	}

	fn ngettext(&self, singular: &str, plural: &str, n: u64) -> String {
		match self.get_plural(singular, n) {
			Some(form) => form.to_string(),
			None if n == 1 => singular.to_string(),
			None => plural.to_string(),
		}
	}
}

/// Plural form index for `count` under the rules of `locale`
///
/// Supported families:
/// - single form (ja, zh, ko, vi, th, id, ms, tr, fa, ka)
/// - French and Brazilian Portuguese: 0 and 1 singular
/// - Slavic 3-form (ru, uk, be, sr, hr, bs), Polish, Czech/Slovak
/// - Slovenian (4 forms), Arabic (6), Irish (5), Welsh (6)
/// - Lithuanian, Latvian, Romanian (3 forms)
/// - Germanic default: 1 singular, everything else plural
///
/// ```
/// use dbadmin_i18n::plural_index;
///
/// assert_eq!(plural_index("en", 1), 0);
/// assert_eq!(plural_index("en", 0), 1);
/// assert_eq!(plural_index("fr", 0), 0);
/// assert_eq!(plural_index("pt_BR", 1), 0);
/// assert_eq!(plural_index("ru", 22), 1);
/// assert_eq!(plural_index("ja", 7), 0);
/// ```
pub fn plural_index(locale: &str, count: u64) -> usize {
	let lang = locale.split(['-', '_']).next().unwrap_or(locale);
	let n10 = count % 10;
	let n100 = count % 100;

	match lang {
		"ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "tr" | "fa" | "ka" => 0,

		"fr" => usize::from(count > 1),

		"pt" => {
			if locale.starts_with("pt_BR") || locale.starts_with("pt-BR") {
				usize::from(count > 1)
			} else {
				usize::from(count != 1)
			}
		}

		"ru" | "uk" | "be" | "sr" | "hr" | "bs" => {
			if n10 == 1 && n100 != 11 {
				0
			} else if (2..=4).contains(&n10) && !(10..20).contains(&n100) {
				1
			} else {
				2
			}
		}

		"pl" => {
			if count == 1 {
				0
			} else if (2..=4).contains(&n10) && !(10..20).contains(&n100) {
				1
			} else {
				2
			}
		}

		"cs" | "sk" => match count {
			1 => 0,
			2..=4 => 1,
			_ => 2,
		},

		"sl" => match n100 {
			1 => 0,
			2 => 1,
			3 | 4 => 2,
			_ => 3,
		},

		"ar" => {
			if count <= 2 {
				count as usize
			} else if (3..=10).contains(&n100) {
				3
			} else if n100 >= 11 {
				4
			} else {
				5
			}
		}

		"ga" => match count {
			1 => 0,
			2 => 1,
			3..=6 => 2,
			7..=10 => 3,
			_ => 4,
		},

		"cy" => match count {
			0..=3 => count as usize,
			6 => 4,
			_ => 5,
		},

		"lt" => {
			if n10 == 1 && n100 != 11 {
				0
			} else if n10 >= 2 && !(10..20).contains(&n100) {
				1
			} else {
				2
			}
		}

		"lv" => {
			if n10 == 1 && n100 != 11 {
				0
			} else if count != 0 {
				1
			} else {
				2
			}
		}

		"ro" => {
			if count == 1 {
				0
			} else if count == 0 || (1..20).contains(&n100) {
				1
			} else {
				2
			}
		}

		_ => usize::from(count != 1),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_catalog_lookup_and_fallback() {
		// Arrange
		let mut catalog = MessageCatalog::new("de");
		catalog.add_translation("Error", "Fehler");
		catalog.add_translation("Untranslated", "");

		// Act
		let translated = catalog.gettext("Error");
		let empty = catalog.gettext("Untranslated");
		let missing = catalog.gettext("Missing");

		// Assert
		assert_eq!(translated, "Fehler");
		assert_eq!(empty, "Untranslated");
		assert_eq!(missing, "Missing");
	}

	#[rstest]
	fn test_ngettext_falls_back_to_source_forms() {
		let catalog = MessageCatalog::new("de");
		assert_eq!(catalog.ngettext("row", "rows", 1), "row");
		assert_eq!(catalog.ngettext("row", "rows", 4), "rows");
	}

	#[rstest]
	fn test_ngettext_missing_form_index() {
		// Arrange: only one form supplied for a two-form language
		let mut catalog = MessageCatalog::new("de");
		catalog.add_plural("row", vec!["Zeile"]);

		// Act / Assert
		assert_eq!(catalog.ngettext("row", "rows", 1), "Zeile");
		assert_eq!(catalog.ngettext("row", "rows", 2), "rows");
	}

	#[rstest]
	fn test_len() {
		let mut catalog = MessageCatalog::new("de");
		assert!(catalog.is_empty());
		catalog.add_translation("a", "b");
		catalog.add_plural("c", vec!["d", "e"]);
		assert_eq!(catalog.len(), 2);
		assert_eq!(catalog.locale(), "de");
	}

	#[rstest]
	#[case("ru", 1, 0)]
	#[case("ru", 11, 2)]
	#[case("ru", 3, 1)]
	#[case("ru", 14, 2)]
	#[case("ru", 25, 2)]
	#[case("pl", 22, 1)]
	#[case("pl", 12, 2)]
	#[case("cs", 4, 1)]
	#[case("cs", 5, 2)]
	#[case("sl", 102, 1)]
	#[case("ar", 0, 0)]
	#[case("ar", 2, 2)]
	#[case("ar", 105, 3)]
	#[case("ar", 111, 4)]
	#[case("ar", 100, 5)]
	#[case("ga", 8, 3)]
	#[case("cy", 6, 4)]
	#[case("cy", 8, 5)]
	#[case("lt", 12, 2)]
	#[case("lv", 0, 2)]
	#[case("ro", 19, 1)]
	#[case("ro", 20, 2)]
	#[case("pt_PT", 0, 1)]
	#[case("de_DE", 1, 0)]
	fn test_plural_rules(#[case] locale: &str, #[case] count: u64, #[case] expected: usize) {
		assert_eq!(plural_index(locale, count), expected);
	}
}
