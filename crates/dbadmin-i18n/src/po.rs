//! Gettext `.po` loader
//!
//! Only the subset needed for status messages is understood: `msgid`,
//! `msgid_plural`, `msgstr`, `msgstr[n]` and continuation lines. Entries with
//! a `msgctxt` are skipped, as is the header entry.

use crate::catalog::MessageCatalog;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Upper bound on `msgstr[n]` indices, gettext's largest `nplurals`
pub const MAX_PLURAL_FORMS: usize = 6;

/// Errors raised while reading a `.po` file
#[derive(Debug, thiserror::Error)]
pub enum PoError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("Parse error at line {line}: {message}")]
	Parse { line: usize, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
	Context,
	Id,
	IdPlural,
	Str(usize),
}

#[derive(Debug, Default)]
struct Entry {
	context: Option<String>,
	id: String,
	id_plural: Option<String>,
	strs: Vec<String>,
}

impl Entry {
	fn field_mut(&mut self, field: Field) -> &mut String {
		match field {
			Field::Context => self.context.get_or_insert_with(String::new),
			Field::Id => &mut self.id,
			Field::IdPlural => self.id_plural.get_or_insert_with(String::new),
			Field::Str(index) => {
				if self.strs.len() <= index {
					self.strs.resize(index + 1, String::new());
				}
				&mut self.strs[index]
			}
		}
	}

	fn commit(self, catalog: &mut MessageCatalog) {
		if self.id.is_empty() || self.context.is_some() {
			return;
		}
		if self.id_plural.is_some() {
			catalog.add_plural(self.id, self.strs);
		} else if let Some(translation) = self.strs.into_iter().next() {
			catalog.add_translation(self.id, translation);
		}
	}
}

/// Parse `.po` content into a catalog for `locale`
///
/// ```
/// use dbadmin_i18n::parse_po;
///
/// let po = "msgid \"Error\"\nmsgstr \"Erreur\"\n";
/// let catalog = parse_po(po.as_bytes(), "fr").unwrap();
/// assert_eq!(catalog.get("Error"), Some("Erreur"));
/// ```
pub fn parse_po<R: Read>(reader: R, locale: &str) -> Result<MessageCatalog, PoError> {
	let mut catalog = MessageCatalog::new(locale);
	let mut entry = Entry::default();
	let mut field: Option<Field> = None;

	for (number, line) in BufReader::new(reader).lines().enumerate() {
		let line = line?;
		let line_no = number + 1;
		let trimmed = line.trim();

		if trimmed.is_empty() || trimmed.starts_with('#') {
			continue;
		}

		if trimmed.starts_with('"') {
			let value = quoted(trimmed, line_no)?;
			let current = field.ok_or_else(|| PoError::Parse {
				line: line_no,
				message: "continuation line without a keyword".to_string(),
			})?;
			entry.field_mut(current).push_str(&value);
			continue;
		}

		let (keyword, rest) = trimmed
			.split_once(char::is_whitespace)
			.ok_or_else(|| PoError::Parse {
				line: line_no,
				message: format!("expected keyword and value, got `{}`", trimmed),
			})?;
		let next = keyword_field(keyword, line_no)?;

		// A new msgctxt/msgid after a msgstr starts the next entry
		let starts_entry = matches!(next, Field::Context | Field::Id);
		if starts_entry && matches!(field, Some(Field::Str(_))) {
			std::mem::take(&mut entry).commit(&mut catalog);
		}

		let value = quoted(rest.trim(), line_no)?;
		entry.field_mut(next).push_str(&value);
		field = Some(next);
	}

	entry.commit(&mut catalog);
	Ok(catalog)
}

/// Load a `.po` file from disk
pub fn load_po_file(path: impl AsRef<Path>, locale: &str) -> Result<MessageCatalog, PoError> {
	let path = path.as_ref();
	let file = std::fs::File::open(path)?;
	let catalog = parse_po(file, locale)?;
	tracing::debug!(
		path = %path.display(),
		locale,
		entries = catalog.len(),
		"translation catalog loaded"
	);
	Ok(catalog)
}

fn keyword_field(keyword: &str, line: usize) -> Result<Field, PoError> {
	match keyword {
		"msgctxt" => return Ok(Field::Context),
		"msgid" => return Ok(Field::Id),
		"msgid_plural" => return Ok(Field::IdPlural),
		"msgstr" => return Ok(Field::Str(0)),
		_ => {}
	}

	let index = keyword
		.strip_prefix("msgstr[")
		.and_then(|rest| rest.strip_suffix(']'))
		.ok_or_else(|| PoError::Parse {
			line,
			message: format!("unknown keyword `{}`", keyword),
		})?;
	match index.parse::<usize>() {
		Ok(index) if index < MAX_PLURAL_FORMS => Ok(Field::Str(index)),
		_ => Err(PoError::Parse {
			line,
			message: format!("invalid plural index `{}`", index),
		}),
	}
}

fn quoted(value: &str, line: usize) -> Result<String, PoError> {
	let inner = value
		.strip_prefix('"')
		.and_then(|v| v.strip_suffix('"'))
		.filter(|_| value.len() >= 2)
		.ok_or_else(|| PoError::Parse {
			line,
			message: format!("expected a quoted string, got `{}`", value),
		})?;
	Ok(unescape(inner))
}

fn unescape(s: &str) -> String {
	let mut result = String::with_capacity(s.len());
	let mut chars = s.chars();

	while let Some(ch) = chars.next() {
		if ch != '\\' {
			result.push(ch);
			continue;
		}
		match chars.next() {
			Some('n') => result.push('\n'),
			Some('t') => result.push('\t'),
			Some('r') => result.push('\r'),
			Some('"') => result.push('"'),
			Some('\\') => result.push('\\'),
			Some(other) => {
				result.push('\\');
				result.push(other);
			}
			None => result.push('\\'),
		}
	}

	result
}
