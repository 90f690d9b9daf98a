//! Message level definitions

use serde::{Deserialize, Serialize};

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
	Success,
	#[default]
	Notice,
	Error,
}

impl Level {
	/// Numeric code of the level, part of the message hash input
	///
	/// # Examples
	///
	/// ```
	/// use dbadmin_messages::Level;
	///
	/// assert_eq!(Level::Success.code(), 1);
	/// assert_eq!(Level::Notice.code(), 2);
	/// assert_eq!(Level::Error.code(), 8);
	/// ```
	pub fn code(&self) -> u8 {
		match self {
			Level::Success => 1,
			Level::Notice => 2,
			Level::Error => 8,
		}
	}

	/// Returns the string representation of the level
	pub fn as_str(&self) -> &'static str {
		match self {
			Level::Success => "success",
			Level::Notice => "notice",
			Level::Error => "error",
		}
	}

	/// UI severity tag used as the alert class suffix
	///
	/// # Examples
	///
	/// ```
	/// use dbadmin_messages::Level;
	///
	/// assert_eq!(Level::Error.context(), "danger");
	/// assert_eq!(Level::Success.context(), "success");
	/// assert_eq!(Level::Notice.context(), "primary");
	/// ```
	pub fn context(&self) -> &'static str {
		match self {
			Level::Error => "danger",
			Level::Success => "success",
			Level::Notice => "primary",
		}
	}

	/// Name of the sprite icon shown in front of displayed messages
	pub fn icon_name(&self) -> &'static str {
		match self {
			Level::Error => "s_error",
			Level::Success => "s_success",
			Level::Notice => "s_notice",
		}
	}

	/// Parses a level from a string (case-insensitive)
	pub fn parse(s: &str) -> Option<Self> {
		match s.to_lowercase().as_str() {
			"success" => Some(Level::Success),
			"notice" => Some(Level::Notice),
			"error" => Some(Level::Error),
			_ => None,
		}
	}

	/// Creates a level from its numeric code
	pub fn from_code(code: u8) -> Option<Self> {
		match code {
			1 => Some(Level::Success),
			2 => Some(Level::Notice),
			8 => Some(Level::Error),
			_ => None,
		}
	}
}

impl std::fmt::Display for Level {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_default_level() {
		assert_eq!(Level::default(), Level::Notice);
	}

	#[rstest]
	#[case("success", Some(Level::Success))]
	#[case("NOTICE", Some(Level::Notice))]
	#[case("Error", Some(Level::Error))]
	#[case("warning", None)]
	#[case("", None)]
	fn test_parse(#[case] input: &str, #[case] expected: Option<Level>) {
		assert_eq!(Level::parse(input), expected);
	}

	#[rstest]
	fn test_code_round_trip() {
		for level in [Level::Success, Level::Notice, Level::Error] {
			assert_eq!(Level::from_code(level.code()), Some(level));
		}
		assert_eq!(Level::from_code(4), None);
	}

	#[rstest]
	fn test_display_and_serde() {
		assert_eq!(Level::Error.to_string(), "error");
		assert_eq!(serde_json::to_string(&Level::Success).unwrap(), "\"success\"");
		let level: Level = serde_json::from_str("\"notice\"").unwrap();
		assert_eq!(level, Level::Notice);
	}

	#[rstest]
	fn test_icon_names() {
		assert_eq!(Level::Error.icon_name(), "s_error");
		assert_eq!(Level::Success.icon_name(), "s_success");
		assert_eq!(Level::Notice.icon_name(), "s_notice");
	}
}
