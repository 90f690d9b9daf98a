//! Settings structure and loaders

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version series the themes must declare in their `supports` list
pub const VERSION_SERIES: &str = "5.2";

/// Theme used when the active theme lacks an image directory
pub const FALLBACK_THEME: &str = "pmahomme";

/// Settings error
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("File error: {0}")]
	FileError(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),
}

/// Application settings
///
/// Every field has a default so that a partial TOML document is enough.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Index of the currently selected database server
	pub server: u32,

	/// User logged into the selected server, if any
	pub user: Option<String>,

	/// Active locale (`en`, `fr`, `pt_BR`, ...)
	pub locale: String,

	/// Version series themes must support
	pub version_series: String,

	/// Themes directory on the file system
	pub themes_dir: PathBuf,

	/// Themes directory as seen from the browser
	pub themes_url: String,

	/// Theme providing images for themes without their own
	pub fallback_theme: String,

	/// Base URL of the documentation used by `[doc@...]` links
	pub docs_url: String,

	/// Transparent image used as the sprite carrier for icons
	pub blank_image: String,

	/// Link prefixes accepted by `[a@...]` markup
	pub allowed_link_prefixes: Vec<String>,

	/// Whether foreign key checks are enabled by default on destructive forms
	pub foreign_key_checks: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			server: 1,
			user: None,
			locale: "en".to_string(),
			version_series: VERSION_SERIES.to_string(),
			themes_dir: PathBuf::from("./themes/"),
			themes_url: "./themes/".to_string(),
			fallback_theme: FALLBACK_THEME.to_string(),
			docs_url: "https://docs.phpmyadmin.net/en/latest/".to_string(),
			blank_image: "themes/dot.gif".to_string(),
			allowed_link_prefixes: vec![
				"./url.php?url=https%3a%2f%2f".to_string(),
				"./doc/html/".to_string(),
				"./index.php?route=/changelog".to_string(),
				"./index.php?route=/license".to_string(),
				"https://www.phpmyadmin.net/".to_string(),
				"https://docs.phpmyadmin.net/".to_string(),
				"https://dev.mysql.com/".to_string(),
				"https://mariadb.com/".to_string(),
			],
			foreign_key_checks: true,
		}
	}
}

impl Settings {
	/// Parse settings from a TOML document
	pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
		let settings: Settings = toml::from_str(contents)
			.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))?;
		settings.validate()?;
		Ok(settings)
	}

	/// Load settings from a `.toml` or `.json` file
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let contents = std::fs::read_to_string(path).map_err(|e| {
			SettingsError::FileError(format!("Failed to read {}: {}", path.display(), e))
		})?;

		let settings: Settings = match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => toml::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))?,
			Some("json") => serde_json::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("JSON parse error: {}", e)))?,
			_ => {
				return Err(SettingsError::UnsupportedFormat(
					"Supported formats: .toml, .json".to_string(),
				));
			}
		};

		settings.validate()?;
		tracing::debug!(path = %path.display(), server = settings.server, "settings loaded");
		Ok(settings)
	}

	/// Check values that serde cannot reject on its own
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.server == 0 {
			return Err(SettingsError::ValidationError(
				"server index starts at 1".to_string(),
			));
		}
		if self.locale.trim().is_empty() {
			return Err(SettingsError::ValidationError(
				"locale must not be empty".to_string(),
			));
		}
		if self.fallback_theme.is_empty() {
			return Err(SettingsError::ValidationError(
				"fallback_theme must not be empty".to_string(),
			));
		}
		Ok(())
	}

	/// Session cache key for the selected server and user
	///
	/// ```
	/// use dbadmin_conf::Settings;
	///
	/// let mut settings = Settings::default();
	/// assert_eq!(settings.cache_key(), "server_1");
	/// settings.user = Some("pma".to_string());
	/// assert_eq!(settings.cache_key(), "server_1_pma");
	/// ```
	pub fn cache_key(&self) -> String {
		match &self.user {
			Some(user) => format!("server_{}_{}", self.server, user),
			None => format!("server_{}", self.server),
		}
	}
}
