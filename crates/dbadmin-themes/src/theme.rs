//! Theme metadata and image paths

use crate::version::version_compare;
use dbadmin_conf::Settings;
use serde::Deserialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Name of the metadata file inside a theme directory
pub const INFO_FILE: &str = "theme.json";

/// Errors raised while loading a theme
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
	#[error("Failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("No valid image path for theme {0} found!")]
	NoImagePath(String),
}

/// Contents of `theme.json`
///
/// `name`, `version` and `supports` are required; the remaining members are
/// informational.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThemeInfo {
	pub name: String,
	pub version: String,
	pub supports: Vec<Value>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub author: Option<String>,
	#[serde(default)]
	pub url: Option<String>,
}

impl ThemeInfo {
	/// Parse metadata, `None` when a required member is missing or mistyped
	pub fn parse(content: &str) -> Option<Self> {
		serde_json::from_str(content).ok()
	}

	/// Whether the theme declares support for a version series
	///
	/// Series may be listed as strings or numbers.
	///
	/// ```
	/// use dbadmin_themes::ThemeInfo;
	///
	/// let info = ThemeInfo::parse(r#"{"name": "A", "version": "1", "supports": ["5.1", 5.2]}"#).unwrap();
	/// assert!(info.supports_series("5.2"));
	/// assert!(info.supports_series("5.1"));
	/// assert!(!info.supports_series("4.9"));
	/// ```
	pub fn supports_series(&self, series: &str) -> bool {
		self.supports.iter().any(|entry| match entry {
			Value::String(s) => s == series,
			Value::Number(n) => n.to_string() == series,
			_ => false,
		})
	}
}

/// A loaded theme
#[derive(Debug, Clone)]
pub struct Theme {
	id: String,
	name: String,
	version: String,
	path: String,
	fs_path: PathBuf,
	img_path: String,
	img_path_fs: PathBuf,
	version_series: String,
	themes_dir: PathBuf,
	themes_url: String,
	fallback_theme: String,
	mtime_info: Option<SystemTime>,
	filesize_info: u64,
}

impl Theme {
	/// Empty theme using the theme locations of `settings`
	pub fn new(settings: &Settings) -> Self {
		Self {
			id: String::new(),
			name: String::new(),
			version: "0.0.0.0".to_string(),
			path: String::new(),
			fs_path: PathBuf::new(),
			img_path: String::new(),
			img_path_fs: PathBuf::new(),
			version_series: settings.version_series.clone(),
			themes_dir: settings.themes_dir.clone(),
			themes_url: settings.themes_url.clone(),
			fallback_theme: settings.fallback_theme.clone(),
			mtime_info: None,
			filesize_info: 0,
		}
	}

	/// Load the theme found at `fs_path`, served from `url_path`
	///
	/// Returns `Ok(None)` when the metadata is missing or invalid.
	pub fn load(
		url_path: &str,
		fs_path: impl Into<PathBuf>,
		id: &str,
		settings: &Settings,
	) -> Result<Option<Self>, ThemeError> {
		let mut theme = Self::new(settings);
		theme.set_path(url_path);
		theme.set_fs_path(fs_path);

		if !theme.load_info()? {
			return Ok(None);
		}

		theme.check_img_path()?;
		theme.set_id(id);
		Ok(Some(theme))
	}

	/// Read `theme.json`, returning whether it holds valid metadata
	///
	/// The file is parsed again only when its modification time changed
	/// since the last successful read.
	pub fn load_info(&mut self) -> Result<bool, ThemeError> {
		let info_file = self.fs_path.join(INFO_FILE);
		let Ok(metadata) = std::fs::metadata(&info_file) else {
			return Ok(false);
		};
		let mtime = metadata.modified().ok();
		if mtime.is_some() && self.mtime_info == mtime {
			return Ok(true);
		}

		let content = std::fs::read_to_string(&info_file).map_err(|source| ThemeError::Io {
			path: info_file.clone(),
			source,
		})?;
		let Some(info) = ThemeInfo::parse(&content) else {
			tracing::warn!(path = %info_file.display(), "invalid theme metadata");
			return Ok(false);
		};
		if !info.supports_series(&self.version_series) {
			tracing::debug!(
				path = %info_file.display(),
				series = %self.version_series,
				"theme does not support this version"
			);
			return Ok(false);
		}

		self.mtime_info = mtime;
		self.filesize_info = metadata.len();
		self.set_version(info.version);
		self.set_name(info.name);
		Ok(true)
	}

	/// Resolve the image directory, borrowing the fallback theme's if needed
	pub fn check_img_path(&mut self) -> Result<(), ThemeError> {
		let own = self.fs_path.join("img");
		if own.is_dir() {
			self.img_path = format!("{}/img/", self.path);
			self.img_path_fs = own;
			return Ok(());
		}

		let fallback = self.themes_dir.join(&self.fallback_theme).join("img");
		if fallback.is_dir() {
			tracing::debug!(theme = %self.name, "using images of the fallback theme");
			self.img_path = format!("{}{}/img/", self.themes_url, self.fallback_theme);
			self.img_path_fs = fallback;
			return Ok(());
		}

		tracing::warn!(theme = %self.name, "no valid image path found");
		Err(ThemeError::NoImagePath(self.name.clone()))
	}

	/// URL of the image directory
	pub fn img_path(&self) -> &str {
		&self.img_path
	}

	/// URL of an image, trying `fallback` when `file` is not readable
	///
	/// Without a readable candidate the URL points into the fallback theme.
	pub fn img_path_for(&self, file: &str, fallback: Option<&str>) -> String {
		if is_readable(&self.img_path_fs.join(file)) {
			return format!("{}{}", self.img_path, file);
		}
		match fallback {
			Some(fallback) => self.img_path_for(fallback, None),
			None => format!("{}{}/img/{}", self.themes_url, self.fallback_theme, file),
		}
	}

	/// Whether the theme version is older than `version`
	pub fn check_version(&self, version: &str) -> bool {
		version_compare(&self.version, version) == Ordering::Less
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn set_id(&mut self, id: impl Into<String>) {
		self.id = id.into();
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn set_name(&mut self, name: impl Into<String>) {
		self.name = name.into().trim().to_string();
	}

	pub fn version(&self) -> &str {
		&self.version
	}

	pub fn set_version(&mut self, version: impl Into<String>) {
		self.version = version.into().trim().to_string();
	}

	/// URL of the theme directory
	pub fn path(&self) -> &str {
		&self.path
	}

	pub fn set_path(&mut self, path: impl Into<String>) {
		self.path = path.into();
	}

	pub fn fs_path(&self) -> &Path {
		&self.fs_path
	}

	pub fn set_fs_path(&mut self, fs_path: impl Into<PathBuf>) {
		self.fs_path = fs_path.into();
	}

	pub fn set_img_path(&mut self, img_path: impl Into<String>) {
		self.img_path = img_path.into();
	}

	pub fn img_path_fs(&self) -> &Path {
		&self.img_path_fs
	}

	pub fn set_img_path_fs(&mut self, img_path_fs: impl Into<PathBuf>) {
		self.img_path_fs = img_path_fs.into();
	}

	/// Size of `theme.json` at the last successful read
	pub fn filesize_info(&self) -> u64 {
		self.filesize_info
	}

	pub fn mtime_info(&self) -> Option<SystemTime> {
		self.mtime_info
	}
}

fn is_readable(path: &Path) -> bool {
	path.is_file() && std::fs::File::open(path).is_ok()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(r#"{"name": "A", "version": "1.0", "supports": ["5.2"]}"#, true)]
	#[case(r#"{"name": "A", "version": "1.0"}"#, false)]
	#[case(r#"{"name": "A", "supports": ["5.2"]}"#, false)]
	#[case(r#"{"version": "1.0", "supports": ["5.2"]}"#, false)]
	#[case(r#"{"name": "A", "version": "1.0", "supports": "5.2"}"#, false)]
	#[case(r#"["name", "version", "supports"]"#, false)]
	#[case("not json", false)]
	fn test_parse_info(#[case] content: &str, #[case] valid: bool) {
		assert_eq!(ThemeInfo::parse(content).is_some(), valid);
	}

	#[rstest]
	fn test_new_theme_defaults() {
		let theme = Theme::new(&Settings::default());
		assert_eq!(theme.version(), "0.0.0.0");
		assert_eq!(theme.name(), "");
		assert_eq!(theme.img_path(), "");
		assert_eq!(theme.mtime_info(), None);
	}

	#[rstest]
	fn test_setters_trim_name_and_version() {
		let mut theme = Theme::new(&Settings::default());
		theme.set_name(" Original ");
		theme.set_version(" 1.2 ");
		assert_eq!(theme.name(), "Original");
		assert_eq!(theme.version(), "1.2");
	}

	#[rstest]
	#[case("0.0.0.0", "1.0", true)]
	#[case("5.2.0", "5.2.0", false)]
	#[case("5.2.1", "5.2.0", false)]
	#[case("5.2.0-rc1", "5.2.0", true)]
	fn test_check_version(#[case] theme_version: &str, #[case] required: &str, #[case] older: bool) {
		let mut theme = Theme::new(&Settings::default());
		theme.set_version(theme_version);
		assert_eq!(theme.check_version(required), older);
	}
}
