//! Session data and the per-server cache kept in it

use dbadmin_conf::Settings;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Session member holding every server cache
const CACHE_KEY: &str = "cache";

static NULL: Value = Value::Null;

/// Session data as key-value pairs
///
/// # Examples
///
/// ```
/// use dbadmin_http::Session;
/// use serde_json::json;
///
/// let mut session = Session::new();
/// session.set("lang", json!("en"));
/// assert_eq!(session.get("lang"), Some(&json!("en")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
	pub data: HashMap<String, Value>,
}

impl Session {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set(&mut self, key: impl Into<String>, value: Value) {
		self.data.insert(key.into(), value);
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.data.get(key)
	}

	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.data.remove(key)
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn clear(&mut self) {
		self.data.clear();
	}
}

/// Cache scoped to one server (and user) inside a session
///
/// Entries live under `cache.server_<n>` or `cache.server_<n>_<user>`, so
/// switching servers or users never exposes another scope's entries. A
/// stored `null` counts as absent.
///
/// # Examples
///
/// ```
/// use dbadmin_http::{Session, SessionCache};
/// use serde_json::json;
///
/// let mut session = Session::new();
/// let mut cache = SessionCache::new(&mut session, 2, Some("root"));
/// cache.set("mysql_version", json!("8.0.36"));
/// assert!(cache.has("mysql_version"));
///
/// assert_eq!(
///     session.get("cache"),
///     Some(&json!({"server_2_root": {"mysql_version": "8.0.36"}}))
/// );
/// ```
#[derive(Debug)]
pub struct SessionCache<'a> {
	session: &'a mut Session,
	key: String,
}

impl<'a> SessionCache<'a> {
	pub fn new(session: &'a mut Session, server: u32, user: Option<&str>) -> Self {
		let key = match user {
			Some(user) => format!("server_{}_{}", server, user),
			None => format!("server_{}", server),
		};
		Self { session, key }
	}

	/// Cache for the server and user selected in the settings
	pub fn from_settings(session: &'a mut Session, settings: &Settings) -> Self {
		Self {
			session,
			key: settings.cache_key(),
		}
	}

	/// Scope key, e.g. `server_1_root`
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Whether a non-null value is cached under `name`
	pub fn has(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Cached value, `None` when absent or null
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.session
			.get(CACHE_KEY)
			.and_then(|cache| cache.get(&self.key))
			.and_then(|scope| scope.get(name))
			.filter(|value| !value.is_null())
	}

	/// Cached value, computing and storing it first when absent
	pub fn get_or_insert_with<F>(&mut self, name: &str, default: F) -> &Value
	where
		F: FnOnce() -> Value,
	{
		if !self.has(name) {
			tracing::debug!(scope = %self.key, name, "session cache miss");
			let value = default();
			self.set(name, value);
		}
		self.session
			.get(CACHE_KEY)
			.and_then(|cache| cache.get(&self.key))
			.and_then(|scope| scope.get(name))
			.unwrap_or(&NULL)
	}

	pub fn set(&mut self, name: &str, value: Value) {
		self.with_scope(|scope| {
			scope.insert(name.to_string(), value);
		});
	}

	pub fn remove(&mut self, name: &str) -> Option<Value> {
		self.session
			.data
			.get_mut(CACHE_KEY)
			.and_then(Value::as_object_mut)
			.and_then(|cache| cache.get_mut(&self.key))
			.and_then(Value::as_object_mut)
			.and_then(|scope| scope.remove(name))
	}

	// Malformed cache members are replaced by empty objects
	fn with_scope<R>(&mut self, f: impl FnOnce(&mut Map<String, Value>) -> R) -> R {
		let mut cache = match self.session.data.remove(CACHE_KEY) {
			Some(Value::Object(cache)) => cache,
			_ => Map::new(),
		};
		let mut scope = match cache.remove(&self.key) {
			Some(Value::Object(scope)) => scope,
			_ => Map::new(),
		};

		let result = f(&mut scope);

		cache.insert(self.key.clone(), Value::Object(scope));
		self.session
			.data
			.insert(CACHE_KEY.to_string(), Value::Object(cache));
		result
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(1, None, "server_1")]
	#[case(2, Some("root"), "server_2_root")]
	fn test_cache_key(#[case] server: u32, #[case] user: Option<&str>, #[case] expected: &str) {
		let mut session = Session::new();
		let cache = SessionCache::new(&mut session, server, user);
		assert_eq!(cache.key(), expected);
	}

	#[rstest]
	fn test_from_settings_uses_settings_key() {
		let settings = Settings {
			server: 3,
			user: Some("pma".to_string()),
			..Settings::default()
		};
		let mut session = Session::new();
		let cache = SessionCache::from_settings(&mut session, &settings);
		assert_eq!(cache.key(), "server_3_pma");
	}

	#[rstest]
	fn test_has_get_set_remove() {
		// Arrange
		let mut session = Session::new();
		let mut cache = SessionCache::new(&mut session, 1, None);

		// Act & Assert
		assert!(!cache.has("test_data"));
		assert_eq!(cache.get("test_data"), None);

		cache.set("test_data", json!(5));
		cache.set("false_data", json!(false));
		assert!(cache.has("test_data"));
		assert!(cache.has("false_data"));
		assert_eq!(cache.get("test_data"), Some(&json!(5)));

		assert_eq!(cache.remove("test_data"), Some(json!(5)));
		assert!(!cache.has("test_data"));
		assert_eq!(cache.remove("test_data"), None);
	}

	#[rstest]
	fn test_null_counts_as_absent() {
		let mut session = Session::new();
		let mut cache = SessionCache::new(&mut session, 1, None);
		cache.set("nothing", Value::Null);
		assert!(!cache.has("nothing"));
		assert_eq!(cache.get("nothing"), None);
	}

	#[rstest]
	fn test_get_or_insert_with_computes_once() {
		// Arrange
		let mut session = Session::new();
		let mut cache = SessionCache::new(&mut session, 1, None);
		let mut calls = 0;

		// Act
		let first = cache
			.get_or_insert_with("version", || {
				calls += 1;
				json!("10.11")
			})
			.clone();
		let second = cache
			.get_or_insert_with("version", || {
				calls += 1;
				json!("other")
			})
			.clone();

		// Assert
		assert_eq!(first, json!("10.11"));
		assert_eq!(second, json!("10.11"));
		assert_eq!(calls, 1);
	}

	#[rstest]
	fn test_scopes_are_isolated() {
		// Arrange
		let mut session = Session::new();
		SessionCache::new(&mut session, 1, None).set("x", json!(1));
		SessionCache::new(&mut session, 1, Some("root")).set("x", json!(2));

		// Act
		let other = SessionCache::new(&mut session, 2, None);

		// Assert
		assert!(!other.has("x"));
		assert_eq!(
			session.get("cache"),
			Some(&json!({"server_1": {"x": 1}, "server_1_root": {"x": 2}}))
		);
	}

	#[rstest]
	fn test_malformed_cache_member_is_replaced() {
		let mut session = Session::new();
		session.set("cache", json!("garbage"));
		let mut cache = SessionCache::new(&mut session, 1, None);
		assert!(!cache.has("x"));
		cache.set("x", json!(true));
		assert_eq!(session.get("cache"), Some(&json!({"server_1": {"x": true}})));
	}

	#[rstest]
	fn test_malformed_scope_is_replaced_and_siblings_kept() {
		// Arrange
		let mut session = Session::new();
		session.set("cache", json!({"server_1": [1, 2], "server_2": {"y": 1}}));
		let mut cache = SessionCache::new(&mut session, 1, None);

		// Act
		let value = cache.get_or_insert_with("x", || json!("computed")).clone();

		// Assert
		assert_eq!(value, json!("computed"));
		assert_eq!(
			session.get("cache"),
			Some(&json!({"server_1": {"x": "computed"}, "server_2": {"y": 1}}))
		);
	}

	#[rstest]
	fn test_get_or_insert_with_null_value() {
		let mut session = Session::new();
		let mut cache = SessionCache::new(&mut session, 1, None);
		assert_eq!(cache.get_or_insert_with("x", || Value::Null), &Value::Null);
		assert!(!cache.has("x"));
	}
}
