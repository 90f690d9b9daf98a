//! # dbadmin settings
//!
//! Process-wide configuration consumed by the message, theme and view crates.
//! Settings are read once at start-up and treated as read-only afterwards.
//!
//! ```
//! use dbadmin_conf::Settings;
//!
//! let settings = Settings::from_toml_str("server = 2\nuser = \"root\"").unwrap();
//! assert_eq!(settings.server, 2);
//! assert_eq!(settings.locale, "en");
//! ```

pub mod settings;

pub use settings::{Settings, SettingsError};
