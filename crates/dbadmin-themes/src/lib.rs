//! Theme support
//!
//! A theme is a directory holding a `theme.json` metadata file and usually an
//! `img/` directory. Themes missing their own images borrow them from the
//! fallback theme.

pub mod theme;
pub mod version;

pub use theme::{Theme, ThemeError, ThemeInfo};
pub use version::version_compare;
