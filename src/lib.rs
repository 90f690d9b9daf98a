//! # dbadmin
//!
//! Building blocks of a web-based database administration tool.
//!
//! ## Feature Flags
//!
//! - `minimal` - status messages and their collaborators only
//! - `full` (default) - everything below
//! - `messages` - [`Message`], localization, escaping, BB-code and templates
//! - `http` - response builder and session cache
//! - `themes` - theme metadata loading
//! - `views` - drop/empty confirmation forms
//! - `conf` - TOML/JSON settings
//!
//! ## Quick Example
//!
//! ```rust
//! use dbadmin::prelude::*;
//!
//! let ctx = MessageContext::default();
//! let mut message = Message::success("Table %s has been emptied.");
//! message.add_param("orders");
//! message.add_message(Message::for_deleted_rows(12), " ");
//!
//! assert_eq!(
//!     message.compile(&ctx).unwrap(),
//!     "Table orders has been emptied. 12 rows deleted."
//! );
//! ```

#[cfg(feature = "conf")]
pub mod conf {
	pub use dbadmin_conf::*;
}

#[cfg(feature = "messages")]
pub mod i18n {
	pub use dbadmin_i18n::*;
}

#[cfg(feature = "messages")]
pub mod messages {
	pub use dbadmin_messages::*;
}

#[cfg(feature = "messages")]
pub mod template {
	pub use dbadmin_template::*;
}

#[cfg(feature = "messages")]
pub mod utils {
	pub use dbadmin_utils::*;
}

#[cfg(feature = "http")]
pub mod http {
	pub use dbadmin_http::*;
}

#[cfg(feature = "themes")]
pub mod themes {
	pub use dbadmin_themes::*;
}

#[cfg(feature = "views")]
pub mod views {
	pub use dbadmin_views::*;
}

#[cfg(feature = "conf")]
pub use dbadmin_conf::{Settings, SettingsError};

#[cfg(feature = "messages")]
pub use dbadmin_messages::{Level, Message, MessageContext, MessageError};

#[cfg(feature = "http")]
pub use dbadmin_http::{ResponseRenderer, Session, SessionCache};

#[cfg(feature = "themes")]
pub use dbadmin_themes::{Theme, ThemeError};

#[cfg(feature = "views")]
pub use dbadmin_views::{ConfirmAction, StructureFormController, StructureFormRequest};

/// Commonly used types
pub mod prelude {
	#[cfg(feature = "conf")]
	pub use crate::{Settings, SettingsError};

	#[cfg(feature = "messages")]
	pub use crate::{Level, Message, MessageContext, MessageError};

	#[cfg(feature = "messages")]
	pub use dbadmin_i18n::{Localizer, MessageCatalog};

	#[cfg(feature = "http")]
	pub use crate::{ResponseRenderer, Session, SessionCache};

	#[cfg(feature = "themes")]
	pub use crate::{Theme, ThemeError};

	#[cfg(feature = "views")]
	pub use crate::{ConfirmAction, StructureFormController, StructureFormRequest};
}
