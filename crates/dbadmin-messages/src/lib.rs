//! Status messages shown to the user
//!
//! A [`Message`] carries a severity [`Level`], a localizable template (or a
//! fixed raw text), substitution parameters and appended child messages. It
//! is compiled to HTML against a [`MessageContext`], which bundles the
//! localizer, escaper, BB-code decoder, icon resolver and template renderer.
//!
//! ```
//! use dbadmin_messages::{Message, MessageContext};
//!
//! let ctx = MessageContext::default();
//! let mut message = Message::notice("Table %s has been [em]created[/em].");
//! message.add_param("users");
//!
//! assert_eq!(
//!     message.compile(&ctx).unwrap(),
//!     "Table users has been <em>created</em>."
//! );
//! ```

pub mod context;
pub mod error;
pub mod format;
pub mod level;
pub mod message;
pub mod param;

pub use context::{IconResolver, MessageContext};
pub use error::{MessageError, MessageResult};
pub use format::{FormatArg, FormatError, sprintf};
pub use level::Level;
pub use message::Message;
pub use param::{Child, Param};
