//! HTML helpers shared by the dbadmin crates
//!
//! - [`html`]: compatible-mode escaping, URL encoding and SQL identifier quoting
//! - [`bbcode`]: decoding of the small BB-code subset used in status messages
//! - [`icons`]: sprite-based `<img>` markup

pub mod bbcode;
pub mod html;
pub mod icons;

pub use bbcode::{BbCodeDecoder, MarkupDecoder};
pub use html::{CompatEscaper, HtmlEscaper, backquote, escape_compat, url_encode};
pub use icons::IconSet;
