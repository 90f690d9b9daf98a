//! Localization for dbadmin
//!
//! The [`Localizer`] trait is the only thing consumers see. It is resolved once
//! at start-up (usually a [`MessageCatalog`] loaded from a `.po` file) and
//! shared read-only afterwards.
//!
//! ```
//! use dbadmin_i18n::{Localizer, MessageCatalog};
//!
//! let mut catalog = MessageCatalog::new("fr");
//! catalog.add_translation("Error", "Erreur");
//! catalog.add_plural("%1$d row deleted.", vec!["%1$d ligne supprimée.", "%1$d lignes supprimées."]);
//!
//! assert_eq!(catalog.gettext("Error"), "Erreur");
//! assert_eq!(catalog.gettext("Unknown"), "Unknown");
//! assert_eq!(
//!     catalog.ngettext("%1$d row deleted.", "%1$d rows deleted.", 0),
//!     "%1$d ligne supprimée."
//! );
//! ```

pub mod catalog;
pub mod localizer;
pub mod po;

pub use catalog::{MessageCatalog, plural_index};
pub use localizer::{IdentityLocalizer, Localizer};
pub use po::{PoError, load_po_file, parse_po};
