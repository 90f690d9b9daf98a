//! Controllers of the database structure page
//!
//! Before tables are dropped or emptied the user confirms the statement that
//! is about to run; [`StructureFormController`] builds that statement and
//! renders the confirmation form.

pub mod structure;

pub use structure::{
	ConfirmAction, StructureFormController, StructureFormRequest, ViewError, VirtualTables,
};
