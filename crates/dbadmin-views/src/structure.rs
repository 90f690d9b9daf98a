//! Drop and empty confirmation forms

use dbadmin_conf::Settings;
use dbadmin_http::{ResponseError, ResponseRenderer};
use dbadmin_messages::{Message, MessageContext, MessageError};
use dbadmin_template::TemplateError;
use dbadmin_utils::backquote;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Source of the view names of a database
pub trait VirtualTables: Send + Sync {
	fn virtual_tables(&self, db: &str) -> Vec<String>;
}

impl<F> VirtualTables for F
where
	F: Fn(&str) -> Vec<String> + Send + Sync,
{
	fn virtual_tables(&self, db: &str) -> Vec<String> {
		self(db)
	}
}

/// Statement the user is asked to confirm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmAction {
	/// `DROP TABLE` / `DROP VIEW`
	Drop,
	/// `TRUNCATE`
	Empty,
}

impl ConfirmAction {
	pub fn as_str(&self) -> &'static str {
		match self {
			ConfirmAction::Drop => "drop",
			ConfirmAction::Empty => "empty",
		}
	}

	/// Template rendering the confirmation form
	pub fn template_name(&self) -> &'static str {
		match self {
			ConfirmAction::Drop => "database/structure/drop_form",
			ConfirmAction::Empty => "database/structure/empty_form",
		}
	}
}

/// Posted selection of the structure page
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StructureFormRequest {
	pub db: String,
	#[serde(default, rename = "selected_tbl")]
	pub selected: Vec<String>,
}

impl StructureFormRequest {
	pub fn new<I, S>(db: impl Into<String>, selected: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			db: db.into(),
			selected: selected.into_iter().map(Into::into).collect(),
		}
	}
}

/// Errors raised while answering a confirmation request
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
	#[error("Failed to serialize template variables: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error(transparent)]
	Template(#[from] TemplateError),

	#[error(transparent)]
	Message(#[from] MessageError),

	#[error(transparent)]
	Response(#[from] ResponseError),
}

#[derive(Serialize)]
struct UrlParams<'a> {
	db: &'a str,
	selected: &'a [String],
	#[serde(skip_serializing_if = "no_views")]
	views: &'a [String],
}

fn no_views(views: &&[String]) -> bool {
	views.is_empty()
}

#[derive(Serialize)]
struct ConfirmationForm<'a> {
	url_params: UrlParams<'a>,
	full_query: String,
	is_foreign_key_check: bool,
}

/// Renders the confirmation form for dropping or emptying tables
pub struct StructureFormController {
	ctx: MessageContext,
	tables: Arc<dyn VirtualTables>,
	foreign_key_checks: bool,
}

impl StructureFormController {
	pub fn new(ctx: MessageContext, tables: impl VirtualTables + 'static) -> Self {
		Self {
			ctx,
			tables: Arc::new(tables),
			foreign_key_checks: true,
		}
	}

	pub fn from_settings(settings: &Settings, tables: impl VirtualTables + 'static) -> Self {
		Self::new(MessageContext::from_settings(settings), tables)
			.with_foreign_key_checks(settings.foreign_key_checks)
	}

	/// Initial state of the "foreign key checks" checkbox
	pub fn with_foreign_key_checks(mut self, enabled: bool) -> Self {
		self.foreign_key_checks = enabled;
		self
	}

	/// Answer a confirmation request
	///
	/// An empty selection fails the request with a "No table selected."
	/// message; otherwise the rendered form is added to the response body.
	pub fn handle(
		&self,
		action: ConfirmAction,
		request: &StructureFormRequest,
		response: &mut ResponseRenderer,
	) -> Result<(), ViewError> {
		if request.selected.is_empty() {
			tracing::debug!(db = %request.db, action = action.as_str(), "no table selected");
			response.set_request_status(false);
			let mut message = Message::error("No table selected.");
			response.add_json_message("message", &mut message, &self.ctx)?;
			return Ok(());
		}

		let views = match action {
			ConfirmAction::Drop => self.tables.virtual_tables(&request.db),
			ConfirmAction::Empty => Vec::new(),
		};
		let full_query = match action {
			ConfirmAction::Drop => self.drop_query(&request.selected, &views),
			ConfirmAction::Empty => self.empty_query(&request.selected),
		};
		tracing::debug!(
			db = %request.db,
			action = action.as_str(),
			tables = request.selected.len(),
			views = views.len(),
			"rendering confirmation form"
		);

		let form = ConfirmationForm {
			url_params: UrlParams {
				db: &request.db,
				selected: &request.selected,
				views: &views,
			},
			full_query,
			is_foreign_key_check: self.foreign_key_checks,
		};
		let variables = serde_json::to_value(&form)?;
		let html = self.ctx.renderer().render(action.template_name(), &variables)?;
		response.add_html(&html);
		Ok(())
	}

	/// `DROP TABLE` for the selected tables, then `DROP VIEW` for the
	/// selected views, one statement per line
	///
	/// ```
	/// use dbadmin_messages::MessageContext;
	/// use dbadmin_views::StructureFormController;
	///
	/// let controller = StructureFormController::new(MessageContext::default(), |_: &str| Vec::<String>::new());
	/// let selected = ["users".to_string(), "active_users".to_string()];
	/// let views = ["active_users".to_string()];
	///
	/// assert_eq!(
	///     controller.drop_query(&selected, &views),
	///     "DROP TABLE `users`;<br>\nDROP VIEW `active_users`;<br>\n"
	/// );
	/// ```
	pub fn drop_query(&self, selected: &[String], views: &[String]) -> String {
		let (dropped_views, dropped_tables): (Vec<&String>, Vec<&String>) =
			selected.iter().partition(|name| views.contains(*name));

		let mut query = String::new();
		if !dropped_tables.is_empty() {
			query.push_str(&format!("DROP TABLE {};<br>\n", self.quote_list(&dropped_tables)));
		}
		if !dropped_views.is_empty() {
			query.push_str(&format!("DROP VIEW {};<br>\n", self.quote_list(&dropped_views)));
		}
		query
	}

	/// One `TRUNCATE` statement per selected table
	pub fn empty_query(&self, selected: &[String]) -> String {
		selected
			.iter()
			.map(|name| format!("TRUNCATE {};<br>", self.quote(name)))
			.collect()
	}

	fn quote_list(&self, names: &[&String]) -> String {
		names
			.iter()
			.map(|name| self.quote(name))
			.collect::<Vec<_>>()
			.join(", ")
	}

	// Names end up inside the form markup
	fn quote(&self, name: &str) -> String {
		backquote(&self.ctx.escaper().escape(name))
	}
}
