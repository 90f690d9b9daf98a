//! Confirmation forms rendered through the embedded templates

use dbadmin_conf::Settings;
use dbadmin_http::ResponseRenderer;
use dbadmin_messages::MessageContext;
use dbadmin_views::{ConfirmAction, StructureFormController, StructureFormRequest, VirtualTables};
use rstest::{fixture, rstest};
use serde_json::json;
use std::collections::HashMap;

/// View names per database
struct Schema(HashMap<String, Vec<String>>);

impl VirtualTables for Schema {
	fn virtual_tables(&self, db: &str) -> Vec<String> {
		self.0.get(db).cloned().unwrap_or_default()
	}
}

#[fixture]
fn controller() -> StructureFormController {
	let schema = Schema(HashMap::from([(
		"shop".to_string(),
		vec!["active_customers".to_string(), "order_totals".to_string()],
	)]));
	StructureFormController::new(MessageContext::default(), schema)
}

#[rstest]
#[case(ConfirmAction::Drop)]
#[case(ConfirmAction::Empty)]
fn test_empty_selection_fails_request(controller: StructureFormController, #[case] action: ConfirmAction) {
	// Arrange
	let request = StructureFormRequest::new("shop", Vec::<String>::new());
	let mut response = ResponseRenderer::new();

	// Act
	controller.handle(action, &request, &mut response).unwrap();

	// Assert
	assert!(!response.is_success());
	assert_eq!(response.html(), "");
	let message = response.json()["message"].as_str().unwrap();
	assert!(message.contains("alert alert-danger"));
	assert!(message.contains("ic_s_error"));
	assert!(message.contains("No table selected."));

	let body = response.into_json_body();
	assert_eq!(body["success"], json!(false));
	assert!(body["error"].as_str().unwrap().contains("No table selected."));
}

#[rstest]
fn test_drop_form_lists_tables_and_views(controller: StructureFormController) {
	// Arrange
	let request = StructureFormRequest::new("shop", ["customers", "order_totals", "orders"]);
	let mut response = ResponseRenderer::new();

	// Act
	controller
		.handle(ConfirmAction::Drop, &request, &mut response)
		.unwrap();

	// Assert
	let html = response.html();
	assert!(response.is_success());
	assert!(html.contains("route=/database/structure/drop-table"));
	assert!(html.contains(
		"<code>DROP TABLE `customers`, `orders`;<br>\nDROP VIEW `order_totals`;<br>\n</code>"
	));
	assert!(html.contains("<input type=\"hidden\" name=\"db\" value=\"shop\">"));
	assert!(html.contains("<input type=\"hidden\" name=\"selected[]\" value=\"customers\">"));
	assert!(html.contains("<input type=\"hidden\" name=\"selected[]\" value=\"order_totals\">"));
	assert!(html.contains("<input type=\"hidden\" name=\"views[]\" value=\"active_customers\">"));
	assert!(html.contains("<input type=\"hidden\" name=\"views[]\" value=\"order_totals\">"));
	assert!(html.contains("value=\"1\" checked>"));
}

#[rstest]
fn test_drop_form_without_views(controller: StructureFormController) {
	let request = StructureFormRequest::new("blog", ["posts"]);
	let mut response = ResponseRenderer::new();

	controller
		.handle(ConfirmAction::Drop, &request, &mut response)
		.unwrap();

	assert!(response.html().contains("<code>DROP TABLE `posts`;<br>\n</code>"));
	assert!(!response.html().contains("views[]"));
}

#[rstest]
fn test_empty_form_truncates_each_table(controller: StructureFormController) {
	// Arrange
	let controller = controller.with_foreign_key_checks(false);
	let request = StructureFormRequest::new("shop", ["customers", "order_totals"]);
	let mut response = ResponseRenderer::new();

	// Act
	controller
		.handle(ConfirmAction::Empty, &request, &mut response)
		.unwrap();

	// Assert
	let html = response.html();
	assert!(html.contains("route=/database/structure/empty-table"));
	assert!(html.contains("<code>TRUNCATE `customers`;<br>TRUNCATE `order_totals`;<br></code>"));
	assert!(!html.contains("views[]"));
	assert!(!html.contains(" checked"));
}

#[rstest]
fn test_hidden_inputs_escape_table_names(controller: StructureFormController) {
	let request = StructureFormRequest::new("shop", ["a\"b<c>"]);
	let mut response = ResponseRenderer::new();

	controller
		.handle(ConfirmAction::Empty, &request, &mut response)
		.unwrap();

	let html = response.html();
	assert!(html.contains("value=\"a&quot;b&lt;c&gt;\""));
	assert!(html.contains("TRUNCATE `a&quot;b&lt;c&gt;`;<br>"));
}

#[rstest]
fn test_from_settings_follows_foreign_key_setting() {
	// Arrange
	let settings = Settings {
		foreign_key_checks: false,
		..Settings::default()
	};
	let controller = StructureFormController::from_settings(&settings, |_: &str| Vec::<String>::new());
	let mut response = ResponseRenderer::new();

	// Act
	controller
		.handle(
			ConfirmAction::Drop,
			&StructureFormRequest::new("shop", ["t"]),
			&mut response,
		)
		.unwrap();

	// Assert
	assert!(!response.html().contains(" checked"));
}
