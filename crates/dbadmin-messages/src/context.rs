//! Collaborators used while compiling messages

use crate::level::Level;
use dbadmin_conf::Settings;
use dbadmin_i18n::{IdentityLocalizer, Localizer};
use dbadmin_template::{TemplateRenderer, TeraRenderer};
use dbadmin_utils::{BbCodeDecoder, CompatEscaper, HtmlEscaper, IconSet, MarkupDecoder};
use std::sync::Arc;

/// Resolves the icon shown in front of a displayed message
pub trait IconResolver: Send + Sync {
	fn icon_for(&self, level: Level) -> String;
}

impl IconResolver for IconSet {
	fn icon_for(&self, level: Level) -> String {
		self.image(level.icon_name(), "")
	}
}

/// Bundle of the services a message needs to turn itself into HTML
///
/// Built once at start-up and shared; cloning only bumps reference counts.
///
/// # Examples
///
/// ```
/// use dbadmin_i18n::MessageCatalog;
/// use dbadmin_messages::{Message, MessageContext};
///
/// let mut catalog = MessageCatalog::new("de");
/// catalog.add_translation("Error", "Fehler");
///
/// let ctx = MessageContext::default().with_localizer(catalog);
/// assert_eq!(Message::error("").compile(&ctx).unwrap(), "Fehler");
/// ```
#[derive(Clone)]
pub struct MessageContext {
	localizer: Arc<dyn Localizer>,
	escaper: Arc<dyn HtmlEscaper>,
	decoder: Arc<dyn MarkupDecoder>,
	icons: Arc<dyn IconResolver>,
	renderer: Arc<dyn TemplateRenderer>,
}

impl MessageContext {
	pub fn new(
		localizer: Arc<dyn Localizer>,
		escaper: Arc<dyn HtmlEscaper>,
		decoder: Arc<dyn MarkupDecoder>,
		icons: Arc<dyn IconResolver>,
		renderer: Arc<dyn TemplateRenderer>,
	) -> Self {
		Self {
			localizer,
			escaper,
			decoder,
			icons,
			renderer,
		}
	}

	/// Context configured from settings, with the identity localizer
	///
	/// Documentation links, allowed link prefixes and the icon image follow
	/// the settings; pair with [`MessageContext::with_localizer`] to install
	/// the catalog of the active locale.
	pub fn from_settings(settings: &Settings) -> Self {
		let icons = IconSet::new(settings.blank_image.clone());
		let decoder = BbCodeDecoder::new(
			settings.docs_url.clone(),
			settings.allowed_link_prefixes.clone(),
			icons.clone(),
		);
		Self {
			decoder: Arc::new(decoder),
			icons: Arc::new(icons),
			..Self::default()
		}
	}

	pub fn with_localizer(mut self, localizer: impl Localizer + 'static) -> Self {
		self.localizer = Arc::new(localizer);
		self
	}

	pub fn with_escaper(mut self, escaper: impl HtmlEscaper + 'static) -> Self {
		self.escaper = Arc::new(escaper);
		self
	}

	pub fn with_decoder(mut self, decoder: impl MarkupDecoder + 'static) -> Self {
		self.decoder = Arc::new(decoder);
		self
	}

	pub fn with_icons(mut self, icons: impl IconResolver + 'static) -> Self {
		self.icons = Arc::new(icons);
		self
	}

	pub fn with_renderer(mut self, renderer: impl TemplateRenderer + 'static) -> Self {
		self.renderer = Arc::new(renderer);
		self
	}

	pub fn localizer(&self) -> &dyn Localizer {
		self.localizer.as_ref()
	}

	pub fn escaper(&self) -> &dyn HtmlEscaper {
		self.escaper.as_ref()
	}

	pub fn decoder(&self) -> &dyn MarkupDecoder {
		self.decoder.as_ref()
	}

	pub fn icons(&self) -> &dyn IconResolver {
		self.icons.as_ref()
	}

	pub fn renderer(&self) -> &dyn TemplateRenderer {
		self.renderer.as_ref()
	}
}

impl Default for MessageContext {
	fn default() -> Self {
		Self::new(
			Arc::new(IdentityLocalizer),
			Arc::new(CompatEscaper),
			Arc::new(BbCodeDecoder::default()),
			Arc::new(IconSet::default()),
			Arc::new(TeraRenderer::new()),
		)
	}
}

impl std::fmt::Debug for MessageContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MessageContext").finish_non_exhaustive()
	}
}
