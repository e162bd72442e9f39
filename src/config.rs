//! Runtime configuration read from the page and the build environment.

use wasm_bindgen::JsCast;
use web_sys::HtmlMetaElement;

/// Fallback backend address when neither the page nor the build names one.
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Path of the graph endpoint below the API base.
pub const GRAPH_PATH: &str = "/api/graph";

/// Name of the `<meta>` tag that overrides the API base at runtime.
pub const API_META_NAME: &str = "graph-api-url";

/// Name of the `<meta>` tag that selects the canvas theme.
pub const THEME_META_NAME: &str = "graph-theme";

/// Application configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
	/// Backend origin, without trailing slash.
	pub api_base: String,
	pub graph_path: String,
	/// Canvas theme name, see `Theme::named`.
	pub theme: String,
}

impl AppConfig {
	/// Pick the API base from, in order: the page `<meta>` tag, the
	/// build-time `GRAPH_API_URL` variable, [`DEFAULT_API_BASE`].
	pub fn resolve(meta: Option<&str>, build_env: Option<&str>) -> Self {
		let base = [meta, build_env]
			.into_iter()
			.flatten()
			.map(str::trim)
			.find(|s| !s.is_empty())
			.unwrap_or(DEFAULT_API_BASE);
		Self {
			api_base: base.trim_end_matches('/').to_string(),
			graph_path: GRAPH_PATH.to_string(),
			theme: "default".to_string(),
		}
	}

	/// Read the configuration from the current document.
	pub fn from_document() -> Self {
		let mut config = Self::resolve(
			meta_content(API_META_NAME).as_deref(),
			option_env!("GRAPH_API_URL"),
		);
		if let Some(theme) = meta_content(THEME_META_NAME) {
			config.theme = theme;
		}
		config
	}

	pub fn graph_url(&self) -> String {
		format!("{}{}", self.api_base, self.graph_path)
	}
}

fn meta_content(name: &str) -> Option<String> {
	let document = web_sys::window()?.document()?;
	let element = document
		.query_selector(&format!("meta[name=\"{name}\"]"))
		.ok()??;
	let meta: HtmlMetaElement = element.dyn_into().ok()?;
	Some(meta.content())
}
