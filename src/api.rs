//! Record fetching.
//!
//! Records come either from an inline `<script id="graph-data">` JSON block
//! embedded in the page or from the backend's graph endpoint via `fetch`.

use log::info;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlScriptElement, Request, RequestInit, RequestMode, Response};

use crate::components::tree_graph::GraphRecord;
use crate::config::AppConfig;
use crate::error::FetchError;

/// Id of the optional inline data element.
pub const INLINE_DATA_ID: &str = "graph-data";

/// Where the record snapshot is loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordSource {
	/// JSON text already present in the page.
	Inline(String),
	/// A `GET` endpoint returning the JSON array.
	Remote { url: String },
}

impl RecordSource {
	/// Prefer inline data when the page carries it, else the configured endpoint.
	pub fn detect(config: &AppConfig) -> Self {
		match inline_json() {
			Some(json) => RecordSource::Inline(json),
			None => RecordSource::Remote {
				url: config.graph_url(),
			},
		}
	}

	/// Load and decode the whole snapshot.
	pub async fn load(&self) -> Result<Vec<GraphRecord>, FetchError> {
		let records = match self {
			RecordSource::Inline(json) => parse_records(json)?,
			RecordSource::Remote { url } => parse_records(&fetch_text(url).await?)?,
		};
		info!(
			"tree-graph: loaded {} records from {}",
			records.len(),
			self.describe()
		);
		Ok(records)
	}

	fn describe(&self) -> &str {
		match self {
			RecordSource::Inline(_) => "inline data",
			RecordSource::Remote { url } => url.as_str(),
		}
	}
}

/// Decode the endpoint's JSON array.
pub fn parse_records(json: &str) -> Result<Vec<GraphRecord>, FetchError> {
	Ok(serde_json::from_str(json)?)
}

fn inline_json() -> Option<String> {
	let document = web_sys::window()?.document()?;
	let element = document.get_element_by_id(INLINE_DATA_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

async fn fetch_text(url: &str) -> Result<String, FetchError> {
	let opts = RequestInit::new();
	opts.set_method("GET");
	opts.set_mode(RequestMode::Cors);

	let request = Request::new_with_str_and_init(url, &opts)
		.map_err(|e| FetchError::Request(format!("{e:?}")))?;

	let window = web_sys::window().ok_or(FetchError::NoWindow)?;
	let value = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(|e| FetchError::Network(format!("{e:?}")))?;
	let response: Response = value
		.dyn_into()
		.map_err(|_| FetchError::Network("response is not a Response".into()))?;

	if !response.ok() {
		return Err(FetchError::Status(response.status()));
	}

	let text = response
		.text()
		.map_err(|e| FetchError::Body(format!("{e:?}")))?;
	JsFuture::from(text)
		.await
		.map_err(|e| FetchError::Body(format!("{e:?}")))?
		.as_string()
		.ok_or_else(|| FetchError::Body("body is not text".into()))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn parses_backend_payload() {
		let records = parse_records(
			r#"[
				{"name": "Node1", "description": "This is Node 1", "children": ["Child1", "Child2"]},
				{"name": "Node2", "description": "This is Node 2", "children": []}
			]"#,
		)
		.unwrap();

		assert_eq!(records, vec![
			GraphRecord::new("Node1", "This is Node 1", &["Child1", "Child2"]),
			GraphRecord::new("Node2", "This is Node 2", &[]),
		]);
	}

	#[test]
	fn rejects_error_body() {
		let err = parse_records(r#"{"error": "An error occurred while fetching data"}"#).unwrap_err();
		assert!(matches!(err, FetchError::Decode(_)));
	}
}
