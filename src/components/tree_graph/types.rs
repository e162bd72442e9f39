//! Wire and payload types shared across the tree graph pipeline.

use serde::{Deserialize, Deserializer, Serialize};

/// One record of the flat graph snapshot served by the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRecord {
	/// Unique identifier. Child references point at this name.
	pub name: String,
	/// Free-form text shown in the detail panel.
	#[serde(default, deserialize_with = "null_as_default")]
	pub description: String,
	/// Names of this record's children, in display order.
	#[serde(default, deserialize_with = "null_as_default")]
	pub children: Vec<String>,
}

impl GraphRecord {
	/// Convenience constructor, mostly for tests and inline data.
	pub fn new(name: &str, description: &str, children: &[&str]) -> Self {
		Self {
			name: name.to_string(),
			description: description.to_string(),
			children: children.iter().map(|c| c.to_string()).collect(),
		}
	}
}

/// The identity of a node handed to the detail view on selection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NodeDetail {
	pub name: String,
	pub description: String,
}

// Neo4j returns `null` for missing properties.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
