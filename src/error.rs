//! Error and diagnostic types for loading and building the graph.
//!
//! Nothing here is fatal to the render pipeline: a [`FetchError`] degrades to
//! an empty scene and a [`GraphIssue`] is repaired by the tree builder. Both
//! are logged and handed back to callers for inspection.

use log::{Level, log};
use thiserror::Error;

/// Failure to obtain the raw record list.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
	/// No browser `window` is available (e.g. running outside a page).
	#[error("no window available")]
	NoWindow,
	/// The request object could not be constructed.
	#[error("request error: {0}")]
	Request(String),
	/// The fetch promise rejected (network failure, CORS, ...).
	#[error("fetch error: {0}")]
	Network(String),
	/// The server answered with a non-success status.
	#[error("HTTP {0}")]
	Status(u16),
	/// The response body could not be read.
	#[error("body error: {0}")]
	Body(String),
	/// The body was not a valid record array.
	#[error("decode error: {0}")]
	Decode(String),
}

impl From<serde_json::Error> for FetchError {
	fn from(err: serde_json::Error) -> Self {
		Self::Decode(err.to_string())
	}
}

/// An inconsistency in the upstream records, repaired while building the tree.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphIssue {
	/// Two records share a name; the first one in input order is kept.
	#[error("duplicate record name {name:?}, keeping the first occurrence")]
	DuplicateName { name: String },
	/// Every record is referenced as somebody's child.
	#[error("no unreferenced record, falling back to {chosen:?} as root")]
	NoRoot { chosen: String },
	/// More than one record is never referenced.
	#[error("{} candidate roots, using {chosen:?} and ignoring {others:?}", .others.len() + 1)]
	MultipleRoots { chosen: String, others: Vec<String> },
	/// A child name has no matching record.
	#[error("{parent:?} references unknown child {child:?}")]
	DanglingChild { parent: String, child: String },
	/// A child name is already one of its own ancestors.
	#[error("{parent:?} references its ancestor {child:?}, cutting the cycle")]
	Cycle { parent: String, child: String },
	/// A record with children is listed by more than one parent; only its
	/// first occurrence is expanded.
	#[error("{parent:?} shares child {child:?} with an earlier parent, showing it as a leaf")]
	SharedChild { parent: String, child: String },
	/// Records that are not reachable from the chosen root.
	#[error("{} record(s) unreachable from the root: {names:?}", .names.len())]
	Unreachable { names: Vec<String> },
}

impl GraphIssue {
	/// Log level used when reporting this issue.
	pub fn level(&self) -> Level {
		match self {
			GraphIssue::Unreachable { .. } => Level::Info,
			_ => Level::Warn,
		}
	}

	/// Write the issue to the log.
	pub fn report(&self) {
		log!(self.level(), "tree-graph: {}", self);
	}
}
