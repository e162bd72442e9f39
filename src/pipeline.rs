//! Fetch result → tree → layout → scene.
//!
//! Everything after the fetch is synchronous, so a scene is either fully
//! rebuilt or left untouched. [`FetchSequencer`] makes sure only the most
//! recently started load may replace the scene.

use log::{debug, error, info};

use crate::components::tree_graph::{
	GraphRecord, LayoutConfig, Scene, build_tree, layout_tree,
};
use crate::error::{FetchError, GraphIssue};

/// The scene built from one load, plus what went wrong on the way.
#[derive(Debug, Default)]
pub struct SceneBuild {
	pub scene: Scene,
	pub issues: Vec<GraphIssue>,
	/// Set when the records could not be obtained at all.
	pub failure: Option<FetchError>,
}

/// Turn a load result into a scene. Never fails: a transport error yields
/// an empty scene and is logged once.
pub fn prepare_scene(
	result: Result<Vec<GraphRecord>, FetchError>,
	config: &LayoutConfig,
) -> SceneBuild {
	let records = match result {
		Ok(records) => records,
		Err(err) => {
			error!("tree-graph: error fetching data: {err}");
			return SceneBuild {
				failure: Some(err),
				..SceneBuild::default()
			};
		}
	};

	let build = build_tree(&records);
	let scene = match &build.root {
		Some(root) => Scene::from_layout(&layout_tree(root, config), config.orientation),
		None => Scene::empty(),
	};
	info!(
		"tree-graph: scene rebuilt with {} nodes, {} links",
		scene.nodes.len(),
		scene.links.len()
	);

	SceneBuild {
		scene,
		issues: build.issues,
		failure: None,
	}
}

/// Identifies one started load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Orders overlapping loads so that the latest one started always wins.
#[derive(Debug, Default)]
pub struct FetchSequencer {
	issued: u64,
}

impl FetchSequencer {
	/// Start a new load, superseding any still in flight.
	pub fn begin(&mut self) -> FetchTicket {
		self.issued += 1;
		FetchTicket(self.issued)
	}

	/// Whether a resolved load may be applied.
	pub fn is_current(&self, ticket: FetchTicket) -> bool {
		let current = ticket.0 == self.issued;
		if !current {
			debug!(
				"tree-graph: discarding stale response {} (latest is {})",
				ticket.0, self.issued
			);
		}
		current
	}
}

#[cfg(test)]
mod tests {
	use log::Level;
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::tree_graph::NodeDetail;

	fn error_lines(logs: &[testing_logger::CapturedLog]) -> Vec<String> {
		logs.iter()
			.filter(|l| l.level == Level::Error)
			.map(|l| l.body.clone())
			.collect()
	}

	fn scenario() -> Vec<GraphRecord> {
		vec![
			GraphRecord::new("Root", "Root node", &["Child1", "Child2"]),
			GraphRecord::new("Child1", "First child", &[]),
			GraphRecord::new("Child2", "Second child", &[]),
		]
	}

	#[test]
	fn scenario_renders_three_shapes_and_two_paths() {
		let build = prepare_scene(Ok(scenario()), &LayoutConfig::default());

		assert_eq!(build.scene.nodes.len(), 3);
		assert_eq!(build.scene.links.len(), 2);
		assert!(build.issues.is_empty());
		assert!(build.failure.is_none());

		let child1 = build.scene.nodes[1].center;
		let hit = build.scene.node_at(child1.x, child1.y, 5.0).unwrap();
		assert_eq!(build.scene.nodes[hit].detail(), NodeDetail {
			name: "Child1".into(),
			description: "First child".into(),
		});
	}

	#[test]
	fn fetch_failure_renders_empty_scene() {
		let build = prepare_scene(
			Err(FetchError::Network("API Error".into())),
			&LayoutConfig::default(),
		);

		assert_eq!(build.scene.nodes.len(), 0);
		assert_eq!(build.scene.links.len(), 0);
		assert_eq!(build.failure, Some(FetchError::Network("API Error".into())));
		assert!(build.issues.is_empty());
	}

	#[test]
	fn fetch_failure_logs_one_error() {
		testing_logger::setup();
		prepare_scene(
			Err(FetchError::Status(500)),
			&LayoutConfig::default(),
		);

		testing_logger::validate(|logs| {
			assert_eq!(error_lines(logs), vec![
				"tree-graph: error fetching data: HTTP 500".to_string()
			]);
		});
	}

	#[test]
	fn successful_load_logs_no_error() {
		testing_logger::setup();
		prepare_scene(Ok(scenario()), &LayoutConfig::default());

		testing_logger::validate(|logs| {
			assert!(error_lines(logs).is_empty());
			assert!(logs.iter().any(|l| l.level == Level::Info
				&& l.body == "tree-graph: scene rebuilt with 3 nodes, 2 links"));
		});
	}

	#[test]
	fn empty_snapshot_is_an_empty_scene() {
		let build = prepare_scene(Ok(Vec::new()), &LayoutConfig::default());
		assert!(build.scene.is_empty());
		assert!(build.failure.is_none());
	}

	#[test]
	fn malformed_records_still_render() {
		let records = vec![
			GraphRecord::new("A", "", &["B", "Ghost"]),
			GraphRecord::new("B", "", &["A"]),
		];
		let build = prepare_scene(Ok(records), &LayoutConfig::default());

		assert_eq!(build.scene.nodes.len(), 3);
		assert_eq!(build.scene.links.len(), 2);
		assert_eq!(build.issues.len(), 3);
	}

	#[test]
	fn rebuilding_is_idempotent() {
		let first = prepare_scene(Ok(scenario()), &LayoutConfig::default());
		let second = prepare_scene(Ok(scenario()), &LayoutConfig::default());
		assert_eq!(first.scene, second.scene);
	}

	#[test]
	fn only_latest_ticket_is_current() {
		let mut sequencer = FetchSequencer::default();
		let first = sequencer.begin();
		let second = sequencer.begin();

		assert!(sequencer.is_current(second));
		assert!(!sequencer.is_current(first));
		assert!(first < second);
	}

	#[test]
	fn older_response_resolving_last_is_discarded() {
		let mut sequencer = FetchSequencer::default();
		let old = sequencer.begin();
		let new = sequencer.begin();

		// The newer load resolves first and is applied.
		assert!(sequencer.is_current(new));
		// The older one resolves afterwards and must not overwrite it.
		assert!(!sequencer.is_current(old));
	}
}
