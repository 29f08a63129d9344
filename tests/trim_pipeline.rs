//! End-to-end tests of the trim pipeline through the interactive controller.

use glam::DVec2;
use path_trim::{PathData, PathElement, PathStyle, Stroke, TrimError, TrimTool, compute_intersections, split_paths, validate};
use rustc_hash::FxHashSet;

fn init_logging() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn path_element(id: u64, data: &str) -> PathElement {
	let style = PathStyle {
		stroke: Some(Stroke {
			color: "#222222".into(),
			width: 2.,
			opacity: 1.,
		}),
		fill: Some(path_trim::Fill { color: "#88ccff".into(), opacity: 0.5 }),
	};
	PathElement {
		id,
		data: PathData::from_path_data(data, style).unwrap(),
	}
}

#[test]
fn crossing_lines_scenario() {
	init_logging();
	let paths = [path_element(1, "M 0 0 L 10 0"), path_element(2, "M 5 -5 L 5 5")];

	let mut tool = TrimTool::new();
	let result = tool.activate(&paths).unwrap();

	assert_eq!(result.intersections.len(), 1);
	let intersection = &result.intersections[0];
	assert!(intersection.point.distance(DVec2::new(5., 0.)) < 1e-6);
	assert!((intersection.parameter1 - 0.5).abs() < 1e-6);
	assert!((intersection.parameter2 - 0.5).abs() < 1e-6);

	let path1_segments: Vec<_> = result.segments.iter().filter(|segment| segment.path_id == 1).collect();
	assert_eq!(path1_segments.len(), 2);
	assert!(path1_segments[0].start_point.distance(DVec2::new(0., 0.)) < 1e-9);
	assert!(path1_segments[0].end_point.distance(DVec2::new(5., 0.)) < 1e-6);
	assert!(path1_segments[1].end_point.distance(DVec2::new(10., 0.)) < 1e-9);
}

#[test]
fn square_minus_one_edge_scenario() {
	init_logging();
	let paths = [path_element(1, "M 0 0 L 100 0 L 100 100 L 0 100 Z"), path_element(2, "M 500 500 L 510 500")];

	let mut tool = TrimTool::new();
	tool.activate(&paths).unwrap();

	// Click the middle of the square's top edge
	let hovered = tool.hover_segment(DVec2::new(50., 1.)).expect("top edge under pointer");
	let reconstructed = tool.click(hovered);

	let from_square: Vec<_> = reconstructed.iter().filter(|path| path.source_path_id == 1).collect();
	assert_eq!(from_square.len(), 1);
	let survivor = from_square[0];
	assert!(!survivor.closed);
	assert_eq!(survivor.segment_ids.len(), 3);
	assert!(survivor.data.style.fill.is_none());
	assert!(survivor.data.style.stroke.is_some());
}

#[test]
fn disjoint_paths_scenario() {
	init_logging();
	let paths = [path_element(1, "M 0 0 L 10 0 L 10 10"), path_element(2, "M 100 100 C 110 90 120 90 130 100")];

	let intersections = compute_intersections(&paths);
	assert!(intersections.is_empty());

	let result = split_paths(&paths, &intersections);
	assert_eq!(result.segments.len(), 3);
	assert!(result.segments.iter().all(|segment| segment.start_intersection.is_none() && segment.end_intersection.is_none()));
}

#[test]
fn no_removal_round_trips_geometry() {
	init_logging();
	let paths = [
		path_element(1, "M 0 0 L 100 0 C 110 10 110 90 100 100 L 0 100 Z"),
		path_element(2, "M 50 -20 L 50 120"),
	];

	let mut tool = TrimTool::new();
	let result = tool.activate(&paths).unwrap();
	let reconstructed = path_trim::sanitize(path_trim::reconstruct(&result.segments, &FxHashSet::default(), &result.original_paths));

	assert_eq!(reconstructed.len(), 2);
	for original in &paths {
		let rebuilt = reconstructed.iter().find(|path| path.source_path_id == original.id).expect("path survives");
		let was_closed = original.data.subpaths[0].closed();
		assert_eq!(rebuilt.closed, was_closed);

		// Splitting adds anchors at the intersection points, so compare sampled
		// geometry by nearest distance in both directions instead of curve by curve
		assert!(max_deviation(&original.data, &rebuilt.data) < 1e-3);
		assert!(max_deviation(&rebuilt.data, &original.data) < 1e-3);
	}
}

/// The largest distance from any sampled point of `a` to the nearest point of `b`.
fn max_deviation(a: &PathData, b: &PathData) -> f64 {
	let b_curves = b.curve_entries();
	let mut max_deviation: f64 = 0.;
	for entry in a.curve_entries() {
		for sample in 0..=16 {
			let point = entry.curve.evaluate(sample as f64 / 16.);
			let distance = b_curves.iter().map(|candidate| candidate.curve.distance_to(point)).fold(f64::MAX, f64::min);
			max_deviation = max_deviation.max(distance);
		}
	}
	max_deviation
}

#[test]
fn determinism_of_intersections_and_split() {
	init_logging();
	let paths = [
		path_element(1, "M 0 0 C 30 80 70 80 100 0"),
		path_element(2, "M 0 60 L 100 60"),
		path_element(3, "M 0 30 C 40 50 60 10 100 30"),
	];

	let first_intersections = compute_intersections(&paths);
	let second_intersections = compute_intersections(&paths);
	assert_eq!(first_intersections, second_intersections);

	let first_split = split_paths(&paths, &first_intersections);
	let second_split = split_paths(&paths, &second_intersections);
	assert_eq!(first_split.segments, second_split.segments);
}

#[test]
fn cap_enforcement() {
	init_logging();
	let one = vec![path_element(1, "M 0 0 L 10 0")];
	assert!(matches!(validate(&one), Err(TrimError::InsufficientPaths { .. })));

	let many: Vec<PathElement> = (0..101).map(|id| path_element(id, "M 0 0 L 10 0")).collect();
	assert!(matches!(validate(&many), Err(TrimError::TooManyPaths { .. })));
	assert!(validate(&many[..100]).is_ok());
}

#[test]
fn drag_gesture_across_both_lines() {
	init_logging();
	let paths = [path_element(1, "M 0 0 L 10 0"), path_element(2, "M 5 -5 L 5 5")];

	let mut tool = TrimTool::new().with_hit_threshold(1.);
	tool.activate(&paths).unwrap();

	// Trace across the right half of path 1 and the bottom half of path 2
	tool.drag_start(DVec2::new(7., 0.5));
	tool.drag_update(DVec2::new(5.5, -1.));
	tool.drag_update(DVec2::new(5., -3.));
	assert_eq!(tool.marked().len(), 2);

	let reconstructed = tool.drag_finish();
	assert!(tool.marked().is_empty());

	// Survivors: the left half of path 1 and the top half of path 2
	assert_eq!(reconstructed.len(), 2);
	let from_path1 = reconstructed.iter().find(|path| path.source_path_id == 1).unwrap();
	assert!(from_path1.data.last_anchor().unwrap().distance(DVec2::new(5., 0.)) < 1e-6);
	let from_path2 = reconstructed.iter().find(|path| path.source_path_id == 2).unwrap();
	assert!(from_path2.data.first_anchor().unwrap().distance(DVec2::new(5., 0.)) < 1e-6);
}

#[test]
fn reactivation_after_reconstruction() {
	init_logging();
	let paths = [path_element(1, "M 0 0 L 10 0"), path_element(2, "M 5 -5 L 5 5")];

	let mut tool = TrimTool::new();
	tool.activate(&paths).unwrap();
	let hovered = tool.hover_segment(DVec2::new(2., 0.5)).unwrap();
	let reconstructed = tool.click(hovered);

	// Feed the reconstructed paths back in as a fresh selection
	let new_paths: Vec<PathElement> = reconstructed
		.iter()
		.enumerate()
		.map(|(index, path)| PathElement {
			id: 10 + index as u64,
			data: path.data.clone(),
		})
		.collect();

	if new_paths.len() >= 2 {
		let result = tool.activate(&new_paths).unwrap();
		assert!(!result.segments.is_empty());
	} else {
		// Too few survivors to trim again; the tool must deactivate cleanly
		assert!(tool.activate(&new_paths).is_err());
		assert!(tool.split_result().is_none());
	}
}

#[test]
fn serialization_round_trip_into_host_format() {
	init_logging();
	let paths = [path_element(1, "M 0 0 L 100 0 L 100 100 L 0 100 Z"), path_element(2, "M 50 -10 L 50 110")];

	let mut tool = TrimTool::new();
	tool.activate(&paths).unwrap();
	let hovered = tool.hover_segment(DVec2::new(25., 0.)).expect("top-left fragment");
	let reconstructed = tool.click(hovered);

	for path in &reconstructed {
		let serialized = path.data.to_path_data();
		let reparsed = PathData::from_path_data(&serialized, path.data.style.clone()).unwrap();
		assert_eq!(reparsed.subpaths, path.data.subpaths);
	}
}
