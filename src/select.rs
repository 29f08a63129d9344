use crate::split::{SegmentId, TrimSegment};
use crate::utils;
use glam::DVec2;
use rustc_hash::FxHashSet;

fn rectangle_contains_point(rectangle: [DVec2; 2], point: DVec2) -> bool {
	point.cmpge(rectangle[0]).all() && point.cmple(rectangle[1]).all()
}

/// Returns the segment nearest to `point` within `threshold`, if any.
///
/// Candidates are prefiltered by their bounding box expanded by `threshold`; survivors are ranked
/// by exact nearest-point distance against the segment's curve data.
pub fn hit_test<'a>(segments: &'a [TrimSegment], point: DVec2, threshold: f64) -> Option<&'a TrimSegment> {
	let mut best: Option<(&TrimSegment, f64)> = None;
	for segment in segments {
		if !rectangle_contains_point(utils::expand_rectangle(segment.bounding_box, threshold), point) {
			continue;
		}
		let distance = segment.distance_to(point);
		if distance <= threshold && best.is_none_or(|(_, best_distance)| distance < best_distance) {
			best = Some((segment, distance));
		}
	}
	best.map(|(segment, _)| segment)
}

/// Hit-tests every sampled point of a cursor trajectory and unions the results.
/// The caller is responsible for the sampling rate of `points`.
pub fn hit_test_polyline(segments: &[TrimSegment], points: &[DVec2], threshold: f64) -> FxHashSet<SegmentId> {
	points.iter().filter_map(|&point| hit_test(segments, point, threshold)).map(|segment| segment.id).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::intersect::compute_intersections;
	use crate::path::{PathData, PathElement, PathStyle};
	use crate::split::split_paths;

	fn split_crossing_lines() -> Vec<TrimSegment> {
		let paths = [
			PathElement {
				id: 1,
				data: PathData::from_path_data("M 0 0 L 10 0", PathStyle::default()).unwrap(),
			},
			PathElement {
				id: 2,
				data: PathData::from_path_data("M 5 -5 L 5 5", PathStyle::default()).unwrap(),
			},
		];
		split_paths(&paths, &compute_intersections(&paths)).segments
	}

	#[test]
	fn test_hit_test_picks_nearest_segment() {
		let segments = split_crossing_lines();
		// Just above the left half of the horizontal line
		let hit = hit_test(&segments, DVec2::new(2., 1.), 4.).expect("within threshold");
		assert_eq!(hit.path_id, 1);
		assert_eq!(hit.start_intersection, None);

		// Nothing within the threshold far from any segment
		assert!(hit_test(&segments, DVec2::new(-5., 8.), 4.).is_none());
	}

	#[test]
	fn test_hit_test_threshold_boundary() {
		let segments = split_crossing_lines();
		assert!(hit_test(&segments, DVec2::new(2., 4.), 4.).is_some());
		assert!(hit_test(&segments, DVec2::new(20., 20.), 4.).is_none());
	}

	#[test]
	fn test_hit_test_polyline_unions_hits() {
		let segments = split_crossing_lines();
		// A trajectory crossing the left half of path 1 and the top half of path 2
		let trajectory = [DVec2::new(2., 0.5), DVec2::new(3.5, 1.5), DVec2::new(5.5, 3.)];
		let marked = hit_test_polyline(&segments, &trajectory, 4.);
		assert!(marked.len() >= 2);

		assert!(hit_test_polyline(&segments, &[], 4.).is_empty());
	}
}
