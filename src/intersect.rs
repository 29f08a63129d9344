use crate::consts::{ENDPOINT_ARTIFACT_RADIUS, MAX_PATH_COUNT, MIN_PATH_COUNT, MIN_T_SEPARATION, PAIR_BOUNDS_PADDING};
use crate::error::TrimError;
use crate::path::{Command, CurveEntry, PathElement, PathId};
use crate::utils;
use glam::DVec2;

/// Identifier of an intersection, fresh per computation.
pub type IntersectionId = u64;

/// One intersection between two curves, or between a curve and itself.
/// A self-intersection has `path_id1 == path_id2`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrimIntersection {
	pub id: IntersectionId,
	pub point: DVec2,
	pub path_id1: PathId,
	pub path_id2: PathId,
	pub curve_index1: usize,
	pub curve_index2: usize,
	/// Curve-local parameter of the intersection on the first curve, in `[0, 1]`.
	pub parameter1: f64,
	/// Curve-local parameter of the intersection on the second curve, in `[0, 1]`.
	pub parameter2: f64,
}

/// Checks that the provided path set is one the pipeline can trim.
///
/// Fails with [`TrimError::InsufficientPaths`] below 2 paths, [`TrimError::TooManyPaths`] above the
/// hard cap that bounds the O(n²) pairwise pass, and [`TrimError::InvalidElementType`] when an
/// element's data does not describe a path (no subpaths, or a subpath not starting with a move).
pub fn validate(paths: &[PathElement]) -> Result<(), TrimError> {
	if paths.len() < MIN_PATH_COUNT {
		return Err(TrimError::InsufficientPaths {
			minimum: MIN_PATH_COUNT,
			actual: paths.len(),
		});
	}
	if paths.len() > MAX_PATH_COUNT {
		return Err(TrimError::TooManyPaths {
			maximum: MAX_PATH_COUNT,
			actual: paths.len(),
		});
	}
	for path in paths {
		if path.data.subpaths.is_empty() {
			return Err(TrimError::InvalidElementType {
				path_id: path.id,
				reason: "element contains no subpaths".into(),
			});
		}
		if path.data.subpaths.iter().any(|subpath| !matches!(subpath.commands.first(), Some(Command::MoveTo { .. }))) {
			return Err(TrimError::InvalidElementType {
				path_id: path.id,
				reason: "subpath does not begin with a move command".into(),
			});
		}
	}
	Ok(())
}

/// Whether a parameter sits at one of the curve's ends.
fn at_parameter_extreme(t: f64) -> bool {
	t < MIN_T_SEPARATION || t > 1. - MIN_T_SEPARATION
}

/// The flattened curve list of a path, or [`TrimError::DegenerateGeometry`] for non-finite input.
/// Callers skip the offending path and continue with the rest.
pub(crate) fn finite_curve_entries(path: &PathElement) -> Result<Vec<CurveEntry>, TrimError> {
	if !path.data.is_finite() {
		return Err(TrimError::DegenerateGeometry { path_id: path.id });
	}
	Ok(path.data.curve_entries())
}

/// Intersections within one path: each curve against itself, then each non-identical curve pair.
/// Consecutive curves of a subpath share an anchor, so hits sitting at the parameter extremes of
/// both curves are shared-anchor artifacts and are dropped.
fn self_intersections_of_path(path: &PathElement, entries: &[CurveEntry], next_id: &mut IntersectionId, output: &mut Vec<TrimIntersection>) {
	let first_anchor = path.data.first_anchor();
	let last_anchor = path.data.last_anchor();
	let near_path_endpoint = |point: DVec2| {
		first_anchor.is_some_and(|anchor| point.distance(anchor) <= ENDPOINT_ARTIFACT_RADIUS) || last_anchor.is_some_and(|anchor| point.distance(anchor) <= ENDPOINT_ARTIFACT_RADIUS)
	};

	for (index1, entry1) in entries.iter().enumerate() {
		// The curve against itself
		for [t1, t2] in entry1.curve.self_intersections() {
			let point = entry1.curve.evaluate(t1);
			if near_path_endpoint(point) {
				continue;
			}
			output.push(TrimIntersection {
				id: take_id(next_id),
				point,
				path_id1: path.id,
				path_id2: path.id,
				curve_index1: index1,
				curve_index2: index1,
				parameter1: t1,
				parameter2: t2,
			});
		}

		// The curve against every later curve of the same path
		for (offset, entry2) in entries[index1 + 1..].iter().enumerate() {
			let index2 = index1 + 1 + offset;
			for [t1, t2] in entry1.curve.intersections(&entry2.curve) {
				if at_parameter_extreme(t1) && at_parameter_extreme(t2) {
					continue;
				}
				let point = entry1.curve.evaluate(t1);
				if near_path_endpoint(point) {
					continue;
				}
				output.push(TrimIntersection {
					id: take_id(next_id),
					point,
					path_id1: path.id,
					path_id2: path.id,
					curve_index1: index1,
					curve_index2: index2,
					parameter1: t1,
					parameter2: t2,
				});
			}
		}
	}
}

fn take_id(next_id: &mut IntersectionId) -> IntersectionId {
	let id = *next_id;
	*next_id += 1;
	id
}

/// Computes all self- and pairwise intersections between the provided paths.
///
/// Output order is deterministic: all self-intersections in path order, then all pairwise
/// intersections for ascending path pairs in curve discovery order. Ids are assigned sequentially
/// in that order. Paths whose bounding boxes, expanded by [`PAIR_BOUNDS_PADDING`], do not overlap
/// are skipped without any curve-level work.
pub fn compute_intersections(paths: &[PathElement]) -> Vec<TrimIntersection> {
	let mut intersections = Vec::new();
	let mut next_id: IntersectionId = 0;

	// A path with non-finite coordinates is skipped entirely; computation continues with the rest
	let entries: Vec<Vec<CurveEntry>> = paths
		.iter()
		.map(|path| match finite_curve_entries(path) {
			Ok(entries) => entries,
			Err(error) => {
				log::warn!("Skipping path in intersection pass: {error}");
				Vec::new()
			}
		})
		.collect();
	let bounds: Vec<Option<[DVec2; 2]>> = paths.iter().map(|path| path.data.bounding_box()).collect();

	for (path, path_entries) in paths.iter().zip(&entries) {
		self_intersections_of_path(path, path_entries, &mut next_id, &mut intersections);
	}
	let self_intersection_count = intersections.len();

	for index1 in 0..paths.len() {
		for index2 in index1 + 1..paths.len() {
			let (Some(bounds1), Some(bounds2)) = (bounds[index1], bounds[index2]) else {
				continue;
			};
			if !utils::do_rectangles_overlap(utils::expand_rectangle(bounds1, PAIR_BOUNDS_PADDING), utils::expand_rectangle(bounds2, PAIR_BOUNDS_PADDING)) {
				log::trace!("Skipping distant path pair ({}, {})", paths[index1].id, paths[index2].id);
				continue;
			}

			for (curve_index1, entry1) in entries[index1].iter().enumerate() {
				for (curve_index2, entry2) in entries[index2].iter().enumerate() {
					for [t1, t2] in entry1.curve.intersections(&entry2.curve) {
						intersections.push(TrimIntersection {
							id: take_id(&mut next_id),
							point: entry1.curve.evaluate(t1),
							path_id1: paths[index1].id,
							path_id2: paths[index2].id,
							curve_index1,
							curve_index2,
							parameter1: t1,
							parameter2: t2,
						});
					}
				}
			}
		}
	}

	log::debug!(
		"Found {} intersections ({} self, {} pairwise) across {} paths",
		intersections.len(),
		self_intersection_count,
		intersections.len() - self_intersection_count,
		paths.len()
	);
	intersections
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::compare::compare_points;
	use crate::path::{PathData, PathStyle};

	fn path_element(id: PathId, data: &str) -> PathElement {
		PathElement {
			id,
			data: PathData::from_path_data(data, PathStyle::default()).unwrap(),
		}
	}

	#[test]
	fn test_validate_path_counts() {
		let path = path_element(0, "M 0 0 L 10 0");
		assert_eq!(
			validate(&[path.clone()]),
			Err(TrimError::InsufficientPaths { minimum: 2, actual: 1 })
		);

		let many: Vec<PathElement> = (0..101).map(|id| path_element(id, "M 0 0 L 10 0")).collect();
		assert_eq!(validate(&many), Err(TrimError::TooManyPaths { maximum: 100, actual: 101 }));
		assert_eq!(validate(&many[..100]), Ok(()));
	}

	#[test]
	fn test_validate_malformed_path() {
		let empty = PathElement {
			id: 7,
			data: PathData::default(),
		};
		let other = path_element(8, "M 0 0 L 10 0");
		assert!(matches!(validate(&[empty, other]), Err(TrimError::InvalidElementType { path_id: 7, .. })));
	}

	#[test]
	fn test_crossing_lines() {
		let a = path_element(1, "M 0 0 L 10 0");
		let b = path_element(2, "M 5 -5 L 5 5");
		let intersections = compute_intersections(&[a, b]);
		assert_eq!(intersections.len(), 1);
		let intersection = &intersections[0];
		assert!(compare_points(intersection.point, DVec2::new(5., 0.)));
		assert_eq!((intersection.path_id1, intersection.path_id2), (1, 2));
		assert!((intersection.parameter1 - 0.5).abs() < 1e-9);
		assert!((intersection.parameter2 - 0.5).abs() < 1e-9);
	}

	#[test]
	fn test_disjoint_paths() {
		let a = path_element(1, "M 0 0 L 10 0");
		let b = path_element(2, "M 100 100 L 110 100");
		assert!(compute_intersections(&[a, b]).is_empty());
	}

	#[test]
	fn test_shared_anchors_are_not_self_intersections() {
		// A closed square's corners join consecutive curves but are not crossings
		let square = path_element(1, "M 0 0 L 100 0 L 100 100 L 0 100 Z");
		let far = path_element(2, "M 500 500 L 510 500");
		assert!(compute_intersections(&[square, far]).is_empty());
	}

	#[test]
	fn test_self_crossing_path() {
		// A four-point bow tie crosses itself at its center (50, 25)
		let bow_tie = path_element(1, "M 0 0 L 100 50 L 100 0 L 0 50");
		let far = path_element(2, "M 500 500 L 510 500");
		let intersections = compute_intersections(&[bow_tie, far]);
		assert_eq!(intersections.len(), 1);
		assert_eq!(intersections[0].path_id1, intersections[0].path_id2);
		assert!(compare_points(intersections[0].point, DVec2::new(50., 25.)));
	}

	#[test]
	fn test_non_finite_path_is_skipped() {
		let mut bad = path_element(1, "M 0 0 L 10 0");
		bad.data.subpaths[0].commands[1] = Command::LineTo { to: DVec2::new(f64::NAN, 0.) };
		let good_a = path_element(2, "M 0 0 L 10 0");
		let good_b = path_element(3, "M 5 -5 L 5 5");

		let intersections = compute_intersections(&[bad, good_a, good_b]);
		assert_eq!(intersections.len(), 1);
		assert_eq!((intersections[0].path_id1, intersections[0].path_id2), (2, 3));
	}

	#[test]
	fn test_deterministic_order_and_ids() {
		let a = path_element(1, "M 0 0 L 100 100");
		let b = path_element(2, "M 0 100 L 100 0");
		let c = path_element(3, "M 0 50 L 100 50");
		let paths = [a, b, c];
		let first = compute_intersections(&paths);
		let second = compute_intersections(&paths);
		assert_eq!(first, second);
		assert!(first.iter().enumerate().all(|(index, intersection)| intersection.id == index as u64));
	}
}
