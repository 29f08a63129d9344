use crate::consts::{PARAMETER_DEDUP, SEAM_TOLERANCE};
use crate::curve::Curve;
use crate::intersect::{IntersectionId, TrimIntersection};
use crate::path::{PathElement, PathId, PathStyle};
use crate::utils;
use glam::DVec2;
use rustc_hash::FxHashMap;
use smallvec::{SmallVec, smallvec};

/// Identifier of a segment, fresh per computation.
pub type SegmentId = u64;

/// One intersection-bounded fragment of a path: the atomic trimmable unit.
///
/// A segment normally carries one curve. After a closed-loop wraparound merge it carries two,
/// traversed in order through the seam; the original control points are preserved exactly in
/// either case, never resampled.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrimSegment {
	pub id: SegmentId,
	pub path_id: PathId,
	/// The intersection this segment starts at, or `None` at an open path endpoint.
	pub start_intersection: Option<IntersectionId>,
	/// The intersection this segment ends at, or `None` at an open path endpoint.
	pub end_intersection: Option<IntersectionId>,
	pub start_point: DVec2,
	pub end_point: DVec2,
	pub curves: SmallVec<[Curve; 2]>,
	pub bounding_box: [DVec2; 2],
	pub style: PathStyle,
	/// Index of the curve this segment was cut from, in the path's flattened curve list.
	pub source_curve_index: usize,
}

impl TrimSegment {
	/// Distance from the provided point to the nearest point of the segment.
	pub fn distance_to(&self, point: DVec2) -> f64 {
		self.curves.iter().map(|curve| curve.distance_to(point)).fold(f64::MAX, f64::min)
	}
}

/// The result of splitting a path set at its intersections, cached per path-id set.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SplitPathResult {
	pub intersections: Vec<TrimIntersection>,
	pub segments: Vec<TrimSegment>,
	pub original_paths: FxHashMap<PathId, PathElement>,
}

fn make_segment(id: SegmentId, path: &PathElement, source_curve_index: usize, curves: SmallVec<[Curve; 2]>, start_intersection: Option<IntersectionId>, end_intersection: Option<IntersectionId>) -> TrimSegment {
	let bounding_box = curves
		.iter()
		.map(|curve| curve.bounding_box())
		.reduce(utils::merge_rectangles)
		.unwrap_or([DVec2::ZERO, DVec2::ZERO]);
	TrimSegment {
		id,
		path_id: path.id,
		start_intersection,
		end_intersection,
		start_point: curves.first().map(|curve| curve.start).unwrap_or(DVec2::ZERO),
		end_point: curves.last().map(|curve| curve.end).unwrap_or(DVec2::ZERO),
		curves,
		bounding_box,
		style: path.data.style.clone(),
		source_curve_index,
	}
}

/// Splits every path into intersection-bounded segments.
///
/// Per curve, the matching intersection offsets are sorted, deduplicated within
/// [`PARAMETER_DEDUP`] (first kept), and the curve is cut by iterated splitting so that adjacent
/// fragments share bitwise-equal boundary points. A curve of a closed subpath that is itself a
/// closed loop gets its first and last fragments merged into one segment spanning the seam, since
/// parameter 0 ≈ 1 is not a real intersection there.
pub fn split_paths(paths: &[PathElement], intersections: &[TrimIntersection]) -> SplitPathResult {
	fn take_id(next_id: &mut SegmentId) -> SegmentId {
		let id = *next_id;
		*next_id += 1;
		id
	}

	let mut segments = Vec::new();
	let mut next_id: SegmentId = 0;

	for path in paths {
		let entries = match crate::intersect::finite_curve_entries(path) {
			Ok(entries) => entries,
			Err(error) => {
				log::warn!("Skipping path in split pass: {error}");
				continue;
			}
		};
		for (curve_index, entry) in entries.iter().enumerate() {
			// Offsets along this curve where an intersection cuts it, from either side of each record
			let mut offsets: Vec<(IntersectionId, f64)> = Vec::new();
			for intersection in intersections {
				if intersection.path_id1 == path.id && intersection.curve_index1 == curve_index {
					offsets.push((intersection.id, intersection.parameter1));
				}
				if intersection.path_id2 == path.id && intersection.curve_index2 == curve_index {
					offsets.push((intersection.id, intersection.parameter2));
				}
			}
			offsets.sort_by(|a, b| a.1.total_cmp(&b.1));
			offsets.dedup_by(|next, kept| (next.1 - kept.1).abs() < PARAMETER_DEDUP);
			// A cut at a parameter extreme would produce an empty fragment
			offsets.retain(|&(_, t)| t > PARAMETER_DEDUP && t < 1. - PARAMETER_DEDUP);

			if offsets.is_empty() {
				segments.push(make_segment(take_id(&mut next_id), path, curve_index, smallvec![entry.curve], None, None));
				continue;
			}

			// Iterated splitting: each cut is rescaled onto the remainder, so every fragment
			// boundary is the one evaluated split point shared by both sides
			let mut fragments: Vec<Curve> = Vec::with_capacity(offsets.len() + 1);
			let mut remainder = entry.curve;
			let mut previous_t = 0.;
			for &(_, t) in &offsets {
				let [fragment, rest] = remainder.split((t - previous_t) / (1. - previous_t));
				fragments.push(fragment);
				remainder = rest;
				previous_t = t;
			}
			fragments.push(remainder);

			let wraparound = entry.subpath_closed && utils::dvec2_compare(entry.curve.start, entry.curve.end, SEAM_TOLERANCE);
			if wraparound {
				// Interior fragments are ordinary segments
				for (fragment_index, fragment) in fragments.iter().enumerate().skip(1).take(fragments.len() - 2) {
					segments.push(make_segment(
						take_id(&mut next_id),
						path,
						curve_index,
						smallvec![*fragment],
						Some(offsets[fragment_index - 1].0),
						Some(offsets[fragment_index].0),
					));
				}
				// The first and last fragments meet at the seam and form one segment
				let last_offset = offsets[offsets.len() - 1].0;
				segments.push(make_segment(
					take_id(&mut next_id),
					path,
					curve_index,
					smallvec![fragments[fragments.len() - 1], fragments[0]],
					Some(last_offset),
					Some(offsets[0].0),
				));
			} else {
				for (fragment_index, fragment) in fragments.iter().enumerate() {
					let start_intersection = fragment_index.checked_sub(1).map(|previous| offsets[previous].0);
					let end_intersection = offsets.get(fragment_index).map(|&(id, _)| id);
					segments.push(make_segment(take_id(&mut next_id), path, curve_index, smallvec![*fragment], start_intersection, end_intersection));
				}
			}
		}
	}

	log::debug!("Split {} paths at {} intersections into {} segments", paths.len(), intersections.len(), segments.len());

	SplitPathResult {
		intersections: intersections.to_vec(),
		segments,
		original_paths: paths.iter().map(|path| (path.id, path.clone())).collect(),
	}
}
