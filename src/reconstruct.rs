use crate::consts::{CHAIN_TOLERANCE, CONTAINMENT_LENGTH_RATIO, CONTAINMENT_TOLERANCE, JOIN_TOLERANCE, MIN_PATH_LENGTH, SIGNATURE_PRECISION};
use crate::curve::{Curve, CurveHandles};
use crate::path::{Command, PathData, PathElement, PathId, SubPath};
use crate::split::{SegmentId, TrimSegment};
use crate::utils;
use glam::DVec2;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// A path stitched back together from surviving segments.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReconstructedPath {
	pub id: u64,
	pub data: PathData,
	pub closed: bool,
	pub source_path_id: PathId,
	/// The segments this path was chained from, in traversal order.
	pub segment_ids: Vec<SegmentId>,
}

impl ReconstructedPath {
	/// Total arc length across all subpaths.
	pub fn length(&self) -> f64 {
		self.data.curve_entries().iter().map(|entry| entry.curve.length()).sum()
	}

	/// The number of anchor points across all subpaths.
	pub fn anchor_count(&self) -> usize {
		self.data.subpaths.iter().map(SubPath::anchor_count).sum()
	}
}

/// Grows a chain from `seed` in both directions, never reversing a segment.
///
/// Forward growth appends a segment whose start matches the chain's end; backward growth prepends
/// one whose end matches the chain's start. Backward growth is what lets an interrupted closed
/// subpath come out as one open chain instead of two.
fn grow_chain<'a>(seed: &'a TrimSegment, unused: &mut Vec<&'a TrimSegment>) -> VecDeque<&'a TrimSegment> {
	let mut chain = VecDeque::from([seed]);
	loop {
		let chain_end = chain.back().map(|segment| segment.end_point).unwrap_or_default();
		if let Some(position) = unused.iter().position(|segment| utils::dvec2_compare(segment.start_point, chain_end, CHAIN_TOLERANCE)) {
			chain.push_back(unused.remove(position));
			continue;
		}
		let chain_start = chain.front().map(|segment| segment.start_point).unwrap_or_default();
		if let Some(position) = unused.iter().position(|segment| utils::dvec2_compare(segment.end_point, chain_start, CHAIN_TOLERANCE)) {
			chain.push_front(unused.remove(position));
			continue;
		}
		return chain;
	}
}

/// Appends one curve to the running command list, merging its start anchor with the current end
/// point when they coincide. A gap beyond the merge tolerance becomes a new move, which should not
/// occur for correctly split input.
fn append_curve(commands: &mut Vec<Command>, current_end: &mut DVec2, curve: &Curve) {
	if !utils::dvec2_compare(curve.start, *current_end, JOIN_TOLERANCE) {
		log::warn!("Chained segments leave a gap of {:.4} units; starting a new subpath", curve.start.distance(*current_end));
		commands.push(Command::MoveTo { to: curve.start });
	}
	match curve.handles {
		CurveHandles::Line => commands.push(Command::LineTo { to: curve.end }),
		CurveHandles::Cubic { handle_start, handle_end } => commands.push(Command::CubicTo {
			handle_start,
			handle_end,
			to: curve.end,
		}),
	}
	*current_end = curve.end;
}

/// Chains surviving segments into new paths.
///
/// Survivors are grouped by source path, chained end-to-start within [`CHAIN_TOLERANCE`], and each
/// chain's curve data is concatenated without resampling. A chain whose endpoints meet is closed:
/// its last anchor is snapped onto its first and a close command is appended, keeping the last
/// curve's incoming handle. Open paths lose their fill, since an open fragment does not enclose a
/// region; stroke properties always carry over.
pub fn reconstruct(segments: &[TrimSegment], removed: &FxHashSet<SegmentId>, original_paths: &FxHashMap<PathId, PathElement>) -> Vec<ReconstructedPath> {
	// Group survivors by source path, preserving first-appearance path order for determinism
	let mut path_order: Vec<PathId> = Vec::new();
	let mut groups: FxHashMap<PathId, Vec<&TrimSegment>> = FxHashMap::default();
	for segment in segments {
		if removed.contains(&segment.id) {
			continue;
		}
		groups.entry(segment.path_id).or_insert_with(|| {
			path_order.push(segment.path_id);
			Vec::new()
		}).push(segment);
	}

	let mut reconstructed = Vec::new();
	let mut next_id: u64 = 0;

	for path_id in path_order {
		let Some(mut unused) = groups.remove(&path_id) else { continue };
		while !unused.is_empty() {
			let seed = unused.remove(0);
			let chain = grow_chain(seed, &mut unused);

			let Some(first_point) = chain.front().map(|segment| segment.start_point) else { continue };
			let Some(last_point) = chain.back().map(|segment| segment.end_point) else { continue };
			let closed = utils::dvec2_compare(first_point, last_point, CHAIN_TOLERANCE);

			let mut commands = vec![Command::MoveTo { to: first_point }];
			let mut current_end = first_point;
			for segment in &chain {
				for curve in &segment.curves {
					append_curve(&mut commands, &mut current_end, curve);
				}
			}

			if closed {
				// Merge the final anchor into the starting one, keeping the incoming handle
				if let Some(last_command) = commands.last_mut() {
					match last_command {
						Command::LineTo { to } | Command::CubicTo { to, .. } => *to = first_point,
						_ => {}
					}
				}
				commands.push(Command::Close);
			}

			let mut style = chain.front().map(|segment| segment.style.clone()).unwrap_or_default();
			if !closed {
				style.fill = None;
			}

			reconstructed.push(ReconstructedPath {
				id: next_id,
				data: PathData {
					subpaths: vec![SubPath { commands }],
					style,
				},
				closed,
				source_path_id: path_id,
				segment_ids: chain.iter().map(|segment| segment.id).collect(),
			});
			next_id += 1;
		}
	}

	let original_count = original_paths.len();
	log::debug!("Reconstructed {} paths from {} originals with {} segments removed", reconstructed.len(), original_count, removed.len());
	reconstructed
}

/// Rounded-coordinate signature used to detect duplicate reconstructed paths.
fn signature(path: &ReconstructedPath) -> Vec<i64> {
	let quantize = |value: f64| (value / SIGNATURE_PRECISION).round() as i64;
	let mut signature = Vec::new();
	for subpath in &path.data.subpaths {
		for command in &subpath.commands {
			match *command {
				Command::MoveTo { to } => signature.extend([0, quantize(to.x), quantize(to.y)]),
				Command::LineTo { to } => signature.extend([1, quantize(to.x), quantize(to.y)]),
				Command::CubicTo { handle_start, handle_end, to } => {
					signature.extend([2, quantize(handle_start.x), quantize(handle_start.y), quantize(handle_end.x), quantize(handle_end.y), quantize(to.x), quantize(to.y)])
				}
				Command::Close => signature.push(3),
			}
		}
	}
	signature
}

/// Filters reconstruction noise out of a path list.
///
/// Drops degenerate paths (fewer than two anchors or arc length under [`MIN_PATH_LENGTH`]),
/// duplicates by rounded-coordinate signature (first kept), and tiny paths whose bounding box is
/// contained in an already-kept path while measuring under [`CONTAINMENT_LENGTH_RATIO`] of its
/// length. The containment rule is a heuristic, not a geometric guarantee.
pub fn sanitize(paths: Vec<ReconstructedPath>) -> Vec<ReconstructedPath> {
	let mut kept: Vec<ReconstructedPath> = Vec::new();
	let mut kept_measures: Vec<(Option<[DVec2; 2]>, f64)> = Vec::new();
	let mut seen_signatures: FxHashSet<Vec<i64>> = FxHashSet::default();

	'candidates: for path in paths {
		if path.anchor_count() < 2 {
			log::debug!("Dropping reconstructed path {} with fewer than two anchors", path.id);
			continue;
		}
		let length = path.length();
		if length < MIN_PATH_LENGTH {
			log::debug!("Dropping degenerate reconstructed path {} of length {length:.4}", path.id);
			continue;
		}
		if !seen_signatures.insert(signature(&path)) {
			log::debug!("Dropping duplicate reconstructed path {}", path.id);
			continue;
		}

		let bounds = path.data.bounding_box();
		if let Some(bounds) = bounds {
			for (kept_bounds, kept_length) in &kept_measures {
				let contained = kept_bounds.is_some_and(|outer| utils::rectangle_contains(outer, bounds, CONTAINMENT_TOLERANCE));
				if contained && length < CONTAINMENT_LENGTH_RATIO * kept_length {
					log::debug!("Dropping contained fragment {} of length {length:.4}", path.id);
					continue 'candidates;
				}
			}
		}

		kept_measures.push((bounds, length));
		kept.push(path);
	}
	kept
}
