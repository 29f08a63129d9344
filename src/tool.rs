use crate::cache::SplitCache;
use crate::consts::DEFAULT_HIT_THRESHOLD;
use crate::error::TrimError;
use crate::path::PathElement;
use crate::reconstruct::{ReconstructedPath, reconstruct, sanitize};
use crate::select::hit_test;
use crate::split::{SegmentId, SplitPathResult};
use glam::DVec2;
use rustc_hash::FxHashSet;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum GestureState {
	#[default]
	Ready,
	Dragging,
}

/// Interactive controller over the trim pipeline.
///
/// Owns the split cache and all gesture state; nothing lives in a global. Callers feed it pointer
/// events and apply the reconstructed paths it returns to their own document. Every operation runs
/// to completion synchronously, and no method panics on out-of-order calls.
#[derive(Debug)]
pub struct TrimTool {
	cache: SplitCache,
	marked: FxHashSet<SegmentId>,
	gesture: GestureState,
	hit_threshold: f64,
}

impl Default for TrimTool {
	fn default() -> Self {
		Self::new()
	}
}

impl TrimTool {
	pub fn new() -> Self {
		TrimTool {
			cache: SplitCache::new(),
			marked: FxHashSet::default(),
			gesture: GestureState::Ready,
			hit_threshold: DEFAULT_HIT_THRESHOLD,
		}
	}

	/// Overrides the pointer distance within which a segment counts as hit.
	pub fn with_hit_threshold(mut self, threshold: f64) -> Self {
		self.hit_threshold = threshold;
		self
	}

	/// Computes and caches the split result for the selected paths.
	/// On validation failure the tool stays inactive and the error is surfaced.
	pub fn activate(&mut self, paths: &[PathElement]) -> Result<&SplitPathResult, TrimError> {
		log::debug!("Activating trim tool on {} paths", paths.len());
		self.marked.clear();
		self.gesture = GestureState::Ready;
		self.cache.refresh(paths)
	}

	/// Clears the cache and any gesture state.
	pub fn deactivate(&mut self) {
		log::debug!("Deactivating trim tool");
		self.cache.clear();
		self.marked.clear();
		self.gesture = GestureState::Ready;
	}

	/// The current split result, if the tool is active.
	pub fn split_result(&self) -> Option<&SplitPathResult> {
		self.cache.get()
	}

	/// The segment under the pointer, if any. No state is mutated.
	pub fn hover_segment(&self, point: DVec2) -> Option<SegmentId> {
		let result = self.cache.get()?;
		hit_test(&result.segments, point, self.hit_threshold).map(|segment| segment.id)
	}

	/// Removes a single segment and reconstructs the survivors.
	/// The caller applies the returned paths as the replacement of the originals.
	pub fn click(&mut self, segment: SegmentId) -> Vec<ReconstructedPath> {
		let Some(result) = self.cache.get() else {
			return Vec::new();
		};
		let removed: FxHashSet<SegmentId> = std::iter::once(segment).collect();
		sanitize(reconstruct(&result.segments, &removed, &result.original_paths))
	}

	/// Begins a drag gesture, marking any segment under the starting point.
	pub fn drag_start(&mut self, point: DVec2) {
		self.marked.clear();
		self.gesture = GestureState::Dragging;
		self.mark_at(point);
	}

	/// Marks the segment under a sampled point of the drag trajectory.
	/// Ignored when no drag is in progress.
	pub fn drag_update(&mut self, point: DVec2) {
		if self.gesture == GestureState::Dragging {
			self.mark_at(point);
		}
	}

	/// Commits the marked set through reconstruction.
	/// An empty marked set is a no-op equivalent to cancelling the drag.
	pub fn drag_finish(&mut self) -> Vec<ReconstructedPath> {
		self.gesture = GestureState::Ready;
		let marked = std::mem::take(&mut self.marked);
		if marked.is_empty() {
			return Vec::new();
		}
		let Some(result) = self.cache.get() else {
			return Vec::new();
		};
		log::debug!("Committing drag removal of {} segments", marked.len());
		sanitize(reconstruct(&result.segments, &marked, &result.original_paths))
	}

	/// Discards the marked set without touching the cache.
	pub fn drag_cancel(&mut self) {
		self.gesture = GestureState::Ready;
		self.marked.clear();
	}

	/// The segments marked for removal by the drag in progress, for hover feedback.
	pub fn marked(&self) -> &FxHashSet<SegmentId> {
		&self.marked
	}

	fn mark_at(&mut self, point: DVec2) {
		let Some(result) = self.cache.get() else { return };
		if let Some(segment) = hit_test(&result.segments, point, self.hit_threshold) {
			self.marked.insert(segment.id);
		}
	}
}
