use crate::error::TrimError;
use crate::intersect::{compute_intersections, validate};
use crate::path::{PathElement, PathId};
use crate::split::{SplitPathResult, split_paths};

/// Memoizes the split result for one input path set.
///
/// The cache is keyed on the sorted set of input path ids (the fingerprint). `refresh` replaces
/// the stored result atomically; nothing is ever mutated in place, so a reader holding a borrow of
/// the previous result can never observe a half-updated state.
#[derive(Debug, Default)]
pub struct SplitCache {
	fingerprint: Vec<PathId>,
	result: Option<SplitPathResult>,
}

impl SplitCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Recomputes intersections and segments for the given paths, replacing any cached value.
	/// A validation failure clears the cache and surfaces the error so the caller can deactivate.
	pub fn refresh(&mut self, paths: &[PathElement]) -> Result<&SplitPathResult, TrimError> {
		if let Err(error) = validate(paths) {
			self.clear();
			return Err(error);
		}

		let intersections = compute_intersections(paths);
		let result = split_paths(paths, &intersections);

		self.fingerprint = Self::fingerprint_of(paths.iter().map(|path| path.id));
		log::debug!("Cached split result for paths {:?}", self.fingerprint);
		Ok(self.result.insert(result))
	}

	/// The last cached result, if any.
	pub fn get(&self) -> Option<&SplitPathResult> {
		self.result.as_ref()
	}

	/// Whether the cached result was computed for exactly this id set.
	pub fn is_valid_for(&self, ids: &[PathId]) -> bool {
		self.result.is_some() && self.fingerprint == Self::fingerprint_of(ids.iter().copied())
	}

	/// Drops the cached result and fingerprint.
	pub fn clear(&mut self) {
		self.fingerprint.clear();
		self.result = None;
	}

	fn fingerprint_of(ids: impl Iterator<Item = PathId>) -> Vec<PathId> {
		let mut fingerprint: Vec<PathId> = ids.collect();
		fingerprint.sort_unstable();
		fingerprint.dedup();
		fingerprint
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::path::{PathData, PathStyle};

	fn path_element(id: PathId, data: &str) -> PathElement {
		PathElement {
			id,
			data: PathData::from_path_data(data, PathStyle::default()).unwrap(),
		}
	}

	fn crossing_lines() -> Vec<PathElement> {
		vec![path_element(1, "M 0 0 L 10 0"), path_element(2, "M 5 -5 L 5 5")]
	}

	#[test]
	fn test_refresh_and_get() {
		let mut cache = SplitCache::new();
		assert!(cache.get().is_none());

		let paths = crossing_lines();
		let result = cache.refresh(&paths).unwrap();
		assert_eq!(result.intersections.len(), 1);
		assert!(cache.get().is_some());
	}

	#[test]
	fn test_fingerprint_ignores_order() {
		let mut cache = SplitCache::new();
		cache.refresh(&crossing_lines()).unwrap();
		assert!(cache.is_valid_for(&[1, 2]));
		assert!(cache.is_valid_for(&[2, 1]));
		assert!(!cache.is_valid_for(&[1, 2, 3]));
		assert!(!cache.is_valid_for(&[1]));
	}

	#[test]
	fn test_validation_failure_clears_cache() {
		let mut cache = SplitCache::new();
		cache.refresh(&crossing_lines()).unwrap();
		assert!(cache.get().is_some());

		let too_few = vec![path_element(1, "M 0 0 L 10 0")];
		assert!(cache.refresh(&too_few).is_err());
		assert!(cache.get().is_none());
		assert!(!cache.is_valid_for(&[1, 2]));
	}

	#[test]
	fn test_clear() {
		let mut cache = SplitCache::new();
		cache.refresh(&crossing_lines()).unwrap();
		cache.clear();
		assert!(cache.get().is_none());
		assert!(!cache.is_valid_for(&[1, 2]));
	}
}
