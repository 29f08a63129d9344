use super::*;
use crate::consts::{INTERSECTION_ERROR, MAX_ABSOLUTE_DIFFERENCE, MAX_SUBDIVISION_DEPTH, MIN_T_SEPARATION};
use crate::utils::{self, solve_cubic, solve_linear, solve_quadratic};
use std::ops::Range;

/// Functionality that solves for curve information such as extrema, bounding boxes, and intersections.
impl Curve {
	/// Returns two lists of `t`-values representing the local extrema of the `x` and `y` parametric curves respectively.
	fn unrestricted_local_extrema(&self) -> [[Option<f64>; 3]; 2] {
		match self.handles {
			CurveHandles::Line => [[None; 3]; 2],
			CurveHandles::Cubic { handle_start, handle_end } => {
				let d0 = handle_start - self.start;
				let d1 = handle_end - handle_start;
				let d2 = self.end - handle_end;
				let a = d0 - 2. * d1 + d2;
				let b = 2. * (d1 - d0);
				let c = d0;
				let discriminant = b * b - 4. * a * c;
				let two_times_a = 2. * a;
				[
					solve_quadratic(discriminant.x, two_times_a.x, b.x, c.x),
					solve_quadratic(discriminant.y, two_times_a.y, b.y, c.y),
				]
			}
		}
	}

	/// The local extrema of the `x` and `y` parametric curves, filtered to fall within `(0, 1)`.
	pub fn local_extrema(&self) -> [impl Iterator<Item = f64>; 2] {
		self.unrestricted_local_extrema().map(|t_values| t_values.into_iter().flatten().filter(|&t| t > 0. && t < 1.))
	}

	/// Returns list of parametric `t`-values representing the inflection points of the curve, filtered to fall within `(0, 1)`.
	pub fn inflections(&self) -> Vec<f64> {
		let CurveHandles::Cubic { handle_start, handle_end } = self.handles else {
			return Vec::new();
		};
		// Compute the cross product of the first and second derivatives; its roots are the inflections
		let a = handle_start - self.start;
		let b = handle_end - handle_start - a;
		let c = self.end - handle_end - a - 2. * b;
		let discriminant = (a.x * c.y - a.y * c.x).powi(2) - 4. * (b.x * c.y - b.y * c.x) * (a.x * b.y - a.y * b.x);
		solve_quadratic(discriminant, 2. * (b.x * c.y - b.y * c.x), a.x * c.y - a.y * c.x, a.x * b.y - a.y * b.x)
			.into_iter()
			.flatten()
			.filter(|&t| t > 0. && t < 1.)
			.collect()
	}

	/// Return the min and max corners that represent the bounding box of the curve.
	pub fn bounding_box(&self) -> [DVec2; 2] {
		// Start by taking the min/max of the endpoints
		let mut endpoints_min = self.start.min(self.end);
		let mut endpoints_max = self.start.max(self.end);

		// Iterate through the extrema points
		let extrema = self.local_extrema();
		for t_values in extrema {
			for t in t_values {
				let point = self.evaluate(t);
				endpoints_min = endpoints_min.min(point);
				endpoints_max = endpoints_max.max(point);
			}
		}

		[endpoints_min, endpoints_max]
	}

	/// Returns the `t`-values at which the curve crosses the infinite line through `point_on_line` with the given direction.
	/// The returned values are clamped to `[0, 1]`; values outside that range (within tolerance) are discarded.
	fn line_crossing_tvalues(&self, point_on_line: DVec2, direction: DVec2) -> Vec<f64> {
		// Signed distances of the defining points to the line, measured along its normal
		let normal = direction.perp();
		let roots = match self.handles {
			CurveHandles::Line => {
				let a0 = (self.start - point_on_line).dot(normal);
				let a1 = (self.end - point_on_line).dot(normal);
				solve_linear(a1 - a0, a0)
			}
			CurveHandles::Cubic { handle_start, handle_end } => {
				let a0 = (self.start - point_on_line).dot(normal);
				let a1 = (handle_start - point_on_line).dot(normal);
				let a2 = (handle_end - point_on_line).dot(normal);
				let a3 = (self.end - point_on_line).dot(normal);
				let a = -a0 + 3. * a1 - 3. * a2 + a3;
				let b = 3. * a0 - 6. * a1 + 3. * a2;
				let c = -3. * a0 + 3. * a1;
				solve_cubic(a, b, c, a0)
			}
		};
		roots
			.into_iter()
			.flatten()
			.filter(|&t| utils::f64_approximately_in_range(t, 0., 1., MAX_ABSOLUTE_DIFFERENCE))
			.map(|t| t.clamp(0., 1.))
			.collect()
	}

	/// Implementation of the algorithm to find curve intersections by iterating on bounding boxes.
	/// `self_interval` and `other_interval` identify the `t` ranges of the original parents that the current iteration represents.
	fn intersections_between_subcurves(&self, self_interval: Range<f64>, other: &Curve, other_interval: Range<f64>, error: f64, remaining_depth: usize) -> Vec<[f64; 2]> {
		let bounding_box1 = self.bounding_box();
		let bounding_box2 = other.bounding_box();

		if !utils::do_rectangles_overlap(bounding_box1, bounding_box2) {
			return Vec::new();
		}

		let self_mid_t = (self_interval.start + self_interval.end) / 2.;
		let other_mid_t = (other_interval.start + other_interval.end) / 2.;

		let error_threshold = DVec2::splat(error);
		let small_enough =
			(bounding_box1[1] - bounding_box1[0]).cmplt(error_threshold).all() && (bounding_box2[1] - bounding_box2[0]).cmplt(error_threshold).all();
		if small_enough || remaining_depth == 0 {
			// The bounding boxes are within the error threshold, use the middle `t` values
			return vec![[self_mid_t, other_mid_t]];
		}

		// Split both curves in half and recurse on the four combinations of halves
		let [split_1_a, split_1_b] = self.split(0.5);
		let [split_2_a, split_2_b] = other.split(0.5);

		[
			split_1_a.intersections_between_subcurves(self_interval.start..self_mid_t, &split_2_a, other_interval.start..other_mid_t, error, remaining_depth - 1),
			split_1_a.intersections_between_subcurves(self_interval.start..self_mid_t, &split_2_b, other_mid_t..other_interval.end, error, remaining_depth - 1),
			split_1_b.intersections_between_subcurves(self_mid_t..self_interval.end, &split_2_a, other_interval.start..other_mid_t, error, remaining_depth - 1),
			split_1_b.intersections_between_subcurves(self_mid_t..self_interval.end, &split_2_b, other_mid_t..other_interval.end, error, remaining_depth - 1),
		]
		.concat()
	}

	/// Returns the intersections between this curve and `other` as `[t_self, t_other]` parameter pairs.
	///
	/// Line×line intersections are solved analytically; line×cubic by finding the cubic's roots across the
	/// line; cubic×cubic by bounding-box subdivision within [`INTERSECTION_ERROR`]. Intersections whose
	/// `t_self` values are closer together than [`MIN_T_SEPARATION`] are reported once (first kept).
	/// Colinear overlapping lines report no intersections.
	pub fn intersections(&self, other: &Curve) -> Vec<[f64; 2]> {
		let mut pairs = match (self.is_line(), other.is_line()) {
			(true, true) => {
				let direction1 = self.end - self.start;
				let direction2 = other.end - other.start;
				let denominator = direction1.perp_dot(direction2);
				// Parallel (or degenerate) lines have no point intersection
				if denominator.abs() <= 1e-10 * direction1.length().max(1.) * direction2.length().max(1.) {
					Vec::new()
				} else {
					let offset = other.start - self.start;
					let t = offset.perp_dot(direction2) / denominator;
					let s = offset.perp_dot(direction1) / denominator;
					if utils::f64_approximately_in_range(t, 0., 1., MAX_ABSOLUTE_DIFFERENCE) && utils::f64_approximately_in_range(s, 0., 1., MAX_ABSOLUTE_DIFFERENCE) {
						vec![[t.clamp(0., 1.), s.clamp(0., 1.)]]
					} else {
						Vec::new()
					}
				}
			}
			(false, true) => {
				let direction = other.end - other.start;
				let length_squared = direction.length_squared();
				self.line_crossing_tvalues(other.start, direction)
					.into_iter()
					.filter_map(|t| {
						let s = (self.evaluate(t) - other.start).dot(direction) / length_squared;
						utils::f64_approximately_in_range(s, 0., 1., MAX_ABSOLUTE_DIFFERENCE).then(|| [t, s.clamp(0., 1.)])
					})
					.collect()
			}
			(true, false) => other.intersections(self).into_iter().map(|[s, t]| [t, s]).collect(),
			(false, false) => self.intersections_between_subcurves(0. ..1., other, 0. ..1., INTERSECTION_ERROR, MAX_SUBDIVISION_DEPTH),
		};

		// The subdividing search reports a cluster of hits around each true crossing
		pairs.sort_by(|a, b| a[0].total_cmp(&b[0]));
		pairs.dedup_by(|next, kept| (next[0] - kept[0]).abs() < MIN_T_SEPARATION);
		pairs
	}

	/// Returns the self-intersections of the curve as `[t1, t2]` parameter pairs with `t1 < t2`.
	/// Only a cubic can intersect itself; the curve is split into monotone pieces at its extrema
	/// and inflections, and non-adjacent pieces are cross-tested.
	pub fn self_intersections(&self) -> Vec<[f64; 2]> {
		if !self.is_cubic() {
			return Vec::new();
		}

		// Boundaries of the monotone pieces
		let [x_extrema, y_extrema] = self.local_extrema();
		let mut boundaries: Vec<f64> = x_extrema.chain(y_extrema).chain(self.inflections()).collect();
		boundaries.sort_by(|a, b| a.total_cmp(b));
		boundaries.dedup_by(|next, kept| (*next - *kept).abs() < 1e-6);
		boundaries.insert(0, 0.);
		boundaries.push(1.);

		// Adjacent pieces share an endpoint and cannot properly intersect
		let piece_count = boundaries.len() - 1;
		if piece_count <= 2 {
			return Vec::new();
		}

		let mut pairs = Vec::new();
		for first in 0..piece_count.saturating_sub(2) {
			let first_range = boundaries[first]..boundaries[first + 1];
			let first_piece = self.trim(first_range.start, first_range.end);
			for second in (first + 2)..piece_count {
				let second_range = boundaries[second]..boundaries[second + 1];
				let second_piece = self.trim(second_range.start, second_range.end);
				pairs.extend(first_piece.intersections_between_subcurves(first_range.clone(), &second_piece, second_range, INTERSECTION_ERROR, MAX_SUBDIVISION_DEPTH));
			}
		}

		pairs.sort_by(|a, b| a[0].total_cmp(&b[0]));
		pairs.dedup_by(|next, kept| (next[0] - kept[0]).abs() < MIN_T_SEPARATION);
		pairs
	}
}
