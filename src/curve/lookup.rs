use super::*;
use crate::consts::{LENGTH_FLATNESS, MAX_LENGTH_DEPTH, PROJECTION_LUT_SIZE, PROJECTION_REFINEMENT_ITERATIONS};

/// Functionality for evaluating a curve and querying positions along it.
impl Curve {
	/// Returns the point on the curve at parameter `t`, with `t` in `[0, 1]`.
	pub fn evaluate(&self, t: f64) -> DVec2 {
		match self.handles {
			CurveHandles::Line => self.start.lerp(self.end, t),
			CurveHandles::Cubic { handle_start, handle_end } => {
				let t_squared = t * t;
				let one_minus_t = 1. - t;
				let squared_one_minus_t = one_minus_t * one_minus_t;
				squared_one_minus_t * one_minus_t * self.start + 3. * squared_one_minus_t * t * handle_start + 3. * one_minus_t * t_squared * handle_end + t_squared * t * self.end
			}
		}
	}

	/// Returns the arc length of the curve, computed by adaptive subdivision for cubics.
	pub fn length(&self) -> f64 {
		match self.handles {
			CurveHandles::Line => self.start.distance(self.end),
			CurveHandles::Cubic { .. } => self.subdivided_length(MAX_LENGTH_DEPTH),
		}
	}

	fn subdivided_length(&self, remaining_depth: usize) -> f64 {
		let chord = self.start.distance(self.end);
		let polygon: f64 = self.points().windows(2).map(|pair| pair[0].distance(pair[1])).sum();
		if polygon - chord < LENGTH_FLATNESS || remaining_depth == 0 {
			return (polygon + chord) / 2.;
		}
		let [first, second] = self.split(0.5);
		first.subdivided_length(remaining_depth - 1) + second.subdivided_length(remaining_depth - 1)
	}

	/// Returns the parameter `t` of the point on the curve nearest to the provided point.
	/// Uses a lookup table passthrough followed by iterative local refinement.
	pub fn project(&self, point: DVec2) -> f64 {
		if let CurveHandles::Line = self.handles {
			let direction = self.end - self.start;
			let length_squared = direction.length_squared();
			if length_squared == 0. {
				return 0.;
			}
			return ((point - self.start).dot(direction) / length_squared).clamp(0., 1.);
		}

		// Initial passthrough over a coarse lookup table
		let mut best_index = 0;
		let mut best_distance_squared = f64::MAX;
		for index in 0..=PROJECTION_LUT_SIZE {
			let t = index as f64 / PROJECTION_LUT_SIZE as f64;
			let distance_squared = self.evaluate(t).distance_squared(point);
			if distance_squared < best_distance_squared {
				best_distance_squared = distance_squared;
				best_index = index;
			}
		}

		// Narrow down the bracket around the best sample
		let mut left = (best_index.saturating_sub(1)) as f64 / PROJECTION_LUT_SIZE as f64;
		let mut right = ((best_index + 1).min(PROJECTION_LUT_SIZE)) as f64 / PROJECTION_LUT_SIZE as f64;
		for _ in 0..PROJECTION_REFINEMENT_ITERATIONS {
			let first_third = left + (right - left) / 3.;
			let second_third = right - (right - left) / 3.;
			if self.evaluate(first_third).distance_squared(point) < self.evaluate(second_third).distance_squared(point) {
				right = second_third;
			} else {
				left = first_third;
			}
		}
		(left + right) / 2.
	}

	/// Returns the distance from the provided point to the nearest point on the curve.
	pub fn distance_to(&self, point: DVec2) -> f64 {
		self.evaluate(self.project(point)).distance(point)
	}
}
