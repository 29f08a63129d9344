use super::*;
use crate::consts::MAX_ABSOLUTE_DIFFERENCE;
use crate::utils::f64_compare;

/// Functionality that produces new curves from existing ones.
impl Curve {
	/// Returns the pair of curves that result from splitting the original curve at parameter `t`.
	pub fn split(&self, t: f64) -> [Curve; 2] {
		let split_point = self.evaluate(t);

		match self.handles {
			CurveHandles::Line => [Curve::from_line_dvec2(self.start, split_point), Curve::from_line_dvec2(split_point, self.end)],
			CurveHandles::Cubic { handle_start, handle_end } => {
				let t_minus_one = t - 1.;
				[
					Curve::from_cubic_dvec2(
						self.start,
						t * handle_start - t_minus_one * self.start,
						(t * t) * handle_end - 2. * t * t_minus_one * handle_start + (t_minus_one * t_minus_one) * self.start,
						split_point,
					),
					Curve::from_cubic_dvec2(
						split_point,
						(t * t) * self.end - 2. * t * t_minus_one * handle_end + (t_minus_one * t_minus_one) * handle_start,
						t * self.end - t_minus_one * handle_end,
						self.end,
					),
				]
			}
		}
	}

	/// Returns a reversed version of the curve.
	pub fn reverse(&self) -> Curve {
		match self.handles {
			CurveHandles::Line => Curve::from_line_dvec2(self.end, self.start),
			CurveHandles::Cubic { handle_start, handle_end } => Curve::from_cubic_dvec2(self.end, handle_end, handle_start, self.start),
		}
	}

	/// Returns the sub-curve that starts at parameter `t1` and ends at parameter `t2`.
	/// When `t1 > t2`, returns the reversed sub-curve from `t2` to `t1`.
	pub fn trim(&self, t1: f64, t2: f64) -> Curve {
		// If t1 is equal to t2, return a curve comprised entirely of the same point
		if f64_compare(t1, t2, MAX_ABSOLUTE_DIFFERENCE) {
			let point = self.evaluate(t1);
			return match self.handles {
				CurveHandles::Line => Curve::from_line_dvec2(point, point),
				CurveHandles::Cubic { .. } => Curve::from_cubic_dvec2(point, point, point, point),
			};
		}
		// Depending on the order of `t1` and `t2`, determine which half of the split to keep
		let t1_split_side = usize::from(t1 <= t2);
		let t2_split_side = usize::from(t1 > t2);
		let curve_starting_at_t1 = self.split(t1)[t1_split_side];
		// Map `t2` onto the curve that was already split at `t1`
		let adjusted_t2 = if t1 < t2 || t1 == 0. { (t2 - t1) / (1. - t1) } else { t2 / t1 };
		let result = curve_starting_at_t1.split(adjusted_t2)[t2_split_side];
		if t2 < t1 { result.reverse() } else { result }
	}
}
