use super::*;
use crate::utils;

/// Constructors and accessors.
impl Curve {
	/// Create a line segment from the provided start and end points.
	pub fn from_line_dvec2(p1: DVec2, p2: DVec2) -> Self {
		Curve {
			start: p1,
			handles: CurveHandles::Line,
			end: p2,
		}
	}

	/// Create a line segment using the provided coordinates as the start and end points.
	pub fn from_line_coordinates(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
		Curve::from_line_dvec2(DVec2::new(x1, y1), DVec2::new(x2, y2))
	}

	/// Create a cubic Bezier from the provided start, handles, and end points.
	pub fn from_cubic_dvec2(p1: DVec2, p2: DVec2, p3: DVec2, p4: DVec2) -> Self {
		Curve {
			start: p1,
			handles: CurveHandles::Cubic { handle_start: p2, handle_end: p3 },
			end: p4,
		}
	}

	/// Create a cubic Bezier using the provided coordinates as the start, handles, and end points.
	#[allow(clippy::too_many_arguments)]
	pub fn from_cubic_coordinates(x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64, x4: f64, y4: f64) -> Self {
		Curve::from_cubic_dvec2(DVec2::new(x1, y1), DVec2::new(x2, y2), DVec2::new(x3, y3), DVec2::new(x4, y4))
	}

	pub fn is_line(&self) -> bool {
		self.handles == CurveHandles::Line
	}

	pub fn is_cubic(&self) -> bool {
		matches!(self.handles, CurveHandles::Cubic { .. })
	}

	/// Get the coordinates of the handle associated with the start point, if any.
	pub fn handle_start(&self) -> Option<DVec2> {
		match self.handles {
			CurveHandles::Cubic { handle_start, .. } => Some(handle_start),
			CurveHandles::Line => None,
		}
	}

	/// Get the coordinates of the handle associated with the end point, if any.
	pub fn handle_end(&self) -> Option<DVec2> {
		match self.handles {
			CurveHandles::Cubic { handle_end, .. } => Some(handle_end),
			CurveHandles::Line => None,
		}
	}

	/// Returns a list of the curve's defining points: the anchors and any handles between them.
	pub fn points(&self) -> Vec<DVec2> {
		match self.handles {
			CurveHandles::Line => vec![self.start, self.end],
			CurveHandles::Cubic { handle_start, handle_end } => vec![self.start, handle_start, handle_end, self.end],
		}
	}

	/// Returns true if every coordinate of the curve is finite.
	pub fn is_finite(&self) -> bool {
		let handles_finite = match self.handles {
			CurveHandles::Line => true,
			CurveHandles::Cubic { handle_start, handle_end } => handle_start.is_finite() && handle_end.is_finite(),
		};
		self.start.is_finite() && self.end.is_finite() && handles_finite
	}

	/// Returns true if the curve collapses to a single point within the given tolerance.
	pub fn is_point(&self, tolerance: f64) -> bool {
		self.points().windows(2).all(|pair| utils::dvec2_compare(pair[0], pair[1], tolerance))
	}

	/// Compare all defining points of two curves with the provided max absolute value difference.
	pub fn abs_diff_eq(&self, other: &Curve, max_abs_diff: f64) -> bool {
		let points = self.points();
		let other_points = other.points();
		points.len() == other_points.len() && points.into_iter().zip(other_points).all(|(a, b)| utils::dvec2_compare(a, b, max_abs_diff))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_accessors() {
		let line = Curve::from_line_coordinates(0., 0., 10., 0.);
		assert!(line.is_line());
		assert_eq!(line.handle_start(), None);
		assert_eq!(line.handle_end(), None);

		let cubic = Curve::from_cubic_coordinates(0., 0., 1., 1., 9., 1., 10., 0.);
		assert!(cubic.is_cubic());
		assert_eq!(cubic.handle_start(), Some(DVec2::new(1., 1.)));
		assert_eq!(cubic.handle_end(), Some(DVec2::new(9., 1.)));
	}

	#[test]
	fn test_is_point() {
		let point = Curve::from_line_dvec2(DVec2::new(3., 3.), DVec2::new(3., 3.));
		assert!(point.is_point(1e-6));
		assert!(!Curve::from_line_coordinates(0., 0., 1., 0.).is_point(1e-6));
	}
}
