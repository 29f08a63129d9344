use crate::consts::{MAX_ABSOLUTE_DIFFERENCE, STRICT_MAX_ABSOLUTE_DIFFERENCE};
use glam::DVec2;

/// Compare two `f64` numbers with a provided max absolute value difference.
pub fn f64_compare(a: f64, b: f64, max_abs_diff: f64) -> bool {
	(a - b).abs() < max_abs_diff
}

/// Determine if an `f64` number is within a given range by using a max absolute value difference comparison.
pub fn f64_approximately_in_range(value: f64, min: f64, max: f64, max_abs_diff: f64) -> bool {
	(min..=max).contains(&value) || f64_compare(value, min, max_abs_diff) || f64_compare(value, max, max_abs_diff)
}

/// Compare the two values in a `DVec2` independently with a provided max absolute value difference.
pub fn dvec2_compare(a: DVec2, b: DVec2, max_abs_diff: f64) -> bool {
	(a.x - b.x).abs() < max_abs_diff && (a.y - b.y).abs() < max_abs_diff
}

/// Find the roots of the linear equation `ax + b`.
pub fn solve_linear(a: f64, b: f64) -> [Option<f64>; 3] {
	// There exist roots when `a` is not 0
	if a.abs() > MAX_ABSOLUTE_DIFFERENCE { [Some(-b / a), None, None] } else { [None; 3] }
}

/// Find the roots of the quadratic equation `ax^2 + bx + c`.
/// Precompute the `discriminant` (`b^2 - 4ac`) and `two_times_a` arguments prior to calling this function for efficiency purposes.
pub fn solve_quadratic(discriminant: f64, two_times_a: f64, b: f64, c: f64) -> [Option<f64>; 3] {
	let mut roots = [None; 3];
	if two_times_a.abs() <= STRICT_MAX_ABSOLUTE_DIFFERENCE {
		roots = solve_linear(b, c);
	} else if discriminant.abs() <= STRICT_MAX_ABSOLUTE_DIFFERENCE {
		roots[0] = Some(-b / two_times_a);
	} else if discriminant > 0. {
		let root_discriminant = discriminant.sqrt();
		roots[0] = Some((-b + root_discriminant) / two_times_a);
		roots[1] = Some((-b - root_discriminant) / two_times_a);
	}
	roots
}

/// Solve a cubic of the form `ax^3 + bx^2 + cx + d`.
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> [Option<f64>; 3] {
	if a.abs() <= STRICT_MAX_ABSOLUTE_DIFFERENCE {
		if b.abs() <= STRICT_MAX_ABSOLUTE_DIFFERENCE {
			// If both a and b are approximately 0, treat as a linear problem
			solve_linear(c, d)
		} else {
			// If a is approximately 0, treat as a quadratic problem
			let discriminant = c * c - 4. * b * d;
			solve_quadratic(discriminant, 2. * b, c, d)
		}
	} else {
		// https://momentsingraphics.de/CubicRoots.html
		let d_recip = a.recip();
		const ONETHIRD: f64 = 1. / 3.;
		let scaled_c2 = b * (ONETHIRD * d_recip);
		let scaled_c1 = c * (ONETHIRD * d_recip);
		let scaled_c0 = d * d_recip;
		if !(scaled_c0.is_finite() && scaled_c1.is_finite() && scaled_c2.is_finite()) {
			// The cubic coefficient is zero or nearly so
			return solve_quadratic(c * c - 4. * b * d, 2. * b, c, d);
		}
		let (c0, c1, c2) = (scaled_c0, scaled_c1, scaled_c2);
		// (d0, d1, d2) is called "Delta" in the article
		let d0 = (-c2).mul_add(c2, c1);
		let d1 = (-c1).mul_add(c2, c0);
		let d2 = c2 * c0 - c1 * c1;
		// d is called "Discriminant"
		let d = 4. * d0 * d2 - d1 * d1;
		// de is called "Depressed.x", Depressed.y = d0
		let de = (-2. * c2).mul_add(d0, d1);
		if d < 0. {
			let sq = (-0.25 * d).sqrt();
			let r = -0.5 * de;
			let t1 = (r + sq).cbrt() + (r - sq).cbrt();
			[Some(t1 - c2), None, None]
		} else if d == 0. {
			let t1 = (-d0).sqrt().copysign(de);
			[Some(t1 - c2), Some(-2. * t1 - c2).filter(|&a| a != t1 - c2), None]
		} else {
			let th = d.sqrt().atan2(-de) * ONETHIRD;
			// (th_cos, th_sin) is called "CubicRoot"
			let (th_sin, th_cos) = th.sin_cos();
			// (r0, r1, r2) is called "Root"
			let r0 = th_cos;
			let ss3 = th_sin * 3_f64.sqrt();
			let r1 = 0.5 * (-th_cos + ss3);
			let r2 = 0.5 * (-th_cos - ss3);
			let t = 2. * (-d0).sqrt();
			[Some(t.mul_add(r0, -c2)), Some(t.mul_add(r1, -c2)), Some(t.mul_add(r2, -c2))]
		}
	}
}

/// Determine if two rectangles have any overlap. The rectangles are represented by a pair of coordinates that designate the min and max corners.
pub fn do_rectangles_overlap(rectangle1: [DVec2; 2], rectangle2: [DVec2; 2]) -> bool {
	let [min1, max1] = rectangle1;
	let [min2, max2] = rectangle2;

	max1.x >= min2.x && max2.x >= min1.x && max2.y >= min1.y && max1.y >= min2.y
}

/// Determine if the first rectangle contains the second one, allowing the given slack on every side.
pub fn rectangle_contains(outer: [DVec2; 2], inner: [DVec2; 2], slack: f64) -> bool {
	let [outer_min, outer_max] = outer;
	let [inner_min, inner_max] = inner;

	outer_min.x - slack <= inner_min.x && outer_min.y - slack <= inner_min.y && inner_max.x <= outer_max.x + slack && inner_max.y <= outer_max.y + slack
}

/// Expand a rectangle by the given padding on every side.
pub fn expand_rectangle(rectangle: [DVec2; 2], padding: f64) -> [DVec2; 2] {
	[rectangle[0] - DVec2::splat(padding), rectangle[1] + DVec2::splat(padding)]
}

/// Merge two rectangles into the smallest rectangle containing both.
pub fn merge_rectangles(rectangle1: [DVec2; 2], rectangle2: [DVec2; 2]) -> [DVec2; 2] {
	[rectangle1[0].min(rectangle2[0]), rectangle1[1].max(rectangle2[1])]
}
