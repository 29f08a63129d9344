//! Comparison helpers used exclusively by tests.
#![cfg(test)]

use crate::consts::MAX_ABSOLUTE_DIFFERENCE;
use crate::curve::Curve;
use crate::utils::{dvec2_compare, f64_compare};
use glam::DVec2;

/// Compare points by allowing some maximum absolute difference.
pub fn compare_points(p1: DVec2, p2: DVec2) -> bool {
	dvec2_compare(p1, p2, MAX_ABSOLUTE_DIFFERENCE)
}

/// Compare vectors of points by allowing some maximum absolute difference per coordinate.
pub fn compare_vec_of_points(vec1: Vec<DVec2>, vec2: Vec<DVec2>, max_absolute_difference: f64) -> bool {
	vec1.len() == vec2.len() && vec1.into_iter().zip(vec2).all(|(p1, p2)| dvec2_compare(p1, p2, max_absolute_difference))
}

/// Compare f64s by allowing some maximum absolute difference.
pub fn compare_f64s(f1: f64, f2: f64) -> bool {
	f64_compare(f1, f2, MAX_ABSOLUTE_DIFFERENCE)
}

/// Compare all defining points of two curves by allowing some maximum absolute difference.
pub fn compare_curves(curve1: &Curve, curve2: &Curve, max_absolute_difference: f64) -> bool {
	curve1.abs_diff_eq(curve2, max_absolute_difference)
}
