mod core;
mod lookup;
mod solvers;
mod transform;

use glam::DVec2;
use std::fmt::{Debug, Formatter, Result};

/// Representation of the handle point(s) of a curve segment.
#[derive(Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CurveHandles {
	Line,
	/// Handles of a cubic Bezier segment.
	Cubic {
		/// Handle associated with the start point.
		handle_start: DVec2,
		/// Handle associated with the end point.
		handle_end: DVec2,
	},
}

/// One geometric segment between two anchor points: a straight line or a cubic Bezier.
///
/// `Curve` is an immutable value record. Every operation that changes geometry (splitting,
/// trimming, reversing) constructs a new value; handles are never reassigned on a shared object.
#[derive(Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Curve {
	/// Start point of the segment.
	pub start: DVec2,
	/// End point of the segment.
	pub end: DVec2,
	/// Handles of the segment.
	pub handles: CurveHandles,
}

impl Debug for Curve {
	fn fmt(&self, f: &mut Formatter<'_>) -> Result {
		let mut debug_struct = f.debug_struct("Curve");
		let mut debug_struct_ref = debug_struct.field("start", &self.start);
		debug_struct_ref = match self.handles {
			CurveHandles::Line => debug_struct_ref,
			CurveHandles::Cubic { handle_start, handle_end } => debug_struct_ref.field("handle_start", &handle_start).field("handle_end", &handle_end),
		};
		debug_struct_ref.field("end", &self.end).finish()
	}
}
