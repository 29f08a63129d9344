mod data;

use crate::curve::Curve;
use glam::DVec2;

/// Caller-assigned identifier of a path element.
pub type PathId = u64;

/// One drawing command of a path, in absolute coordinates.
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Command {
	/// Begin a new subpath at the given point.
	MoveTo { to: DVec2 },
	/// Straight line from the current point.
	LineTo { to: DVec2 },
	/// Cubic Bezier from the current point.
	CubicTo { handle_start: DVec2, handle_end: DVec2, to: DVec2 },
	/// Close the current subpath back to its starting point.
	Close,
}

impl Command {
	/// The anchor point this command ends at, if it has one.
	pub fn end_point(&self) -> Option<DVec2> {
		match *self {
			Command::MoveTo { to } | Command::LineTo { to } | Command::CubicTo { to, .. } => Some(to),
			Command::Close => None,
		}
	}
}

/// A contiguous run of commands beginning with a `MoveTo`.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct SubPath {
	pub commands: Vec<Command>,
}

impl SubPath {
	/// Whether the subpath ends with a `Close` command.
	pub fn closed(&self) -> bool {
		matches!(self.commands.last(), Some(Command::Close))
	}

	/// The number of anchor points (the `MoveTo` target plus each segment end).
	pub fn anchor_count(&self) -> usize {
		self.commands.iter().filter(|command| command.end_point().is_some()).count()
	}

	/// The anchor the subpath starts at.
	pub fn first_anchor(&self) -> Option<DVec2> {
		self.commands.first().and_then(Command::end_point)
	}

	/// The anchor the last drawing command ends at.
	pub fn last_anchor(&self) -> Option<DVec2> {
		self.commands.iter().rev().find_map(Command::end_point)
	}
}

/// Stroke appearance carried alongside path geometry.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
	pub color: String,
	pub width: f64,
	pub opacity: f64,
}

/// Fill appearance carried alongside path geometry.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Fill {
	pub color: String,
	pub opacity: f64,
}

/// Styling of a path, passed through the pipeline without interpretation.
/// The only rule applied to it is that reconstructed open paths lose their fill.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct PathStyle {
	pub stroke: Option<Stroke>,
	pub fill: Option<Fill>,
}

/// The geometry and style of one path: one or more subpaths of absolute commands.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct PathData {
	pub subpaths: Vec<SubPath>,
	pub style: PathStyle,
}

/// One entry of a path's flattened curve list. The index of an entry in the list
/// is the curve index used by intersections and segments.
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurveEntry {
	pub curve: Curve,
	/// Whether the curve belongs to a closed subpath.
	pub subpath_closed: bool,
}

impl PathData {
	/// Flattens all subpaths into an index-addressed curve list.
	/// The closing segment of a closed subpath is materialized as a real line
	/// unless the last anchor already coincides with the first.
	pub fn curve_entries(&self) -> Vec<CurveEntry> {
		let mut entries = Vec::new();
		for subpath in &self.subpaths {
			let closed = subpath.closed();
			let mut subpath_start: Option<DVec2> = None;
			let mut current: Option<DVec2> = None;
			for command in &subpath.commands {
				match *command {
					Command::MoveTo { to } => {
						subpath_start = Some(to);
						current = Some(to);
					}
					Command::LineTo { to } => {
						if let Some(start) = current {
							entries.push(CurveEntry {
								curve: Curve::from_line_dvec2(start, to),
								subpath_closed: closed,
							});
						}
						current = Some(to);
					}
					Command::CubicTo { handle_start, handle_end, to } => {
						if let Some(start) = current {
							entries.push(CurveEntry {
								curve: Curve::from_cubic_dvec2(start, handle_start, handle_end, to),
								subpath_closed: closed,
							});
						}
						current = Some(to);
					}
					Command::Close => {
						if let (Some(start), Some(end)) = (current, subpath_start) {
							if start != end {
								entries.push(CurveEntry {
									curve: Curve::from_line_dvec2(start, end),
									subpath_closed: closed,
								});
							}
							current = Some(end);
						}
					}
				}
			}
		}
		entries
	}

	/// The min and max corners of the path's bounding box, or `None` for an empty path.
	pub fn bounding_box(&self) -> Option<[DVec2; 2]> {
		self.curve_entries()
			.iter()
			.map(|entry| entry.curve.bounding_box())
			.reduce(|a, b| crate::utils::merge_rectangles(a, b))
	}

	/// The first anchor of the first subpath.
	pub fn first_anchor(&self) -> Option<DVec2> {
		self.subpaths.first().and_then(SubPath::first_anchor)
	}

	/// The last anchor of the last subpath.
	pub fn last_anchor(&self) -> Option<DVec2> {
		self.subpaths.last().and_then(SubPath::last_anchor)
	}

	/// Returns true if every coordinate in the path is finite.
	pub fn is_finite(&self) -> bool {
		self.subpaths.iter().flat_map(|subpath| &subpath.commands).all(|command| match *command {
			Command::MoveTo { to } | Command::LineTo { to } => to.is_finite(),
			Command::CubicTo { handle_start, handle_end, to } => handle_start.is_finite() && handle_end.is_finite() && to.is_finite(),
			Command::Close => true,
		})
	}
}

/// A path with its caller-assigned identity.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathElement {
	pub id: PathId,
	pub data: PathData,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::compare::compare_points;

	fn square() -> PathData {
		PathData {
			subpaths: vec![SubPath {
				commands: vec![
					Command::MoveTo { to: DVec2::new(0., 0.) },
					Command::LineTo { to: DVec2::new(100., 0.) },
					Command::LineTo { to: DVec2::new(100., 100.) },
					Command::LineTo { to: DVec2::new(0., 100.) },
					Command::Close,
				],
			}],
			style: PathStyle::default(),
		}
	}

	#[test]
	fn test_curve_entries_materialize_closing_segment() {
		let entries = square().curve_entries();
		assert_eq!(entries.len(), 4);
		assert!(entries.iter().all(|entry| entry.subpath_closed));
		assert!(compare_points(entries[3].curve.start, DVec2::new(0., 100.)));
		assert!(compare_points(entries[3].curve.end, DVec2::new(0., 0.)));
	}

	#[test]
	fn test_curve_entries_open_subpath() {
		let mut data = square();
		data.subpaths[0].commands.pop();
		let entries = data.curve_entries();
		assert_eq!(entries.len(), 3);
		assert!(entries.iter().all(|entry| !entry.subpath_closed));
	}

	#[test]
	fn test_bounding_box() {
		assert_eq!(square().bounding_box(), Some([DVec2::new(0., 0.), DVec2::new(100., 100.)]));
		assert_eq!(PathData::default().bounding_box(), None);
	}

	#[test]
	fn test_anchors() {
		let data = square();
		assert_eq!(data.first_anchor(), Some(DVec2::new(0., 0.)));
		assert_eq!(data.last_anchor(), Some(DVec2::new(0., 100.)));
		assert_eq!(data.subpaths[0].anchor_count(), 4);
		assert!(data.subpaths[0].closed());
	}
}
