//! Path-trim: a geometry engine for trimming intersecting vector paths.
//!
//! Given a set of paths built from lines and cubic Beziers, the engine computes every self- and
//! pairwise intersection, splits each path into intersection-bounded segments, lets a caller mark
//! segments for removal by point hit-test or drag gesture, and stitches the survivors back into
//! new paths without resampling any geometry.
//!
//! The interactive entry point is [`TrimTool`]; the underlying stages ([`validate`],
//! [`compute_intersections`], [`split_paths`], [`hit_test`], [`reconstruct`], [`sanitize`]) are
//! public for callers that drive the pipeline themselves.
pub(crate) mod compare;

mod cache;
pub mod consts;
mod curve;
mod error;
mod intersect;
mod path;
mod reconstruct;
mod select;
mod split;
mod tool;
mod utils;

pub use cache::SplitCache;
pub use curve::{Curve, CurveHandles};
pub use error::TrimError;
pub use intersect::{IntersectionId, TrimIntersection, compute_intersections, validate};
pub use path::{Command, CurveEntry, Fill, PathData, PathElement, PathId, PathStyle, Stroke, SubPath};
pub use reconstruct::{ReconstructedPath, reconstruct, sanitize};
pub use select::{hit_test, hit_test_polyline};
pub use split::{SegmentId, SplitPathResult, TrimSegment, split_paths};
pub use tool::TrimTool;
