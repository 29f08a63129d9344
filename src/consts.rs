/// A stricter comparison used when comparing polynomial coefficients against zero.
pub const STRICT_MAX_ABSOLUTE_DIFFERENCE: f64 = 1e-9;
/// General comparison of floating point numbers in path-space units.
pub const MAX_ABSOLUTE_DIFFERENCE: f64 = 1e-4;

/// Bounding box error threshold at which the subdividing intersection search terminates.
pub const INTERSECTION_ERROR: f64 = 1e-4;
/// Minimum parametric separation between two reported intersection `t` values on one curve.
/// The subdividing search reports a cluster of nearby hits around every true crossing.
pub const MIN_T_SEPARATION: f64 = 1e-3;
/// Recursion limit for the subdividing intersection search.
pub const MAX_SUBDIVISION_DEPTH: usize = 28;

/// Split offsets on a single curve closer together than this are treated as one intersection.
pub const PARAMETER_DEDUP: f64 = 1e-4;
/// Self-intersections closer than this to a path's first or last anchor are discarded
/// as numerical noise from the closing segment.
pub const ENDPOINT_ARTIFACT_RADIUS: f64 = 1.;
/// Padding applied to both paths' bounding boxes before the pairwise overlap prefilter.
pub const PAIR_BOUNDS_PADDING: f64 = 10.;
/// A curve of a closed subpath whose endpoints coincide within this tolerance is a closed loop,
/// and its seam at parameter 0 ≈ 1 is not a real intersection.
pub const SEAM_TOLERANCE: f64 = 1e-3;

/// Maximum endpoint gap for a surviving segment to continue the current chain.
pub const CHAIN_TOLERANCE: f64 = 0.1;
/// Maximum endpoint gap at which two chained anchor points are merged into one.
pub const JOIN_TOLERANCE: f64 = 0.05;

/// Reconstructed paths shorter than this arc length are degenerate and dropped.
pub const MIN_PATH_LENGTH: f64 = 0.1;
/// Coordinate rounding step for the duplicate-path signature.
pub const SIGNATURE_PRECISION: f64 = 0.01;
/// Slack allowed when testing whether one bounding box contains another.
pub const CONTAINMENT_TOLERANCE: f64 = 0.01;
/// A contained path shorter than this fraction of its container is reconstruction noise.
pub const CONTAINMENT_LENGTH_RATIO: f64 = 0.1;

/// The trim pipeline refuses to activate on fewer than this many paths.
pub const MIN_PATH_COUNT: usize = 2;
/// Hard cap bounding the O(n²) pairwise intersection pass.
pub const MAX_PATH_COUNT: usize = 100;

/// Default pointer distance within which a segment is considered hit.
pub const DEFAULT_HIT_THRESHOLD: f64 = 4.;

/// Sample count for the projection lookup table pass.
pub const PROJECTION_LUT_SIZE: usize = 20;
/// Refinement iterations when converging on the nearest point of a curve.
pub const PROJECTION_REFINEMENT_ITERATIONS: usize = 40;
/// Flatness threshold for the adaptive arc length computation.
pub const LENGTH_FLATNESS: f64 = 1e-4;
/// Recursion limit for the adaptive arc length computation.
pub const MAX_LENGTH_DEPTH: usize = 20;
