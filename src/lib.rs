//! sweep2d: deterministic continuous collision detection for 2D convex
//! polygons.
//!
//! Answers one question precisely: given two convex polygons translating
//! and rotating at constant velocity over the unit time interval, does
//! their swept volume intersect, and if so at what earliest time and at
//! which contact features?
//!
//! # Architecture
//!
//! The library is organized into layers, leaves first:
//!
//! 1. **float** - software binary32 scalar ([`F32`])
//! 2. **math** - vectors, rotation matrices, segment intersection
//! 3. **body** - rigid bodies and world-space polygon evaluation
//! 4. **contact** - witness features and query results
//! 5. **sat** - separating-axis overlap test with MTV
//! 6. **gjk** - closest distance with witness features
//! 7. **toi** - bilateral-advancement time of impact
//!
//! # Determinism
//!
//! All arithmetic inside the queries runs through [`F32`], a software
//! binary32 scalar with round-to-nearest-even. Results are bit-identical
//! across runs and platforms. Hardware floats cross the boundary only as
//! bit reinterpretations.
//!
//! Every query is a pure function of its inputs: no shared state, no heap
//! allocation on the hot path, and every loop is bounded, so wall time per
//! query is bounded too. Failure modes (iteration budgets, invariant
//! violations) collapse into "no collision" with a `tracing` diagnostic;
//! the queries never panic in release builds.

pub mod body;
pub mod contact;
pub mod float;
pub mod gjk;
pub mod math;
pub mod sat;
pub mod toi;

pub use body::{Body, BodyError, Polygon, MAX_VERTICES};
pub use contact::{Distance, Feature, Impact, Mtv, TOLERANCE};
pub use float::F32;
pub use gjk::{polygon_distance, MAX_GJK_ITERS};
pub use math::{segment_intersect, Mat22, SegmentHit, Vec2};
pub use sat::sat_intersect;
pub use toi::{continuous_collision, MAX_BISECT_ITERS, MAX_TOI_ITERS};
