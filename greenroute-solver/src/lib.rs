//! Single-crew route optimiser for greenroute.
//!
//! This crate provides [`LocalSearchSolver`], the default implementation of
//! the [`Solver`](greenroute_core::Solver) trait, and the convenience
//! function [`solve`]. A solve builds a [`DistanceMatrix`](greenroute_core::DistanceMatrix)
//! from the stops, seeds a tour with nearest-neighbour construction, then
//! improves it with first-improvement 2-opt and Or-opt moves until no move
//! helps or the time budget runs out.
//!
//! The search is an anytime algorithm: the deadline is polled before every
//! candidate move, so a solve returns promptly once its budget elapses and
//! always hands back a valid visiting order.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod construct;
mod improve;
mod solver;

pub use construct::nearest_neighbour;
pub use improve::{ImproveOutcome, improve};
pub use solver::{LocalSearchConfig, LocalSearchSolver, solve};
