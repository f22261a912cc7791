//! Syntax-DAG SAT encoding and enumeration driver for learning a minimal LTL formula that
//! separates a positive sample of ultimately periodic traces from a negative one.
//!
//! The crate never talks to a concrete SAT solver: everything here is generic over the
//! [`solver::Solver`] trait, ported from `sat_nexus_core`'s Backend Adapter. A concrete
//! backend lives in the sibling `ltl-learner-varisat` crate.

pub mod dag;
pub mod decode;
pub mod enumerate;
pub mod error;
pub mod formula;
pub mod lit;
pub mod operators;
pub mod ops;
pub mod semantics;
pub mod solver;
pub mod trace;
pub mod vars;

pub use enumerate::{learn, CancellationToken, LearnResult};
pub use error::{LearnerError, Result};
pub use formula::Formula;
pub use lit::Lit;
pub use operators::{Operator, OperatorSet};
pub use solver::{CancelHandle, SolveResult, Solver};
pub use trace::{Sample, Trace};
