use std::fmt::{Display, Formatter};

use crate::lit::Lit;

/// Outcome of a single `Solver::solve()` call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SolveResult {
    Sat,
    Unsat,
    /// The backend gave up (resource limit, internal error) without a verdict.
    Unknown,
}

impl Display for SolveResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use SolveResult::*;
        match self {
            Sat => write!(f, "SAT"),
            Unsat => write!(f, "UNSAT"),
            Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A handle that lets a driver interrupt an in-flight `Solver::solve()` from outside the
/// thread that is running it. `()` is a valid no-op implementation for backends that cannot
/// be interrupted.
pub trait CancelHandle: Send {
    fn interrupt(&self);
}

impl CancelHandle for () {
    fn interrupt(&self) {}
}

/// Backend Adapter: the thin contract the encoder and driver ask of a SAT backend.
///
/// Corresponds to the `assert` / `check` / `model` / `reset` operations named in the
/// component design; this crate never talks to a concrete SAT library directly, only
/// through this trait.
pub trait Solver {
    /// Discard all variables and clauses, returning the backend to its initial state.
    fn reset(&mut self);

    /// Number of variables created so far.
    fn num_vars(&self) -> usize;

    /// Allocate and return a fresh variable.
    fn new_var(&mut self) -> Lit;

    /// Assert a clause (disjunction of literals).
    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator<Item = Lit>;

    /// Assert a unit clause.
    fn add_unit(&mut self, lit: Lit) {
        self.add_clause([lit]);
    }

    /// Run the SAT check over everything asserted so far.
    fn solve(&mut self) -> SolveResult;

    /// Value of `lit` in the last satisfying model. Only meaningful after `solve()`
    /// returned `SolveResult::Sat`.
    fn value(&self, lit: Lit) -> bool;

    /// A `Send` handle that can interrupt an in-progress `solve()` from another thread.
    fn cancel_handle(&self) -> Box<dyn CancelHandle>;
}
