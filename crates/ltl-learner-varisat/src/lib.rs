//! Concrete [`Solver`] backend over the `varisat` crate — a pure-Rust, incremental SAT
//! solver. This is the only place in the workspace that names `varisat` directly; the
//! encoder and driver in `ltl-learner-core` only ever see the `Solver` trait.

use log::debug;

use ltl_learner_core::{CancelHandle, Lit, SolveResult, Solver};

/// Wraps a `varisat::Solver`, translating between our dimacs-style [`Lit`] and varisat's
/// own literal type, and caching the last model so [`Solver::value`] is a plain lookup.
pub struct VarisatSolver {
    inner: varisat::Solver<'static>,
    num_vars: usize,
    model: Option<Vec<varisat::Lit>>,
}

impl VarisatSolver {
    pub fn new() -> Self {
        Self {
            inner: varisat::Solver::new(),
            num_vars: 0,
            model: None,
        }
    }

    fn to_varisat(lit: Lit) -> varisat::Lit {
        varisat::Lit::from_dimacs(lit.get() as i64)
    }
}

impl Default for VarisatSolver {
    fn default() -> Self {
        Self::new()
    }
}

struct VarisatCancelHandle(varisat::Interrupter);

impl CancelHandle for VarisatCancelHandle {
    fn interrupt(&self) {
        self.0.interrupt();
    }
}

impl Solver for VarisatSolver {
    fn reset(&mut self) {
        self.inner = varisat::Solver::new();
        self.num_vars = 0;
        self.model = None;
    }

    fn num_vars(&self) -> usize {
        self.num_vars
    }

    fn new_var(&mut self) -> Lit {
        let lit = self.inner.new_lit();
        self.num_vars += 1;
        Lit::new(lit.to_dimacs() as i32)
    }

    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator<Item = Lit>,
    {
        let clause: Vec<varisat::Lit> = lits.into_iter().map(Self::to_varisat).collect();
        self.inner.add_clause(&clause);
    }

    fn solve(&mut self) -> SolveResult {
        match self.inner.solve() {
            Ok(true) => {
                debug!("varisat: SAT over {} vars", self.num_vars);
                self.model = self.inner.model();
                SolveResult::Sat
            }
            Ok(false) => {
                debug!("varisat: UNSAT over {} vars", self.num_vars);
                self.model = None;
                SolveResult::Unsat
            }
            Err(err) => {
                debug!("varisat: solver error: {err}");
                self.model = None;
                SolveResult::Unknown
            }
        }
    }

    fn value(&self, lit: Lit) -> bool {
        let model = self.model.as_ref().expect("value() called without a SAT model");
        let assigned = model[(lit.var() - 1) as usize];
        assigned.is_positive() == lit.is_positive()
    }

    fn cancel_handle(&self) -> Box<dyn CancelHandle> {
        Box::new(VarisatCancelHandle(self.inner.solver_interrupter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivial_sat() {
        let mut solver = VarisatSolver::new();
        let a = solver.new_var();
        solver.add_clause([a]);
        assert_eq!(solver.solve(), SolveResult::Sat);
        assert!(solver.value(a));
    }

    #[test]
    fn test_trivial_unsat() {
        let mut solver = VarisatSolver::new();
        let a = solver.new_var();
        solver.add_clause([a]);
        solver.add_clause([-a]);
        assert_eq!(solver.solve(), SolveResult::Unsat);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut solver = VarisatSolver::new();
        let a = solver.new_var();
        solver.add_clause([a]);
        assert_eq!(solver.solve(), SolveResult::Sat);
        solver.reset();
        assert_eq!(solver.num_vars(), 0);
        let b = solver.new_var();
        solver.add_clause([-b]);
        assert_eq!(solver.solve(), SolveResult::Sat);
        assert!(!solver.value(b));
    }
}
