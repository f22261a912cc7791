//! Reusable clause-emission combinators over any [`Solver`].
//!
//! Ported from `sat-nexus-core`'s `op::ops::Ops`/`op::encodings::Encodings`, extended with
//! the `imply_imply_iff_*` / `imply_imply_imply_iff_*` tiers that crate's own `ops.rs` left
//! as a `TODO:` comment block (2- and 3-antecedent conditional iffs against an AND/OR of an
//! arbitrary number of literals). The semantic encoder is built entirely out of these.

use itertools::Itertools;

use crate::lit::Lit;
use crate::solver::Solver;

impl<S> Ops for S where S: Solver + ?Sized {}

pub trait Ops: Solver {
    /// `lhs => rhs`
    fn imply(&mut self, lhs: Lit, rhs: Lit) {
        self.add_clause([-lhs, rhs]);
    }

    /// `lhs <=> rhs`
    fn iff(&mut self, lhs: Lit, rhs: Lit) {
        self.imply(lhs, rhs);
        self.imply(rhs, lhs);
    }

    /// `x1 => (x2 => x3)`
    fn imply_imply(&mut self, x1: Lit, x2: Lit, x3: Lit) {
        self.add_clause([-x1, -x2, x3]);
    }

    /// `x1 => (x2 => (x3 <=> x4))`
    fn imply_imply_iff(&mut self, x1: Lit, x2: Lit, x3: Lit, x4: Lit) {
        self.add_clause([-x1, -x2, -x3, x4]);
        self.add_clause([-x1, -x2, x3, -x4]);
    }

    /// `x1 => (x2 => (x3 => x4))`
    fn imply_imply_imply(&mut self, x1: Lit, x2: Lit, x3: Lit, x4: Lit) {
        self.add_clause([-x1, -x2, -x3, x4]);
    }

    /// `lhs <=> AND(xs)`
    fn iff_and<I>(&mut self, lhs: Lit, xs: I)
    where
        I: IntoIterator<Item = Lit>,
    {
        let xs = xs.into_iter();
        let mut v = Vec::with_capacity(1 + xs.size_hint().0);
        v.push(lhs);
        for x in xs {
            v.push(-x);
            self.imply(lhs, x);
        }
        self.add_clause(v);
    }

    /// `lhs <=> OR(xs)`
    fn iff_or<I>(&mut self, lhs: Lit, xs: I)
    where
        I: IntoIterator<Item = Lit>,
    {
        let xs = xs.into_iter();
        let mut v = Vec::with_capacity(1 + xs.size_hint().0);
        v.push(-lhs);
        for x in xs {
            v.push(x);
            self.imply(x, lhs);
        }
        self.add_clause(v);
    }

    // ======================
    // imply-imply-iff-*  (2 antecedents gating an iff against AND/OR of a literal list)
    // ======================

    /// `x1 => (x2 => (lhs <=> AND(xs)))`
    fn imply_imply_iff_and<I>(&mut self, x1: Lit, x2: Lit, lhs: Lit, xs: I)
    where
        I: IntoIterator<Item = Lit>,
    {
        let xs = xs.into_iter();
        let mut v = Vec::with_capacity(3 + xs.size_hint().0);
        v.push(-x1);
        v.push(-x2);
        v.push(lhs);
        for x in xs {
            v.push(-x);
            self.imply_imply_imply(x1, x2, lhs, x);
        }
        self.add_clause(v);
    }

    /// `x1 => (x2 => (lhs <=> OR(xs)))`
    fn imply_imply_iff_or<I>(&mut self, x1: Lit, x2: Lit, lhs: Lit, xs: I)
    where
        I: IntoIterator<Item = Lit>,
    {
        let xs = xs.into_iter();
        let mut v = Vec::with_capacity(3 + xs.size_hint().0);
        v.push(-x1);
        v.push(-x2);
        v.push(-lhs);
        for x in xs {
            v.push(x);
            self.imply_imply_imply(x1, x2, x, lhs);
        }
        self.add_clause(v);
    }

    // ============================
    // imply-imply-imply-iff-*  (3 antecedents)
    // ============================

    /// `x1 => (x2 => (x3 => (lhs <=> AND(xs))))`
    fn imply_imply_imply_iff_and<I>(&mut self, x1: Lit, x2: Lit, x3: Lit, lhs: Lit, xs: I)
    where
        I: IntoIterator<Item = Lit>,
    {
        let xs = xs.into_iter();
        let mut v = Vec::with_capacity(4 + xs.size_hint().0);
        v.push(-x1);
        v.push(-x2);
        v.push(-x3);
        v.push(lhs);
        for x in xs {
            v.push(-x);
            self.add_clause([-x1, -x2, -x3, -lhs, x]);
        }
        self.add_clause(v);
    }

    /// `x1 => (x2 => (x3 => (lhs <=> OR(xs))))`
    fn imply_imply_imply_iff_or<I>(&mut self, x1: Lit, x2: Lit, x3: Lit, lhs: Lit, xs: I)
    where
        I: IntoIterator<Item = Lit>,
    {
        let xs = xs.into_iter();
        let mut v = Vec::with_capacity(4 + xs.size_hint().0);
        v.push(-x1);
        v.push(-x2);
        v.push(-x3);
        v.push(-lhs);
        for x in xs {
            v.push(x);
            self.add_clause([-x1, -x2, -x3, -x, lhs]);
        }
        self.add_clause(v);
    }
}

/// Cardinality-style structural encodings (exactly-one over a set of literals).
impl<S> Encodings for S where S: Solver {}

pub trait Encodings: Solver + Sized {
    fn encode_exactly_one(&mut self, lits: &[Lit]) {
        self.encode_at_least_one(lits);
        self.encode_at_most_one(lits);
    }

    fn encode_at_least_one(&mut self, lits: &[Lit]) {
        self.add_clause(lits.iter().copied());
    }

    /// Pairwise at-most-one. The cardinality-network fallback spec.md's Design Notes call
    /// for when a backend-native cardinality primitive is unavailable — `varisat` (our
    /// backend) exposes none, so this is the only encoding used.
    fn encode_at_most_one(&mut self, lits: &[Lit]) {
        for (&a, &b) in lits.iter().tuple_combinations() {
            self.imply(a, -b);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::solver::{CancelHandle, SolveResult};

    use super::*;

    #[derive(Default)]
    struct RecordingSolver {
        n: usize,
        clauses: Vec<Vec<Lit>>,
    }

    impl Solver for RecordingSolver {
        fn reset(&mut self) {
            self.n = 0;
            self.clauses.clear();
        }

        fn num_vars(&self) -> usize {
            self.n
        }

        fn new_var(&mut self) -> Lit {
            self.n += 1;
            Lit::new(self.n as i32)
        }

        fn add_clause<I>(&mut self, lits: I)
        where
            I: IntoIterator<Item = Lit>,
        {
            self.clauses.push(lits.into_iter().collect());
        }

        fn solve(&mut self) -> SolveResult {
            SolveResult::Unknown
        }

        fn value(&self, _lit: Lit) -> bool {
            false
        }

        fn cancel_handle(&self) -> Box<dyn CancelHandle> {
            Box::new(())
        }
    }

    #[test]
    fn test_exactly_one() {
        let mut s = RecordingSolver::default();
        let lits = [Lit::new(1), Lit::new(2), Lit::new(3)];
        s.encode_exactly_one(&lits);
        // 1 at-least-one clause + C(3,2) = 3 at-most-one clauses
        assert_eq!(s.clauses.len(), 4);
    }

    #[test]
    fn test_imply_imply_iff_and() {
        let mut s = RecordingSolver::default();
        let (x1, x2, lhs, a, b) = (Lit::new(1), Lit::new(2), Lit::new(3), Lit::new(4), Lit::new(5));
        s.imply_imply_iff_and(x1, x2, lhs, [a, b]);
        // 1 reverse clause + 2 forward clauses
        assert_eq!(s.clauses.len(), 3);
    }
}
