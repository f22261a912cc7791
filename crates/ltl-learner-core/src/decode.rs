//! Model Decoder: reads the satisfying assignment's `x`/`l`/`r` variables and rebuilds the
//! learned [`Formula`], rooted at node `n-1`, walking child pointers recursively (shared
//! DAG nodes unfold into repeated subtrees in the output, per the output grammar).

use crate::formula::Formula;
use crate::operators::{Operator, OperatorSet};
use crate::solver::Solver;
use crate::vars::{Symbol, VarTable};

#[derive(Debug, Clone, Copy)]
enum NodeLabel {
    Atom(usize),
    Unary(Operator, usize),
    Binary(Operator, usize, usize),
}

fn decode_label<S: Solver>(
    solver: &S,
    vars: &VarTable,
    i: usize,
    num_atoms: usize,
    operators: &OperatorSet,
) -> NodeLabel {
    for a in 0..num_atoms {
        if let Some(lit) = vars.label_if_exists(i, Symbol::Atom(a)) {
            if solver.value(lit) {
                return NodeLabel::Atom(a);
            }
        }
    }
    for op in operators.iter().filter(|op| op.arity() <= i) {
        if let Some(lit) = vars.label_if_exists(i, Symbol::Op(op)) {
            if solver.value(lit) {
                let left = decode_child(solver, i, |j| vars.left_if_exists(i, j));
                if op.is_binary() {
                    let right = decode_child(solver, i, |j| vars.right_if_exists(i, j));
                    return NodeLabel::Binary(op, left, right);
                }
                return NodeLabel::Unary(op, left);
            }
        }
    }
    unreachable!("model decoding: node {i} has no true label variable — encoder invariant violated");
}

fn decode_child<S, F>(solver: &S, i: usize, lookup: F) -> usize
where
    S: Solver,
    F: Fn(usize) -> Option<crate::lit::Lit>,
{
    for j in 0..i {
        if let Some(lit) = lookup(j) {
            if solver.value(lit) {
                return j;
            }
        }
    }
    unreachable!("model decoding: node {i} has no true child variable — encoder invariant violated");
}

/// Builds the node table for `0..n` and renders the tree rooted at `n-1`.
pub fn decode<S: Solver>(solver: &S, vars: &VarTable, n: usize, num_atoms: usize, operators: &OperatorSet) -> Formula {
    let table: Vec<NodeLabel> = (0..n).map(|i| decode_label(solver, vars, i, num_atoms, operators)).collect();
    build(&table, n - 1)
}

fn build(table: &[NodeLabel], i: usize) -> Formula {
    match table[i] {
        NodeLabel::Atom(a) => Formula::atom(a),
        NodeLabel::Unary(op, j) => Formula::unary(op, build(table, j)),
        NodeLabel::Binary(op, j, jp) => Formula::binary(op, build(table, j), build(table, jp)),
    }
}

#[cfg(test)]
mod tests {
    use crate::lit::Lit;
    use crate::operators::OperatorSet;
    use crate::solver::{CancelHandle, SolveResult};

    use super::*;

    /// A solver stub whose `value` is driven directly by test setup, standing in for a
    /// backend that has just returned `SolveResult::Sat`.
    struct FixedModel {
        true_vars: std::collections::HashSet<u32>,
    }

    impl Solver for FixedModel {
        fn reset(&mut self) {}
        fn num_vars(&self) -> usize {
            0
        }
        fn new_var(&mut self) -> Lit {
            unimplemented!("decode only reads an existing model")
        }
        fn add_clause<I>(&mut self, _lits: I)
        where
            I: IntoIterator<Item = Lit>,
        {
        }
        fn solve(&mut self) -> SolveResult {
            SolveResult::Sat
        }
        fn value(&self, lit: Lit) -> bool {
            let is_true = self.true_vars.contains(&lit.var());
            if lit.is_positive() {
                is_true
            } else {
                !is_true
            }
        }
        fn cancel_handle(&self) -> Box<dyn CancelHandle> {
            Box::new(())
        }
    }

    #[test]
    fn test_decode_single_atom() {
        let mut vars = VarTable::new();

        struct Counter(i32);
        impl Solver for Counter {
            fn reset(&mut self) {}
            fn num_vars(&self) -> usize {
                self.0 as usize
            }
            fn new_var(&mut self) -> Lit {
                self.0 += 1;
                Lit::new(self.0)
            }
            fn add_clause<I>(&mut self, _lits: I)
            where
                I: IntoIterator<Item = Lit>,
            {
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
        let mut counter = Counter(0);
        let x00 = vars.label(&mut counter, 0, Symbol::Atom(0));

        let model = FixedModel {
            true_vars: [x00.var()].into_iter().collect(),
        };
        let ops = OperatorSet::all();
        let formula = decode(&model, &vars, 1, 1, &ops);
        assert_eq!(formula, Formula::atom(0));
    }
}
