//! DAG Encoder: label well-formedness, child-edge structure, and parent reachability for
//! an `n`-node syntax-DAG.

use itertools::Itertools;

use crate::lit::Lit;
use crate::operators::OperatorSet;
use crate::ops::{Encodings, Ops};
use crate::solver::Solver;
use crate::vars::{Symbol, VarTable};

/// All labels a node at index `i` may legally carry: every atom, plus every enabled
/// operator whose arity does not exceed `i` (restating the source's ad hoc `i > 0`/`i > 1`
/// thresholds as "operator arity <= node index", per the Design Notes).
fn labels_for(i: usize, num_atoms: usize, operators: &OperatorSet) -> Vec<Symbol> {
    let atoms = (0..num_atoms).map(Symbol::Atom);
    let ops = operators.iter().filter(move |op| op.arity() <= i).map(Symbol::Op);
    atoms.chain(ops).collect()
}

/// Emits the DAG constraints at length `n` over atomic propositions `0..num_atoms` and the
/// enabled `operators`. Node 0 only ever has atom labels available (no operator has arity
/// 0), so the exactly-one label constraint already enforces spec's root-atom rule.
pub fn encode_dag<S: Solver>(
    solver: &mut S,
    vars: &mut VarTable,
    n: usize,
    num_atoms: usize,
    operators: &OperatorSet,
) {
    // Label well-formedness.
    for i in 0..n {
        let lits: Vec<Lit> = labels_for(i, num_atoms, operators)
            .into_iter()
            .map(|s| vars.label(solver, i, s))
            .collect();
        solver.encode_exactly_one(&lits);
    }

    // Child edges, for every node that can possibly have children.
    for i in 1..n {
        let mut unary_lits = Vec::new();
        for op in operators.unary().filter(|op| op.arity() <= i) {
            unary_lits.push(vars.label(solver, i, Symbol::Op(op)));
        }
        let mut binary_lits = Vec::new();
        for op in operators.binary().filter(|op| op.arity() <= i) {
            binary_lits.push(vars.label(solver, i, Symbol::Op(op)));
        }
        let mut atom_lits = Vec::new();
        for a in 0..num_atoms {
            atom_lits.push(vars.label(solver, i, Symbol::Atom(a)));
        }

        let left_lits: Vec<Lit> = (0..i).map(|j| vars.left(solver, i, j)).collect();
        let right_lits: Vec<Lit> = (0..i).map(|j| vars.right(solver, i, j)).collect();

        // Operator (unary or binary) => exactly one left child.
        let has_operator: Vec<Lit> = unary_lits.iter().chain(binary_lits.iter()).copied().collect();
        if !has_operator.is_empty() {
            for &op_lit in &has_operator {
                solver.add_clause(left_lits.iter().map(|&l| l).chain([-op_lit]));
            }
            solver.encode_at_most_one(&left_lits);
        }

        // Binary label => exactly one right child.
        if !binary_lits.is_empty() {
            for &op_lit in &binary_lits {
                solver.add_clause(right_lits.iter().copied().chain([-op_lit]));
            }
            solver.encode_at_most_one(&right_lits);
        }

        // Unary label => no right child.
        for &op_lit in &unary_lits {
            for &r in &right_lits {
                solver.imply(op_lit, -r);
            }
        }

        // Atom => no children at all.
        for &a_lit in &atom_lits {
            for &l in &left_lits {
                solver.imply(a_lit, -l);
            }
            for &r in &right_lits {
                solver.imply(a_lit, -r);
            }
        }

        // Distinct children: a node cannot pick the same index for both.
        for (&l, &r) in left_lits.iter().zip(right_lits.iter()) {
            solver.imply(l, -r);
        }
    }

    // Parent reachability: every non-root node is referenced by some higher node.
    for i in 0..n.saturating_sub(1) {
        let parents: Vec<Lit> = ((i + 1)..n)
            .flat_map(|p| [vars.left(solver, p, i), vars.right(solver, p, i)])
            .collect();
        if !parents.is_empty() {
            solver.encode_at_least_one(&parents);
        }
    }
}
