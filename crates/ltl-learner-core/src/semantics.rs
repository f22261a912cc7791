//! Semantic Encoder: ties each node's `y[i,·]` to its children's `y` values according to
//! LTL semantics over each sample trace, plus the root separation constraints.

use crate::operators::{Operator, OperatorSet};
use crate::ops::Ops;
use crate::solver::Solver;
use crate::trace::Sample;
use crate::vars::{Kind, Symbol, VarTable};

fn kinds<'a>(positives: &'a Sample, negatives: &'a Sample) -> [(Kind, &'a Sample); 2] {
    [(Kind::Positive, positives), (Kind::Negative, negatives)]
}

/// Emits the consistency clauses for every node, every sample trace, every position —
/// one pass per enabled operator, gated by that operator's label (and child) literals so
/// only the branch actually chosen by the model constrains `y`.
pub fn encode_semantics<S: Solver>(
    solver: &mut S,
    vars: &mut VarTable,
    n: usize,
    num_atoms: usize,
    operators: &OperatorSet,
    positives: &Sample,
    negatives: &Sample,
) {
    for i in 0..n {
        for (kind, sample) in kinds(positives, negatives) {
            for (k, trace) in sample.iter().enumerate() {
                let len = trace.len();

                for a in 0..num_atoms {
                    let x = vars.label(solver, i, Symbol::Atom(a));
                    for t in 0..len {
                        let y = vars.sem(solver, i, kind, k, t);
                        if trace.holds(a, t) {
                            solver.imply(x, y);
                        } else {
                            solver.imply(x, -y);
                        }
                    }
                }

                if i == 0 {
                    continue;
                }

                for op in operators.unary().filter(|op| op.arity() <= i) {
                    let x = vars.label(solver, i, Symbol::Op(op));
                    for j in 0..i {
                        let l = vars.left(solver, i, j);
                        for t in 0..len {
                            let yi = vars.sem(solver, i, kind, k, t);
                            match op {
                                Operator::Not => {
                                    let yj = vars.sem(solver, j, kind, k, t);
                                    solver.imply_imply_iff(x, l, yi, -yj);
                                }
                                Operator::Next => {
                                    let yj = vars.sem(solver, j, kind, k, trace.next(t));
                                    solver.imply_imply_iff(x, l, yi, yj);
                                }
                                Operator::Globally => {
                                    let aux: Vec<_> =
                                        trace.aux(t).into_iter().map(|t2| vars.sem(solver, j, kind, k, t2)).collect();
                                    solver.imply_imply_iff_and(x, l, yi, aux);
                                }
                                Operator::Finally => {
                                    let aux: Vec<_> =
                                        trace.aux(t).into_iter().map(|t2| vars.sem(solver, j, kind, k, t2)).collect();
                                    solver.imply_imply_iff_or(x, l, yi, aux);
                                }
                                _ => unreachable!("not a unary operator"),
                            }
                        }
                    }
                }

                if i < 2 {
                    continue;
                }

                for op in operators.binary().filter(|op| op.arity() <= i) {
                    let x = vars.label(solver, i, Symbol::Op(op));
                    for j in 0..i {
                        let l = vars.left(solver, i, j);
                        for jp in 0..i {
                            if op == Operator::Until && jp == j {
                                continue;
                            }
                            let r = vars.right(solver, i, jp);
                            for t in 0..len {
                                let yi = vars.sem(solver, i, kind, k, t);
                                match op {
                                    Operator::Or => {
                                        let yj = vars.sem(solver, j, kind, k, t);
                                        let yjp = vars.sem(solver, jp, kind, k, t);
                                        solver.imply_imply_imply_iff_or(x, l, r, yi, [yj, yjp]);
                                    }
                                    Operator::And => {
                                        let yj = vars.sem(solver, j, kind, k, t);
                                        let yjp = vars.sem(solver, jp, kind, k, t);
                                        solver.imply_imply_imply_iff_and(x, l, r, yi, [yj, yjp]);
                                    }
                                    Operator::Implies => {
                                        let yj = vars.sem(solver, j, kind, k, t);
                                        let yjp = vars.sem(solver, jp, kind, k, t);
                                        solver.imply_imply_imply_iff_or(x, l, r, yi, [-yj, yjp]);
                                    }
                                    Operator::Until => {
                                        encode_until_at(solver, vars, i, j, jp, kind, k, t, trace, x, l, r);
                                    }
                                    _ => unreachable!("not a binary operator"),
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// `y[i,·,t] <=> OR_m ( y[j',·,aux(t)[m]] & AND_{k<m} y[j,·,aux(t)[k]] )`, built with one
/// Tseitin auxiliary per `m` so the AND-of-ANDs doesn't blow up into one giant clause.
#[allow(clippy::too_many_arguments)]
fn encode_until_at<S: Solver>(
    solver: &mut S,
    vars: &mut VarTable,
    i: usize,
    j: usize,
    jp: usize,
    kind: Kind,
    k: usize,
    t: usize,
    trace: &crate::trace::Trace,
    x: crate::lit::Lit,
    l: crate::lit::Lit,
    r: crate::lit::Lit,
) {
    let aux = trace.aux(t);
    let mut aux_lits = Vec::with_capacity(aux.len());
    for (m, &pos) in aux.iter().enumerate() {
        let u = vars.until_aux(solver, i, kind, k, t, m);
        let right = vars.sem(solver, jp, kind, k, pos);
        let mut conjuncts = vec![right];
        for &earlier in &aux[..m] {
            conjuncts.push(vars.sem(solver, j, kind, k, earlier));
        }
        solver.imply_imply_imply_iff_and(x, l, r, u, conjuncts);
        aux_lits.push(u);
    }
    let yi = vars.sem(solver, i, kind, k, t);
    solver.imply_imply_imply_iff_or(x, l, r, yi, aux_lits);
}

/// Root separation: every positive trace must satisfy the learned formula at position 0,
/// every negative trace must not.
pub fn encode_separation<S: Solver>(solver: &mut S, vars: &mut VarTable, n: usize, positives: &Sample, negatives: &Sample) {
    let root = n - 1;
    for (k, _) in positives.iter().enumerate() {
        let y = vars.sem(solver, root, Kind::Positive, k, 0);
        solver.add_unit(y);
    }
    for (k, _) in negatives.iter().enumerate() {
        let y = vars.sem(solver, root, Kind::Negative, k, 0);
        solver.add_unit(-y);
    }
}
