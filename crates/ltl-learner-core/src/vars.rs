//! Variable bookkeeping: a typed namespace over the backend's raw integer variables.
//!
//! Mirrors `sat-nexus-core`'s `context`/`domainvar` pattern (a typed lookup in front of a
//! bare `Solver`) but specialized to the handful of indexed families the encoder needs,
//! rather than a generic type-erased map: `x[i,label]`, `l[i,j]`, `r[i,j]`, `y[i,kind,k,t]`
//! and the Until operator's Tseitin auxiliaries `u[i,kind,k,t,m]`.

use std::collections::HashMap;

use crate::lit::Lit;
use crate::operators::Operator;
use crate::solver::Solver;
use crate::trace::AtomId;

/// What a syntax-DAG node can be labeled with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Atom(AtomId),
    Op(Operator),
}

/// Which half of the sample a semantic variable's trace index is drawn from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Positive,
    Negative,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
enum Var {
    /// `x[node, label]`: node is labeled with `label`.
    Label(usize, Symbol),
    /// `l[node, child]`: node's left child is `child`.
    Left(usize, usize),
    /// `r[node, child]`: node's right child is `child`.
    Right(usize, usize),
    /// `y[node, kind, trace, t]`: subformula rooted at `node` holds at position `t` of
    /// trace number `trace` in the `kind` half of the sample.
    Sem(usize, Kind, usize, usize),
    /// `u[node, kind, trace, t, m]`: Until's Tseitin auxiliary — the right operand holds at
    /// `m` and the left operand holds continuously over `[t, m)`.
    UntilAux(usize, Kind, usize, usize, usize),
}

/// Lazily allocates and caches one backend variable per distinct key.
#[derive(Debug, Default)]
pub struct VarTable {
    vars: HashMap<Var, Lit>,
}

impl VarTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    fn get_or_create<S: Solver>(&mut self, solver: &mut S, key: Var) -> Lit {
        *self.vars.entry(key).or_insert_with(|| solver.new_var())
    }

    pub fn label<S: Solver>(&mut self, solver: &mut S, node: usize, symbol: Symbol) -> Lit {
        self.get_or_create(solver, Var::Label(node, symbol))
    }

    pub fn left<S: Solver>(&mut self, solver: &mut S, node: usize, child: usize) -> Lit {
        self.get_or_create(solver, Var::Left(node, child))
    }

    pub fn right<S: Solver>(&mut self, solver: &mut S, node: usize, child: usize) -> Lit {
        self.get_or_create(solver, Var::Right(node, child))
    }

    pub fn sem<S: Solver>(&mut self, solver: &mut S, node: usize, kind: Kind, trace: usize, t: usize) -> Lit {
        self.get_or_create(solver, Var::Sem(node, kind, trace, t))
    }

    pub fn until_aux<S: Solver>(
        &mut self,
        solver: &mut S,
        node: usize,
        kind: Kind,
        trace: usize,
        t: usize,
        m: usize,
    ) -> Lit {
        self.get_or_create(solver, Var::UntilAux(node, kind, trace, t, m))
    }

    /// Looked-up, read-only variant used by the decoder: returns `None` rather than
    /// allocating a fresh variable for a key that was never asserted during encoding.
    pub fn label_if_exists(&self, node: usize, symbol: Symbol) -> Option<Lit> {
        self.vars.get(&Var::Label(node, symbol)).copied()
    }

    pub fn left_if_exists(&self, node: usize, child: usize) -> Option<Lit> {
        self.vars.get(&Var::Left(node, child)).copied()
    }

    pub fn right_if_exists(&self, node: usize, child: usize) -> Option<Lit> {
        self.vars.get(&Var::Right(node, child)).copied()
    }
}
