//! The learned LTL formula, as a typed tree (not the syntax-DAG the encoder reasons about —
//! shared subexpressions are unfolded into a tree here, matching the §6 output grammar).
//!
//! Shaped after `sat_nexus_core::formula::expr::Expr<T>` (a recursive enum plus a `Display`
//! impl keyed off an alternate/non-alternate flag), but the terminal is fixed to an atom
//! index rather than generic `T`, since rendering an atom also needs the run's AP name
//! table — not something `Display` alone can carry.

use crate::operators::Operator;
use crate::trace::{AtomId, Trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    Atom(AtomId),
    Not(Box<Formula>),
    Next(Box<Formula>),
    Globally(Box<Formula>),
    Finally(Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Until(Box<Formula>, Box<Formula>),
}

impl Formula {
    pub fn atom(id: AtomId) -> Self {
        Formula::Atom(id)
    }

    pub fn unary(op: Operator, arg: Formula) -> Self {
        let arg = Box::new(arg);
        match op {
            Operator::Not => Formula::Not(arg),
            Operator::Next => Formula::Next(arg),
            Operator::Globally => Formula::Globally(arg),
            Operator::Finally => Formula::Finally(arg),
            _ => panic!("{op} is not a unary operator"),
        }
    }

    pub fn binary(op: Operator, lhs: Formula, rhs: Formula) -> Self {
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match op {
            Operator::Or => Formula::Or(lhs, rhs),
            Operator::And => Formula::And(lhs, rhs),
            Operator::Implies => Formula::Implies(lhs, rhs),
            Operator::Until => Formula::Until(lhs, rhs),
            _ => panic!("{op} is not a binary operator"),
        }
    }

    /// Number of syntax-DAG nodes this tree would unfold from, i.e. its node count as a
    /// tree (shared subexpressions count once per occurrence).
    pub fn size(&self) -> usize {
        match self {
            Formula::Atom(_) => 1,
            Formula::Not(a) | Formula::Next(a) | Formula::Globally(a) | Formula::Finally(a) => 1 + a.size(),
            Formula::Or(l, r) | Formula::And(l, r) | Formula::Implies(l, r) | Formula::Until(l, r) => {
                1 + l.size() + r.size()
            }
        }
    }

    /// Direct, un-encoded LTL evaluation over an ultimately periodic word — independent of
    /// the SAT encoding, used only to check the Soundness property in tests.
    pub fn eval_at(&self, trace: &Trace, t: usize) -> bool {
        match self {
            Formula::Atom(a) => trace.holds(*a, t),
            Formula::Not(a) => !a.eval_at(trace, t),
            Formula::Next(a) => a.eval_at(trace, trace.next(t)),
            Formula::Globally(a) => trace.aux(t).into_iter().all(|t2| a.eval_at(trace, t2)),
            Formula::Finally(a) => trace.aux(t).into_iter().any(|t2| a.eval_at(trace, t2)),
            Formula::Or(l, r) => l.eval_at(trace, t) || r.eval_at(trace, t),
            Formula::And(l, r) => l.eval_at(trace, t) && r.eval_at(trace, t),
            Formula::Implies(l, r) => !l.eval_at(trace, t) || r.eval_at(trace, t),
            Formula::Until(l, r) => {
                let aux = trace.aux(t);
                (0..aux.len()).any(|m| r.eval_at(trace, aux[m]) && aux[..m].iter().all(|&t2| l.eval_at(trace, t2)))
            }
        }
    }

    /// Render the §6 output grammar: `UNARY(formula)` / `BINARY(formula,formula)` / atom name.
    pub fn render(&self, names: &[String]) -> String {
        match self {
            Formula::Atom(a) => names[*a].clone(),
            Formula::Not(a) => format!("!({})", a.render(names)),
            Formula::Next(a) => format!("X({})", a.render(names)),
            Formula::Globally(a) => format!("G({})", a.render(names)),
            Formula::Finally(a) => format!("F({})", a.render(names)),
            Formula::Or(l, r) => format!("|({},{})", l.render(names), r.render(names)),
            Formula::And(l, r) => format!("&({},{})", l.render(names), r.render(names)),
            Formula::Implies(l, r) => format!(">({},{})", l.render(names), r.render(names)),
            Formula::Until(l, r) => format!("U({},{})", l.render(names), r.render(names)),
        }
    }
}
