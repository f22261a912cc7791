use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use crate::error::{LearnerError, Result};

/// An LTL operator label a syntax-DAG node may carry.
///
/// Ordered so `Ord`/`Hash` derive deterministically from declaration order, which keeps
/// variable naming (see [`crate::vars`]) stable across runs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    Not,
    Next,
    Globally,
    Finally,
    Or,
    And,
    Implies,
    Until,
}

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Not,
        Operator::Next,
        Operator::Globally,
        Operator::Finally,
        Operator::Or,
        Operator::And,
        Operator::Implies,
        Operator::Until,
    ];

    pub const fn symbol(self) -> char {
        match self {
            Operator::Not => '!',
            Operator::Next => 'X',
            Operator::Globally => 'G',
            Operator::Finally => 'F',
            Operator::Or => '|',
            Operator::And => '&',
            Operator::Implies => '>',
            Operator::Until => 'U',
        }
    }

    pub fn from_token(token: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.symbol().to_string() == token)
            .ok_or_else(|| LearnerError::UnsupportedOperator {
                token: token.to_string(),
            })
    }

    pub const fn arity(self) -> usize {
        match self {
            Operator::Not | Operator::Next | Operator::Globally | Operator::Finally => 1,
            Operator::Or | Operator::And | Operator::Implies | Operator::Until => 2,
        }
    }

    pub const fn is_unary(self) -> bool {
        self.arity() == 1
    }

    pub const fn is_binary(self) -> bool {
        self.arity() == 2
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The enabled operator subset for one learning run (`O` in the component design).
/// Atomic propositions are always available and are not part of this set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorSet(BTreeSet<Operator>);

impl OperatorSet {
    pub fn all() -> Self {
        Self(Operator::ALL.into_iter().collect())
    }

    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, LearnerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for token in tokens {
            set.insert(Operator::from_token(token.as_ref())?);
        }
        Ok(Self(set))
    }

    pub fn contains(&self, op: Operator) -> bool {
        self.0.contains(&op)
    }

    pub fn iter(&self) -> impl Iterator<Item = Operator> + '_ {
        self.0.iter().copied()
    }

    pub fn unary(&self) -> impl Iterator<Item = Operator> + '_ {
        self.iter().filter(|op| op.is_unary())
    }

    pub fn binary(&self) -> impl Iterator<Item = Operator> + '_ {
        self.iter().filter(|op| op.is_binary())
    }
}

impl Default for OperatorSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Operator> for OperatorSet {
    fn from_iter<T: IntoIterator<Item = Operator>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
