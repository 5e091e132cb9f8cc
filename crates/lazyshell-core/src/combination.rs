//! Live boolean combination of two set views.
//!
//! Nothing is snapshotted: membership and iteration are recomputed against
//! whatever the operands hold at the time of each call.

use std::rc::Rc;

use crate::set::{SetIter, SetView};
use crate::value::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Or,
    And,
    Xor,
    AndNot,
}

impl Combinator {
    pub fn apply(self, in_first: bool, in_second: bool) -> bool {
        match self {
            Combinator::Or => in_first || in_second,
            Combinator::And => in_first && in_second,
            Combinator::Xor => in_first != in_second,
            Combinator::AndNot => in_first && !in_second,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Combinator::Or => "|",
            Combinator::And => "&",
            Combinator::Xor => "^",
            Combinator::AndNot => "-",
        }
    }
}

pub struct Combination {
    op: Combinator,
    first: SetView,
    second: SetView,
}

impl Combination {
    pub fn new(op: Combinator, first: SetView, second: SetView) -> Self {
        Self { op, first, second }
    }

    pub fn op(&self) -> Combinator {
        self.op
    }

    pub fn first(&self) -> &SetView {
        &self.first
    }

    pub fn second(&self) -> &SetView {
        &self.second
    }

    pub fn contains(&self, needle: &Value) -> bool {
        self.op
            .apply(self.first.contains(needle), self.second.contains(needle))
    }

    /// Walks `first`, then the members of `second` not in `first`, so every
    /// member is yielded once and in first-seen order.
    pub fn values(node: &Rc<Combination>) -> SetIter {
        let first_node = Rc::clone(node);
        let from_first = node
            .first
            .values()
            .filter(move |item| first_node.op.apply(true, first_node.second.contains(item)));
        let second_node = Rc::clone(node);
        let from_second = node.second.values().filter(move |item| {
            !second_node.first.contains(item) && second_node.op.apply(false, true)
        });
        Box::new(from_first.chain(from_second))
    }

    pub fn len(&self) -> usize {
        let from_first = self
            .first
            .values()
            .filter(|item| self.op.apply(true, self.second.contains(item)))
            .count();
        let from_second = self
            .second
            .values()
            .filter(|item| !self.first.contains(item) && self.op.apply(false, true))
            .count();
        from_first + from_second
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
