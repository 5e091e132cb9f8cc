use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::combination::Combinator;
use crate::error::ShellError;
use crate::introspect::set_kind;
use crate::set::{SetIter, SetView};
use crate::value::Value;

/// Mutable set cell. Every mutation replaces the held view with a new
/// combination over the previous one.
#[derive(Clone)]
pub struct ShellSet {
    inner: Rc<RefCell<SetView>>,
}

fn set_operand(op: &'static str, operand: &Value) -> Result<SetView, ShellError> {
    operand
        .as_set_view()
        .ok_or_else(|| ShellError::unsupported(op, "set", operand.type_name()))
}

impl ShellSet {
    pub fn new(view: SetView) -> Self {
        Self {
            inner: Rc::new(RefCell::new(view)),
        }
    }

    /// Members keep the order they were first seen in.
    pub fn from_values<I: IntoIterator<Item = Value>>(values: I) -> Result<Self, ShellError> {
        Ok(Self::new(SetView::from_values(values)?))
    }

    pub fn view(&self) -> SetView {
        self.inner.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &ShellSet) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn replace(&self, view: SetView, op: &'static str) {
        trace!(op, kind = ?set_kind(&view), "set cell swap");
        *self.inner.borrow_mut() = view;
    }

    /// The view `op(current, operand)`, with any path from `operand` back to
    /// this cell pinned so the cell never reaches itself.
    fn combined(&self, op: Combinator, operand: SetView) -> SetView {
        let operand = operand.pinned_against(self);
        SetView::combine(op, self.view(), operand)
    }

    /// A new cell over `op(current, operand)`; the operand stays live.
    fn derive(&self, op: Combinator, operand: SetView) -> ShellSet {
        ShellSet::new(SetView::combine(op, self.view(), operand))
    }

    fn update(&self, op: Combinator, operand: SetView) {
        let combined = self.combined(op, operand);
        self.replace(combined, op.symbol());
    }

    pub fn contains(&self, needle: &Value) -> bool {
        self.view().contains(needle)
    }

    pub fn values(&self) -> SetIter {
        self.view().values()
    }

    pub fn len(&self) -> usize {
        self.view().len()
    }

    pub fn is_empty(&self) -> bool {
        self.view().is_empty()
    }

    pub fn add(&self, value: Value) -> Result<(), ShellError> {
        value.require_hashable()?;
        self.update(Combinator::Or, SetView::singleton(value));
        Ok(())
    }

    pub fn discard(&self, value: Value) -> Result<(), ShellError> {
        value.require_hashable()?;
        self.update(Combinator::AndNot, SetView::singleton(value));
        Ok(())
    }

    pub fn remove(&self, value: Value) -> Result<(), ShellError> {
        value.require_hashable()?;
        if !self.contains(&value) {
            return Err(ShellError::element_not_found(&value));
        }
        self.discard(value)
    }

    pub fn pop(&self) -> Result<Value, ShellError> {
        let Some(first) = self.values().next() else {
            return Err(ShellError::empty("pop"));
        };
        self.remove(first.clone())?;
        Ok(first)
    }

    pub fn clear(&self) {
        self.replace(SetView::empty(), "clear");
    }

    pub fn copy(&self) -> ShellSet {
        ShellSet::new(self.view())
    }

    pub fn union(&self, other: &SetView) -> ShellSet {
        self.derive(Combinator::Or, other.clone())
    }

    pub fn intersection(&self, other: &SetView) -> ShellSet {
        self.derive(Combinator::And, other.clone())
    }

    pub fn symmetric_difference(&self, other: &SetView) -> ShellSet {
        self.derive(Combinator::Xor, other.clone())
    }

    pub fn difference(&self, other: &SetView) -> ShellSet {
        self.derive(Combinator::AndNot, other.clone())
    }

    /// `self | other`, `self & other`, ... for a dynamic operand.
    pub fn binary(&self, op: Combinator, other: &Value) -> Result<ShellSet, ShellError> {
        let operand = set_operand(op.symbol(), other)?;
        Ok(self.derive(op, operand))
    }

    pub fn union_update(&self, other: &SetView) {
        self.update(Combinator::Or, other.clone());
    }

    pub fn intersection_update(&self, other: &SetView) {
        self.update(Combinator::And, other.clone());
    }

    pub fn symmetric_difference_update(&self, other: &SetView) {
        self.update(Combinator::Xor, other.clone());
    }

    pub fn difference_update(&self, other: &SetView) {
        self.update(Combinator::AndNot, other.clone());
    }

    /// `self |= other`, `self &= other`, ... for a dynamic operand.
    pub fn update_with(&self, op: Combinator, other: &Value) -> Result<(), ShellError> {
        let operand = set_operand(op.symbol(), other)?;
        self.update(op, operand);
        Ok(())
    }

    pub fn is_subset(&self, other: &SetView) -> bool {
        self.view().is_subset(other)
    }

    pub fn is_proper_subset(&self, other: &SetView) -> bool {
        let view = self.view();
        view.is_subset(other) && view.len() < other.len()
    }

    pub fn is_superset(&self, other: &SetView) -> bool {
        self.view().is_superset(other)
    }

    pub fn is_proper_superset(&self, other: &SetView) -> bool {
        let view = self.view();
        view.is_superset(other) && view.len() > other.len()
    }

    pub fn is_disjoint(&self, other: &SetView) -> bool {
        self.view().is_disjoint(other)
    }
}

impl Default for ShellSet {
    fn default() -> Self {
        ShellSet::new(SetView::empty())
    }
}

impl PartialEq for ShellSet {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.view().set_eq(&other.view())
    }
}

impl fmt::Display for ShellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}

impl fmt::Debug for ShellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
