use std::fmt;
use std::rc::Rc;

use im::Vector;

use crate::combination::{Combination, Combinator};
use crate::error::ShellError;
use crate::shell_set::ShellSet;
use crate::value::{fmt_items, Value};

/// An opaque set supplied by the evaluator. It may change between calls;
/// combinations built over it see the change.
pub trait SetLike {
    fn contains(&self, needle: &Value) -> bool;

    /// Members in iteration order. The iterator must not borrow `self`.
    fn values(&self) -> SetIter;

    fn len(&self) -> usize {
        self.values().count()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub type SetIter = Box<dyn Iterator<Item = Value>>;

#[derive(Clone)]
pub enum SetView {
    /// Insertion-ordered members, free of duplicates; membership is an
    /// equality scan.
    Items(Vector<Value>),
    Base(Rc<dyn SetLike>),
    Combination(Rc<Combination>),
    /// Live reference to a mutable set cell.
    Shell(ShellSet),
}

impl SetView {
    pub fn empty() -> Self {
        SetView::Items(Vector::new())
    }

    /// Keeps the first occurrence of each member. Unhashable members are
    /// rejected.
    pub fn from_values<I: IntoIterator<Item = Value>>(values: I) -> Result<Self, ShellError> {
        let mut members = Vector::new();
        for value in values {
            value.require_hashable()?;
            if !members.contains(&value) {
                members.push_back(value);
            }
        }
        Ok(SetView::Items(members))
    }

    pub fn singleton(value: Value) -> Self {
        SetView::Items(Vector::unit(value))
    }

    pub fn from_base(set: Rc<dyn SetLike>) -> Self {
        SetView::Base(set)
    }

    pub fn live(cell: &ShellSet) -> Self {
        SetView::Shell(cell.clone())
    }

    pub fn combine(op: Combinator, first: SetView, second: SetView) -> Self {
        SetView::Combination(Rc::new(Combination::new(op, first, second)))
    }

    pub fn contains(&self, needle: &Value) -> bool {
        match self {
            SetView::Items(members) => members.contains(needle),
            SetView::Base(set) => set.contains(needle),
            SetView::Combination(node) => node.contains(needle),
            SetView::Shell(cell) => cell.view().contains(needle),
        }
    }

    /// Members in iteration order; a live reference iterates the view it
    /// holds when iteration starts.
    pub fn values(&self) -> SetIter {
        match self {
            SetView::Items(members) => Box::new(members.clone().into_iter()),
            SetView::Base(set) => set.values(),
            SetView::Combination(node) => Combination::values(node),
            SetView::Shell(cell) => cell.view().values(),
        }
    }

    /// Counts by iteration for combinations; never cached.
    pub fn len(&self) -> usize {
        match self {
            SetView::Items(members) => members.len(),
            SetView::Base(set) => set.len(),
            SetView::Combination(node) => node.len(),
            SetView::Shell(cell) => cell.view().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values().next().is_none()
    }

    pub fn is_subset(&self, other: &SetView) -> bool {
        self.values().all(|member| other.contains(&member))
    }

    pub fn is_superset(&self, other: &SetView) -> bool {
        other.is_subset(self)
    }

    pub fn is_disjoint(&self, other: &SetView) -> bool {
        self.values().all(|member| !other.contains(&member))
    }

    pub fn set_eq(&self, other: &SetView) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }

    /// Whether evaluating this view can reach `cell`.
    pub(crate) fn reaches(&self, cell: &ShellSet) -> bool {
        match self {
            SetView::Items(_) | SetView::Base(_) => false,
            SetView::Combination(node) => node.first().reaches(cell) || node.second().reaches(cell),
            SetView::Shell(other) => other.ptr_eq(cell) || other.view().reaches(cell),
        }
    }

    /// Rebuilds the view with each live reference that reaches `cell`
    /// replaced by the referenced cell's current view.
    pub(crate) fn pinned_against(&self, cell: &ShellSet) -> SetView {
        if !self.reaches(cell) {
            return self.clone();
        }
        match self {
            SetView::Combination(node) => SetView::combine(
                node.op(),
                node.first().pinned_against(cell),
                node.second().pinned_against(cell),
            ),
            SetView::Shell(other) if other.ptr_eq(cell) => other.view(),
            SetView::Shell(other) => other.view().pinned_against(cell),
            leaf => leaf.clone(),
        }
    }
}

impl Default for SetView {
    fn default() -> Self {
        SetView::empty()
    }
}

impl PartialEq for SetView {
    fn eq(&self, other: &Self) -> bool {
        self.set_eq(other)
    }
}

impl fmt::Display for SetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("set()");
        }
        fmt_items(f, "{", "}", self.values())
    }
}

impl fmt::Debug for SetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
