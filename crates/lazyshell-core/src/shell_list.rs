//! Mutable sequence cell.
//!
//! A `ShellList` owns a single slot holding its current [`SeqView`]. Every
//! mutation builds a new view, reusing untouched parts of the old one by
//! reference, and swaps it into the slot. Views are never mutated, so a view
//! handed out earlier keeps its contents.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use im::Vector;
use tracing::{debug, trace};

use crate::error::ShellError;
use crate::introspect::seq_kind;
use crate::options::ViewOptions;
use crate::seq::{repeat_count, sequence_operand, SeqView};
use crate::slice::{assign_items, delete_items, indices, positive_index, Bounds, SliceSpec};
use crate::value::{fmt_items, render_guarded, Value};

#[derive(Clone)]
pub struct ShellList {
    inner: Rc<RefCell<SeqView>>,
    options: ViewOptions,
}

impl ShellList {
    pub fn new(view: SeqView) -> Self {
        Self::with_options(view, ViewOptions::default())
    }

    pub fn with_options(view: SeqView, options: ViewOptions) -> Self {
        Self {
            inner: Rc::new(RefCell::new(view)),
            options,
        }
    }

    pub fn from_values<I: IntoIterator<Item = Value>>(values: I) -> Self {
        Self::new(SeqView::from_values(values))
    }

    pub fn options(&self) -> ViewOptions {
        self.options
    }

    /// The current view. Later mutations of the cell do not affect it.
    pub fn view(&self) -> SeqView {
        self.inner.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &ShellList) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn derive(&self, view: SeqView) -> ShellList {
        ShellList::with_options(view, self.options)
    }

    fn replace(&self, view: SeqView, op: &'static str) {
        trace!(op, kind = ?seq_kind(&view), len = view.len(), "list cell swap");
        *self.inner.borrow_mut() = view;
    }

    fn realize(&self, view: &SeqView, op: &'static str) -> Result<Vector<Value>, ShellError> {
        let len = view.len();
        self.options.check_realize(len)?;
        debug!(op, len, "realizing list contents");
        Ok(view.realize())
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: i64) -> Result<Value, ShellError> {
        self.view().get(index)
    }

    /// Reading a slice yields a new cell over the sliced view.
    pub fn slice(&self, spec: &SliceSpec) -> Result<ShellList, ShellError> {
        Ok(self.derive(self.view().get_slice(spec)?))
    }

    pub fn copy(&self) -> Result<ShellList, ShellError> {
        self.slice(&SliceSpec::full())
    }

    /// Iterates the view current at the time of the call.
    pub fn iter(&self) -> impl Iterator<Item = Value> {
        let view = self.view();
        let len = view.len();
        (0..len).map(move |idx| view.item(idx))
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.view().to_vec()
    }

    pub fn contains(&self, needle: &Value) -> bool {
        self.view().contains(needle)
    }

    pub fn index_of(&self, needle: &Value) -> Result<usize, ShellError> {
        self.view().index_of(needle)
    }

    pub fn count(&self, needle: &Value) -> usize {
        self.view().count(needle)
    }

    pub fn set_slice(&self, spec: &SliceSpec, values: SeqView) -> Result<(), ShellError> {
        let inner = self.view();
        let old_len = inner.len();
        let bounds = indices(spec, old_len)?;
        let Bounds::Forward {
            start,
            stop,
            step: 1,
        } = bounds
        else {
            let mut items = self.realize(&inner, "set_slice")?;
            assign_items(&mut items, bounds, values.to_vec())?;
            self.replace(SeqView::Items(items), "set_slice");
            return Ok(());
        };
        let stop = stop.max(start);
        let mut middle = values;
        if start != 0 {
            middle = SeqView::concat_of(inner.get_slice(&SliceSpec::head(start as i64))?, middle);
        }
        if stop < old_len {
            middle = SeqView::concat_of(middle, inner.get_slice(&SliceSpec::tail(stop as i64))?);
        }
        self.replace(middle, "set_slice");
        Ok(())
    }

    fn checked_index(&self, index: i64) -> Result<i64, ShellError> {
        let len = self.len();
        let pos = positive_index(index, len);
        if pos < 0 || pos >= len as i64 {
            return Err(ShellError::index(index, len));
        }
        Ok(pos)
    }

    pub fn set_index(&self, index: i64, value: Value) -> Result<(), ShellError> {
        let pos = self.checked_index(index)?;
        self.set_slice(&SliceSpec::range(pos, pos + 1), SeqView::from_values([value]))
    }

    pub fn delete_slice(&self, spec: &SliceSpec) -> Result<(), ShellError> {
        let inner = self.view();
        let bounds = indices(spec, inner.len())?;
        if bounds.is_unit() {
            return self.set_slice(spec, SeqView::empty());
        }
        let items = self.realize(&inner, "delete_slice")?;
        self.replace(SeqView::Items(delete_items(&items, bounds)), "delete_slice");
        Ok(())
    }

    pub fn delete_index(&self, index: i64) -> Result<(), ShellError> {
        let pos = self.checked_index(index)?;
        self.set_slice(&SliceSpec::range(pos, pos + 1), SeqView::empty())
    }

    pub fn insert(&self, index: i64, item: Value) -> Result<(), ShellError> {
        self.set_slice(&SliceSpec::range(index, index), SeqView::from_values([item]))
    }

    pub fn append(&self, item: Value) -> Result<(), ShellError> {
        let len = self.len() as i64;
        self.insert(len, item)
    }

    pub fn extend(&self, other: &SeqView) {
        let extended = self.view().concat_view(other);
        self.replace(extended, "extend");
    }

    /// `self += other` for any sequence value.
    pub fn extend_values(&self, other: &Value) -> Result<(), ShellError> {
        let other = sequence_operand("+=", "list", other)?;
        self.extend(&other);
        Ok(())
    }

    pub fn pop(&self, index: Option<i64>) -> Result<Value, ShellError> {
        if self.is_empty() {
            return Err(ShellError::empty("pop"));
        }
        let index = index.unwrap_or(-1);
        let item = self.get(index)?;
        self.delete_index(index)?;
        Ok(item)
    }

    pub fn remove(&self, needle: &Value) -> Result<(), ShellError> {
        let pos = self.index_of(needle)?;
        self.delete_index(pos as i64)
    }

    pub fn clear(&self) {
        self.replace(SeqView::empty(), "clear");
    }

    pub fn sort(&self) -> Result<(), ShellError> {
        let items = self.realize(&self.view(), "sort")?;
        let mut items: Vec<Value> = items.into_iter().collect();
        let mut failure = None;
        items.sort_by(|a, b| {
            a.compare(b).unwrap_or_else(|err| {
                failure.get_or_insert(err);
                Ordering::Equal
            })
        });
        if let Some(err) = failure {
            return Err(err);
        }
        self.replace(SeqView::from_values(items), "sort");
        Ok(())
    }

    pub fn reverse(&self) -> Result<(), ShellError> {
        let items = self.realize(&self.view(), "reverse")?;
        let mut items: Vec<Value> = items.into_iter().collect();
        items.reverse();
        self.replace(SeqView::from_values(items), "reverse");
        Ok(())
    }

    /// `self + other` as a new cell; neither operand changes.
    pub fn concat(&self, other: &Value) -> Result<ShellList, ShellError> {
        let other = sequence_operand("+", "list", other)?;
        Ok(self.derive(self.view().concat_view(&other)))
    }

    /// `other + self` as a new cell.
    pub fn prepend(&self, other: &Value) -> Result<ShellList, ShellError> {
        let other = sequence_operand("+", "list", other)?;
        Ok(self.derive(other.concat_view(&self.view())))
    }

    /// `self * times` as a new cell.
    pub fn repeat(&self, times: &Value) -> Result<ShellList, ShellError> {
        let times = repeat_count("list", times)?;
        Ok(self.derive(self.view().repeat_n(times)?))
    }

    /// `self *= times`
    pub fn repeat_in_place(&self, times: &Value) -> Result<(), ShellError> {
        let times = repeat_count("list", times)?;
        let repeated = self.view().repeat_n(times)?;
        self.replace(repeated, "repeat");
        Ok(())
    }
}

impl Default for ShellList {
    fn default() -> Self {
        ShellList::new(SeqView::empty())
    }
}

impl PartialEq for ShellList {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.view().seq_eq(&other.view())
    }
}

impl fmt::Display for ShellList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = Rc::as_ptr(&self.inner) as *const () as usize;
        render_guarded(f, id, "[...]", |f| fmt_items(f, "[", "]", self.iter()))
    }
}

impl fmt::Debug for ShellList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
