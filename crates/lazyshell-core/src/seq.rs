use std::fmt;
use std::rc::Rc;

use im::Vector;
use tracing::debug;

use crate::concat::Concat;
use crate::error::ShellError;
use crate::slice::{indices, positive_index, slice_items, Bounds, SliceSpec};
use crate::value::{fmt_items, Value};
use crate::window::Window;

/// An opaque sequence supplied by the evaluator.
///
/// Implementations must keep their length stable for as long as a view holds
/// them.
pub trait Sequence {
    fn len(&self) -> usize;

    /// `index` is always below `len()`.
    fn item(&self, index: usize) -> Value;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, needle: &Value) -> bool {
        (0..self.len()).any(|idx| self.item(idx) == *needle)
    }
}

impl Sequence for Vec<Value> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn item(&self, index: usize) -> Value {
        self[index].clone()
    }
}

/// A read-only sequence. Cloning shares structure.
#[derive(Clone)]
pub enum SeqView {
    Items(Vector<Value>),
    Base(Rc<dyn Sequence>),
    Concat(Rc<Concat>),
    Window(Rc<Window>),
}

pub type SeqIter<'a> = Box<dyn Iterator<Item = Value> + 'a>;

impl SeqView {
    pub fn empty() -> Self {
        SeqView::Items(Vector::new())
    }

    pub fn from_values<I: IntoIterator<Item = Value>>(values: I) -> Self {
        SeqView::Items(values.into_iter().collect())
    }

    pub fn from_base(seq: Rc<dyn Sequence>) -> Self {
        SeqView::Base(seq)
    }

    pub fn concat_of(first: SeqView, second: SeqView) -> Self {
        SeqView::Concat(Rc::new(Concat::new(first, second)))
    }

    /// A window over `base`; out-of-range bounds are clamped.
    pub fn window_of(base: SeqView, start: i64, stop: i64) -> Self {
        Window::over(base, start, stop)
    }

    pub fn len(&self) -> usize {
        match self {
            SeqView::Items(items) => items.len(),
            SeqView::Base(seq) => seq.len(),
            SeqView::Concat(node) => node.len(),
            SeqView::Window(node) => node.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Caller guarantees `index < len()`.
    pub(crate) fn item(&self, index: usize) -> Value {
        match self {
            SeqView::Items(items) => items[index].clone(),
            SeqView::Base(seq) => seq.item(index),
            SeqView::Concat(node) => node.item(index),
            SeqView::Window(node) => node.item(index),
        }
    }

    pub fn get(&self, index: i64) -> Result<Value, ShellError> {
        let len = self.len();
        let pos = positive_index(index, len);
        if pos < 0 || pos >= len as i64 {
            return Err(ShellError::index(index, len));
        }
        Ok(self.item(pos as usize))
    }

    pub fn get_slice(&self, spec: &SliceSpec) -> Result<SeqView, ShellError> {
        match self {
            SeqView::Items(items) => Ok(SeqView::Items(slice_items(items, spec)?)),
            SeqView::Base(seq) => match indices(spec, seq.len())? {
                Bounds::Forward {
                    start,
                    stop,
                    step: 1,
                } => Ok(Window::over(self.clone(), start as i64, stop as i64)),
                bounds => {
                    debug!(len = seq.len(), "realizing opaque sequence for stepped slice");
                    Ok(SeqView::Items(
                        bounds.positions().map(|pos| seq.item(pos)).collect(),
                    ))
                }
            },
            SeqView::Concat(node) => node.get_slice(spec),
            SeqView::Window(node) => node.get_slice(spec),
        }
    }

    pub fn iter(&self) -> SeqIter<'_> {
        match self {
            SeqView::Items(items) => Box::new(items.iter().cloned()),
            SeqView::Base(seq) => Box::new((0..seq.len()).map(move |idx| seq.item(idx))),
            SeqView::Concat(node) => node.iter(),
            SeqView::Window(node) => node.iter(),
        }
    }

    pub fn contains(&self, needle: &Value) -> bool {
        match self {
            SeqView::Items(items) => items.iter().any(|item| item == needle),
            SeqView::Base(seq) => seq.contains(needle),
            SeqView::Concat(node) => node.first().contains(needle) || node.second().contains(needle),
            SeqView::Window(node) => node.iter().any(|item| item == *needle),
        }
    }

    pub fn index_of(&self, needle: &Value) -> Result<usize, ShellError> {
        self.iter()
            .position(|item| item == *needle)
            .ok_or_else(|| ShellError::element_not_found(needle))
    }

    pub fn count(&self, needle: &Value) -> usize {
        self.iter().filter(|item| item == needle).count()
    }

    pub fn realize(&self) -> Vector<Value> {
        match self {
            SeqView::Items(items) => items.clone(),
            _ => self.iter().collect(),
        }
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.iter().collect()
    }

    pub fn concat_view(&self, other: &SeqView) -> SeqView {
        SeqView::concat_of(self.clone(), other.clone())
    }

    /// `self + other`
    pub fn concat(&self, other: &Value) -> Result<SeqView, ShellError> {
        let other = sequence_operand("+", "tuple", other)?;
        Ok(self.concat_view(&other))
    }

    /// `other + self`
    pub fn prepend(&self, other: &Value) -> Result<SeqView, ShellError> {
        let other = sequence_operand("+", "tuple", other)?;
        Ok(other.concat_view(self))
    }

    /// `self * times`
    pub fn repeat(&self, times: &Value) -> Result<SeqView, ShellError> {
        self.repeat_n(repeat_count("tuple", times)?)
    }

    /// Repetition by self-concatenation; nothing is realized.
    ///
    /// The view is built by doubling, so its depth grows with the number of
    /// bits in `times` rather than with `times`.
    pub fn repeat_n(&self, times: i64) -> Result<SeqView, ShellError> {
        if times <= 0 {
            return self.get_slice(&SliceSpec::range(0, 0));
        }
        let total = usize::try_from(times)
            .ok()
            .and_then(|count| self.len().checked_mul(count))
            .filter(|total| i64::try_from(*total).is_ok());
        if total.is_none() {
            return Err(ShellError::repeat_overflow(self.len(), times));
        }
        let mut repeated: Option<SeqView> = None;
        let mut power = self.clone();
        let mut remaining = times;
        loop {
            if remaining & 1 == 1 {
                repeated = Some(match repeated {
                    Some(acc) => acc.concat_view(&power),
                    None => power.clone(),
                });
            }
            remaining >>= 1;
            if remaining == 0 {
                break;
            }
            power = power.concat_view(&power);
        }
        Ok(repeated.unwrap_or_else(SeqView::empty))
    }

    pub(crate) fn same_node(&self, other: &SeqView) -> bool {
        match (self, other) {
            (SeqView::Items(a), SeqView::Items(b)) => a.ptr_eq(b),
            (SeqView::Base(a), SeqView::Base(b)) => Rc::ptr_eq(a, b),
            (SeqView::Concat(a), SeqView::Concat(b)) => Rc::ptr_eq(a, b),
            (SeqView::Window(a), SeqView::Window(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Element-wise equality.
    pub fn seq_eq(&self, other: &SeqView) -> bool {
        if self.same_node(other) {
            return true;
        }
        if self.len() != other.len() {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

pub(crate) fn sequence_operand(
    op: &'static str,
    left: &'static str,
    operand: &Value,
) -> Result<SeqView, ShellError> {
    operand
        .as_seq_view()
        .ok_or_else(|| ShellError::unsupported(op, left, operand.type_name()))
}

pub(crate) fn repeat_count(left: &'static str, times: &Value) -> Result<i64, ShellError> {
    match times {
        Value::Int(n) => Ok(*n),
        Value::Bool(b) => Ok(i64::from(*b)),
        other => Err(ShellError::unsupported("*", left, other.type_name())),
    }
}

impl PartialEq for SeqView {
    fn eq(&self, other: &Self) -> bool {
        self.seq_eq(other)
    }
}

impl Default for SeqView {
    fn default() -> Self {
        SeqView::empty()
    }
}

impl From<Vec<Value>> for SeqView {
    fn from(values: Vec<Value>) -> Self {
        SeqView::from_values(values)
    }
}

impl FromIterator<Value> for SeqView {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        SeqView::from_values(iter)
    }
}

impl fmt::Display for SeqView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_items(f, "[", "]", self.iter())
    }
}

impl fmt::Debug for SeqView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
