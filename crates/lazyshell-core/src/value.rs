use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::assoc::AssocMap;
use crate::error::ShellError;
use crate::seq::SeqView;
use crate::set::SetView;
use crate::shell_list::ShellList;
use crate::shell_set::ShellSet;

/// A value crossing the boundary between the evaluator and the views.
///
/// There is deliberately no `Hash` impl: every comparison in this crate is
/// by equality.
#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Tuple(SeqView),
    List(ShellList),
    FrozenSet(SetView),
    Set(ShellSet),
    Map(AssocMap),
}

#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    fn same(self, other: Number) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }

    fn order(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (a, b) => a
                .as_f64()
                .partial_cmp(&b.as_f64())
                .unwrap_or(Ordering::Equal),
        }
    }
}

impl Value {
    pub fn str(text: &str) -> Self {
        Value::Str(Rc::from(text))
    }

    pub fn tuple<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::Tuple(SeqView::from_values(items))
    }

    pub fn list<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::List(ShellList::from_values(items))
    }

    pub fn frozenset<I: IntoIterator<Item = Value>>(items: I) -> Result<Self, ShellError> {
        Ok(Value::FrozenSet(SetView::from_values(items)?))
    }

    pub fn set<I: IntoIterator<Item = Value>>(items: I) -> Result<Self, ShellError> {
        Ok(Value::Set(ShellSet::from_values(items)?))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Tuple(_) => "tuple",
            Value::List(_) => "list",
            Value::FrozenSet(_) => "frozenset",
            Value::Set(_) => "set",
            Value::Map(_) => "dict",
        }
    }

    /// Decided by kind alone; contents are never inspected.
    pub fn is_hashable(&self) -> bool {
        !matches!(self, Value::List(_) | Value::Set(_) | Value::Map(_))
    }

    pub fn require_hashable(&self) -> Result<(), ShellError> {
        if self.is_hashable() {
            Ok(())
        } else {
            Err(ShellError::unhashable(self.type_name()))
        }
    }

    /// The current sequence view behind a tuple or list.
    pub fn as_seq_view(&self) -> Option<SeqView> {
        match self {
            Value::Tuple(view) => Some(view.clone()),
            Value::List(cell) => Some(cell.view()),
            _ => None,
        }
    }

    /// A set view for a frozenset, or a live reference to a mutable set.
    pub fn as_set_view(&self) -> Option<SetView> {
        match self {
            Value::FrozenSet(view) => Some(view.clone()),
            Value::Set(cell) => Some(SetView::live(cell)),
            _ => None,
        }
    }

    fn number(&self) -> Option<Number> {
        match self {
            Value::Bool(b) => Some(Number::Int(i64::from(*b))),
            Value::Int(n) => Some(Number::Int(*n)),
            Value::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }

    /// Total order used by `sort`. Values of unrelated kinds do not compare.
    pub fn compare(&self, other: &Value) -> Result<Ordering, ShellError> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
            (Value::Tuple(a), Value::Tuple(b)) => compare_items(a, b),
            (Value::List(a), Value::List(b)) => compare_items(&a.view(), &b.view()),
            _ => match (self.number(), other.number()) {
                (Some(a), Some(b)) => Ok(a.order(b)),
                _ => Err(ShellError::unsupported(
                    "<",
                    self.type_name(),
                    other.type_name(),
                )),
            },
        }
    }
}

fn compare_items(left: &SeqView, right: &SeqView) -> Result<Ordering, ShellError> {
    for (a, b) in left.iter().zip(right.iter()) {
        if a == b {
            continue;
        }
        return a.compare(&b);
    }
    Ok(left.len().cmp(&right.len()))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a.seq_eq(b),
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a.equals(b),
            (
                Value::FrozenSet(_) | Value::Set(_),
                Value::FrozenSet(_) | Value::Set(_),
            ) => match (self.as_set_view(), other.as_set_view()) {
                (Some(a), Some(b)) => a.set_eq(&b),
                _ => false,
            },
            _ => match (self.number(), other.number()) {
                (Some(a), Some(b)) => a.same(b),
                _ => false,
            },
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::str(text)
    }
}

thread_local! {
    static RENDERING: RefCell<Vec<usize>> = RefCell::new(Vec::new());
}

/// Renders a shared container, printing `placeholder` instead when the
/// container is reached again while it is still being rendered.
pub(crate) fn render_guarded<F>(
    f: &mut fmt::Formatter<'_>,
    id: usize,
    placeholder: &str,
    render: F,
) -> fmt::Result
where
    F: FnOnce(&mut fmt::Formatter<'_>) -> fmt::Result,
{
    let entered = RENDERING.with(|stack| {
        let mut stack = stack.borrow_mut();
        if stack.contains(&id) {
            false
        } else {
            stack.push(id);
            true
        }
    });
    if !entered {
        return f.write_str(placeholder);
    }
    let result = render(f);
    RENDERING.with(|stack| {
        stack.borrow_mut().pop();
    });
    result
}

pub(crate) fn fmt_items<I>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    close: &str,
    items: I,
) -> fmt::Result
where
    I: IntoIterator<Item = Value>,
{
    f.write_str(open)?;
    for (idx, item) in items.into_iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(close)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "'{}'", s.replace('\'', "\\'")),
            Value::Tuple(view) => {
                if view.len() == 1 {
                    fmt_items(f, "(", ",)", view.iter())
                } else {
                    fmt_items(f, "(", ")", view.iter())
                }
            }
            Value::List(cell) => write!(f, "{}", cell),
            Value::FrozenSet(view) => {
                if view.is_empty() {
                    f.write_str("frozenset()")
                } else {
                    write!(f, "frozenset({})", view)
                }
            }
            Value::Set(cell) => write!(f, "{}", cell),
            Value::Map(map) => write!(f, "{}", map),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
