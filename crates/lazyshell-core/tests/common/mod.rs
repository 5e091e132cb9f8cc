#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lazyshell_core::set::SetIter;
use lazyshell_core::{SeqView, Sequence, SetLike, Value};

pub fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Int).collect()
}

pub fn int_view(values: &[i64]) -> SeqView {
    SeqView::from_values(ints(values))
}

pub fn to_ints<I: IntoIterator<Item = Value>>(values: I) -> Vec<i64> {
    values
        .into_iter()
        .map(|value| match value {
            Value::Int(n) => n,
            other => panic!("expected int, got {}", other.type_name()),
        })
        .collect()
}

/// Reference slicing written directly from the native rules.
pub fn native_slice(
    items: &[i64],
    start: Option<i64>,
    stop: Option<i64>,
    step: Option<i64>,
) -> Vec<i64> {
    let len = items.len() as i64;
    let step = step.unwrap_or(1);
    assert_ne!(step, 0);
    let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };
    let adjust = |bound: Option<i64>, default: i64| match bound {
        None => default,
        Some(b) if b < 0 => (b + len).max(lower),
        Some(b) => b.min(upper),
    };
    let (start, stop) = if step > 0 {
        (adjust(start, lower), adjust(stop, upper))
    } else {
        (adjust(start, upper), adjust(stop, lower))
    };
    let mut out = Vec::new();
    let mut pos = start;
    while (step > 0 && pos < stop) || (step < 0 && pos > stop) {
        out.push(items[pos as usize]);
        pos += step;
    }
    out
}

/// Opaque sequence that counts element reads.
pub struct CountingSeq {
    items: Vec<Value>,
    reads: Cell<usize>,
}

impl CountingSeq {
    pub fn new(values: &[i64]) -> Rc<Self> {
        Rc::new(Self {
            items: ints(values),
            reads: Cell::new(0),
        })
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl Sequence for CountingSeq {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn item(&self, index: usize) -> Value {
        self.reads.set(self.reads.get() + 1);
        self.items[index].clone()
    }
}

/// Opaque set whose members can change behind the views built over it.
#[derive(Default)]
pub struct LiveSet {
    members: RefCell<Vec<Value>>,
}

impl LiveSet {
    pub fn new(values: &[i64]) -> Rc<Self> {
        Rc::new(Self {
            members: RefCell::new(ints(values)),
        })
    }

    pub fn insert(&self, value: Value) {
        let mut members = self.members.borrow_mut();
        if !members.contains(&value) {
            members.push(value);
        }
    }
}

impl SetLike for LiveSet {
    fn contains(&self, needle: &Value) -> bool {
        self.members.borrow().contains(needle)
    }

    fn values(&self) -> SetIter {
        Box::new(self.members.borrow().clone().into_iter())
    }
}
