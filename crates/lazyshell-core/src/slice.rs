//! Slice arithmetic that never touches elements.
//!
//! [`indices`] turns a [`SliceSpec`] and a container length into concrete
//! [`Bounds`]. Positive steps are normalized by plain clamping. Non-positive
//! steps go through the native adjustment rules; views that cannot follow a
//! backward walk lazily realize themselves and slice the realized items with
//! [`slice_items`].

use im::Vector;

use crate::error::ShellError;
use crate::value::Value;

/// A `start:stop:step` slice with optional parts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SliceSpec {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl SliceSpec {
    pub fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self { start, stop, step }
    }

    /// `[:]`
    pub fn full() -> Self {
        Self::default()
    }

    /// `[start:stop]`
    pub fn range(start: i64, stop: i64) -> Self {
        Self::new(Some(start), Some(stop), None)
    }

    /// `[:stop]`
    pub fn head(stop: i64) -> Self {
        Self::new(None, Some(stop), None)
    }

    /// `[start:]`
    pub fn tail(start: i64) -> Self {
        Self::new(Some(start), None, None)
    }

    /// `[start:stop:step]`
    pub fn stepped(start: Option<i64>, stop: Option<i64>, step: i64) -> Self {
        Self::new(start, stop, Some(step))
    }
}

pub fn positive_index(index: i64, len: usize) -> i64 {
    if index >= 0 {
        index
    } else {
        len as i64 + index
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bounds {
    /// Positive step; `0 <= start <= len` and `0 <= stop <= len`.
    Forward {
        start: usize,
        stop: usize,
        step: usize,
    },
    /// Negative step; `start` and `stop` lie in `-1..len`, `-1` meaning
    /// "before the first element".
    Backward { start: i64, stop: i64, step: i64 },
}

impl Bounds {
    pub fn is_unit(&self) -> bool {
        matches!(self, Bounds::Forward { step: 1, .. })
    }

    /// Number of positions selected.
    pub fn len(&self) -> usize {
        match *self {
            Bounds::Forward { start, stop, step } => {
                if stop > start {
                    (stop - start - 1) / step + 1
                } else {
                    0
                }
            }
            Bounds::Backward { start, stop, step } => {
                if start > stop {
                    ((start - stop - 1) as u64 / step.unsigned_abs() + 1) as usize
                } else {
                    0
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Selected positions in slice order.
    pub fn positions(&self) -> Positions {
        let (next, step) = match *self {
            Bounds::Forward { start, step, .. } => (start as i64, step as i64),
            Bounds::Backward { start, step, .. } => (start, step),
        };
        Positions {
            next,
            step,
            remaining: self.len(),
        }
    }
}

pub struct Positions {
    next: i64,
    step: i64,
    remaining: usize,
}

impl Iterator for Positions {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let pos = self.next;
        self.remaining -= 1;
        // Never step past the last selected position.
        if self.remaining > 0 {
            self.next += self.step;
        }
        Some(pos as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Positions {}

pub fn indices(spec: &SliceSpec, len: usize) -> Result<Bounds, ShellError> {
    let step = spec.step.unwrap_or(1);
    if step == 0 {
        return Err(ShellError::invalid_slice("slice step cannot be zero"));
    }
    if step > 0 {
        let clamp = |index: i64| positive_index(index, len).clamp(0, len as i64) as usize;
        return Ok(Bounds::Forward {
            start: spec.start.map_or(0, clamp),
            stop: spec.stop.map_or(len, clamp),
            step: step as usize,
        });
    }
    let upper = len as i64 - 1;
    let adjust = |index: i64| {
        let index = positive_index(index, len);
        index.clamp(-1, upper)
    };
    Ok(Bounds::Backward {
        start: spec.start.map_or(upper, adjust),
        stop: spec.stop.map_or(-1, adjust),
        step,
    })
}

/// Slice already-realized items with native semantics.
pub fn slice_items(items: &Vector<Value>, spec: &SliceSpec) -> Result<Vector<Value>, ShellError> {
    let bounds = indices(spec, items.len())?;
    if let Bounds::Forward {
        start,
        stop,
        step: 1,
    } = bounds
    {
        return Ok(items.skip(start).take(stop.saturating_sub(start)));
    }
    Ok(bounds.positions().map(|pos| items[pos].clone()).collect())
}

/// Native slice assignment over realized items.
pub fn assign_items(
    items: &mut Vector<Value>,
    bounds: Bounds,
    values: Vec<Value>,
) -> Result<(), ShellError> {
    if let Bounds::Forward {
        start,
        stop,
        step: 1,
    } = bounds
    {
        let tail = items.split_off(stop.max(start));
        items.truncate(start);
        items.extend(values);
        items.append(tail);
        return Ok(());
    }
    let count = bounds.len();
    if values.len() != count {
        return Err(ShellError::invalid_slice(format!(
            "attempt to assign sequence of size {} to extended slice of size {}",
            values.len(),
            count
        )));
    }
    for (pos, value) in bounds.positions().zip(values) {
        items.set(pos, value);
    }
    Ok(())
}

/// Native slice deletion over realized items.
pub fn delete_items(items: &Vector<Value>, bounds: Bounds) -> Vector<Value> {
    let mut doomed = vec![false; items.len()];
    for pos in bounds.positions() {
        doomed[pos] = true;
    }
    items
        .iter()
        .zip(doomed)
        .filter(|(_, doomed)| !doomed)
        .map(|(item, _)| item.clone())
        .collect()
}
