//! Logical end-to-end join of two sequence views.
//!
//! Slicing splits the request at the join: each side is sliced on its own and
//! the partial results are joined again, with the second side's offset bumped
//! so both halves stay on the same step grid.

use crate::error::ShellError;
use crate::seq::{SeqIter, SeqView};
use crate::slice::{indices, Bounds, SliceSpec};
use crate::value::Value;

pub struct Concat {
    first: SeqView,
    second: SeqView,
    len: usize,
}

/// Offset of the first grid position at or beyond `distance`, for a grid of
/// spacing `step` starting at zero.
fn phase(distance: usize, step: usize) -> usize {
    let bump = distance % step;
    if bump == 0 {
        0
    } else {
        step - bump
    }
}

impl Concat {
    pub fn new(first: SeqView, second: SeqView) -> Self {
        let len = first.len() + second.len();
        Self { first, second, len }
    }

    pub fn first(&self) -> &SeqView {
        &self.first
    }

    pub fn second(&self) -> &SeqView {
        &self.second
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn item(&self, index: usize) -> Value {
        let first_len = self.first.len();
        if index < first_len {
            self.first.item(index)
        } else {
            self.second.item(index - first_len)
        }
    }

    pub fn iter(&self) -> SeqIter<'_> {
        Box::new(self.first.iter().chain(self.second.iter()))
    }

    pub(crate) fn get_slice(&self, spec: &SliceSpec) -> Result<SeqView, ShellError> {
        let first_len = self.first.len();
        match indices(spec, self.len)? {
            Bounds::Forward { start, stop, step } => {
                self.slice_forward(first_len, start, stop, step)
            }
            Bounds::Backward { start, stop, step } => {
                self.slice_backward(first_len as i64, start, stop, step)
            }
        }
    }

    fn slice_forward(
        &self,
        first_len: usize,
        start: usize,
        stop: usize,
        step: usize,
    ) -> Result<SeqView, ShellError> {
        let step_i = step as i64;
        if start >= first_len {
            let spec = SliceSpec::stepped(
                Some((start - first_len) as i64),
                Some(stop.saturating_sub(first_len) as i64),
                step_i,
            );
            return self.second.get_slice(&spec);
        }
        if stop <= first_len {
            let spec = SliceSpec::stepped(Some(start as i64), Some(stop as i64), step_i);
            return self.first.get_slice(&spec);
        }
        let bump = phase(first_len - start, step);
        let head = self.first.get_slice(&SliceSpec::stepped(
            Some(start as i64),
            Some(stop as i64),
            step_i,
        ))?;
        let tail = self.second.get_slice(&SliceSpec::stepped(
            Some(bump as i64),
            Some((stop - first_len) as i64),
            step_i,
        ))?;
        Ok(SeqView::concat_of(head, tail))
    }

    fn slice_backward(
        &self,
        first_len: i64,
        start: i64,
        stop: i64,
        step: i64,
    ) -> Result<SeqView, ShellError> {
        if start <= stop {
            return Ok(SeqView::empty());
        }
        // -1 as an explicit stop would wrap around, so open-ended stops use None.
        let open = |bound: i64| (bound >= 0).then_some(bound);
        if stop >= first_len - 1 {
            let spec = SliceSpec::stepped(Some(start - first_len), open(stop - first_len), step);
            return self.second.get_slice(&spec);
        }
        if start < first_len {
            return self
                .first
                .get_slice(&SliceSpec::stepped(Some(start), open(stop), step));
        }
        let head = self
            .second
            .get_slice(&SliceSpec::stepped(Some(start - first_len), None, step))?;
        let stride = step.unsigned_abs() as usize;
        let bump = phase((start - first_len + 1) as usize, stride) as i64;
        let resume = first_len - 1 - bump;
        if resume <= stop {
            return Ok(head);
        }
        let tail = self
            .first
            .get_slice(&SliceSpec::stepped(Some(resume), open(stop), step))?;
        Ok(SeqView::concat_of(head, tail))
    }
}
