use std::rc::Rc;

use tracing::debug;

use crate::error::ShellError;
use crate::seq::{SeqIter, SeqView};
use crate::slice::{indices, slice_items, Bounds, SliceSpec};
use crate::value::Value;

/// A contiguous sub-range of a base view. The base is never itself a window.
pub struct Window {
    base: SeqView,
    start: usize,
    stop: usize,
}

impl Window {
    /// Clamps `start`/`stop` into `0 <= start <= stop <= len(base)` and
    /// folds a window-over-window into a single level.
    pub(crate) fn over(base: SeqView, start: i64, stop: i64) -> SeqView {
        let len = base.len() as i64;
        let start = start.clamp(0, len);
        let stop = stop.clamp(start, len);
        let (base, start, stop) = match base {
            SeqView::Window(inner) => (
                inner.base.clone(),
                inner.start + start as usize,
                inner.start + stop as usize,
            ),
            other => (other, start as usize, stop as usize),
        };
        SeqView::Window(Rc::new(Window { base, start, stop }))
    }

    pub fn base(&self) -> &SeqView {
        &self.base
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn stop(&self) -> usize {
        self.stop
    }

    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.stop == self.start
    }

    pub(crate) fn item(&self, index: usize) -> Value {
        self.base.item(self.start + index)
    }

    pub fn iter(&self) -> SeqIter<'_> {
        Box::new((self.start..self.stop).map(move |idx| self.base.item(idx)))
    }

    pub(crate) fn get_slice(&self, spec: &SliceSpec) -> Result<SeqView, ShellError> {
        match indices(spec, self.len())? {
            Bounds::Forward {
                start,
                stop,
                step: 1,
            } => Ok(Window::over(
                self.base.clone(),
                (self.start + start) as i64,
                (self.start + stop.max(start)) as i64,
            )),
            _ => {
                debug!(len = self.len(), "realizing window for stepped slice");
                let items = self.iter().collect();
                Ok(SeqView::Items(slice_items(&items, spec)?))
            }
        }
    }
}
