//! Representation introspection for debugging, traces and tests.
//!
//! Container results never depend on it; views behave the same whatever
//! their representation.

use std::fmt::Write;

use crate::seq::SeqView;
use crate::set::SetView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Materialized,
    Base,
    Concatenation,
    Window,
    Combination,
    LiveCell,
}

pub fn seq_kind(view: &SeqView) -> ViewKind {
    match view {
        SeqView::Items(_) => ViewKind::Materialized,
        SeqView::Base(_) => ViewKind::Base,
        SeqView::Concat(_) => ViewKind::Concatenation,
        SeqView::Window(_) => ViewKind::Window,
    }
}

pub fn set_kind(view: &SetView) -> ViewKind {
    match view {
        SetView::Items(_) => ViewKind::Materialized,
        SetView::Base(_) => ViewKind::Base,
        SetView::Combination(_) => ViewKind::Combination,
        SetView::Shell(_) => ViewKind::LiveCell,
    }
}

/// Renders the view tree, e.g. `concat(items[2], window(base[5], 1..3))`.
pub fn describe_seq(view: &SeqView) -> String {
    let mut out = String::new();
    write_seq(&mut out, view);
    out
}

fn write_seq(out: &mut String, view: &SeqView) {
    match view {
        SeqView::Items(items) => {
            let _ = write!(out, "items[{}]", items.len());
        }
        SeqView::Base(seq) => {
            let _ = write!(out, "base[{}]", seq.len());
        }
        SeqView::Concat(node) => {
            out.push_str("concat(");
            write_seq(out, node.first());
            out.push_str(", ");
            write_seq(out, node.second());
            out.push(')');
        }
        SeqView::Window(node) => {
            out.push_str("window(");
            write_seq(out, node.base());
            let _ = write!(out, ", {}..{})", node.start(), node.stop());
        }
    }
}

/// Renders the set view tree, e.g. `(items[3] | cell)`.
pub fn describe_set(view: &SetView) -> String {
    let mut out = String::new();
    write_set(&mut out, view);
    out
}

fn write_set(out: &mut String, view: &SetView) {
    match view {
        SetView::Items(members) => {
            let _ = write!(out, "items[{}]", members.len());
        }
        SetView::Base(_) => out.push_str("base"),
        SetView::Combination(node) => {
            out.push('(');
            write_set(out, node.first());
            let _ = write!(out, " {} ", node.op().symbol());
            write_set(out, node.second());
            out.push(')');
        }
        SetView::Shell(_) => out.push_str("cell"),
    }
}

/// Number of nodes between the view and its deepest leaf.
pub fn seq_depth(view: &SeqView) -> usize {
    match view {
        SeqView::Items(_) | SeqView::Base(_) => 0,
        SeqView::Concat(node) => 1 + seq_depth(node.first()).max(seq_depth(node.second())),
        SeqView::Window(node) => 1 + seq_depth(node.base()),
    }
}
