mod common;

use common::{int_view, ints, native_slice, to_ints, CountingSeq};
use lazyshell_core::introspect::{seq_depth, seq_kind, ViewKind};
use lazyshell_core::{SeqView, ShellError, ShellList, SliceSpec, Value, ViewOptions};
use proptest::prelude::*;

fn list(values: &[i64]) -> ShellList {
    ShellList::with_options(int_view(values), ViewOptions::unlimited())
}

fn contents(cell: &ShellList) -> Vec<i64> {
    to_ints(cell.iter())
}

#[test]
fn slice_assignment_replaces_range() {
    let cell = list(&[0, 1, 2, 3, 4]);
    cell.set_slice(&SliceSpec::range(2, 4), int_view(&[9]))
        .expect("assign");
    assert_eq!(contents(&cell), vec![0, 1, 9, 4]);
    assert_eq!(seq_kind(&cell.view()), ViewKind::Concatenation);
}

#[test]
fn slice_assignment_with_reversed_bounds_inserts() {
    let cell = list(&[0, 1, 2, 3]);
    cell.set_slice(&SliceSpec::range(3, 1), int_view(&[7, 8]))
        .expect("assign");
    assert_eq!(contents(&cell), vec![0, 1, 2, 7, 8, 3]);
}

#[test]
fn extended_slice_assignment_realizes() {
    let cell = list(&[0, 1, 2, 3, 4, 5]);
    cell.set_slice(&SliceSpec::stepped(None, None, 2), int_view(&[7, 8, 9]))
        .expect("assign");
    assert_eq!(contents(&cell), vec![7, 1, 8, 3, 9, 5]);
    assert_eq!(seq_kind(&cell.view()), ViewKind::Materialized);

    let err = cell
        .set_slice(&SliceSpec::stepped(None, None, -2), int_view(&[1]))
        .expect_err("size mismatch");
    assert!(
        err.to_string().contains("extended slice of size 3"),
        "unexpected error: {}",
        err
    );
    assert_eq!(contents(&cell), vec![7, 1, 8, 3, 9, 5]);
}

#[test]
fn earlier_views_survive_mutation() {
    let cell = list(&[1, 2, 3]);
    let before = cell.view();
    cell.set_index(0, Value::Int(10)).expect("set");
    cell.append(Value::Int(4)).expect("append");
    assert_eq!(to_ints(before.iter()), vec![1, 2, 3]);
    assert_eq!(contents(&cell), vec![10, 2, 3, 4]);
}

#[test]
fn index_assignment_and_deletion_are_bounds_checked() {
    let cell = list(&[1, 2, 3]);
    cell.set_index(-1, Value::Int(30)).expect("set last");
    assert_eq!(contents(&cell), vec![1, 2, 30]);

    let err = cell.set_index(3, Value::Int(0)).expect_err("past end");
    assert_eq!(err, ShellError::IndexOutOfRange { index: 3, len: 3 });
    let err = cell.delete_index(-4).expect_err("before start");
    assert!(matches!(err, ShellError::IndexOutOfRange { index: -4, .. }));

    cell.delete_index(1).expect("delete");
    assert_eq!(contents(&cell), vec![1, 30]);
}

#[test]
fn slice_deletion() {
    let cell = list(&[0, 1, 2, 3, 4, 5, 6]);
    cell.delete_slice(&SliceSpec::range(1, 3)).expect("delete");
    assert_eq!(contents(&cell), vec![0, 3, 4, 5, 6]);
    cell.delete_slice(&SliceSpec::stepped(None, None, -2))
        .expect("delete");
    assert_eq!(contents(&cell), vec![3, 5]);
    cell.delete_slice(&SliceSpec::full()).expect("delete");
    assert!(cell.is_empty());
}

#[test]
fn insert_clamps_like_native() {
    let cell = list(&[1, 2, 3]);
    cell.insert(0, Value::Int(0)).expect("front");
    cell.insert(100, Value::Int(9)).expect("past end");
    cell.insert(-1, Value::Int(8)).expect("before last");
    cell.insert(-100, Value::Int(-1)).expect("before start");
    assert_eq!(contents(&cell), vec![-1, 0, 1, 2, 3, 8, 9]);
}

#[test]
fn pop_and_remove() {
    let cell = list(&[1, 2, 3, 2]);
    assert_eq!(cell.pop(None).expect("pop"), Value::Int(2));
    assert_eq!(cell.pop(Some(0)).expect("pop front"), Value::Int(1));
    assert_eq!(contents(&cell), vec![2, 3]);

    let err = cell.pop(Some(5)).expect_err("bad index");
    assert!(matches!(err, ShellError::IndexOutOfRange { .. }));

    cell.remove(&Value::Int(3)).expect("remove");
    let err = cell.remove(&Value::Int(3)).expect_err("already removed");
    assert!(matches!(err, ShellError::ElementNotFound(_)));

    cell.clear();
    let err = cell.pop(None).expect_err("empty");
    assert_eq!(err, ShellError::EmptyCollection("pop"));
    assert_eq!(err.to_string(), "pop from empty collection");
}

#[test]
fn extend_with_lists_and_tuples() {
    let cell = list(&[1]);
    cell.extend_values(&Value::tuple(ints(&[2, 3])))
        .expect("tuple");
    cell.extend_values(&Value::list(ints(&[4]))).expect("list");
    assert_eq!(contents(&cell), vec![1, 2, 3, 4]);

    let err = cell.extend_values(&Value::Int(5)).expect_err("int");
    assert_eq!(
        err,
        ShellError::UnsupportedOperand {
            op: "+=",
            left: "list",
            right: "int"
        }
    );
}

#[test]
fn extend_with_itself_doubles_once() {
    let cell = list(&[1, 2]);
    cell.extend_values(&Value::List(cell.clone()))
        .expect("self extend");
    assert_eq!(contents(&cell), vec![1, 2, 1, 2]);
    cell.append(Value::Int(3)).expect("append");
    assert_eq!(contents(&cell), vec![1, 2, 1, 2, 3]);
}

#[test]
fn sort_and_reverse() {
    let cell = ShellList::from_values(vec![
        Value::Int(3),
        Value::Float(1.5),
        Value::Bool(true),
        Value::Int(-2),
    ]);
    cell.sort().expect("sort");
    assert_eq!(cell.to_string(), "[-2, True, 1.5, 3]");
    cell.reverse().expect("reverse");
    assert_eq!(cell.to_string(), "[3, 1.5, True, -2]");

    let words = ShellList::from_values(vec![Value::str("pear"), Value::str("apple")]);
    words.sort().expect("sort");
    assert_eq!(words.to_string(), "['apple', 'pear']");
}

#[test]
fn sort_rejects_mixed_kinds_and_keeps_contents() {
    let cell = ShellList::from_values(vec![Value::Int(2), Value::str("a"), Value::Int(1)]);
    let err = cell.sort().expect_err("mixed");
    assert!(matches!(err, ShellError::UnsupportedOperand { op: "<", .. }));
    assert_eq!(cell.to_string(), "[2, 'a', 1]");
}

#[test]
fn binary_operators_leave_operands_alone() {
    let left = list(&[1, 2]);
    let right = list(&[3]);
    let joined = left.concat(&Value::List(right.clone())).expect("concat");
    let before = left.prepend(&Value::tuple(ints(&[0]))).expect("prepend");
    let tripled = left.repeat(&Value::Int(3)).expect("repeat");

    right.append(Value::Int(4)).expect("append");
    left.clear();

    assert_eq!(contents(&joined), vec![1, 2, 3]);
    assert_eq!(contents(&before), vec![0, 1, 2]);
    assert_eq!(contents(&tripled), vec![1, 2, 1, 2, 1, 2]);
    assert!(!joined.ptr_eq(&left));
}

#[test]
fn repeat_by_non_positive_counts_is_empty() {
    let cell = list(&[1, 2]);
    assert!(cell.repeat(&Value::Int(0)).expect("zero").is_empty());
    assert!(cell.repeat(&Value::Int(-3)).expect("negative").is_empty());
    assert_eq!(contents(&cell.repeat(&Value::Bool(true)).expect("bool")), vec![1, 2]);

    cell.repeat_in_place(&Value::Int(2)).expect("in place");
    assert_eq!(contents(&cell), vec![1, 2, 1, 2]);
    let err = cell.repeat_in_place(&Value::str("x")).expect_err("str");
    assert!(matches!(err, ShellError::UnsupportedOperand { op: "*", .. }));
}

#[test]
fn large_repeat_counts_stay_shallow() {
    let cell = list(&[1]);
    let repeated = cell.repeat(&Value::Int(200_000)).expect("repeat");
    assert_eq!(repeated.len(), 200_000);
    assert_eq!(repeated.get(-1).expect("last"), Value::Int(1));
    assert!(seq_depth(&repeated.view()) <= 18);

    cell.repeat_in_place(&Value::Int(200_000)).expect("in place");
    assert_eq!(cell.get(199_999).expect("last"), Value::Int(1));
}

#[test]
fn slicing_a_cell_yields_an_independent_cell() {
    let cell = list(&[0, 1, 2, 3, 4]);
    let part = cell.slice(&SliceSpec::range(1, 4)).expect("slice");
    let copy = cell.copy().expect("copy");
    cell.set_index(2, Value::Int(20)).expect("set");
    part.append(Value::Int(9)).expect("append");

    assert_eq!(contents(&part), vec![1, 2, 3, 9]);
    assert_eq!(contents(&copy), vec![0, 1, 2, 3, 4]);
    assert_eq!(contents(&cell), vec![0, 1, 20, 3, 4]);
    assert_eq!(part.options(), cell.options());
}

#[test]
fn queries() {
    let cell = list(&[4, 5, 4, 6]);
    assert!(cell.contains(&Value::Int(5)));
    assert!(cell.contains(&Value::Float(6.0)));
    assert_eq!(cell.index_of(&Value::Int(4)).expect("index"), 0);
    assert_eq!(cell.count(&Value::Int(4)), 2);
    assert_eq!(cell.get(-1).expect("last"), Value::Int(6));
    assert_eq!(cell, list(&[4, 5, 4, 6]));
    assert_eq!(Value::List(cell), Value::list(ints(&[4, 5, 4, 6])));
}

#[test]
fn realize_limit_guards_fallbacks_only() {
    let cell = ShellList::with_options(int_view(&[0, 1, 2, 3, 4]), ViewOptions::with_realize_limit(3));
    cell.set_slice(&SliceSpec::range(1, 2), int_view(&[7]))
        .expect("contiguous assignment stays lazy");

    let err = cell.sort().expect_err("over limit");
    assert_eq!(err, ShellError::RealizeLimit { limit: 3, len: 5 });
    let err = cell
        .delete_slice(&SliceSpec::stepped(None, None, 2))
        .expect_err("over limit");
    assert!(matches!(err, ShellError::RealizeLimit { .. }));

    let small = cell.slice(&SliceSpec::head(3)).expect("slice");
    assert_eq!(small.options(), ViewOptions::with_realize_limit(3));
    small.reverse().expect("within limit");
    assert_eq!(contents(&small), vec![2, 7, 0]);
}

#[test]
fn mutations_over_opaque_base_read_nothing() {
    let seq = CountingSeq::new(&[0, 1, 2, 3, 4, 5, 6, 7]);
    let cell = ShellList::with_options(SeqView::from_base(seq.clone()), ViewOptions::unlimited());
    cell.set_slice(&SliceSpec::range(2, 5), int_view(&[9]))
        .expect("assign");
    cell.insert(1, Value::Int(10)).expect("insert");
    cell.delete_index(-1).expect("delete");
    cell.append(Value::Int(11)).expect("append");
    assert_eq!(cell.len(), 7);
    assert_eq!(seq.reads(), 0);

    assert_eq!(contents(&cell), vec![0, 10, 1, 9, 5, 6, 11]);
}

#[test]
fn display() {
    let cell = ShellList::from_values(vec![
        Value::None,
        Value::str("it's"),
        Value::tuple(ints(&[1])),
        Value::list(Vec::new()),
    ]);
    assert_eq!(cell.to_string(), "[None, 'it\\'s', (1,), []]");
}

#[test]
fn list_can_hold_itself() {
    let cell = list(&[1]);
    cell.append(Value::List(cell.clone())).expect("append");
    assert_eq!(cell.len(), 2);
    assert_eq!(cell.to_string(), "[1, [...]]");
    assert_eq!(
        Value::tuple(vec![Value::List(cell.clone())]).to_string(),
        "([1, [...]],)"
    );
    cell.clear();
    assert_eq!(cell.to_string(), "[]");
}

fn reference_assign(items: &mut Vec<i64>, start: Option<i64>, stop: Option<i64>, values: &[i64]) {
    let len = items.len() as i64;
    let clamp = |bound: i64| {
        let bound = if bound < 0 { bound + len } else { bound };
        bound.clamp(0, len) as usize
    };
    let start = start.map_or(0, clamp);
    let stop = stop.map_or(items.len(), clamp).max(start);
    items.splice(start..stop, values.iter().copied());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn contiguous_assignment_matches_vec(
        initial in prop::collection::vec(0i64..50, 0..10),
        edits in prop::collection::vec(
            (
                prop::option::of(-12i64..12),
                prop::option::of(-12i64..12),
                prop::collection::vec(50i64..100, 0..4),
            ),
            1..6,
        ),
    ) {
        let mut expected = initial.clone();
        let cell = list(&initial);
        for (start, stop, values) in &edits {
            reference_assign(&mut expected, *start, *stop, values);
            cell.set_slice(&SliceSpec::new(*start, *stop, None), int_view(values)).expect("assign");
            prop_assert_eq!(cell.len(), expected.len());
        }
        prop_assert_eq!(contents(&cell), expected);
    }

    #[test]
    fn extended_assignment_matches_vec(
        initial in prop::collection::vec(0i64..50, 0..12),
        start in prop::option::of(-14i64..14),
        stop in prop::option::of(-14i64..14),
        step in prop_oneof![-3i64..=-1, 2i64..=3],
    ) {
        let positions = native_slice(&(0..initial.len() as i64).collect::<Vec<_>>(), start, stop, Some(step));
        let mut expected = initial.clone();
        for pos in &positions {
            expected[*pos as usize] += 100;
        }
        let replacement: Vec<i64> = positions.iter().map(|pos| initial[*pos as usize] + 100).collect();

        let cell = list(&initial);
        cell.set_slice(&SliceSpec::new(start, stop, Some(step)), int_view(&replacement)).expect("assign");
        prop_assert_eq!(contents(&cell), expected);
    }

    #[test]
    fn slice_deletion_matches_vec(
        initial in prop::collection::vec(0i64..50, 0..12),
        start in prop::option::of(-14i64..14),
        stop in prop::option::of(-14i64..14),
        step in prop_oneof![-3i64..=-1, 1i64..=3],
    ) {
        let doomed = native_slice(&(0..initial.len() as i64).collect::<Vec<_>>(), start, stop, Some(step));
        let expected: Vec<i64> = initial
            .iter()
            .enumerate()
            .filter(|(pos, _)| !doomed.contains(&(*pos as i64)))
            .map(|(_, item)| *item)
            .collect();

        let cell = list(&initial);
        cell.delete_slice(&SliceSpec::new(start, stop, Some(step))).expect("delete");
        prop_assert_eq!(contents(&cell), expected);
    }
}
