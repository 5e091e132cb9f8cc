//! Persistent, structurally-shared container views.
//!
//! Sequence, set and map values that behave like native containers while
//! doing as little work as possible: concatenations and windows slice without
//! copying, mutable cells swap in rebuilt views instead of copying contents,
//! set combinations stay live over their operands, and the association-list
//! map finds keys by equality alone.

pub mod assoc;
pub mod combination;
pub mod concat;
pub mod error;
pub mod introspect;
pub mod options;
pub mod seq;
pub mod set;
pub mod shell_list;
pub mod shell_set;
pub mod slice;
pub mod value;
pub mod window;

pub use assoc::AssocMap;
pub use combination::Combinator;
pub use error::ShellError;
pub use options::ViewOptions;
pub use seq::{SeqView, Sequence};
pub use set::{SetLike, SetView};
pub use shell_list::ShellList;
pub use shell_set::ShellSet;
pub use slice::SliceSpec;
pub use value::Value;
