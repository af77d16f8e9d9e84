//! tinyforth Core: stack primitives for the tinyforth interpreter
//!
//! The interpreter threads all of its data through numeric stacks. This
//! crate holds that primitive so the runtime only depends on its contract:
//! push always succeeds, pop/peek fail with [`EmptyStack`] when nothing is
//! live, and `len` is the exact count of live elements.
//!
//! # Modules
//!
//! - `stack`: [`NumericStack`], a LIFO over a singly linked chain

pub mod stack;

pub use stack::{EmptyStack, Iter, NumericStack};
