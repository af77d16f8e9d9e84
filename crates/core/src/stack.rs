//! Numeric Stack
//!
//! A LIFO container over a singly linked chain of boxed nodes.
//!
//! ```text
//! top ──► [ v3 ] ──► [ v2 ] ──► [ v1 ] ──► None
//! ```
//!
//! - Push: allocate a node whose `previous` is the old top
//! - Pop: unlink the top node and return its value
//! - Depth is tracked alongside the chain so `len()` is O(1)
//!
//! The interpreter owns one stack per numeric type. Only the integer stack
//! is wired to native words; the float stack is reserved.

use std::fmt;

/// Error returned by `pop`/`peek` on a stack with no live elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyStack;

impl fmt::Display for EmptyStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stack is empty")
    }
}

impl std::error::Error for EmptyStack {}

struct Node<T> {
    value: T,
    previous: Link<T>,
}

type Link<T> = Option<Box<Node<T>>>;

/// LIFO stack of a single numeric type
pub struct NumericStack<T> {
    top: Link<T>,
    length: usize,
}

impl<T> NumericStack<T> {
    /// Create a new, empty stack
    pub fn new() -> Self {
        NumericStack {
            top: None,
            length: 0,
        }
    }

    /// Number of live elements
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Push a value onto the top of the stack
    pub fn push(&mut self, value: T) {
        let node = Box::new(Node {
            value,
            previous: self.top.take(),
        });
        self.top = Some(node);
        self.length += 1;
    }

    /// Remove and return the top value
    pub fn pop(&mut self) -> Result<T, EmptyStack> {
        let node = self.top.take().ok_or(EmptyStack)?;
        let Node { value, previous } = *node;
        self.top = previous;
        self.length -= 1;
        Ok(value)
    }

    /// Iterate from the top of the stack to the bottom
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.top.as_deref(),
        }
    }

    /// Drop every element
    pub fn clear(&mut self) {
        // Unlink iteratively; the default recursive drop of a long chain
        // would overflow the call stack.
        let mut link = self.top.take();
        while let Some(mut node) = link {
            link = node.previous.take();
        }
        self.length = 0;
    }
}

impl<T: Copy> NumericStack<T> {
    /// Return the top value without removing it
    pub fn peek(&self) -> Result<T, EmptyStack> {
        self.top.as_ref().map(|node| node.value).ok_or(EmptyStack)
    }
}

impl<T> Default for NumericStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for NumericStack<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for NumericStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Borrowing iterator over a stack, top first
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.previous.as_deref();
            &node.value
        })
    }
}

impl<'a, T> IntoIterator for &'a NumericStack<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
