//! This crate provides a queue of owned strings, implemented as a cyclic
//! doubly-linked list with a sentinel node, together with a set of in-place
//! list algorithms.
//!
//! The [`Queue`] inserts and removes at both ends in constant time. Every
//! algorithm reorders the queue by relinking nodes; payloads are never copied
//! after insertion.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use cyclic_queue::Queue;
//!
//! let mut queue = Queue::new();
//! queue.insert_tail("b").unwrap();
//! queue.insert_tail("c").unwrap();
//! queue.insert_head("a").unwrap();
//! assert_eq!(queue.size(), 3);
//!
//! queue.reverse();
//! assert_eq!(queue.iter().collect::<Vec<_>>(), ["c", "b", "a"]);
//!
//! let element = queue.remove_head(None).unwrap();
//! assert_eq!(element.value(), "c");
//! ```
//!
//! # Memory Layout
//!
//! The nodes of a queue live in one arena of slots, and link to each other by
//! slot index:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) slot 0  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢                        ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║  String   ║           ║  String   ║                        ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │     front                   front.next                            ↑
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Initially, there is only the ghost node, of which `next` and `prev` point
//! to itself. As elements are inserted, `ghost.next` points to the first
//! element and `ghost.prev` to the last one.
//!
//! A node whose `next` and `prev` both point to itself is *detached*. Removed
//! slots go onto a free list and are reused by later inserts. Algorithms that
//! need a separate holding list (sorting, group reversal) take an extra
//! sentinel slot from the same arena, so moving runs of nodes between lists is
//! a constant-time splice.
//!
//! # Algorithms
//!
//! - [`delete_middle`]: remove the element in the middle;
//! - [`delete_duplicates`]: remove every run of equal adjacent values;
//! - [`swap_pairs`]: swap each pair of adjacent elements;
//! - [`reverse`] and [`reverse_k`]: reverse the whole queue or each group of `k`;
//! - [`sort`]: quicksort over nodes, ascending or descending;
//! - [`ascend`] and [`descend`]: keep only elements with no smaller (greater)
//!   element to their right;
//! - [`merge`]: merge sorted queues into the first one.
//!
//! ## Examples
//!
//! ```
//! use cyclic_queue::Queue;
//! use std::iter::FromIterator;
//!
//! let mut queue = Queue::from_iter(["1", "2", "3", "4", "5"]);
//! queue.swap_pairs();
//! assert_eq!(queue, Queue::from_iter(["2", "1", "4", "3", "5"]));
//!
//! queue.sort(true);
//! assert_eq!(queue, Queue::from_iter(["5", "4", "3", "2", "1"]));
//! ```
//!
//! # Features
//!
//! - `length` (off by default): keep a cached element count, so that
//!   [`Queue::size`] is *O*(1) instead of a full walk.
//!
//! # Logging
//!
//! Operations emit [`tracing`] events: `trace` for single inserts and
//! removes, `debug` for bulk operations, `warn` on allocation failure. No
//! subscriber is installed by this crate.
//!
//! [`delete_middle`]: crate::Queue::delete_middle
//! [`delete_duplicates`]: crate::Queue::delete_duplicates
//! [`swap_pairs`]: crate::Queue::swap_pairs
//! [`reverse`]: crate::Queue::reverse
//! [`reverse_k`]: crate::Queue::reverse_k
//! [`sort`]: crate::Queue::sort
//! [`ascend`]: crate::Queue::ascend
//! [`descend`]: crate::Queue::descend
//! [`merge`]: crate::merge

#[doc(inline)]
pub use error::{QueueError, Result};
#[doc(inline)]
pub use queue::iterator::{IntoIter, Iter};
#[doc(inline)]
pub use queue::{merge, Element, Queue};

pub mod error;
pub mod queue;

#[cfg(test)]
mod proptests;
