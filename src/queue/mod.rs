use std::fmt::{self, Debug, Display, Formatter};

use tracing::{debug, trace, warn};

use crate::error::{QueueError, Result};
use crate::queue::iterator::Iter;

pub mod iterator;

mod algorithms;

pub use self::algorithms::merge::merge;

/// Index of the queue's own sentinel inside the arena.
pub(crate) const GHOST: usize = 0;

/// The `Queue` is an ordered sequence of owned strings, stored as a cyclic
/// doubly-linked list with a sentinel ("ghost") node.
///
/// The nodes live in an arena of slots and link to each other by slot index,
/// so every splice, move and rotation is a handful of index writes. Slot 0 is
/// always the ghost node. Released slots are threaded onto a free list and
/// reused before the arena grows.
///
/// The `Queue` contains:
/// - the arena `nodes`, holding the ghost node, the element nodes, any
///   temporary holding sentinels in use, and free slots;
/// - the head of the free slot list;
/// - a length field `len`, only with the `length` feature:
/// ```text
/// [dependencies]
/// cyclic_queue = { features = ["length"] }
/// ```
///
/// # Naming Conventions
///
/// - `front`/`back`: the first and the last element node;
/// - `anchor`: an existing node that another node or segment is linked next to;
/// - `segment`: a sentinel heading a separate cycle of nodes in the same arena.
pub struct Queue {
    nodes: Vec<Node>,
    free: Option<usize>,
    #[cfg(feature = "length")]
    /// the number of elements in the queue
    len: usize,
}

pub(crate) struct Node {
    pub(crate) next: usize,
    pub(crate) prev: usize,
    pub(crate) element: Option<String>,
}

/// An element removed from a [`Queue`].
///
/// It owns the removed string; dropping it releases the payload.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Element {
    value: String,
}

impl Node {
    /// Create a detached node (linked to itself) at slot `at`.
    fn detached(at: usize, element: Option<String>) -> Self {
        Self {
            next: at,
            prev: at,
            element,
        }
    }
}

// private methods
impl Queue {
    fn from_nodes(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            free: None,
            #[cfg(feature = "length")]
            len: 0,
        }
    }

    pub(crate) fn front_node(&self) -> usize {
        self.nodes[GHOST].next
    }

    pub(crate) fn back_node(&self) -> usize {
        self.nodes[GHOST].prev
    }

    pub(crate) fn next_of(&self, node: usize) -> usize {
        self.nodes[node].next
    }

    pub(crate) fn prev_of(&self, node: usize) -> usize {
        self.nodes[node].prev
    }

    pub(crate) fn is_detached(&self, node: usize) -> bool {
        self.next_of(node) == node && self.prev_of(node) == node
    }

    /// The payload of an element node.
    pub(crate) fn value(&self, node: usize) -> &str {
        debug_assert!(
            self.nodes[node].element.is_some(),
            "sentinel nodes carry no payload"
        );
        self.nodes[node].element.as_deref().unwrap_or_default()
    }

    fn connect(&mut self, prev: usize, next: usize) {
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    /// Unlink `node` from whatever cycle it is in and leave it detached.
    ///
    /// Unlinking an already detached node changes nothing.
    pub(crate) fn unlink(&mut self, node: usize) {
        self.connect(self.prev_of(node), self.next_of(node));
        self.nodes[node].next = node;
        self.nodes[node].prev = node;
    }

    /// Link the detached `node` right after `anchor`.
    pub(crate) fn link_after(&mut self, node: usize, anchor: usize) {
        debug_assert!(self.is_detached(node), "only detached nodes can be linked");
        let next = self.next_of(anchor);
        self.connect(anchor, node);
        self.connect(node, next);
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(anchor, node);
            self.assert_adjacent(node, next);
        }
    }

    /// Link the detached `node` right before `anchor`.
    pub(crate) fn link_before(&mut self, node: usize, anchor: usize) {
        self.link_after(node, self.prev_of(anchor));
    }

    /// Move `node` from its current position to right after `anchor`.
    pub(crate) fn move_after(&mut self, node: usize, anchor: usize) {
        if node == anchor {
            return;
        }
        self.unlink(node);
        self.link_after(node, anchor);
    }

    /// Move `node` from its current position to right before `anchor`.
    pub(crate) fn move_before(&mut self, node: usize, anchor: usize) {
        if node == anchor {
            return;
        }
        self.unlink(node);
        self.link_before(node, anchor);
    }

    /// Relink every node of the cycle headed by `segment` right after `anchor`,
    /// keeping their order, and leave `segment` empty.
    ///
    /// `anchor` must not belong to the cycle of `segment`.
    pub(crate) fn splice_after(&mut self, segment: usize, anchor: usize) {
        let (first, last) = (self.next_of(segment), self.prev_of(segment));
        if first == segment {
            return;
        }
        let next = self.next_of(anchor);
        self.connect(anchor, first);
        self.connect(last, next);
        self.nodes[segment].next = segment;
        self.nodes[segment].prev = segment;
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(anchor, first);
            self.assert_adjacent(last, next);
        }
    }

    /// Like [`Queue::splice_after`], but relinks the nodes right before `anchor`.
    pub(crate) fn splice_before(&mut self, segment: usize, anchor: usize) {
        self.splice_after(segment, self.prev_of(anchor));
    }

    /// Take a slot for `element`, reusing the free list before growing the arena.
    /// The slot is handed out detached.
    fn acquire(&mut self, element: Option<String>) -> usize {
        match self.free {
            Some(slot) => {
                let next = self.nodes[slot].next;
                self.free = if next == slot { None } else { Some(next) };
                self.nodes[slot] = Node::detached(slot, element);
                slot
            }
            None => {
                let slot = self.nodes.len();
                self.nodes.push(Node::detached(slot, element));
                slot
            }
        }
    }

    /// Put a detached slot on the free list and return its payload.
    fn release(&mut self, slot: usize) -> Option<String> {
        debug_assert!(self.is_detached(slot), "cannot release a linked node");
        debug_assert_ne!(slot, GHOST, "cannot release the ghost node");
        let element = self.nodes[slot].element.take();
        // The last free slot points at itself.
        self.nodes[slot].next = self.free.unwrap_or(slot);
        self.free = Some(slot);
        element
    }

    pub(crate) fn acquire_element(&mut self, value: String) -> usize {
        #[cfg(feature = "length")]
        {
            self.len += 1;
        }
        self.acquire(Some(value))
    }

    pub(crate) fn release_element(&mut self, node: usize) -> String {
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        self.release(node).unwrap_or_default()
    }

    /// Take a fresh, empty holding sentinel from the arena.
    pub(crate) fn acquire_ghost(&mut self) -> usize {
        self.acquire(None)
    }

    pub(crate) fn release_ghost(&mut self, ghost: usize) {
        debug_assert!(self.is_detached(ghost), "holding list must be empty");
        self.release(ghost);
    }

    /// Unlink `node` and release its slot, returning the payload.
    pub(crate) fn remove_node(&mut self, node: usize) -> String {
        self.unlink(node);
        self.release_element(node)
    }

    /// Make sure `additional` slots can be taken without reallocating.
    pub(crate) fn try_reserve_slots(&mut self, additional: usize) -> Result<()> {
        Ok(self.nodes.try_reserve(additional)?)
    }

    /// Deep-copy `value` into a new detached element node. Nothing is left
    /// allocated on failure.
    fn try_new_element(&mut self, value: &str) -> Result<usize> {
        let mut owned = String::new();
        owned.try_reserve_exact(value.len())?;
        owned.push_str(value);
        if self.free.is_none() {
            self.try_reserve_slots(1)?;
        }
        Ok(self.acquire_element(owned))
    }

    /// Link an owned payload at the back; grows the arena like `Vec::push`.
    pub(crate) fn push_back_owned(&mut self, value: String) {
        let node = self.acquire_element(value);
        self.link_before(node, GHOST);
    }

    fn take_element(&mut self, node: usize, buf: Option<&mut [u8]>) -> Element {
        let element = Element::new(self.remove_node(node));
        if let Some(buf) = buf {
            element.copy_into(buf);
        }
        trace!(value = element.value(), "removed element");
        element
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: usize, next: usize) {
        assert_eq!(self.next_of(prev), next);
        assert_eq!(self.prev_of(next), prev);
    }

    /// Walk the whole cycle and check the doubly-linked invariants.
    #[cfg(test)]
    pub(crate) fn assert_well_formed(&self) {
        let mut node = GHOST;
        let mut steps = 0;
        loop {
            let next = self.next_of(node);
            assert_eq!(self.prev_of(next), node, "next.prev of {} is broken", node);
            assert_eq!(
                self.next_of(self.prev_of(node)),
                node,
                "prev.next of {} is broken",
                node
            );
            steps += 1;
            assert!(steps <= self.nodes.len(), "cycle does not return to ghost");
            node = next;
            if node == GHOST {
                break;
            }
            assert!(self.nodes[node].element.is_some(), "sentinel inside cycle");
        }
        assert_eq!(steps, self.size() + 1);
        assert!(self.is_detached(GHOST) == self.is_empty());
    }
}

fn log_alloc_failure(op: &'static str) -> impl FnOnce(QueueError) -> QueueError {
    move |err| {
        warn!(op, %err, "queue allocation failed");
        err
    }
}

impl Queue {
    /// Create an empty `Queue`.
    ///
    /// # Examples
    /// ```
    /// use cyclic_queue::Queue;
    /// let queue = Queue::new();
    /// assert!(queue.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty `Queue` with room for `capacity` elements before the
    /// arena grows.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes, like
    /// [`Vec::with_capacity`]. Use [`Queue::try_new`] for a constructor that
    /// reports allocation failure instead.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.saturating_add(1));
        nodes.push(Node::detached(GHOST, None));
        Self::from_nodes(nodes)
    }

    /// Create an empty `Queue`, or return [`QueueError::Alloc`] if the ghost
    /// node cannot be allocated.
    ///
    /// # Examples
    /// ```
    /// use cyclic_queue::Queue;
    /// let queue = Queue::try_new().unwrap();
    /// assert_eq!(queue.size(), 0);
    /// ```
    pub fn try_new() -> Result<Self> {
        let mut nodes = Vec::new();
        nodes
            .try_reserve(1)
            .map_err(QueueError::from)
            .map_err(log_alloc_failure("create"))?;
        nodes.push(Node::detached(GHOST, None));
        Ok(Self::from_nodes(nodes))
    }

    /// Returns `true` if the `Queue` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == GHOST
    }

    /// Returns the number of elements in the `Queue`.
    ///
    /// # Complexity
    ///
    /// This operation walks the whole queue, so it computes in *O*(*n*) time.
    /// Callers asking in a loop should keep the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_tail("a").unwrap();
    /// queue.insert_tail("b").unwrap();
    /// assert_eq!(queue.size(), 2);
    /// ```
    #[cfg(not(feature = "length"))]
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Returns the number of elements in the `Queue`. Enabled by `feature = "length"`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[cfg(feature = "length")]
    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    /// Removes and releases all elements of the `Queue`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn clear(&mut self) {
        let mut node = self.front_node();
        let mut released = 0_usize;
        while node != GHOST {
            // The successor must be read before the slot is released.
            let next = self.next_of(node);
            self.remove_node(node);
            released += 1;
            node = next;
        }
        self.nodes.truncate(1);
        self.free = None;
        if released > 0 {
            debug!(released, "cleared queue");
        }
    }

    /// Provides the first element, or `None` if the queue is empty.
    pub fn front(&self) -> Option<&str> {
        self.iter().next()
    }

    /// Provides the last element, or `None` if the queue is empty.
    pub fn back(&self) -> Option<&str> {
        self.iter().next_back()
    }

    /// Inserts a copy of `value` at the head of the queue.
    ///
    /// If the element or its payload cannot be allocated, returns
    /// [`QueueError::Alloc`] and leaves the queue unchanged.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_head("b").unwrap();
    /// queue.insert_head("a").unwrap();
    /// assert_eq!(queue.front(), Some("a"));
    /// ```
    pub fn insert_head(&mut self, value: &str) -> Result<()> {
        let node = self
            .try_new_element(value)
            .map_err(log_alloc_failure("insert_head"))?;
        self.link_after(node, GHOST);
        trace!(value, "inserted at head");
        Ok(())
    }

    /// Inserts a copy of `value` at the tail of the queue.
    ///
    /// If the element or its payload cannot be allocated, returns
    /// [`QueueError::Alloc`] and leaves the queue unchanged.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn insert_tail(&mut self, value: &str) -> Result<()> {
        let node = self
            .try_new_element(value)
            .map_err(log_alloc_failure("insert_tail"))?;
        self.link_before(node, GHOST);
        trace!(value, "inserted at tail");
        Ok(())
    }

    /// Removes the first element and hands it to the caller, or returns `None`
    /// if the queue is empty.
    ///
    /// If `buf` is given, the removed value is also copied into it as a
    /// NUL-terminated string, truncated to fit (see [`Element::copy_into`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_tail("hello").unwrap();
    ///
    /// let mut buf = [0xff_u8; 4];
    /// let element = queue.remove_head(Some(&mut buf)).unwrap();
    /// assert_eq!(element.value(), "hello");
    /// assert_eq!(&buf, b"hel\0");
    /// assert!(queue.remove_head(None).is_none());
    /// ```
    pub fn remove_head(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        if self.is_empty() {
            return None;
        }
        Some(self.take_element(self.front_node(), buf))
    }

    /// Removes the last element and hands it to the caller, or returns `None`
    /// if the queue is empty.
    ///
    /// `buf` behaves as in [`Queue::remove_head`].
    pub fn remove_tail(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        if self.is_empty() {
            return None;
        }
        Some(self.take_element(self.back_node(), buf))
    }

    /// Provides a forward iterator over the values.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let queue = Queue::from_iter(["x", "y"]);
    /// let mut iter = queue.iter();
    /// assert_eq!(iter.next(), Some("x"));
    /// assert_eq!(iter.next(), Some("y"));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }
}

impl Debug for Queue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Queue {
    fn drop(&mut self) {
        self.clear();
    }
}

impl Element {
    pub(crate) fn new(value: String) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }

    /// Copies the value into `buf` as a NUL-terminated string and returns the
    /// number of value bytes copied.
    ///
    /// At most `buf.len() - 1` bytes are copied; the rest of `buf` is zeroed,
    /// so the copy is always terminated within the buffer. An empty `buf` is
    /// left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_tail("abc").unwrap();
    /// let element = queue.remove_tail(None).unwrap();
    ///
    /// let mut buf = [0xff_u8; 6];
    /// assert_eq!(element.copy_into(&mut buf), 3);
    /// assert_eq!(&buf, b"abc\0\0\0");
    /// ```
    pub fn copy_into(&self, buf: &mut [u8]) -> usize {
        let capacity = match buf.len().checked_sub(1) {
            Some(capacity) => capacity,
            None => return 0,
        };
        let copied = self.value.len().min(capacity);
        buf[..copied].copy_from_slice(&self.value.as_bytes()[..copied]);
        buf[copied..].fill(0);
        copied
    }
}

impl AsRef<str> for Element {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<Element> for String {
    fn from(element: Element) -> Self {
        element.value
    }
}
