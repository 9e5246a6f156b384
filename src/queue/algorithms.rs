use crate::error::{QueueError, Result};
use crate::queue::{Queue, GHOST};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use tracing::debug;

pub(crate) mod merge;
mod sort;

impl PartialEq for Queue {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl Eq for Queue {}

impl PartialOrd for Queue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queue {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl Clone for Queue {
    fn clone(&self) -> Self {
        self.iter().collect()
    }
}

impl Hash for Queue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl Queue {
    /// Returns `true` if the `Queue` contains an element equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let queue = Queue::from_iter(["a", "b"]);
    /// assert!(queue.contains("b"));
    /// assert!(!queue.contains("c"));
    /// ```
    pub fn contains(&self, value: &str) -> bool {
        self.iter().any(|e| e == value)
    }

    /// Deletes the middle element of the queue.
    ///
    /// Two walkers start from both ends and step towards each other until they
    /// meet or cross; the front walker then stands on the middle element. In a
    /// queue of length *n* that is the element at index *n* / 2 (for even
    /// lengths, the later of the two central elements).
    ///
    /// Returns [`QueueError::Empty`] if there is nothing to delete.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d"]);
    /// queue.delete_middle().unwrap();
    /// assert_eq!(queue, Queue::from_iter(["a", "b", "d"]));
    /// ```
    pub fn delete_middle(&mut self) -> Result<()> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        let (mut front, mut back) = (self.front_node(), self.back_node());
        while front != back && back != self.prev_of(front) {
            front = self.next_of(front);
            back = self.prev_of(back);
        }
        self.remove_node(front);
        Ok(())
    }

    /// Deletes every element whose value equals one of its neighbours,
    /// including the first element of each run of equal values.
    ///
    /// The queue is expected to be sorted. Only adjacent equal values are
    /// detected, so equal values that are not next to each other all survive.
    ///
    /// Returns [`QueueError::Empty`] on an empty queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "a", "b", "c", "c", "c"]);
    /// queue.delete_duplicates().unwrap();
    /// assert_eq!(queue, Queue::from_iter(["b"]));
    /// ```
    pub fn delete_duplicates(&mut self) -> Result<()> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        let mut removed = 0_usize;
        let mut in_run = false;
        let mut node = self.front_node();
        while node != GHOST {
            let next = self.next_of(node);
            let same_as_next = next != GHOST && self.value(node) == self.value(next);
            if same_as_next || in_run {
                self.remove_node(node);
                removed += 1;
            }
            in_run = same_as_next;
            node = next;
        }
        debug!(removed, "deleted duplicate runs");
        Ok(())
    }

    /// Swaps every two adjacent elements: the 1st with the 2nd, the 3rd with
    /// the 4th, and so on. A trailing unpaired element stays where it is.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["1", "2", "3", "4", "5"]);
    /// queue.swap_pairs();
    /// assert_eq!(queue, Queue::from_iter(["2", "1", "4", "3", "5"]));
    /// ```
    pub fn swap_pairs(&mut self) {
        let mut first = self.front_node();
        while first != GHOST {
            let second = self.next_of(first);
            if second == GHOST {
                break;
            }
            self.move_before(second, first);
            first = self.next_of(first);
        }
    }

    /// Reverses the order of the elements in place.
    ///
    /// Two walkers converge from both ends. In each round the back node is
    /// moved to the slot of the front node and the front node to the slot of
    /// the back node, until the unprocessed window holds at most one node.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c"]);
    /// queue.reverse();
    /// assert_eq!(queue, Queue::from_iter(["c", "b", "a"]));
    /// ```
    pub fn reverse(&mut self) {
        let (mut front, mut back) = (self.front_node(), self.back_node());
        while front != back && back != self.prev_of(front) {
            let (before, after) = (self.prev_of(front), self.next_of(back));
            self.move_after(back, before);
            self.move_before(front, after);
            // the window shrinks to the nodes between the two moved ones
            let (moved_front, moved_back) = (back, front);
            front = self.next_of(moved_front);
            back = self.prev_of(moved_back);
        }
    }

    /// Reverses every run of `k` consecutive elements, from left to right. A
    /// trailing run shorter than `k` keeps its order. Does nothing if `k < 2`.
    ///
    /// Each full run is moved node by node to the front of a holding list,
    /// which reverses it, and then spliced back where it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["1", "2", "3", "4", "5"]);
    /// queue.reverse_k(3);
    /// assert_eq!(queue, Queue::from_iter(["3", "2", "1", "4", "5"]));
    /// ```
    pub fn reverse_k(&mut self, k: usize) {
        if k < 2 || self.is_empty() {
            return;
        }
        let holding = self.acquire_ghost();
        let mut groups = 0_usize;
        // `anchor` is the node right before the run being reversed.
        let mut anchor = GHOST;
        while self.has_nodes_after(anchor, k) {
            let first = self.next_of(anchor);
            let mut node = first;
            for _ in 0..k {
                let next = self.next_of(node);
                self.move_after(node, holding);
                node = next;
            }
            self.splice_after(holding, anchor);
            // the first node of the run is now its last
            anchor = first;
            groups += 1;
        }
        self.release_ghost(holding);
        debug!(k, groups, "reversed queue in groups");
    }

    /// Returns `true` if at least `count` element nodes follow `anchor`.
    fn has_nodes_after(&self, anchor: usize, count: usize) -> bool {
        let mut node = anchor;
        for _ in 0..count {
            node = self.next_of(node);
            if node == GHOST {
                return false;
            }
        }
        true
    }

    /// Removes every element that has a strictly smaller element anywhere to
    /// its right, and returns the number of elements left.
    ///
    /// The queue is scanned from right to left, keeping the last kept element
    /// as the pivot. The result is ascending (equal values are kept). Values
    /// compare byte-wise.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["1", "5", "2", "3", "3"]);
    /// assert_eq!(queue.ascend(), 4);
    /// assert_eq!(queue, Queue::from_iter(["1", "2", "3", "3"]));
    /// ```
    pub fn ascend(&mut self) -> usize {
        self.keep_monotonic(Ordering::Greater)
    }

    /// Removes every element that has a strictly greater element anywhere to
    /// its right, and returns the number of elements left.
    ///
    /// The mirror of [`Queue::ascend`]; the result is descending.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["5", "2", "3", "1", "1"]);
    /// assert_eq!(queue.descend(), 4);
    /// assert_eq!(queue, Queue::from_iter(["5", "3", "1", "1"]));
    /// ```
    pub fn descend(&mut self) -> usize {
        self.keep_monotonic(Ordering::Less)
    }

    /// Right-to-left scan removing every node that compares as `reject`
    /// against the pivot to its right.
    fn keep_monotonic(&mut self, reject: Ordering) -> usize {
        if self.is_empty() {
            return 0;
        }
        let mut kept = 1_usize;
        let mut pivot = self.back_node();
        let mut node = self.prev_of(pivot);
        while node != GHOST {
            let prev = self.prev_of(node);
            if self.value(node).cmp(self.value(pivot)) == reject {
                self.remove_node(node);
            } else {
                kept += 1;
                pivot = node;
            }
            node = prev;
        }
        debug!(kept, "filtered queue");
        kept
    }
}
