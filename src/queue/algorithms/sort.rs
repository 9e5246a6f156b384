use crate::queue::{Queue, GHOST};
use tracing::debug;

impl Queue {
    /// Sort the queue in ascending (or, with `descending`, descending) order.
    /// Values compare byte-wise.
    ///
    /// This sort is **not** stable: equal values may be reordered.
    ///
    /// # Complexity
    ///
    /// This operation computes in *O*(*n* * log(*n*)) time on average, and
    /// *O*(*n*²) time on input that is already (reverse) sorted. The
    /// recursion depth stays within *O*(log(*n*)) either way.
    ///
    /// # Current Implementation
    ///
    /// The current algorithm is a quicksort over nodes. The first node is
    /// taken as the pivot, every other node is moved into one of two holding
    /// lists, and the holding lists are spliced back around the pivot. Only
    /// the shorter side is sorted recursively; the longer one is sorted by the
    /// same loop. No payload is copied.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["d", "b", "a", "c"]);
    ///
    /// queue.sort(false);
    /// assert_eq!(queue, Queue::from_iter(["a", "b", "c", "d"]));
    ///
    /// queue.sort(true);
    /// assert_eq!(queue, Queue::from_iter(["d", "c", "b", "a"]));
    /// ```
    pub fn sort(&mut self, descending: bool) {
        if self.is_empty() {
            return;
        }
        self.quick_sort(GHOST, GHOST, descending);
        debug!(descending, "sorted queue");
    }

    /// Sort the nodes strictly between `before` and `after` in place.
    /// Neither bound is moved.
    fn quick_sort(&mut self, mut before: usize, mut after: usize, descending: bool) {
        loop {
            let pivot = self.next_of(before);
            if pivot == after || self.next_of(pivot) == after {
                return;
            }

            // `first` ends up before the pivot, `second` after it.
            let (first, second) = (self.acquire_ghost(), self.acquire_ghost());
            let (mut first_len, mut second_len) = (0_usize, 0_usize);
            let mut node = self.next_of(pivot);
            while node != after {
                let next = self.next_of(node);
                let greater = self.value(node) > self.value(pivot);
                if greater == descending {
                    self.move_after(node, first);
                    first_len += 1;
                } else {
                    self.move_after(node, second);
                    second_len += 1;
                }
                node = next;
            }
            self.splice_before(first, pivot);
            self.splice_after(second, pivot);
            self.release_ghost(first);
            self.release_ghost(second);

            if first_len < second_len {
                self.quick_sort(before, pivot, descending);
                before = pivot;
            } else {
                self.quick_sort(pivot, after, descending);
                after = pivot;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Queue;
    use std::iter::FromIterator;

    fn values(queue: &Queue) -> Vec<&str> {
        queue.iter().collect()
    }

    #[test]
    fn sort() {
        fn test_case(input: &[&str], ascending: &[&str]) {
            let mut queue = Queue::from_iter(input.iter().copied());
            queue.sort(false);
            assert_eq!(values(&queue), ascending);
            queue.assert_well_formed();

            let mut queue = Queue::from_iter(input.iter().copied());
            queue.sort(true);
            let descending: Vec<&str> = ascending.iter().rev().copied().collect();
            assert_eq!(values(&queue), descending);
            queue.assert_well_formed();
        }
        test_case(&[], &[]);
        test_case(&["a"], &["a"]);
        test_case(&["b", "a"], &["a", "b"]);
        test_case(&["c", "a", "b", "a"], &["a", "a", "b", "c"]);
        test_case(&["e", "d", "c", "b", "a"], &["a", "b", "c", "d", "e"]);
        test_case(&["a", "b", "c", "d", "e"], &["a", "b", "c", "d", "e"]);
        // byte-wise, not numeric or case-folded
        test_case(&["b", "B", "a", "10", "9"], &["10", "9", "B", "a", "b"]);
    }

    #[test]
    fn sort_is_idempotent() {
        let mut queue = Queue::from_iter(["gerbil", "bear", "dolphin", "bear", "cat"]);
        queue.sort(false);
        let sorted = queue.clone();
        queue.sort(false);
        assert_eq!(queue, sorted);
    }

    #[test]
    fn sort_reuses_holding_slots() {
        let mut queue = Queue::from_iter(["5", "2", "8", "1", "7", "3", "6", "4"]);
        let arena = queue.nodes.len();
        queue.sort(false);
        assert!(queue.nodes.len() <= arena + 2);
        let arena = queue.nodes.len();
        queue.sort(true);
        assert_eq!(queue.nodes.len(), arena);
        assert_eq!(queue.size(), 8);
        queue.assert_well_formed();
    }

    #[test]
    fn sort_presorted_input_on_small_stack() {
        let sorted: Vec<String> = (0..4096).map(|i| format!("{:06}", i)).collect();
        let expected = sorted.clone();
        let handle = std::thread::Builder::new()
            .stack_size(128 * 1024)
            .spawn(move || {
                let mut queue: Queue = sorted.into_iter().collect();
                queue.sort(false);
                queue.assert_well_formed();
                let ascending: Vec<String> = queue.iter().map(String::from).collect();
                queue.sort(true);
                queue.assert_well_formed();
                let descending: Vec<String> = queue.iter().map(String::from).collect();
                (ascending, descending)
            })
            .unwrap();
        let (ascending, descending) = handle.join().unwrap();
        assert_eq!(ascending, expected);
        assert!(descending.iter().eq(expected.iter().rev()));
    }
}
