use crate::error::Result;
use crate::queue::{Element, Queue, GHOST};
use tracing::{debug, warn};

/// Merges queues that are each sorted in the same direction into the first
/// queue, and returns its resulting length.
///
/// Every queue after the first is left empty. On equal values, elements of
/// earlier queues stay in front. Payloads are moved, not copied. An empty
/// slice merges nothing and returns `0`.
///
/// Room for every moved element is reserved in the first queue before
/// anything moves, so on [`QueueError::Alloc`] all queues are unchanged.
///
/// [`QueueError::Alloc`]: crate::QueueError::Alloc
///
/// # Examples
///
/// ```
/// use cyclic_queue::{merge, Queue};
/// use std::iter::FromIterator;
///
/// let mut queues = vec![
///     Queue::from_iter(["a", "d"]),
///     Queue::from_iter(["b", "e"]),
///     Queue::from_iter(["c"]),
/// ];
/// assert_eq!(merge(&mut queues, false).unwrap(), 5);
/// assert_eq!(queues[0], Queue::from_iter(["a", "b", "c", "d", "e"]));
/// assert!(queues[1].is_empty() && queues[2].is_empty());
/// ```
pub fn merge(queues: &mut [Queue], descending: bool) -> Result<usize> {
    let count = queues.len();
    let (first, rest) = match queues.split_first_mut() {
        Some(split) => split,
        None => return Ok(0),
    };
    let incoming: usize = rest.iter().map(Queue::size).sum();
    if let Err(err) = first.try_reserve_slots(incoming) {
        warn!(op = "merge", %err, incoming, "queue allocation failed");
        return Err(err);
    }
    for other in rest.iter_mut() {
        first.merge_from(other, descending);
    }
    let len = first.size();
    debug!(queues = count, len, descending, "merged queues");
    Ok(len)
}

impl Queue {
    /// Moves every element of the sorted `other` into the sorted `self`.
    fn merge_from(&mut self, other: &mut Queue, descending: bool) {
        let mut anchor = self.front_node();
        while let Some(value) = other.remove_head(None).map(Element::into_value) {
            // Residents equal to `value` stay in front of it.
            while anchor != GHOST && !precedes(&value, self.value(anchor), descending) {
                anchor = self.next_of(anchor);
            }
            let node = self.acquire_element(value);
            self.link_before(node, anchor);
        }
    }
}

fn precedes(incoming: &str, resident: &str, descending: bool) -> bool {
    if descending {
        incoming > resident
    } else {
        incoming < resident
    }
}
