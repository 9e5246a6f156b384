use crate::queue::{Element, Queue, GHOST};
use std::fmt;
use std::iter::{FromIterator, FusedIterator};

/// An iterator over the values of a `Queue`.
///
/// It uses a pair of nodes `start..end` to represent a half-open subrange
/// of the queue, where `start` is inclusive and `end` is not.
///
/// The `Iter` borrows the queue immutably, so the queue cannot be
/// mutated while it is alive.
///
/// # Examples
///
/// ```compile_fail
/// use cyclic_queue::Queue;
/// use std::iter::FromIterator;
///
/// let mut queue = Queue::from_iter(["a", "b"]);
/// let mut iter = queue.iter();
///
/// // Won't compile, because queue is already borrowed immutably.
/// queue.insert_tail("c").unwrap();
/// println!("{:?}", iter.next());
/// ```
#[derive(Clone)]
pub struct Iter<'a> {
    queue: &'a Queue,
    start: usize,
    end: usize,
    #[cfg(feature = "length")]
    len: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(queue: &'a Queue) -> Self {
        Self {
            queue,
            start: queue.front_node(),
            end: GHOST,
            #[cfg(feature = "length")]
            len: queue.size(),
        }
    }
}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    /// Return `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        let current = self.start;
        self.start = self.queue.next_of(current);
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        Some(self.queue.value(current))
    }

    #[cfg(feature = "length")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    /// Reset the iterating range to `start..(end.prev)` and return `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        self.end = self.queue.prev_of(self.end);
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        Some(self.queue.value(self.end))
    }
}

impl FusedIterator for Iter<'_> {}

#[cfg(feature = "length")]
impl ExactSizeIterator for Iter<'_> {}

/// An owning iterator over the values of a `Queue`.
///
/// Each step unlinks an element from the front (or the back), so
/// the values are moved out without copying.
pub struct IntoIter {
    queue: Queue,
}

impl fmt::Debug for IntoIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.queue).finish()
    }
}

impl Iterator for IntoIter {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.remove_head(None).map(Element::into_value)
    }

    #[cfg(feature = "length")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.size(), Some(self.queue.size()))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl DoubleEndedIterator for IntoIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.queue.remove_tail(None).map(Element::into_value)
    }
}

impl FusedIterator for IntoIter {}

#[cfg(feature = "length")]
impl ExactSizeIterator for IntoIter {}

impl IntoIterator for Queue {
    type Item = String;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for Queue {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

/// Moves owned values in (and copies borrowed ones) at the back. Unlike
/// [`Queue::insert_tail`], this grows the arena the way `Vec::extend` does.
impl<S: Into<String>> Extend<S> for Queue {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        iter.into_iter()
            .for_each(|value| self.push_back_owned(value.into()));
    }
}

#[cfg(test)]
mod tests {
    use crate::Queue;
    use std::iter::FromIterator;

    #[test]
    fn test_iter() {
        fn test_case(input: &[&str], mid: usize) {
            let queue = Queue::from_iter(input.iter().copied());

            let mut iter = queue.iter();
            for item in input {
                assert_eq!(iter.next(), Some(*item));
            }
            assert_eq!(iter.next(), None);
            assert_eq!(iter.next(), None);
            assert_eq!(iter.next_back(), None);

            let mut iter = queue.iter();
            for item in input.iter().take(mid) {
                assert_eq!(iter.next(), Some(*item));
            }
            let mut iter = iter.rev();
            for item in input.iter().skip(mid).rev() {
                assert_eq!(iter.next(), Some(*item));
            }
            assert_eq!(iter.next(), None);
            assert_eq!(iter.next_back(), None);

            let mut back = queue.iter().rev();
            for item in input.iter().rev() {
                assert_eq!(back.next(), Some(*item));
            }
            assert_eq!(back.next(), None);
        }
        let input = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        test_case(&input, 10);
        test_case(&input, 8);
        test_case(&input, 5);
        test_case(&input, 0);
        test_case(&input[..2], 2);
        test_case(&input[..2], 1);
        test_case(&input[..1], 1);
        test_case(&input[..1], 0);
        test_case(&[], 0);
    }

    #[cfg(feature = "length")]
    #[test]
    fn test_iter_len() {
        let queue = Queue::from_iter(["a", "b", "c"]);
        let mut iter = queue.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        iter.next_back();
        assert_eq!(iter.len(), 1);
        assert_eq!(queue.into_iter().len(), 3);
    }

    #[test]
    fn test_into_iter() {
        let queue = Queue::from_iter(["a", "b", "c", "d"]);
        let mut iter = queue.into_iter();
        assert_eq!(iter.next().as_deref(), Some("a"));
        assert_eq!(iter.next_back().as_deref(), Some("d"));
        assert_eq!(iter.collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn test_extend_and_borrowed_into_iter() {
        let mut queue = Queue::from_iter(vec![String::from("a")]);
        queue.extend(["b", "c"]);
        let mut seen = Vec::new();
        for value in &queue {
            seen.push(value);
        }
        assert_eq!(seen, ["a", "b", "c"]);
        assert_eq!(format!("{:?}", queue), r#"["a", "b", "c"]"#);
        assert_eq!(format!("{:?}", queue.iter()), r#"Iter(["a", "b", "c"])"#);
        queue.assert_well_formed();
    }
}
