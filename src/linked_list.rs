//! Singly linked list with head and tail pointers.

use crate::ops::Ops;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

pub struct List<T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    next_id: u64,
    _marker: PhantomData<Box<Node<T>>>,
}

struct Node<T> {
    value: T,
    id: u64,
    next: Link<T>,
}

type Link<T> = Option<NonNull<Node<T>>>;

/// Identity of a node in a [`List`], as returned by [`List::find`].
///
/// Only compared, never dereferenced until the node is found in the list again.
/// The id keeps a handle to a freed node from matching a new node allocated at
/// the same address.
pub struct NodeRef<T> {
    ptr: NonNull<Node<T>>,
    id: u64,
}

pub struct IntoIter<T> {
    list: List<T>,
}

pub struct Iter<'a, T> {
    next: Link<T>,
    _marker: PhantomData<&'a T>,
}

impl<T> List<T> {
    pub fn new() -> Self {
        List {
            head: None,
            tail: None,
            len: 0,
            next_id: 0,
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn head(&self) -> Option<&T> {
        // SAFETY: links only ever hold nodes created by node_for_value and owned by this list
        self.head.map(|ptr| unsafe { &ptr.as_ref().value })
    }

    pub fn tail(&self) -> Option<&T> {
        // SAFETY: see head
        self.tail.map(|ptr| unsafe { &ptr.as_ref().value })
    }

    pub fn add_head(&mut self, value: T) {
        let mut new = self.node_for_value(value);
        // SAFETY: new was just allocated and is not reachable from anywhere else
        unsafe {
            new.as_mut().next = self.head;
        }
        self.head = Some(new);
        if self.tail.is_none() {
            self.tail = Some(new);
        }
        self.len += 1;
    }

    pub fn add_tail(&mut self, value: T) {
        let new = self.node_for_value(value);
        match self.tail {
            // SAFETY: the tail is a live node owned by this list
            Some(mut tail) => unsafe { tail.as_mut().next = Some(new) },
            None => self.head = Some(new),
        }
        self.tail = Some(new);
        self.len += 1;
    }

    /// Inserts `value` immediately before `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not currently in this list.
    pub fn add_before(&mut self, node: NodeRef<T>, value: T) {
        let Some(prev) = self.predecessor(node) else {
            panic!("add_before: node is not in this list");
        };

        let mut new = self.node_for_value(value);
        // SAFETY: new is fresh, prev (if any) was just found by walking this list
        unsafe {
            new.as_mut().next = Some(node.ptr);
            match prev {
                Some(mut prev) => prev.as_mut().next = Some(new),
                None => self.head = Some(new),
            }
        }
        self.len += 1;
    }

    pub fn delete_head(&mut self) -> Option<T> {
        let head = self.head?;
        Some(self.unlink(None, head))
    }

    pub fn delete_tail(&mut self) -> Option<T> {
        let tail = self.tail?;
        let prev = self
            .predecessor(Self::node_ref(tail))
            .expect("tail should be reachable from head");
        Some(self.unlink(prev, tail))
    }

    /// Reads the value of the node `node` names, if it is still in this list.
    pub fn get(&self, node: NodeRef<T>) -> Option<&T> {
        self.predecessor(node)?;
        // SAFETY: the walk above found the node in this list
        unsafe { Some(&node.ptr.as_ref().value) }
    }

    pub fn iter<'a>(&'a self) -> Iter<'a, T> {
        Iter {
            next: self.head,
            _marker: PhantomData,
        }
    }

    fn node_for_value(&mut self, value: T) -> NonNull<Node<T>> {
        let id = self.next_id;
        self.next_id += 1;
        NonNull::from(Box::leak(Box::new(Node {
            value,
            id,
            next: None,
        })))
    }

    fn node_ref(ptr: NonNull<Node<T>>) -> NodeRef<T> {
        // SAFETY: only called with live nodes of this list
        let id = unsafe { ptr.as_ref().id };
        NodeRef { ptr, id }
    }

    /// Walks the list looking for `target`. Returns the node before it (`None`
    /// when `target` is the head), or `None` overall if `target` is not here.
    fn predecessor(&self, target: NodeRef<T>) -> Option<Link<T>> {
        let mut prev = None;
        let mut cur = self.head;
        while let Some(ptr) = cur {
            // SAFETY: every link reachable from head is a live node of this list
            let node = unsafe { ptr.as_ref() };
            if ptr == target.ptr && node.id == target.id {
                return Some(prev);
            }
            prev = cur;
            cur = node.next;
        }
        None
    }

    fn unlink(&mut self, prev: Link<T>, node_ptr: NonNull<Node<T>>) -> T {
        // SAFETY: callers pass a node of this list together with its predecessor.
        // Once relinked nothing points at node_ptr, so the Box can be reclaimed.
        unsafe {
            let boxed = Box::from_raw(node_ptr.as_ptr());
            match prev {
                Some(mut prev) => prev.as_mut().next = boxed.next,
                None => self.head = boxed.next,
            }
            if self.tail == Some(node_ptr) {
                self.tail = prev;
            }
            self.len -= 1;
            boxed.value
        }
    }
}

impl<T: PartialEq> List<T> {
    /// Returns the first node holding `value`.
    pub fn find(&self, value: &T) -> Option<NodeRef<T>> {
        self.find_with_prev(value).map(|(_, ptr)| Self::node_ref(ptr))
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find_with_prev(value).is_some()
    }

    /// Removes the first node holding `value`. Returns `false` if there is none.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.find_with_prev(value) {
            Some((prev, ptr)) => {
                self.unlink(prev, ptr);
                true
            }
            None => false,
        }
    }

    fn find_with_prev(&self, value: &T) -> Option<(Link<T>, NonNull<Node<T>>)> {
        let mut prev = None;
        let mut cur = self.head;
        while let Some(ptr) = cur {
            // SAFETY: every link reachable from head is a live node of this list
            let node = unsafe { ptr.as_ref() };
            if node.value == *value {
                return Some((prev, ptr));
            }
            prev = cur;
            cur = node.next;
        }
        None
    }
}

impl<T: PartialOrd> List<T> {
    /// Inserts `value` before the first element greater than it, so a list
    /// built only through this method stays in ascending order and equal
    /// values keep their insertion order.
    pub fn insert_sorted(&mut self, value: T) {
        let mut cur = self.head;
        while let Some(ptr) = cur {
            // SAFETY: every link reachable from head is a live node of this list
            let node = unsafe { ptr.as_ref() };
            if value < node.value {
                return self.add_before(NodeRef { ptr, id: node.id }, value);
            }
            cur = node.next;
        }
        self.add_tail(value);
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        while self.delete_head().is_some() {}
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> Ops<T> for List<T> {
    fn insert(&mut self, value: T) {
        self.add_tail(value)
    }

    fn contains(&self, value: &T) -> bool {
        List::contains(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        List::remove(self, value)
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add_tail(value);
        }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        self.list.delete_head()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        unsafe {
            self.next.map(|ptr| {
                let node = ptr.as_ref();
                self.next = node.next;
                &node.value
            })
        }
    }
}

impl<T> Clone for NodeRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<T> {}

impl<T> PartialEq for NodeRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr && self.id == other.id
    }
}

impl<T> Eq for NodeRef<T> {}

impl<T> fmt::Debug for NodeRef<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_tuple("NodeRef")
            .field(&self.ptr)
            .field(&self.id)
            .finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::seq::SliceRandom;

    fn values(list: &List<i32>) -> Vec<i32> {
        list.iter().copied().collect()
    }

    #[test]
    fn empty_after_creation() {
        let list = List::<i32>::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);
    }

    #[test]
    fn add_head_and_tail() {
        let mut list = List::new();
        list.add_head(2);
        list.add_tail(3);
        list.add_head(1);
        list.add_tail(4);
        assert_eq!(values(&list), vec![1, 2, 3, 4]);
        assert_eq!(list.head(), Some(&1));
        assert_eq!(list.tail(), Some(&4));
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn delete_head_and_tail() {
        let mut list: List<i32> = (1..=4).collect();
        assert_eq!(list.delete_head(), Some(1));
        assert_eq!(list.delete_tail(), Some(4));
        assert_eq!(values(&list), vec![2, 3]);
        assert_eq!(list.tail(), Some(&3));

        assert_eq!(list.delete_tail(), Some(3));
        assert_eq!(list.delete_tail(), Some(2));
        assert_eq!(list.delete_tail(), None);
        assert_eq!(list.delete_head(), None);
        assert!(list.is_empty());

        // both ends were reset, so the list is usable again
        list.add_tail(9);
        assert_eq!(list.head(), Some(&9));
        assert_eq!(list.tail(), Some(&9));
    }

    #[test]
    fn add_before_inserts_in_front_of_node() {
        let mut list: List<i32> = vec![10, 20, 30].into_iter().collect();
        let twenty = list.find(&20).unwrap();
        list.add_before(twenty, 15);

        assert!(list.find(&20).is_some());
        assert!(list.find(&15).is_some());
        assert_eq!(values(&list), vec![10, 15, 20, 30]);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn add_before_head() {
        let mut list: List<i32> = vec![10, 20].into_iter().collect();
        let head = list.find(&10).unwrap();
        list.add_before(head, 5);
        assert_eq!(values(&list), vec![5, 10, 20]);
        assert_eq!(list.head(), Some(&5));
        assert_eq!(list.tail(), Some(&20));
    }

    #[test]
    #[should_panic(expected = "not in this list")]
    fn add_before_foreign_node_panics() {
        let other: List<i32> = vec![1].into_iter().collect();
        let foreign = other.find(&1).unwrap();

        let mut list: List<i32> = vec![1, 2].into_iter().collect();
        list.add_before(foreign, 0);
    }

    #[test]
    #[should_panic(expected = "not in this list")]
    fn add_before_removed_node_panics() {
        let mut list: List<i32> = vec![1, 2, 3].into_iter().collect();
        let two = list.find(&2).unwrap();
        assert!(list.remove(&2));
        list.add_before(two, 0);
    }

    #[test]
    #[should_panic(expected = "not in this list")]
    fn add_before_handle_to_reused_slot_panics() {
        let mut list: List<i32> = vec![1, 2, 3].into_iter().collect();
        let two = list.find(&2).unwrap();
        assert!(list.remove(&2));

        // the freed node's memory is likely handed straight back here
        list.add_tail(9);
        let nine = list.find(&9).unwrap();
        assert_ne!(two, nine);
        assert_eq!(list.get(two), None);
        list.add_before(two, 0);
    }

    #[test]
    fn get_through_handle() {
        let mut list: List<i32> = vec![1, 2, 3].into_iter().collect();
        let three = list.find(&3).unwrap();
        assert_eq!(list.get(three), Some(&3));
        list.delete_tail();
        assert_eq!(list.get(three), None);
    }

    #[test]
    fn find_first_match() {
        let mut list: List<i32> = vec![7, 8, 7].into_iter().collect();
        assert_ne!(list.find(&7), list.find(&8));
        assert!(list.find(&9).is_none());

        let seven = list.find(&7).unwrap();
        list.add_before(seven, 0);
        assert_eq!(values(&list), vec![0, 7, 8, 7]);
    }

    #[test]
    fn remove_by_value() {
        let mut list: List<i32> = vec![1, 2, 3, 2].into_iter().collect();
        assert!(list.remove(&2));
        assert_eq!(values(&list), vec![1, 3, 2]);

        // removing the tail moves the tail pointer back
        assert!(list.remove(&2));
        assert_eq!(list.tail(), Some(&3));
        list.add_tail(4);
        assert_eq!(values(&list), vec![1, 3, 4]);

        assert!(list.remove(&1));
        assert_eq!(list.head(), Some(&3));
        assert!(!list.remove(&42));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn insert_sorted_after_shuffle() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let mut numbers: Vec<i32> = (0..30).map(|i| i / 2).collect();
        numbers.shuffle(&mut rng);

        let mut list = List::new();
        for &number in numbers.iter() {
            list.insert_sorted(number);
        }

        numbers.sort();
        assert_eq!(values(&list), numbers);
        assert_eq!(list.tail(), Some(&14));
    }

    #[test]
    fn into_iter_from_head() {
        let list: List<i32> = (0..10).collect();
        let mut iter = list.into_iter();
        for i in 0..10 {
            assert_eq!(iter.next(), Some(i));
        }
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn long_list_drops() {
        let list: List<u32> = (0..200_000).collect();
        assert_eq!(list.len(), 200_000);
        drop(list);
    }
}
