//! Unbalanced binary search tree. Duplicates descend to the right.

use crate::ops::Ops;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

pub struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

type Link<T> = Option<Box<Node<T>>>;

/// In-order traversal yielding values in ascending order.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

/// Level-order traversal yielding `(level, value)`, where the root is level 0.
pub struct BreadthFirst<'a, T> {
    queue: VecDeque<(usize, &'a Node<T>)>,
}

pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Node {
            value,
            left: None,
            right: None,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// Searches the subtree rooted at this node.
    pub fn find(&self, value: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        find(Some(self), value)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(Some(self))
    }
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Tree { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    pub fn depth(&self) -> usize {
        depth(self.root())
    }

    /// Smallest value, i.e. the leftmost descendant of the root.
    pub fn min(&self) -> Option<&T> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some(&node.value)
    }

    pub fn max(&self) -> Option<&T> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(&node.value)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root())
    }

    pub fn breadth_first(&self) -> BreadthFirst<'_, T> {
        BreadthFirst {
            queue: self.root().map(|root| (0, root)).into_iter().collect(),
        }
    }
}

impl<T: Ord> Tree<T> {
    pub fn insert(&mut self, value: T) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if value < node.value {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Box::new(Node::new(value)));
        self.len += 1;
    }

    pub fn find(&self, value: &T) -> Option<&Node<T>> {
        find(self.root(), value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Removes the first node (closest to the root) holding `value`.
    ///
    /// Returns `false` when no such node exists, leaving the tree untouched.
    pub fn remove(&mut self, value: &T) -> bool {
        let slot = slot_of(&mut self.root, value);
        let Some(target) = slot.take() else {
            return false;
        };
        *slot = splice_out(target);
        self.len -= 1;
        true
    }

    /// Checks the ordering invariant over the whole tree.
    pub fn verify(&self) -> bool {
        verify(self.root(), None)
    }
}

/// Descends from `node` and returns the first node whose value equals `value`.
pub fn find<'a, T: Ord>(mut node: Option<&'a Node<T>>, value: &T) -> Option<&'a Node<T>> {
    while let Some(current) = node {
        node = match value.cmp(&current.value) {
            Ordering::Equal => return Some(current),
            Ordering::Less => current.left(),
            Ordering::Greater => current.right(),
        };
    }
    None
}

/// Number of nodes on the longest root-to-leaf path; 0 for an absent node.
pub fn depth<T>(node: Option<&Node<T>>) -> usize {
    let mut level: Vec<&Node<T>> = node.into_iter().collect();
    let mut depth = 0;
    while !level.is_empty() {
        depth += 1;
        level = level
            .into_iter()
            .flat_map(|node| node.left().into_iter().chain(node.right()))
            .collect();
    }
    depth
}

/// Walks the subtree in order and checks that no value is smaller than the
/// one visited before it. `lower_bound` seeds the comparison; `None` stands for
/// the smallest possible value. Stops at the first out-of-order value.
pub fn verify<'a, T: Ord>(node: Option<&'a Node<T>>, lower_bound: Option<&'a T>) -> bool {
    let mut bound = lower_bound;
    for value in Iter::new(node) {
        if bound.is_some_and(|bound| value < bound) {
            return false;
        }
        bound = Some(value);
    }
    true
}

/// Returns the slot holding the first node equal to `value`, or the empty slot
/// where the search ran out. The slot is picked by the same rule as insertion,
/// so the parent's left slot is used iff `value < parent.value`.
fn slot_of<'a, T: Ord>(mut slot: &'a mut Link<T>, value: &T) -> &'a mut Link<T> {
    while slot.as_ref().is_some_and(|node| node.value != *value) {
        let node = slot.as_mut().expect("loop condition checked the slot");
        slot = if *value < node.value {
            &mut node.left
        } else {
            &mut node.right
        };
    }
    slot
}

/// Detaches `target` from its subtrees and returns the link that replaces it.
fn splice_out<T>(target: Box<Node<T>>) -> Link<T> {
    let Node { left, right, .. } = *target;

    // no right child: the left subtree moves up
    let Some(mut right) = right else {
        return left;
    };

    // right child has no left child: it moves up and adopts the left subtree
    if right.left.is_none() {
        right.left = left;
        return Some(right);
    }

    // otherwise promote the leftmost descendant of the right subtree
    let mut leftmost_parent = &mut right;
    while leftmost_parent
        .left
        .as_ref()
        .is_some_and(|node| node.left.is_some())
    {
        leftmost_parent = leftmost_parent
            .left
            .as_mut()
            .expect("loop condition checked the left child");
    }
    let mut leftmost = leftmost_parent
        .left
        .take()
        .expect("right child with a left child has a leftmost descendant");
    leftmost_parent.left = leftmost.right.take();

    leftmost.left = left;
    leftmost.right = Some(right);
    Some(leftmost)
}

/// Releases a subtree in post-order without recursing, so arbitrarily deep
/// trees can be dropped.
fn release<T>(root: Link<T>) {
    let mut stack: Vec<Box<Node<T>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        let (left, right) = (node.left.take(), node.right.take());
        if left.is_none() && right.is_none() {
            continue;
        }
        stack.push(node);
        stack.extend(right);
        stack.extend(left);
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        release(self.root.take());
        self.len = 0;
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Ops<T> for Tree<T> {
    fn insert(&mut self, value: T) {
        Tree::insert(self, value)
    }

    fn contains(&self, value: &T) -> bool {
        Tree::contains(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        Tree::remove(self, value)
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<T: Ord> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let mut iter = IntoIter { stack: Vec::new() };
        iter.push_left_spine(self.root.take());
        iter
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a Node<T>>) -> Self {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(&node.value)
    }
}

impl<'a, T> Iterator for BreadthFirst<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let (level, node) = self.queue.pop_front()?;
        for child in [node.left(), node.right()].into_iter().flatten() {
            self.queue.push_back((level + 1, child));
        }
        Some((level, &node.value))
    }
}

impl<T> IntoIter<T> {
    fn push_left_spine(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        let right = node.right.take();
        self.push_left_spine(right);
        Some(node.value)
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for node in self.stack.drain(..) {
            release(Some(node));
        }
    }
}

/// Recurses once per level, unlike the rest of this module.
impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root)
            .finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Node")
            .field("value", &self.value)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}
