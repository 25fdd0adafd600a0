//! Binomial Heap implementation
//!
//! A binomial heap is a collection of binomial trees with:
//! - O(1) amortized insert
//! - O(log n) extract_min and merge
//! - O(1) find_min
//! - O(log² n) decrease_key and remove (structural swaps, see below)
//!
//! # Algorithm Overview
//!
//! A binomial heap maintains a forest of binomial trees, where:
//! - Each tree satisfies the heap property under the heap's comparator
//! - At most one tree of each degree (0, 1, 2, ..., log n)
//! - This is analogous to binary representation of n
//!
//! **Binomial Tree Bₖ**: Recursively defined:
//! - B₀ is a single node
//! - Bₖ is formed by promoting one B_{k-1} root under another
//! - Bₖ has exactly 2ᵏ nodes and height k
//!
//! **Key Operations**:
//! - **Insert**: O(1) amortized - a single-node tree zips into the forest,
//!   stopping at the first free degree slot (binary counter increment)
//! - **Extract-min**: O(log n) - remove the min root, zip its children back in
//! - **Merge**: O(log n) - zip the other forest in by degree (binary addition)
//! - **Decrease-key**: O(log² n) - swap the node above its parent while it is smaller
//!
//! **Invariant**: Between operations, at most one tree of each degree. This
//! ensures O(log n) trees total, bounding operation costs.
//!
//! # Decrease-key strategy
//!
//! Keys never move between nodes. Instead, a node whose key drops below its
//! parent's trades places with the parent: it takes over the parent's slot
//! (in the grandparent's child list or the forest) and the parent's child
//! list, while the parent moves into the node's old slot with the node's old
//! children. Every position keeps its degree, so the binomial shape is
//! untouched, and every handle keeps pointing at its own key.

use crate::compare::{Compare, Natural};
use crate::error::{HeapError, InvariantError};
use crate::node::{promote, Node, NodeRef, WeakNodeRef};
use log::{debug, trace};
use std::cell::Ref;
use std::fmt;
use std::rc::{Rc, Weak};

/// Handle to an element in a Binomial heap
///
/// The handle uses a weak reference to the node, allowing detection
/// of whether the node has been removed from the heap. It is returned by
/// [`BinomialHeap::insert`] and [`BinomialHeap::find`] and addresses the
/// node for [`BinomialHeap::decrease_key`] and [`BinomialHeap::remove`].
pub struct BinomialHandle<T> {
    node: WeakNodeRef<T>,
}

impl<T> BinomialHandle<T> {
    /// Returns true while the referenced key is still stored in some heap
    pub fn is_live(&self) -> bool {
        self.node.strong_count() > 0
    }
}

impl<T> Clone for BinomialHandle<T> {
    fn clone(&self) -> Self {
        BinomialHandle {
            node: self.node.clone(),
        }
    }
}

impl<T> PartialEq for BinomialHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.node.ptr_eq(&other.node)
    }
}

impl<T> Eq for BinomialHandle<T> {}

impl<T> fmt::Debug for BinomialHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinomialHandle")
            .field("live", &self.is_live())
            .finish()
    }
}

/// Binomial Heap
///
/// Keys are ordered by the comparator `C`, fixed at construction. The default
/// [`Natural`] comparator makes this a min-heap over `T: Ord`.
///
/// # Example
///
/// ```rust
/// use binomial_heap::BinomialHeap;
///
/// let mut heap = BinomialHeap::new();
/// let handle = heap.insert(5);
/// heap.insert(3);
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(*heap.find_min().unwrap(), 1);
/// assert_eq!(heap.extract_min(), Ok(1));
/// assert_eq!(heap.extract_min(), Ok(3));
/// ```
pub struct BinomialHeap<T, C = Natural> {
    /// Binomial trees indexed by degree. Each slot holds at most one tree.
    trees: Vec<Option<NodeRef<T>>>,
    /// Degree slot of the root holding the minimum key
    min: Option<usize>,
    /// Number of elements in the heap
    len: usize,
    compare: C,
}

// No manual Drop needed - Rc handles cleanup automatically when strong refs go to 0

impl<T: Ord> BinomialHeap<T> {
    /// Creates an empty heap ordered ascending by `T: Ord`
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, C: Compare<T> + Default> Default for BinomialHeap<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C: Compare<T>> BinomialHeap<T, C> {
    /// Creates an empty heap ordered by `compare`
    pub fn with_comparator(compare: C) -> Self {
        Self {
            trees: Vec::new(),
            min: None,
            len: 0,
            compare,
        }
    }

    /// Builds a heap from a range of keys, ordered by `compare`
    pub fn from_iter_with<I: IntoIterator<Item = T>>(iter: I, compare: C) -> Self {
        let mut heap = Self::with_comparator(compare);
        heap.extend(iter);
        debug!(
            "built heap of {} keys in {} trees",
            heap.len,
            heap.root_count()
        );
        heap
    }

    /// Returns the comparator this heap orders by
    pub fn comparator(&self) -> &C {
        &self.compare
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Degrees of the trees in the forest, ascending
    pub fn root_degrees(&self) -> Vec<usize> {
        self.trees
            .iter()
            .enumerate()
            .filter_map(|(degree, tree)| tree.as_ref().map(|_| degree))
            .collect()
    }

    fn root_count(&self) -> usize {
        self.trees.iter().flatten().count()
    }

    /// Inserts a key, returning a handle to it
    ///
    /// **Time Complexity**: O(1) amortized, O(log n) worst-case
    ///
    /// **Algorithm**:
    /// 1. Create a new single-node tree (degree 0, B₀ tree)
    /// 2. Check it against the minimum
    /// 3. Zip it into the forest starting at degree 0. The zip stops at the
    ///    first free slot, so its cost is the length of the carry chain;
    ///    each promotion in the chain is paid for by an earlier insert that
    ///    left its tree unmerged (binary counter argument).
    pub fn insert(&mut self, key: T) -> BinomialHandle<T> {
        let node = Node::new_tree(key);
        let handle = BinomialHandle {
            node: Rc::downgrade(&node),
        };

        let old_min = self.min;
        let beats_min = match self.min_root() {
            Some(min) => self.compare.less(&node.borrow().key, &min.borrow().key),
            None => true,
        };

        let landed = self.zip([Some(node)]);

        // The carry chain consumed every slot below `landed`; if the old
        // minimum root was among them, the minimum now sits at `landed`.
        if beats_min || old_min.is_some_and(|degree| degree < landed) {
            self.min = Some(landed);
        }

        self.len += 1;
        handle
    }

    /// Inserts a key without keeping a handle
    pub fn push(&mut self, key: T) {
        self.insert(key);
    }

    /// Inserts every key of a range, returning their handles in input order
    pub fn multi_insert<I: IntoIterator<Item = T>>(&mut self, keys: I) -> Vec<BinomialHandle<T>> {
        keys.into_iter().map(|key| self.insert(key)).collect()
    }

    /// Returns the minimum key without removing it
    ///
    /// **Time Complexity**: O(1)
    ///
    /// # Errors
    /// Returns `HeapError::EmptyHeap` if the heap holds no keys.
    pub fn find_min(&self) -> Result<Ref<'_, T>, HeapError> {
        self.min_root()
            .map(|root| Ref::map(root.borrow(), |node| &node.key))
            .ok_or(HeapError::EmptyHeap)
    }

    /// Returns the minimum key, or `None` if the heap is empty
    pub fn peek(&self) -> Option<Ref<'_, T>> {
        self.find_min().ok()
    }

    /// Removes and returns the minimum key
    ///
    /// **Time Complexity**: O(log n)
    ///
    /// **Algorithm**:
    /// 1. Take the minimum root out of its degree slot
    /// 2. Detach its children. When the root of a Bₖ tree is removed, its
    ///    children are B₀, B₁, ..., Bₖ₋₁ trees, already in degree order
    /// 3. Zip the children back into the forest
    /// 4. Find the new minimum by scanning the O(log n) roots
    ///
    /// # Errors
    /// Returns `HeapError::EmptyHeap` if the heap holds no keys; the heap is
    /// left unchanged.
    pub fn extract_min(&mut self) -> Result<T, HeapError> {
        let degree = self.min.ok_or(HeapError::EmptyHeap)?;
        let root = self
            .trees
            .get_mut(degree)
            .and_then(Option::take)
            .ok_or(HeapError::EmptyHeap)?;

        let children = root.borrow_mut().detach_children();
        self.zip(children.into_iter().map(Some));

        self.len -= 1;
        self.refresh_min();
        self.trim();
        trace!(
            "extract_min: {} keys left in {} trees",
            self.len,
            self.root_count()
        );

        // The forest held the only strong reference; children and handles
        // never own their parent.
        let node = Rc::try_unwrap(root)
            .ok()
            .expect("extracted root should have no other strong references")
            .into_inner();
        Ok(node.key)
    }

    /// Removes and returns the minimum key, or `None` if the heap is empty
    pub fn pop(&mut self) -> Option<T> {
        self.extract_min().ok()
    }

    /// Merges another heap into this heap, consuming it
    ///
    /// **Time Complexity**: O(log n)
    ///
    /// Both forests are already ordered by degree; the other forest is zipped
    /// in degree by degree with full carry propagation (binary addition).
    /// Handles into `other` remain valid and now address keys of this heap.
    ///
    /// The keys of `other` are ordered by this heap's comparator from now on.
    pub fn merge(&mut self, mut other: Self) {
        self.merge_from(&mut other);
    }

    /// Moves every key of `other` into this heap, leaving `other` empty and usable
    pub fn merge_from(&mut self, other: &mut Self) {
        if other.is_empty() {
            return;
        }
        debug!(
            "merging heap of {} keys into heap of {} keys",
            other.len, self.len
        );

        let incoming = std::mem::take(&mut other.trees);
        self.len += other.len;
        other.len = 0;
        other.min = None;

        self.zip(incoming);
        self.refresh_min();
    }

    /// Finds a node whose key compares equal to `key`
    ///
    /// **Time Complexity**: O(n)
    ///
    /// Trees are searched in ascending degree order, each one in pre-order;
    /// the first match wins. Subtrees rooted above `key` are skipped.
    ///
    /// # Errors
    /// Returns `HeapError::KeyNotFound` if no key compares equal.
    pub fn find(&self, key: &T) -> Result<BinomialHandle<T>, HeapError> {
        self.trees
            .iter()
            .flatten()
            .find_map(|root| Node::search(root, key, &self.compare))
            .map(|node| BinomialHandle {
                node: Rc::downgrade(&node),
            })
            .ok_or(HeapError::KeyNotFound)
    }

    /// Returns true if the handle addresses a key stored in this heap
    pub fn contains(&self, handle: &BinomialHandle<T>) -> bool {
        self.owned_node(handle).is_ok()
    }

    /// Returns a copy of the key behind a handle
    ///
    /// # Errors
    /// Returns `HeapError::InvalidHandle` if the handle does not address a key
    /// of this heap.
    pub fn get(&self, handle: &BinomialHandle<T>) -> Result<T, HeapError>
    where
        T: Clone,
    {
        let node = self.owned_node(handle)?;
        let key = node.borrow().key.clone();
        Ok(key)
    }

    /// Decreases the key behind a handle
    ///
    /// **Time Complexity**: O(log² n) worst-case
    ///
    /// **Algorithm**:
    /// 1. Update the key
    /// 2. While the node orders before its parent, swap the node into the
    ///    parent's position (see the module docs). Each swap relinks the
    ///    O(log n) children of the two nodes; the tree has height O(log n).
    /// 3. If the node surfaced as a root, check it against the minimum
    ///
    /// # Errors
    /// - `HeapError::InvalidHandle` if the handle does not address a key of
    ///   this heap
    /// - `HeapError::KeyNotDecreased` if `new_key` is not strictly less than
    ///   the current key
    ///
    /// The heap is unchanged on error.
    pub fn decrease_key(&mut self, handle: &BinomialHandle<T>, new_key: T) -> Result<(), HeapError> {
        let node = self.owned_node(handle)?;

        if !self.compare.less(&new_key, &node.borrow().key) {
            return Err(HeapError::KeyNotDecreased);
        }
        node.borrow_mut().key = new_key;

        let swaps = self.sift_up(&node, false);
        trace!("decrease_key: {} swaps", swaps);

        if node.borrow().parent.is_none() {
            let beats_min = match self.min_root() {
                Some(min) => self.compare.less(&node.borrow().key, &min.borrow().key),
                None => true,
            };
            if beats_min {
                self.min = Some(node.borrow().degree());
            }
        }
        Ok(())
    }

    /// Removes the key behind a handle and returns it
    ///
    /// **Time Complexity**: O(log² n)
    ///
    /// Equivalent to decreasing the key below the current minimum and then
    /// extracting it: the node is swapped all the way up to its root, made
    /// the minimum, and extracted.
    ///
    /// # Errors
    /// Returns `HeapError::InvalidHandle` if the handle does not address a key
    /// of this heap; the heap is unchanged.
    pub fn remove(&mut self, handle: BinomialHandle<T>) -> Result<T, HeapError> {
        let node = self.owned_node(&handle)?;

        let swaps = self.sift_up(&node, true);
        trace!("remove: {} swaps to reach the root", swaps);

        self.min = Some(node.borrow().degree());
        // Release our strong reference so extraction owns the node outright
        drop(node);
        self.extract_min()
    }

    /// Removes every key
    pub fn clear(&mut self) {
        self.trees.clear();
        self.min = None;
        self.len = 0;
    }

    /// Consumes the heap, returning its keys sorted by the comparator
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len);
        while let Ok(key) = self.extract_min() {
            sorted.push(key);
        }
        sorted
    }

    /// Verifies the structural invariants of the heap
    ///
    /// Checks that every slot holds a root of its own degree, that every tree
    /// is a well-formed binomial tree in heap order with consistent parent
    /// links, that the node count matches `len()`, and that the tracked
    /// minimum is a minimal root.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut count = 0;
        for (degree, tree) in self.trees.iter().enumerate() {
            let Some(tree) = tree else { continue };
            {
                let root = tree.borrow();
                if root.degree() != degree {
                    return Err(InvariantError::new(format!(
                        "slot {} holds a tree of degree {}",
                        degree,
                        root.degree()
                    )));
                }
                if root.parent.is_some() {
                    return Err(InvariantError::new(format!(
                        "root in slot {} has a parent link",
                        degree
                    )));
                }
            }
            count += Node::validate(tree, &self.compare)?;
        }

        if count != self.len {
            return Err(InvariantError::new(format!(
                "forest holds {} nodes but len is {}",
                count, self.len
            )));
        }

        match self.min_root() {
            None if self.len == 0 => Ok(()),
            None => Err(InvariantError::new("non-empty heap has no minimum")),
            Some(min) => {
                let min = min.borrow();
                for root in self.trees.iter().flatten() {
                    if self.compare.less(&root.borrow().key, &min.key) {
                        return Err(InvariantError::new(
                            "a root orders before the tracked minimum",
                        ));
                    }
                }
                Ok(())
            }
        }
    }

    fn min_root(&self) -> Option<&NodeRef<T>> {
        self.min
            .and_then(|degree| self.trees.get(degree))
            .and_then(Option::as_ref)
    }

    /// Zips a degree-ordered forest into this heap's forest
    ///
    /// `incoming` yields the tree of degree 0, then degree 1, and so on
    /// (`None` for a missing degree). At every degree up to three trees meet:
    /// the resident tree, the incoming tree and the carry from the degree
    /// below. One stays in the slot; two are promoted into the carry; with
    /// three, the resident stays and the other two are promoted.
    ///
    /// The walk stops as soon as the incoming forest and the carry are both
    /// exhausted, so a single-tree insert only pays for its carry chain,
    /// while merges walk the whole incoming forest.
    ///
    /// Returns the slot the last tree was placed in.
    fn zip<I>(&mut self, incoming: I) -> usize
    where
        I: IntoIterator<Item = Option<NodeRef<T>>>,
    {
        let mut incoming = incoming.into_iter();
        let mut carry: Option<NodeRef<T>> = None;
        let mut landed = 0;
        let mut degree = 0;

        loop {
            let arriving = incoming.next();
            if arriving.is_none() && carry.is_none() {
                break;
            }
            if degree == self.trees.len() {
                self.trees.push(None);
            }

            let mut pending = self.trees[degree]
                .take()
                .into_iter()
                .chain(arriving.flatten())
                .chain(carry.take());

            match (pending.next(), pending.next(), pending.next()) {
                (Some(tree), None, _) => {
                    self.trees[degree] = Some(tree);
                    landed = degree;
                }
                (Some(a), Some(b), None) => {
                    carry = Some(promote(a, b, &self.compare));
                }
                (Some(resident), Some(a), Some(b)) => {
                    self.trees[degree] = Some(resident);
                    landed = degree;
                    carry = Some(promote(a, b, &self.compare));
                }
                (None, _, _) => {}
            }
            degree += 1;
        }
        landed
    }

    /// Points `min` at a minimal root by scanning the forest
    fn refresh_min(&mut self) {
        let mut min: Option<(usize, &NodeRef<T>)> = None;
        for (degree, tree) in self.trees.iter().enumerate() {
            let Some(tree) = tree else { continue };
            let better = match min {
                Some((_, best)) => self.compare.less(&tree.borrow().key, &best.borrow().key),
                None => true,
            };
            if better {
                min = Some((degree, tree));
            }
        }
        self.min = min.map(|(degree, _)| degree);
    }

    /// Drops empty slots above the highest-degree tree
    fn trim(&mut self) {
        while let Some(None) = self.trees.last() {
            self.trees.pop();
        }
    }

    /// Resolves a handle to its node, checking that the node lives in this heap
    ///
    /// Walks parent links up to the root and checks the root occupies the
    /// forest slot of its degree. O(log n).
    fn owned_node(&self, handle: &BinomialHandle<T>) -> Result<NodeRef<T>, HeapError> {
        let node = handle.node.upgrade().ok_or(HeapError::InvalidHandle)?;

        let mut root = Rc::clone(&node);
        loop {
            let parent = root.borrow().parent.as_ref().and_then(Weak::upgrade);
            match parent {
                Some(parent) => root = parent,
                None => break,
            }
        }

        let degree = root.borrow().degree();
        match self.trees.get(degree) {
            Some(Some(tree)) if Rc::ptr_eq(tree, &root) => Ok(node),
            _ => Err(HeapError::InvalidHandle),
        }
    }

    /// Swaps `node` above its parent while it orders before it, or all the
    /// way to the root when `to_root` is set. Returns the number of swaps.
    fn sift_up(&mut self, node: &NodeRef<T>, to_root: bool) -> usize {
        let mut swaps = 0;
        loop {
            let parent = node.borrow().parent.as_ref().and_then(Weak::upgrade);
            let Some(parent) = parent else { break };
            if !to_root && !self.compare.less(&node.borrow().key, &parent.borrow().key) {
                break;
            }
            self.swap_with_parent(node, &parent);
            swaps += 1;
        }
        swaps
    }

    /// Exchanges the positions of `node` and its parent
    ///
    /// `node` sits at `parent.children[node.degree]`. Afterwards `node` holds
    /// the parent's former slot and child list (with the parent in the place
    /// `node` occupied), and the parent holds `node`'s former children. Both
    /// positions keep their degree.
    fn swap_with_parent(&mut self, node: &NodeRef<T>, parent: &NodeRef<T>) {
        let slot = node.borrow().degree();
        let parent_degree = parent.borrow().degree();
        let grandparent = parent.borrow_mut().parent.take();

        let mut upper = std::mem::take(&mut parent.borrow_mut().children);
        let lower = std::mem::take(&mut node.borrow_mut().children);
        upper[slot] = Rc::clone(parent);

        for child in &lower {
            child.borrow_mut().parent = Some(Rc::downgrade(parent));
        }
        for child in &upper {
            child.borrow_mut().parent = Some(Rc::downgrade(node));
        }
        parent.borrow_mut().children = lower;
        {
            let mut node_mut = node.borrow_mut();
            node_mut.children = upper;
            node_mut.parent = grandparent.clone();
        }

        match grandparent.as_ref().and_then(Weak::upgrade) {
            Some(grandparent) => {
                grandparent.borrow_mut().children[parent_degree] = Rc::clone(node);
            }
            None => self.trees[parent_degree] = Some(Rc::clone(node)),
        }
    }
}

impl<T: Clone, C: Clone> Clone for BinomialHeap<T, C> {
    /// Deep copy. Handles into `self` do not address the copy.
    fn clone(&self) -> Self {
        Self {
            trees: self
                .trees
                .iter()
                .map(|tree| tree.as_ref().map(|root| Node::deep_clone(root, None)))
                .collect(),
            min: self.min,
            len: self.len,
            compare: self.compare.clone(),
        }
    }
}

impl<T: fmt::Debug, C: Compare<T>> fmt::Debug for BinomialHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinomialHeap")
            .field("len", &self.len)
            .field("root_degrees", &self.root_degrees())
            .field("min", &self.peek())
            .finish()
    }
}

impl<T, C: Compare<T>> Extend<T> for BinomialHeap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for BinomialHeap<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_with(iter, C::default())
    }
}
