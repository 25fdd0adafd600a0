//! Binomial tree nodes
//!
//! **Memory Model**: Strong references flow from roots downward (children).
//! Weak references flow upward (parent) to avoid reference cycles, and handles
//! are weak as well, so a node is freed exactly when it leaves its tree.
//!
//! **Child order**: children are kept in the order they were linked in by
//! [`promote`], which makes `children[k]` the binomial tree of degree `k`.
//! Detaching a node's children therefore yields a forest that is already
//! ordered by degree.

use crate::compare::Compare;
use crate::error::InvariantError;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Type alias for node reference (strong reference)
pub(crate) type NodeRef<T> = Rc<RefCell<Node<T>>>;

/// Type alias for weak node reference (for parent links and handles)
pub(crate) type WeakNodeRef<T> = Weak<RefCell<Node<T>>>;

/// Child list; a degree-k node has k children, and k stays small (≤ log₂ n)
pub(crate) type Children<T> = SmallVec<[NodeRef<T>; 8]>;

/// Internal node structure
///
/// A node of degree d owns exactly d children, `children[k]` being the root
/// of a binomial tree of degree k, and every child's key is ≥ this key.
pub(crate) struct Node<T> {
    pub(crate) key: T,
    /// Parent node - weak reference to avoid cycles (None if root)
    pub(crate) parent: Option<WeakNodeRef<T>>,
    pub(crate) children: Children<T>,
}

impl<T> Node<T> {
    /// Allocates a fresh degree-0 tree
    pub(crate) fn new_tree(key: T) -> NodeRef<T> {
        Rc::new(RefCell::new(Node {
            key,
            parent: None,
            children: SmallVec::new(),
        }))
    }

    /// Number of children. A binomial tree Bₖ has root degree k and 2ᵏ nodes
    #[inline]
    pub(crate) fn degree(&self) -> usize {
        self.children.len()
    }

    /// Takes the children out of this node, clearing their parent links
    ///
    /// The returned list is ordered by ascending degree.
    pub(crate) fn detach_children(&mut self) -> Children<T> {
        let children = std::mem::take(&mut self.children);
        for child in &children {
            child.borrow_mut().parent = None;
        }
        children
    }

    /// Pre-order search of the subtree rooted at `root` for a key equal to `target`
    ///
    /// Subtrees whose root already orders after `target` are skipped: heap
    /// order guarantees nothing below them can compare equal.
    pub(crate) fn search<C: Compare<T>>(
        root: &NodeRef<T>,
        target: &T,
        compare: &C,
    ) -> Option<NodeRef<T>> {
        let mut stack: Vec<NodeRef<T>> = vec![Rc::clone(root)];
        while let Some(current) = stack.pop() {
            let node = current.borrow();
            match compare.compare(&node.key, target) {
                std::cmp::Ordering::Equal => {
                    drop(node);
                    return Some(current);
                }
                std::cmp::Ordering::Greater => continue,
                std::cmp::Ordering::Less => {
                    // Reverse push so children are visited first-to-last
                    stack.extend(node.children.iter().rev().cloned());
                }
            }
        }
        None
    }

    /// Checks shape, parent links and heap order of the subtree rooted at `root`
    ///
    /// Returns the number of nodes in the subtree.
    pub(crate) fn validate<C: Compare<T>>(
        root: &NodeRef<T>,
        compare: &C,
    ) -> Result<usize, InvariantError> {
        let node = root.borrow();
        let mut count = 1;
        for (k, child) in node.children.iter().enumerate() {
            let child_ref = child.borrow();
            if child_ref.degree() != k {
                return Err(InvariantError::new(format!(
                    "child {} has degree {}, expected {}",
                    k,
                    child_ref.degree(),
                    k
                )));
            }
            let linked = child_ref
                .parent
                .as_ref()
                .and_then(Weak::upgrade)
                .is_some_and(|p| Rc::ptr_eq(&p, root));
            if !linked {
                return Err(InvariantError::new(format!(
                    "child {} does not link back to its parent",
                    k
                )));
            }
            if compare.less(&child_ref.key, &node.key) {
                return Err(InvariantError::new(format!(
                    "child {} orders before its parent",
                    k
                )));
            }
            drop(child_ref);
            count += Node::validate(child, compare)?;
        }
        if count != 1usize << node.degree() {
            return Err(InvariantError::new(format!(
                "degree {} tree holds {} nodes",
                node.degree(),
                count
            )));
        }
        Ok(count)
    }
}

impl<T: Clone> Node<T> {
    /// Deep-copies the subtree rooted at `root`, attaching the copy to `parent`
    pub(crate) fn deep_clone(root: &NodeRef<T>, parent: Option<&NodeRef<T>>) -> NodeRef<T> {
        let source = root.borrow();
        let copy = Rc::new(RefCell::new(Node {
            key: source.key.clone(),
            parent: parent.map(Rc::downgrade),
            children: SmallVec::with_capacity(source.degree()),
        }));
        let children: Children<T> = source
            .children
            .iter()
            .map(|child| Node::deep_clone(child, Some(&copy)))
            .collect();
        copy.borrow_mut().children = children;
        copy
    }
}

/// Links two binomial trees of the same degree into one tree of degree+1
///
/// **Time Complexity**: O(1)
///
/// The root with the smaller key becomes the parent; on ties `a` wins. The
/// other root is appended as the newest child, so it lands at
/// `children[degree]`.
///
/// **Binomial Tree Property**: linking two Bₖ trees produces a B_{k+1} tree.
pub(crate) fn promote<T, C: Compare<T>>(a: NodeRef<T>, b: NodeRef<T>, compare: &C) -> NodeRef<T> {
    debug_assert_eq!(a.borrow().degree(), b.borrow().degree());

    let b_is_parent = compare.less(&b.borrow().key, &a.borrow().key);
    let (parent, child) = if b_is_parent { (b, a) } else { (a, b) };

    child.borrow_mut().parent = Some(Rc::downgrade(&parent));
    parent.borrow_mut().children.push(child);
    parent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Natural;

    fn key_of(node: &NodeRef<i32>) -> i32 {
        node.borrow().key
    }

    #[test]
    fn test_promote_smaller_root_wins() {
        let a = Node::new_tree(7);
        let b = Node::new_tree(3);
        let tree = promote(a, b, &Natural);
        assert_eq!(key_of(&tree), 3);
        assert_eq!(tree.borrow().degree(), 1);
        assert_eq!(key_of(&tree.borrow().children[0]), 7);
    }

    #[test]
    fn test_promote_tie_keeps_left_operand() {
        let a = Node::new_tree(5);
        let b = Node::new_tree(5);
        let a_weak = Rc::downgrade(&a);
        let tree = promote(a, b, &Natural);
        assert!(Rc::ptr_eq(&tree, &a_weak.upgrade().unwrap()));
    }

    #[test]
    fn test_promote_sets_parent_and_child_order() {
        let t1 = promote(Node::new_tree(1), Node::new_tree(4), &Natural);
        let t2 = promote(Node::new_tree(2), Node::new_tree(3), &Natural);
        let tree = promote(t1, t2, &Natural);

        assert_eq!(tree.borrow().degree(), 2);
        let node = tree.borrow();
        assert_eq!(node.children[0].borrow().degree(), 0);
        assert_eq!(node.children[1].borrow().degree(), 1);
        let parent = node.children[1].borrow().parent.as_ref().unwrap().upgrade().unwrap();
        assert!(Rc::ptr_eq(&parent, &tree));
        drop(node);
        assert_eq!(Node::validate(&tree, &Natural), Ok(4));
    }

    #[test]
    fn test_detach_children_clears_parents() {
        let tree = promote(Node::new_tree(1), Node::new_tree(2), &Natural);
        let children = tree.borrow_mut().detach_children();
        assert_eq!(children.len(), 1);
        assert!(children[0].borrow().parent.is_none());
        assert_eq!(tree.borrow().degree(), 0);
    }

    #[test]
    fn test_search_finds_and_prunes() {
        let t1 = promote(Node::new_tree(1), Node::new_tree(8), &Natural);
        let t2 = promote(Node::new_tree(4), Node::new_tree(6), &Natural);
        let tree = promote(t1, t2, &Natural);

        let found = Node::search(&tree, &6, &Natural).unwrap();
        assert_eq!(key_of(&found), 6);
        assert!(Node::search(&tree, &5, &Natural).is_none());
        assert!(Node::search(&tree, &0, &Natural).is_none());
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let tree = promote(Node::new_tree(1), Node::new_tree(2), &Natural);
        let copy = Node::deep_clone(&tree, None);
        copy.borrow_mut().key = 0;
        assert_eq!(key_of(&tree), 1);
        assert_eq!(Node::validate(&copy, &Natural), Ok(2));
        assert!(!Rc::ptr_eq(&copy.borrow().children[0], &tree.borrow().children[0]));
    }

    #[test]
    fn test_validate_rejects_heap_order_violation() {
        let tree = promote(Node::new_tree(1), Node::new_tree(2), &Natural);
        tree.borrow().children[0].borrow_mut().key = 0;
        assert!(Node::validate(&tree, &Natural).is_err());
    }
}
