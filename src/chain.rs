//! ChainList: insertion-ordered sequence with O(1) removal by link.
//!
//! Nodes live in a generational `SlotMap`, so a [`Link`] returned by a push
//! stays valid until that node is removed and never aliases a later node.
//! Holders of a link (the ordered set's index, a post pointing back into its
//! poster's post chain) can therefore unlink a node without scanning.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable reference to one node of a [`ChainList`].
    pub struct Link;
}

#[derive(Debug)]
struct Node<T> {
    item: T,
    prev: Option<Link>,
    next: Option<Link>,
}

#[derive(Debug)]
pub struct ChainList<T> {
    nodes: SlotMap<Link, Node<T>>,
    head: Option<Link>,
    tail: Option<Link>,
}

impl<T> Default for ChainList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ChainList<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push_front(&mut self, item: T) -> Link {
        let link = self.nodes.insert(Node {
            item,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old) => self.nodes[old].prev = Some(link),
            None => self.tail = Some(link),
        }
        self.head = Some(link);
        link
    }

    pub fn push_back(&mut self, item: T) -> Link {
        let link = self.nodes.insert(Node {
            item,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(old) => self.nodes[old].next = Some(link),
            None => self.head = Some(link),
        }
        self.tail = Some(link);
        link
    }

    /// Unlink and return the item behind `link`; `None` for a stale link.
    pub fn remove(&mut self, link: Link) -> Option<T> {
        let node = self.nodes.remove(link)?;
        match node.prev {
            Some(p) => self.nodes[p].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.nodes[n].prev = node.prev,
            None => self.tail = node.prev,
        }
        Some(node.item)
    }

    pub fn get(&self, link: Link) -> Option<&T> {
        self.nodes.get(link).map(|n| &n.item)
    }

    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|l| self.get(l))
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|l| self.get(l))
    }

    /// Front-to-back iteration.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
            remaining: self.nodes.len(),
        }
    }
}

pub struct Iter<'a, T> {
    nodes: &'a SlotMap<Link, Node<T>>,
    cursor: Option<Link>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let node = self.nodes.get(self.cursor?)?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a ChainList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(c: &ChainList<i32>) -> Vec<i32> {
        c.iter().copied().collect()
    }

    #[test]
    fn pushes_keep_order_at_both_ends() {
        let mut c = ChainList::new();
        c.push_back(2);
        c.push_back(3);
        c.push_front(1);
        assert_eq!(items(&c), vec![1, 2, 3]);
        assert_eq!(c.front(), Some(&1));
        assert_eq!(c.back(), Some(&3));
        assert_eq!(c.iter().len(), 3);
    }

    #[test]
    fn remove_by_link_from_head_middle_and_tail() {
        let mut c = ChainList::new();
        let a = c.push_back(1);
        let b = c.push_back(2);
        let d = c.push_back(3);
        let e = c.push_back(4);

        assert_eq!(c.remove(b), Some(2));
        assert_eq!(items(&c), vec![1, 3, 4]);
        assert_eq!(c.remove(a), Some(1));
        assert_eq!(items(&c), vec![3, 4]);
        assert_eq!(c.remove(e), Some(4));
        assert_eq!(items(&c), vec![3]);
        assert_eq!(c.front(), c.back());
        assert_eq!(c.remove(d), Some(3));
        assert!(c.is_empty());
        assert_eq!(c.front(), None);
        assert_eq!(c.back(), None);
    }

    #[test]
    fn stale_link_does_not_alias_new_node() {
        let mut c = ChainList::new();
        let old = c.push_back(1);
        c.remove(old);
        let new = c.push_back(2);
        assert_ne!(old, new);
        assert_eq!(c.remove(old), None);
        assert_eq!(c.get(new), Some(&2));
        assert_eq!(items(&c), vec![2]);
    }

    #[test]
    fn reuse_after_emptying() {
        let mut c = ChainList::new();
        let a = c.push_front(1);
        c.remove(a);
        c.push_front(5);
        c.push_back(6);
        assert_eq!(items(&c), vec![5, 6]);
    }
}
