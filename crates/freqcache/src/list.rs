//! Intrusive doubly-linked list over slab handles.
//!
//! The list only stores its ends; each entry carries its own `Links`.
//! Head is the most recently touched entry, tail the least.

use crate::slab::Slab;

/// Neighbour handles stored inside each entry
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Links {
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

/// Entries that can be threaded through a `List`
pub(crate) trait Linked {
    fn links(&self) -> &Links;
    fn links_mut(&mut self) -> &mut Links;
}

#[derive(Debug, Default)]
pub(crate) struct List {
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[cfg(test)]
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    #[cfg(test)]
    pub fn tail(&self) -> Option<usize> {
        self.tail
    }

    /// Link `idx` in front of the current head. `idx` must not be in any list.
    pub fn push_front<T: Linked>(&mut self, slab: &mut Slab<T>, idx: usize) {
        let Some(node) = slab.get_mut(idx) else {
            return;
        };
        *node.links_mut() = Links {
            prev: None,
            next: self.head,
        };

        match self.head {
            Some(head_idx) => {
                if let Some(head) = slab.get_mut(head_idx) {
                    head.links_mut().prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }

        self.head = Some(idx);
        self.len += 1;
    }

    /// Detach `idx` from this list. `idx` must currently belong to it.
    pub fn unlink<T: Linked>(&mut self, slab: &mut Slab<T>, idx: usize) {
        let Some(links) = slab.get(idx).map(|node| *node.links()) else {
            return;
        };

        match links.prev {
            Some(prev_idx) => {
                if let Some(prev) = slab.get_mut(prev_idx) {
                    prev.links_mut().next = links.next;
                }
            }
            None => self.head = links.next,
        }

        match links.next {
            Some(next_idx) => {
                if let Some(next) = slab.get_mut(next_idx) {
                    next.links_mut().prev = links.prev;
                }
            }
            None => self.tail = links.prev,
        }

        if let Some(node) = slab.get_mut(idx) {
            *node.links_mut() = Links::default();
        }
        self.len -= 1;
    }

    /// Move an entry of this list to the head
    pub fn move_to_front<T: Linked>(&mut self, slab: &mut Slab<T>, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.unlink(slab, idx);
        self.push_front(slab, idx);
    }

    /// Detach and return the tail handle
    pub fn pop_back<T: Linked>(&mut self, slab: &mut Slab<T>) -> Option<usize> {
        let idx = self.tail?;
        self.unlink(slab, idx);
        Some(idx)
    }
}
