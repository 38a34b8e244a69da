//! Max-heap of documents keyed on their cached relevance score.
//!
//! The heap is laid out 1-indexed: the children of slot `i` are `2i` and
//! `2i + 1` and its parent is `i / 2`. Slot 0 is scratch space that
//! [`RankingQueue::insert`] uses as a sentinel so sift-up needs no bounds check.

use crate::document::{DocumentIndex, Score};

pub struct RankingQueue<'a> {
    documents: &'a [DocumentIndex],
    slots: Vec<Option<&'a DocumentIndex>>,
    size: usize,
}

impl<'a> RankingQueue<'a> {
    /// Builds a queue over `documents` ranked against `query`.
    pub fn new(documents: &'a [DocumentIndex], query: &str) -> Self {
        let mut queue = RankingQueue {
            documents,
            slots: Vec::with_capacity(documents.len() + 1),
            size: 0,
        };
        queue.reheap(query);
        queue
    }

    /// Current number of documents left in the heap.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Size of the document collection the queue was built over.
    pub fn capacity(&self) -> usize {
        self.documents.len()
    }

    /// Rescores every document against `query` and rebuilds the heap from scratch.
    ///
    /// Anything polled or inserted since the previous rebuild is forgotten; the
    /// heap again holds exactly the original collection.
    pub fn reheap(&mut self, query: &str) {
        for doc in self.documents {
            doc.set_score(query);
        }
        self.slots.clear();
        self.slots.push(None);
        self.slots.extend(self.documents.iter().map(Some));
        self.size = self.documents.len();
        self.build_heap();
        tracing::debug!(query = query.trim(), size = self.size, top = self.score_at(1), "reheap");
    }

    /// The most relevant document, without removing it.
    pub fn peek(&self) -> Option<&'a DocumentIndex> {
        if self.size == 0 {
            return None;
        }
        self.slots[1]
    }

    /// Removes and returns the most relevant document.
    pub fn poll(&mut self) -> Option<&'a DocumentIndex> {
        if self.size == 0 {
            return None;
        }
        let top = self.slots[1];
        self.slots[1] = self.slots[self.size];
        self.size -= 1;
        self.percolate_down(1);
        top
    }

    /// Polls up to `k` documents, best first.
    pub fn drain_top(&mut self, k: usize) -> Vec<&'a DocumentIndex> {
        (0..k).map_while(|_| self.poll()).collect()
    }

    /// Adds `doc` using its current cached score; it is not rescored.
    pub fn insert(&mut self, doc: &'a DocumentIndex) {
        self.size += 1;
        if self.slots.len() == self.size {
            self.slots.push(None);
        }
        let mut hole = self.size;
        let score = doc.score();
        self.slots[0] = Some(doc);
        while score > self.score_at(hole / 2) {
            self.slots[hole] = self.slots[hole / 2];
            hole /= 2;
        }
        self.slots[hole] = Some(doc);
        self.slots[0] = None;
    }

    /// True when every occupied parent scores at least as high as its children.
    pub fn is_valid_heap(&self) -> bool {
        (2..=self.size).all(|i| self.score_at(i / 2) >= self.score_at(i))
    }

    fn score_at(&self, index: usize) -> Score {
        self.slots.get(index).copied().flatten().map_or(0, DocumentIndex::score)
    }

    fn build_heap(&mut self) {
        for hole in (1..=self.size / 2).rev() {
            self.percolate_down(hole);
        }
    }

    fn percolate_down(&mut self, mut hole: usize) {
        let sifting = self.slots[hole];
        let score = sifting.map_or(0, DocumentIndex::score);
        while hole * 2 <= self.size {
            let mut child = hole * 2;
            if child != self.size && self.score_at(child + 1) >= self.score_at(child) {
                child += 1;
            }
            if self.score_at(child) > score {
                self.slots[hole] = self.slots[child];
                hole = child;
            } else {
                break;
            }
        }
        self.slots[hole] = sifting;
    }
}
