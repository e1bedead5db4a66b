//! Open-set bookkeeping shared by A* and Dijkstra.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::grid::CellRef;

/// Search-internal record for one reached cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CellRecord {
    pub cell: CellRef,
    pub previous: CellRef,
    /// Cumulative cost from the start.
    pub cost: f32,
    /// Cost plus heuristic; the heap key.
    pub priority: f32,
}

impl CellRecord {
    pub fn new(cell: CellRef, previous: CellRef, cost: f32, priority: f32) -> Self {
        Self {
            cell,
            previous,
            cost,
            priority,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    record: CellRecord,
    /// Insertion sequence; earlier entries win priority ties.
    sequence: u64,
}

impl Entry {
    fn cmp_key(&self, other: &Self) -> Ordering {
        self.record
            .priority
            .total_cmp(&other.record.priority)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// Indexed binary min-heap keyed by cell.
///
/// Each cell appears at most once. Re-reaching a queued cell with a strictly
/// lower priority replaces its record in O(log n); anything else is discarded.
#[derive(Debug, Default)]
pub(crate) struct OpenSet {
    heap: Vec<Entry>,
    slots: HashMap<CellRef, usize>,
    next_sequence: u64,
}

impl OpenSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Queues `record`, or replaces the queued record for the same cell when
    /// `record` scores strictly lower. Returns whether the set changed.
    pub fn push_or_improve(&mut self, record: CellRecord) -> bool {
        let sequence = self.next_sequence;

        match self.slots.get(&record.cell).copied() {
            Some(slot) => {
                if record.priority >= self.heap[slot].record.priority {
                    return false;
                }
                self.heap[slot] = Entry { record, sequence };
                self.next_sequence += 1;
                self.sift_up(slot);
            }
            None => {
                let slot = self.heap.len();
                self.heap.push(Entry { record, sequence });
                self.slots.insert(record.cell, slot);
                self.next_sequence += 1;
                self.sift_up(slot);
            }
        }
        true
    }

    /// Removes and returns the lowest-priority record.
    pub fn pop(&mut self) -> Option<CellRecord> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.slots.remove(&entry.record.cell);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(entry.record)
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].cmp_key(&self.heap[parent]) != Ordering::Less {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < len && self.heap[left].cmp_key(&self.heap[smallest]) == Ordering::Less {
                smallest = left;
            }
            if right < len && self.heap[right].cmp_key(&self.heap[smallest]) == Ordering::Less {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.slots.insert(self.heap[a].record.cell, a);
        self.slots.insert(self.heap[b].record.cell, b);
    }
}
