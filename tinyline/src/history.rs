//! Line history
//!
//! A fixed number of line slots arranged in a ring. Slot 0 is the live
//! line being edited, slots `1..depth` hold accepted lines with the newest
//! at slot 1. Pushing a line rotates the ring by one so the oldest slot is
//! recycled as the new live line; no text is moved except the copy back
//! into slot 0.

use alloc::vec::Vec;

use tracing::debug;

use crate::line_buffer::LineBuffer;

/// Maps logical slot numbers onto the backing array
#[derive(Copy, Clone, Eq, PartialEq)]
#[cfg_attr(test, derive(Debug))]
struct CircularIndex {
    head: usize,
    size: usize,
}

impl CircularIndex {
    fn new(size: usize) -> Self {
        Self { head: 0, size }
    }

    fn index(&self, slot: usize) -> usize {
        (self.head + slot) % self.size
    }

    /// Shift every slot up by one, the last slot wraps around to slot 0
    fn rotate(&mut self) {
        self.head = (self.head + self.size - 1) % self.size;
    }
}

#[cfg_attr(test, derive(Debug))]
pub struct HistoryRing {
    slots: Vec<LineBuffer>,
    index: CircularIndex,
    nav_pos: usize,
    edit_save: Vec<u8>,
}

impl HistoryRing {
    /// Create a ring of `depth` slots, each holding lines of `capacity`.
    ///
    /// # Panics
    ///
    /// Panics if `depth < 1` or `capacity < 2`.
    pub fn new(depth: usize, capacity: usize) -> Self {
        assert!(depth >= 1, "history depth must be at least 1");

        Self {
            slots: (0..depth).map(|_| LineBuffer::new(capacity)).collect(),
            index: CircularIndex::new(depth),
            nav_pos: 0,
            edit_save: Vec::with_capacity(capacity - 1),
        }
    }

    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    /// Current navigation position, 0 means the live line
    pub fn nav_pos(&self) -> usize {
        self.nav_pos
    }

    /// Slot by logical number, or None if out of bounds
    pub fn slot(&self, slot: usize) -> Option<&LineBuffer> {
        if slot < self.depth() {
            Some(&self.slots[self.index.index(slot)])
        } else {
            None
        }
    }

    /// All slots in logical order, live line first
    pub fn slots(&self) -> impl Iterator<Item = &LineBuffer> + '_ {
        (0..self.depth()).map(move |slot| &self.slots[self.index.index(slot)])
    }

    /// Accepted lines, most recent first
    pub fn entries(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.slots()
            .skip(1)
            .map(LineBuffer::as_bytes)
            .filter(|entry| !entry.is_empty())
    }

    pub fn live(&self) -> &LineBuffer {
        &self.slots[self.index.index(0)]
    }

    pub fn live_mut(&mut self) -> &mut LineBuffer {
        let index = self.index.index(0);
        &mut self.slots[index]
    }

    fn is_slot_empty(&self, slot: usize) -> bool {
        self.slot(slot).map_or(true, LineBuffer::is_empty)
    }

    fn copy_slot(&mut self, from: usize, to: usize) {
        let (from, to) = (self.index.index(from), self.index.index(to));

        if from < to {
            let (head, tail) = self.slots.split_at_mut(to);
            tail[0].copy_from(&head[from]);
        } else if from > to {
            let (head, tail) = self.slots.split_at_mut(from);
            head[to].copy_from(&tail[0]);
        }
    }

    /// Forget the navigation position without touching the live line.
    pub fn reset_navigation(&mut self) {
        self.nav_pos = 0;
    }

    /// Commit the live line.
    ///
    /// Blank lines and repeats of the newest entry are not stored. After a
    /// push slot 1 holds the line and slot 0 still shows a copy of it.
    /// Returns true if the line was stored.
    pub fn push(&mut self) -> bool {
        if self.depth() < 2 {
            return false;
        }

        let live = self.live();

        if live.is_blank() {
            debug!("blank line not added to history");
            return false;
        }

        if self.slot(1).map(LineBuffer::as_bytes) == Some(live.as_bytes()) {
            debug!("repeated line not added to history");
            return false;
        }

        self.index.rotate();
        self.copy_slot(1, 0);

        debug!(len = self.live().len(), "line added to history");

        true
    }

    /// Show the next older entry. Returns false if there is none.
    pub fn navigate_up(&mut self) -> bool {
        let next = self.nav_pos + 1;

        if next >= self.depth() || self.is_slot_empty(next) {
            return false;
        }

        if self.nav_pos == 0 {
            let live = self.index.index(0);
            self.edit_save.clear();
            self.edit_save.extend_from_slice(self.slots[live].as_bytes());
        }

        self.nav_pos = next;
        self.copy_slot(next, 0);
        self.live_mut().cursor_to_end();

        true
    }

    /// Show the next newer entry, or the saved edit line when reaching
    /// slot 0. Returns false if already on the live line.
    pub fn navigate_down(&mut self) -> bool {
        if self.nav_pos == 0 {
            return false;
        }

        self.nav_pos -= 1;

        if self.nav_pos == 0 {
            let live = self.index.index(0);
            self.slots[live].set_text(&self.edit_save);
        } else {
            self.copy_slot(self.nav_pos, 0);
        }

        self.live_mut().cursor_to_end();

        true
    }

    /// Go to the oldest entry. Returns false if nothing moved.
    pub fn navigate_top(&mut self) -> bool {
        let mut moved = false;

        while self.navigate_up() {
            moved = true;
        }

        moved
    }

    /// Return to the live line. Returns false if already there.
    pub fn navigate_bottom(&mut self) -> bool {
        if self.nav_pos == 0 {
            return false;
        }

        self.nav_pos = 1;
        self.navigate_down()
    }

    /// Push entries, oldest first. Returns the number of entries stored.
    pub fn load_entries<'a, I: IntoIterator<Item = &'a [u8]>>(&mut self, entries: I) -> usize {
        let saved_cursor = self.live().cursor();
        let live = self.live().as_bytes().to_vec();

        let mut count = 0;

        for entry in entries {
            self.live_mut().set_text(entry);

            if self.push() {
                count += 1;
            }
        }

        self.live_mut().restore(&live, saved_cursor);
        self.nav_pos = 0;

        count
    }
}
