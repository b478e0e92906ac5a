use crate::schedule::slots::FlightTable;
use tracing::debug;

/// Stable handle of a record inside a [`RecordPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(usize);

impl RecordId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The two disjoint lists every record is threaded on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum List {
    Free,
    Active,
}

pub struct ScheduleRecord {
    destination: String,
    pub(crate) flights: FlightTable,
    list: List,
    next: Option<RecordId>,
    prev: Option<RecordId>,
}

impl ScheduleRecord {
    fn new(max_flights: usize) -> ScheduleRecord {
        ScheduleRecord {
            destination: String::new(),
            flights: FlightTable::new(max_flights),
            list: List::Free,
            next: None,
            prev: None,
        }
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub(crate) fn set_destination(&mut self, destination: &str) {
        self.destination.clear();
        self.destination.push_str(destination);
    }

    pub fn flights(&self) -> &FlightTable {
        &self.flights
    }

    #[cfg(test)]
    pub fn list(&self) -> List {
        self.list
    }

    fn reset(&mut self) {
        self.destination.clear();
        self.flights.clear();
        self.next = None;
        self.prev = None;
    }
}

/// Fixed set of schedule records split over a free list and an active list.
///
/// Records are never created or dropped after construction; `allocate` and
/// `release` only move them between the two lists. Both lists push at the
/// head, so the free list hands out the most recently released record first.
pub struct RecordPool {
    records: Vec<ScheduleRecord>,
    free_head: Option<RecordId>,
    active_head: Option<RecordId>,
}

impl RecordPool {
    pub fn new(size: usize, max_flights: usize) -> RecordPool {
        let mut pool = RecordPool {
            records: (0..size).map(|_| ScheduleRecord::new(max_flights)).collect(),
            free_head: None,
            active_head: None,
        };
        pool.initialize();
        pool
    }

    /// Resets every record and threads them all onto the free list in pool order.
    pub fn initialize(&mut self) {
        self.free_head = None;
        self.active_head = None;

        let len = self.records.len();
        for (i, record) in self.records.iter_mut().enumerate() {
            record.reset();
            record.list = List::Free;
            record.prev = i.checked_sub(1).map(RecordId);
            record.next = Some(i + 1).filter(|n| *n < len).map(RecordId);
        }
        if len > 0 {
            self.free_head = Some(RecordId(0));
        }

        self.assert_invariants();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, id: RecordId) -> &ScheduleRecord {
        &self.records[id.0]
    }

    pub fn get_mut(&mut self, id: RecordId) -> &mut ScheduleRecord {
        &mut self.records[id.0]
    }

    /// Moves the free head to the head of the active list.
    pub fn allocate(&mut self) -> Option<RecordId> {
        let id = self.free_head?;

        let next_free = self.records[id.0].next;
        self.free_head = next_free;
        if let Some(next) = next_free {
            self.records[next.0].prev = None;
        }

        let old_active = self.active_head;
        let record = &mut self.records[id.0];
        record.list = List::Active;
        record.prev = None;
        record.next = old_active;
        if let Some(head) = old_active {
            self.records[head.0].prev = Some(id);
        }
        self.active_head = Some(id);

        debug!(record = id.0, "allocated schedule record");
        self.assert_invariants();
        Some(id)
    }

    /// Splices `id` out of the active list, resets it and pushes it on the free list.
    pub fn release(&mut self, id: RecordId) {
        if self.records[id.0].list != List::Active {
            debug!(record = id.0, "ignoring release of a free record");
            return;
        }

        let (prev, next) = {
            let record = &self.records[id.0];
            (record.prev, record.next)
        };
        match prev {
            Some(prev) => self.records[prev.0].next = next,
            None => self.active_head = next,
        }
        if let Some(next) = next {
            self.records[next.0].prev = prev;
        }

        let old_free = self.free_head;
        let record = &mut self.records[id.0];
        record.reset();
        record.list = List::Free;
        record.next = old_free;
        if let Some(head) = old_free {
            self.records[head.0].prev = Some(id);
        }
        self.free_head = Some(id);

        debug!(record = id.0, "released schedule record");
        self.assert_invariants();
    }

    pub fn head(&self, list: List) -> Option<RecordId> {
        match list {
            List::Free => self.free_head,
            List::Active => self.active_head,
        }
    }

    /// Walks `list` from its head following the `next` links.
    pub fn iter(&self, list: List) -> Records<'_> {
        Records {
            pool: self,
            cursor: self.head(list),
        }
    }

    pub fn active(&self) -> Records<'_> {
        self.iter(List::Active)
    }

    #[cfg(test)]
    pub fn free(&self) -> Records<'_> {
        self.iter(List::Free)
    }

    /// Verifies list membership and link consistency of both lists.
    pub fn check_links(&self) -> Result<(), String> {
        let mut seen = vec![false; self.records.len()];

        for list in [List::Free, List::Active] {
            let mut prev: Option<RecordId> = None;
            let mut cursor = self.head(list);
            while let Some(id) = cursor {
                let record = self
                    .records
                    .get(id.0)
                    .ok_or_else(|| format!("{list:?} list links to missing record {}", id.0))?;
                if seen[id.0] {
                    return Err(format!("record {} reached twice", id.0));
                }
                seen[id.0] = true;
                if record.list != list {
                    return Err(format!(
                        "record {} is tagged {:?} but linked on {list:?}",
                        id.0, record.list
                    ));
                }
                if record.prev != prev {
                    return Err(format!("record {} has a stale back-link", id.0));
                }
                if list == List::Free
                    && (!record.destination.is_empty() || !record.flights.is_clear())
                {
                    return Err(format!("free record {} was not reset", id.0));
                }
                prev = Some(id);
                cursor = record.next;
            }
        }

        if let Some(lost) = seen.iter().position(|s| !s) {
            return Err(format!("record {lost} is on neither list"));
        }

        Ok(())
    }

    fn assert_invariants(&self) {
        debug_assert_eq!(
            Ok(()),
            self.check_links(),
            "free/active list invariant violated"
        );
    }
}

pub struct Records<'a> {
    pool: &'a RecordPool,
    cursor: Option<RecordId>,
}

impl<'a> Iterator for Records<'a> {
    type Item = (RecordId, &'a ScheduleRecord);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let record = &self.pool.records[id.0];
        self.cursor = record.next;
        Some((id, record))
    }
}
