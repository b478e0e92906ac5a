use crate::error::ScheduleError;
use crate::flight::{FlightInfo, FlightSlot};
use crate::time::Time;
use tracing::debug;

/// Fixed number of flight slots for one destination, kept sorted by time.
///
/// Empty slots carry no time and sort ahead of every occupied slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightTable {
    slots: Vec<FlightSlot>,
}

impl FlightTable {
    pub fn new(max_flights: usize) -> FlightTable {
        FlightTable {
            slots: vec![FlightSlot::default(); max_flights],
        }
    }

    #[cfg(test)]
    pub fn slots(&self) -> &[FlightSlot] {
        &self.slots
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(FlightSlot::clear);
    }

    pub fn is_clear(&self) -> bool {
        self.slots.iter().all(|s| *s == FlightSlot::default())
    }

    /// Stores a new flight in the first slot.
    ///
    /// Only slot 0 decides whether the table is full: since empty slots sort
    /// first, an occupied slot 0 means no slot is free.
    pub fn add_flight(&mut self, time: i64, capacity: i64) -> Result<(), ScheduleError> {
        let time = Time::try_from(time)?;
        let capacity = u32::try_from(capacity)
            .ok()
            .filter(|c| *c > 0)
            .ok_or(ScheduleError::InvalidCapacity)?;

        let first = self
            .slots
            .first_mut()
            .filter(|slot| slot.is_empty())
            .ok_or(ScheduleError::FlightsFull)?;
        *first = FlightSlot::new(time, capacity);
        self.sort();

        debug!(%time, capacity, "added flight");
        Ok(())
    }

    pub fn remove_flight(&mut self, time: i64) -> Result<(), ScheduleError> {
        let time = Time::try_from(time)?;
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.time == Some(time))
            .ok_or(ScheduleError::FlightNotFound)?;
        slot.clear();
        self.sort();

        debug!(%time, "removed flight");
        Ok(())
    }

    /// Takes a seat on the first slot, in slot order, that departs no later
    /// than `requested` and still has a seat. Returns that flight's time.
    pub fn schedule_seat(&mut self, requested: i64) -> Result<Time, ScheduleError> {
        let requested = Time::try_from(requested)?;
        let slot = self
            .slots
            .iter_mut()
            .filter(|slot| slot.time.is_some_and(|t| requested.since(t) >= 0))
            .find(|slot| slot.available > 0)
            .ok_or(ScheduleError::SeatsUnavailable)?;
        slot.available -= 1;

        let booked = slot.time.unwrap_or(requested);
        debug!(%requested, %booked, available = slot.available, "scheduled seat");
        Ok(booked)
    }

    pub fn unschedule_seat(&mut self, time: i64) -> Result<(), ScheduleError> {
        let time = Time::try_from(time)?;
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.time == Some(time))
            .ok_or(ScheduleError::FlightNotFound)?;
        if slot.available >= slot.capacity {
            return Err(ScheduleError::SeatsAlreadyFull);
        }
        slot.available += 1;

        debug!(%time, available = slot.available, "unscheduled seat");
        Ok(())
    }

    /// Occupied slots in ascending time order.
    pub fn list(&self) -> impl Iterator<Item = FlightInfo> + '_ {
        self.slots.iter().filter_map(FlightInfo::from_slot)
    }

    fn sort(&mut self) {
        self.slots.sort_by_key(|slot| slot.time);
    }
}
