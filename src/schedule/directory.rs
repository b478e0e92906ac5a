use crate::error::ScheduleError;
use crate::flight::FlightInfo;
use crate::schedule::pool::{RecordId, RecordPool, ScheduleRecord};
use crate::schedule::slots::FlightTable;
use crate::time::Time;
use tracing::debug;

/// Destination-keyed view over the active records of a [`RecordPool`].
pub struct Directory {
    pool: RecordPool,
}

impl Directory {
    pub fn new(pool_size: usize, max_flights: usize) -> Directory {
        Directory {
            pool: RecordPool::new(pool_size, max_flights),
        }
    }

    #[cfg(test)]
    pub fn pool(&self) -> &RecordPool {
        &self.pool
    }

    pub fn find(&self, city: &str) -> Option<RecordId> {
        self.pool
            .active()
            .find(|(_, record)| record.destination() == city)
            .map(|(id, _)| id)
    }

    #[cfg(test)]
    pub fn get(&self, city: &str) -> Option<&ScheduleRecord> {
        self.find(city).map(|id| self.pool.get(id))
    }

    /// Claims a free record for `city`. The empty name is what a free record
    /// holds, so it is never a valid key.
    pub fn add(&mut self, city: &str) -> Result<RecordId, ScheduleError> {
        if city.is_empty() {
            return Err(ScheduleError::MissingCity);
        }
        if self.find(city).is_some() {
            return Err(ScheduleError::DuplicateKey(city.to_string()));
        }
        let id = self.pool.allocate().ok_or(ScheduleError::PoolExhausted)?;
        self.pool.get_mut(id).set_destination(city);

        debug!(city, record = id.index(), "added schedule");
        debug_assert_eq!(Ok(()), self.check_keys(), "destination invariant violated");
        Ok(id)
    }

    pub fn remove(&mut self, city: &str) -> Result<(), ScheduleError> {
        let id = self.lookup(city)?;
        self.pool.release(id);

        debug!(city, record = id.index(), "removed schedule");
        Ok(())
    }

    /// Active destinations, most recently added first.
    pub fn list_all(&self) -> impl Iterator<Item = &ScheduleRecord> + '_ {
        self.pool.active().map(|(_, record)| record)
    }

    pub fn list(&self, city: &str) -> Result<Vec<FlightInfo>, ScheduleError> {
        let id = self.lookup(city)?;
        Ok(self.pool.get(id).flights().list().collect())
    }

    pub fn add_flight(
        &mut self,
        city: &str,
        time: i64,
        capacity: i64,
    ) -> Result<(), ScheduleError> {
        self.flights_mut(city)?.add_flight(time, capacity)
    }

    pub fn remove_flight(&mut self, city: &str, time: i64) -> Result<(), ScheduleError> {
        self.flights_mut(city)?.remove_flight(time)
    }

    pub fn schedule_seat(&mut self, city: &str, time: i64) -> Result<Time, ScheduleError> {
        self.flights_mut(city)?.schedule_seat(time)
    }

    pub fn unschedule_seat(&mut self, city: &str, time: i64) -> Result<(), ScheduleError> {
        self.flights_mut(city)?.unschedule_seat(time)
    }

    /// Every active record carries a non-empty destination, and no two share one.
    pub fn check_keys(&self) -> Result<(), String> {
        let mut keys = self.list_all().map(ScheduleRecord::destination).collect::<Vec<_>>();
        if keys.iter().any(|key| key.is_empty()) {
            return Err("active record without a destination".to_string());
        }
        keys.sort_unstable();
        if let Some(pair) = keys.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(format!("destination {} is active twice", pair[0]));
        }
        Ok(())
    }

    fn lookup(&self, city: &str) -> Result<RecordId, ScheduleError> {
        self.find(city)
            .ok_or_else(|| ScheduleError::UnknownCity(city.to_string()))
    }

    fn flights_mut(&mut self, city: &str) -> Result<&mut FlightTable, ScheduleError> {
        let id = self.lookup(city)?;
        Ok(&mut self.pool.get_mut(id).flights)
    }
}
