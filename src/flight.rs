use crate::time::Time;

/// One entry of a city's flight table. `time == None` marks an empty slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightSlot {
    pub time: Option<Time>,
    pub available: u32,
    pub capacity: u32,
}

impl FlightSlot {
    pub fn new(time: Time, capacity: u32) -> FlightSlot {
        FlightSlot {
            time: Some(time),
            available: capacity,
            capacity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_none()
    }

    pub fn clear(&mut self) {
        *self = FlightSlot::default();
    }
}

/// Occupied slot as shown by the `l` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightInfo {
    pub time: Time,
    pub available: u32,
    pub capacity: u32,
}

impl FlightInfo {
    pub fn from_slot(slot: &FlightSlot) -> Option<FlightInfo> {
        slot.time.map(|time| FlightInfo {
            time,
            available: slot.available,
            capacity: slot.capacity,
        })
    }
}
