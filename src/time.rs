use crate::error::ScheduleError;

/// Departure time as minutes past midnight.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Hash, PartialOrd)]
pub struct Time(u16);

impl Time {
    pub const MIN: Time = Time(0);
    pub const MAX: Time = Time(24 * 60 - 1);

    /// `HH:MM` rendering used by the table view.
    pub fn clock(self) -> String {
        format!("{:02}:{:02}", self.0 / 60, self.0 % 60)
    }

    /// Signed distance from `self` back to `earlier`.
    pub fn since(self, earlier: Time) -> i32 {
        i32::from(self.0) - i32::from(earlier.0)
    }
}

impl TryFrom<i64> for Time {
    type Error = ScheduleError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .ok()
            .map(Time)
            .filter(|t| (Time::MIN..=Time::MAX).contains(t))
            .ok_or(ScheduleError::InvalidTime)
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_whole_day() {
        assert_eq!(Ok(Time(0)), Time::try_from(0i64));
        assert_eq!(Ok(Time(1439)), Time::try_from(1439i64));
    }

    #[test]
    fn test_rejects_empty_marker_and_overflow() {
        assert_eq!(Err(ScheduleError::InvalidTime), Time::try_from(-1i64));
        assert_eq!(Err(ScheduleError::InvalidTime), Time::try_from(1440i64));
        assert_eq!(Err(ScheduleError::InvalidTime), Time::try_from(i64::MAX));
    }

    #[test]
    fn test_clock_and_distance() {
        let six = Time::try_from(360i64).unwrap();
        let noon = Time::try_from(720i64).unwrap();
        assert_eq!("06:00", six.clock());
        assert_eq!("360", six.to_string());
        assert_eq!(360, noon.since(six));
        assert_eq!(-360, six.since(noon));
    }
}
