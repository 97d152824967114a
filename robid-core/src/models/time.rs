use thiserror::Error;

/// A 1-based hour of the bidding horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[repr(transparent)]
pub struct Hour(pub u16);

/// A single dispatch interval: hour `t`, sub-interval `j`, both 1-based.
///
/// The derived ordering is hour-major, which is also the order in which every
/// index domain is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSlot {
    /// The hour this slot belongs to.
    pub hour: Hour,
    /// The 1-based sub-interval within the hour.
    pub interval: u16,
}

/// The error produced by [`Horizon::new`] for degenerate dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("horizon dimensions must be positive (got {hours} hours x {subintervals} sub-intervals)")]
pub struct HorizonError {
    /// The rejected hour count.
    pub hours: u16,
    /// The rejected per-hour sub-interval count.
    pub subintervals: u16,
}

/// The bidding horizon: `hours` hours, each split into `subintervals`
/// dispatch intervals of duration `1/subintervals` hours.
///
/// A day-ahead horizon is typically 24 hours of 12 five-minute intervals,
/// but both dimensions are free. Dimensions are validated at construction;
/// a zero in either place never reaches the formulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "HorizonDto", into = "HorizonDto")
)]
pub struct Horizon {
    hours: u16,
    subintervals: u16,
}

impl Horizon {
    /// Create a horizon, rejecting zero in either dimension.
    pub fn new(hours: u16, subintervals: u16) -> Result<Self, HorizonError> {
        if hours == 0 || subintervals == 0 {
            Err(HorizonError {
                hours,
                subintervals,
            })
        } else {
            Ok(Self {
                hours,
                subintervals,
            })
        }
    }

    /// The number of hours in the horizon.
    pub fn hour_count(&self) -> usize {
        self.hours as usize
    }

    /// The number of sub-intervals per hour.
    pub fn subinterval_count(&self) -> usize {
        self.subintervals as usize
    }

    /// The total number of dispatch slots, hours x sub-intervals.
    pub fn slot_count(&self) -> usize {
        self.hour_count() * self.subinterval_count()
    }

    /// The duration of one sub-interval in hours. This is the factor that
    /// converts a power schedule into an energy quantity.
    pub fn interval(&self) -> f64 {
        1.0 / self.subintervals as f64
    }

    /// Hours in ascending order.
    pub fn hours(self) -> impl Iterator<Item = Hour> {
        (1..=self.hours).map(Hour)
    }

    /// All slots in hour-major order.
    pub fn slots(self) -> impl Iterator<Item = TimeSlot> {
        (1..=self.hours).flat_map(move |t| {
            (1..=self.subintervals).map(move |j| TimeSlot {
                hour: Hour(t),
                interval: j,
            })
        })
    }

    /// The slots of a single hour in ascending sub-interval order.
    pub fn subintervals_of(self, hour: Hour) -> impl Iterator<Item = TimeSlot> {
        (1..=self.subintervals).map(move |j| TimeSlot {
            hour,
            interval: j,
        })
    }

    /// The first slot of the horizon, `(t=1, j=1)`.
    pub fn first_slot(&self) -> TimeSlot {
        TimeSlot {
            hour: Hour(1),
            interval: 1,
        }
    }

    /// The last slot of the horizon, `(t=H, j=N)`.
    pub fn last_slot(&self) -> TimeSlot {
        TimeSlot {
            hour: Hour(self.hours),
            interval: self.subintervals,
        }
    }

    /// The slot immediately before `slot`, or `None` at the horizon start.
    ///
    /// Interior slots chain within the hour; the first sub-interval of an
    /// hour chains to the last sub-interval of the previous hour. The very
    /// first slot has no predecessor: recursions anchor it to configuration
    /// instead.
    pub fn predecessor(&self, slot: TimeSlot) -> Option<TimeSlot> {
        if slot.interval > 1 {
            Some(TimeSlot {
                hour: slot.hour,
                interval: slot.interval - 1,
            })
        } else if slot.hour.0 > 1 {
            Some(TimeSlot {
                hour: Hour(slot.hour.0 - 1),
                interval: self.subintervals,
            })
        } else {
            None
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct HorizonDto {
    hours: u16,
    subintervals: u16,
}

impl TryFrom<HorizonDto> for Horizon {
    type Error = HorizonError;

    fn try_from(value: HorizonDto) -> Result<Self, Self::Error> {
        Horizon::new(value.hours, value.subintervals)
    }
}

impl From<Horizon> for HorizonDto {
    fn from(value: Horizon) -> Self {
        Self {
            hours: value.hours,
            subintervals: value.subintervals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(t: u16, j: u16) -> TimeSlot {
        TimeSlot {
            hour: Hour(t),
            interval: j,
        }
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(Horizon::new(0, 12).is_err());
        assert!(Horizon::new(24, 0).is_err());
        assert!(Horizon::new(0, 0).is_err());
        assert!(Horizon::new(1, 1).is_ok());
    }

    #[test]
    fn slot_order_is_hour_major() {
        let horizon = Horizon::new(2, 3).unwrap();
        let slots: Vec<_> = horizon.slots().collect();
        assert_eq!(slots.len(), 6);
        assert_eq!(slots[0], slot(1, 1));
        assert_eq!(slots[2], slot(1, 3));
        assert_eq!(slots[3], slot(2, 1));
        assert_eq!(slots[5], slot(2, 3));

        let mut sorted = slots.clone();
        sorted.sort();
        assert_eq!(slots, sorted);
    }

    #[test]
    fn predecessor_chain() {
        let horizon = Horizon::new(2, 3).unwrap();
        assert_eq!(horizon.predecessor(slot(1, 2)), Some(slot(1, 1)));
        assert_eq!(horizon.predecessor(slot(2, 1)), Some(slot(1, 3)));
        assert_eq!(horizon.predecessor(slot(1, 1)), None);
        assert_eq!(horizon.last_slot(), slot(2, 3));
    }

    #[test]
    fn interval_duration() {
        let horizon = Horizon::new(24, 12).unwrap();
        assert_eq!(horizon.interval(), 1.0 / 12.0);
        assert_eq!(horizon.slot_count(), 288);

        let hourly = Horizon::new(24, 1).unwrap();
        assert_eq!(hourly.interval(), 1.0);
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let ok: Horizon = serde_json::from_str(r#"{"hours":4,"subintervals":2}"#).unwrap();
        assert_eq!(ok, Horizon::new(4, 2).unwrap());

        let err = serde_json::from_str::<Horizon>(r#"{"hours":0,"subintervals":2}"#);
        assert!(err.is_err());
    }
}
