#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bus timing descriptor of a network (DBC `BS_` section).
///
/// All fields are `0` when the description does not declare a bit timing.
///
/// # Example
/// ```
/// use can_network::BitTiming;
///
/// let bt = BitTiming::create(500_000, 12, 34);
/// assert_eq!(bt.baudrate(), 500_000);
/// assert!(BitTiming::default().is_unset());
/// ```
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BitTiming {
    baudrate: u64,
    btr1: u64,
    btr2: u64,
}

impl BitTiming {
    pub fn create(baudrate: u64, btr1: u64, btr2: u64) -> Self {
        BitTiming {
            baudrate,
            btr1,
            btr2,
        }
    }

    /// Bus speed in bit/s.
    pub fn baudrate(&self) -> u64 {
        self.baudrate
    }

    /// Bus timing register 1.
    pub fn btr1(&self) -> u64 {
        self.btr1
    }

    /// Bus timing register 2.
    pub fn btr2(&self) -> u64 {
        self.btr2
    }

    /// `true` when no timing was declared.
    pub fn is_unset(&self) -> bool {
        *self == BitTiming::default()
    }
}
