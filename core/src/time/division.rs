use serde_derive::Deserialize;

use crate::time::TicksTime;

/// Ticks per quarter note, as declared by the performance source.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Division(u16);

impl Division {
  pub fn new(ticks_per_quarter: u16) -> Division {
    Division(ticks_per_quarter)
  }

  pub fn get_value(&self) -> u16 {
    self.0
  }

  pub fn quarter(&self) -> TicksTime {
    TicksTime::new(u64::from(self.0))
  }

  ///! Grace window between two notes on the same clone: `1 / divisor` of a quarter note
  pub fn grace(&self, divisor: u64) -> TicksTime {
    self.quarter() / divisor
  }
}

impl Default for Division {
  fn default() -> Division {
    Division(480)
  }
}

impl From<Division> for u64 {
  fn from(item: Division) -> Self {
    u64::from(item.0)
  }
}
