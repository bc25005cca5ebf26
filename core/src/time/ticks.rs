use std::{
  cmp::min,
  fmt,
  ops::{Add, AddAssign, Div, Sub, SubAssign},
};

use serde_derive::Deserialize;

use crate::time::{clock, ClockTime, Division, Tempo};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TicksTime(u64);

impl TicksTime {
  pub fn new(ticks: u64) -> TicksTime {
    TicksTime(ticks)
  }

  pub fn zero() -> TicksTime {
    TicksTime(0)
  }

  pub fn per_minute(division: Division, tempo: Tempo) -> TicksTime {
    TicksTime::new(u64::from(division) * u64::from(tempo))
  }

  pub fn to_clock(&self, division: Division, tempo: Tempo) -> ClockTime {
    let ticks_per_minute = TicksTime::per_minute(division, tempo).0;
    if ticks_per_minute == 0 {
      return ClockTime::zero();
    }
    let clock_units =
      u128::from(self.0) * u128::from(clock::UNITS_PER_MINUTE) / u128::from(ticks_per_minute);
    ClockTime::new(clock_units as u64)
  }
}

impl fmt::Display for TicksTime {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl Add for TicksTime {
  type Output = TicksTime;
  fn add(self, rhs: TicksTime) -> Self {
    TicksTime::new(self.0.saturating_add(rhs.0))
  }
}

impl AddAssign for TicksTime {
  fn add_assign(&mut self, rhs: TicksTime) {
    *self = *self + rhs;
  }
}

impl Sub for TicksTime {
  type Output = TicksTime;
  fn sub(self, rhs: TicksTime) -> Self {
    TicksTime::new(self.0 - min(self.0, rhs.0))
  }
}

impl SubAssign for TicksTime {
  fn sub_assign(&mut self, rhs: TicksTime) {
    *self = *self - rhs;
  }
}

impl Div<u64> for TicksTime {
  type Output = TicksTime;
  fn div(self, rhs: u64) -> Self {
    TicksTime::new(self.0.checked_div(rhs).unwrap_or(0))
  }
}

impl From<u64> for TicksTime {
  fn from(item: u64) -> Self {
    TicksTime(item)
  }
}

impl From<TicksTime> for f64 {
  fn from(item: TicksTime) -> Self {
    item.0 as f64
  }
}

impl From<TicksTime> for u64 {
  fn from(item: TicksTime) -> Self {
    item.0
  }
}
