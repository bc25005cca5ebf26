use std::ops::{Add, AddAssign, Sub};

use super::{Division, Tempo, TicksTime};

pub const NANOS_PER_SECOND: u64 = 1_000_000_000;

pub type UnitType = u64;
pub const UNITS_PER_SECOND: UnitType = NANOS_PER_SECOND as UnitType;

const SECONDS_PER_MINUTE: u64 = 60;
pub const UNITS_PER_MINUTE: u64 = UNITS_PER_SECOND * SECONDS_PER_MINUTE;

///! Playback time elapsed since the start of the performance
#[derive(Debug, PartialOrd, PartialEq, Clone, Copy)]
pub struct ClockTime(UnitType);

impl ClockTime {
  pub fn zero() -> ClockTime {
    ClockTime(0)
  }

  pub fn new(units: UnitType) -> ClockTime {
    ClockTime(units)
  }

  pub fn from_seconds(seconds: f64) -> ClockTime {
    ClockTime((seconds.max(0.0) * UNITS_PER_SECOND as f64).round() as UnitType)
  }

  pub fn units(&self) -> UnitType {
    self.0
  }

  pub fn to_seconds(&self) -> f64 {
    self.0 as f64 / UNITS_PER_SECOND as f64
  }

  pub fn to_ticks(&self, division: Division, tempo: Tempo) -> TicksTime {
    let ticks_per_minute = u64::from(TicksTime::per_minute(division, tempo));
    let ticks = u128::from(self.0) * u128::from(ticks_per_minute) / u128::from(UNITS_PER_MINUTE);
    TicksTime::new(ticks as u64)
  }
}

impl Add for ClockTime {
  type Output = ClockTime;

  fn add(self, rhs: ClockTime) -> ClockTime {
    ClockTime(self.0.saturating_add(rhs.0))
  }
}

impl AddAssign for ClockTime {
  fn add_assign(&mut self, rhs: ClockTime) {
    *self = *self + rhs;
  }
}

impl Sub for ClockTime {
  type Output = ClockTime;

  fn sub(self, rhs: ClockTime) -> ClockTime {
    ClockTime(self.0.saturating_sub(rhs.0))
  }
}

#[cfg(test)]
mod test {
  use super::{ClockTime, Division, Tempo, TicksTime};

  #[test]
  pub fn clock_time_new() {
    let time = ClockTime::new(15);
    assert_eq!(time.units(), 15);
  }

  #[test]
  pub fn clock_time_from_seconds() {
    let time = ClockTime::from_seconds(1.5);
    assert_eq!(time.units(), 1_500_000_000);
    assert_eq!(time.to_seconds(), 1.5);
  }

  #[test]
  pub fn clock_time_from_negative_seconds() {
    assert_eq!(ClockTime::from_seconds(-2.0), ClockTime::zero());
  }

  #[test]
  pub fn clock_time_add() {
    let mut time = ClockTime::new(15) + ClockTime::new(5);
    assert_eq!(time, ClockTime::new(20));
    time += ClockTime::new(5);
    assert_eq!(time, ClockTime::new(25));
  }

  #[test]
  pub fn clock_time_sub() {
    assert_eq!(ClockTime::new(15) - ClockTime::new(5), ClockTime::new(10));
    assert_eq!(ClockTime::new(5) - ClockTime::new(15), ClockTime::zero());
  }

  #[test]
  pub fn clock_time_to_ticks() {
    // 120 bpm: one quarter note every half second
    let division = Division::new(480);
    let tempo = Tempo::new(120);
    assert_eq!(ClockTime::from_seconds(0.5).to_ticks(division, tempo), TicksTime::new(480));
    assert_eq!(ClockTime::from_seconds(2.0).to_ticks(division, tempo), TicksTime::new(1920));
  }

  #[test]
  pub fn clock_time_to_ticks_rounds_down() {
    let division = Division::new(480);
    let tempo = Tempo::new(120);
    let just_before = ClockTime::from_seconds(0.5) - ClockTime::new(1);
    assert_eq!(just_before.to_ticks(division, tempo), TicksTime::new(479));
  }
}
