use std::fmt;

use serde_derive::Deserialize;

use crate::time::{clock, ClockTime};

const MICROS_PER_MINUTE: u32 = 60_000_000;

/// Quarter notes per minute
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Tempo(u16);

impl Tempo {
  pub fn new(bpm: u16) -> Tempo {
    Tempo(bpm)
  }

  ///! From a MIDI set-tempo value (microseconds per quarter note), rounded to the nearest bpm
  pub fn from_micros_per_quarter(micros: u32) -> Tempo {
    if micros == 0 {
      return Tempo(u16::max_value());
    }
    let bpm = (MICROS_PER_MINUTE + micros / 2) / micros;
    Tempo(bpm.min(u32::from(u16::max_value())) as u16)
  }

  pub fn get_value(&self) -> u16 {
    self.0
  }

  pub fn is_zero(&self) -> bool {
    self.0 == 0
  }

  pub fn quarter_duration(&self) -> ClockTime {
    match self.0 {
      0 => ClockTime::zero(),
      bpm => ClockTime::new(clock::UNITS_PER_MINUTE / u64::from(bpm)),
    }
  }
}

impl Default for Tempo {
  fn default() -> Tempo {
    Tempo(120)
  }
}

impl fmt::Display for Tempo {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{} bpm", self.0)
  }
}

impl From<Tempo> for u64 {
  fn from(item: Tempo) -> Self {
    u64::from(item.0)
  }
}
