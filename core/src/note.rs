use std::fmt;

use crate::time::TicksTime;

pub type Key = u8;

/// One sounded note over the half-open tick range `[start, end)`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct NoteInterval {
  start: TicksTime,
  end: TicksTime,
  key: Key,
}

impl NoteInterval {
  pub fn new(start: u64, end: u64, key: Key) -> NoteInterval {
    NoteInterval::between(TicksTime::new(start), TicksTime::new(end), key)
  }

  pub fn between(start: TicksTime, end: TicksTime, key: Key) -> NoteInterval {
    NoteInterval { start, end, key }
  }

  pub fn start(&self) -> TicksTime {
    self.start
  }

  pub fn end(&self) -> TicksTime {
    self.end
  }

  pub fn key(&self) -> Key {
    self.key
  }

  pub fn length(&self) -> TicksTime {
    self.end - self.start
  }

  pub fn contains(&self, tick: TicksTime) -> bool {
    self.start <= tick && tick < self.end
  }

  pub fn is_malformed(&self) -> bool {
    self.end < self.start
  }
}

impl fmt::Display for NoteInterval {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "[{}, {}) key {}", self.start, self.end, self.key)
  }
}
