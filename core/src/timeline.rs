use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::note::{Key, NoteInterval};
use crate::time::TicksTime;

pub type Velocity = u8;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TimelineEvent {
  NoteOn {
    tick: TicksTime,
    key: Key,
    velocity: Velocity,
  },

  NoteOff {
    tick: TicksTime,
    key: Key,
  },
}

impl TimelineEvent {
  pub fn tick(&self) -> TicksTime {
    match *self {
      TimelineEvent::NoteOn { tick, .. } => tick,
      TimelineEvent::NoteOff { tick, .. } => tick,
    }
  }
}

/// Pairs note-on and note-off events of one channel into note intervals.
///
/// Every note-off closes the oldest pending note-on for the same key. A note-on
/// with zero velocity counts as a note-off. Notes still pending when the events
/// run out are closed at the last event tick.
pub fn intervals_from_events<'a, I>(events: I) -> Vec<NoteInterval>
where
  I: IntoIterator<Item = &'a TimelineEvent>,
{
  let mut events: Vec<&TimelineEvent> = events.into_iter().collect();
  events.sort_by_key(|event| event.tick());

  let mut pending: HashMap<Key, VecDeque<TicksTime>> = HashMap::new();
  let mut intervals = Vec::with_capacity(events.len() / 2);
  let mut last_tick = TicksTime::zero();

  for event in events {
    last_tick = event.tick();
    match *event {
      TimelineEvent::NoteOn { tick, key, velocity } if velocity > 0 => {
        pending.entry(key).or_insert_with(VecDeque::new).push_back(tick);
      }
      TimelineEvent::NoteOn { tick, key, .. } | TimelineEvent::NoteOff { tick, key } => {
        match pending.get_mut(&key).and_then(|starts| starts.pop_front()) {
          Some(start) => intervals.push(NoteInterval::between(start, tick, key)),
          None => debug!("Ignoring note-off without note-on: key {} at {}", key, tick),
        }
      }
    }
  }

  for (key, starts) in pending {
    for start in starts {
      debug!("Closing hanging note: key {} at {}", key, start);
      intervals.push(NoteInterval::between(start, last_tick, key));
    }
  }

  intervals.sort();
  intervals
}
