use std::fs::File;
use std::io::Read;

use failure::{Error, Fail};
use log::debug;
use serde_derive::Deserialize;

use voice_clones_core::{
  clones::{AllocationError, Placement},
  note::{Key, NoteInterval},
  time::{Division, Tempo, TicksTime},
  timeline::{intervals_from_events, TimelineEvent, Velocity},
};

#[derive(Debug, Fail)]
pub enum PerformanceError {
  #[fail(display = "Invalid division: {}", division)]
  InvalidDivision { division: u16 },

  #[fail(display = "Invalid tempo: {}", tempo)]
  InvalidTempo { tempo: Tempo },

  #[fail(display = "Failed to build channel {}: {}", name, cause)]
  Channel { name: String, cause: AllocationError },
}

fn default_velocity() -> Velocity {
  100
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(tag = "kind")]
pub enum EventDef {
  #[serde(rename = "on")]
  On {
    tick: u64,
    key: Key,
    #[serde(default = "default_velocity")]
    velocity: Velocity,
  },

  #[serde(rename = "off")]
  Off { tick: u64, key: Key },
}

impl From<EventDef> for TimelineEvent {
  fn from(item: EventDef) -> Self {
    match item {
      EventDef::On {
        tick,
        key,
        velocity,
      } => TimelineEvent::NoteOn {
        tick: TicksTime::new(tick),
        key,
        velocity,
      },
      EventDef::Off { tick, key } => TimelineEvent::NoteOff {
        tick: TicksTime::new(tick),
        key,
      },
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Channel {
  pub name: String,
  pub placement: Option<Placement>,
  #[serde(default)]
  pub events: Vec<EventDef>,
}

impl Channel {
  pub fn intervals(&self) -> Vec<NoteInterval> {
    let events: Vec<TimelineEvent> = self.events.iter().map(|event| (*event).into()).collect();
    intervals_from_events(&events)
  }
}

/// Already decoded timeline of a performance: one list of note events per channel.
#[derive(Deserialize, Debug, Clone)]
pub struct Performance {
  pub division: Division,
  #[serde(default)]
  pub tempo: Tempo,
  #[serde(default)]
  pub channels: Vec<Channel>,
}

impl Performance {
  pub fn from_file<'a, T>(path: T) -> Result<Performance, Error>
  where
    T: Into<&'a str>,
  {
    let mut content = String::new();
    let path_str = path.into();
    let mut file = File::open(path_str)?;
    file.read_to_string(&mut content)?;
    Self::from_str(content.as_str())
  }

  pub fn from_str<'a, T>(content: T) -> Result<Performance, Error>
  where
    T: Into<&'a str>,
  {
    let performance: Performance = toml::from_str(content.into())?;
    if performance.division.get_value() == 0 {
      return Err(PerformanceError::InvalidDivision { division: 0 }.into());
    }
    if performance.tempo.is_zero() {
      return Err(PerformanceError::InvalidTempo { tempo: performance.tempo }.into());
    }
    debug!(
      "Performance: division {}, {}, {} channels",
      performance.division.get_value(),
      performance.tempo,
      performance.channels.len()
    );
    Ok(performance)
  }

  ///! Tick of the last note end across all channels
  pub fn end(&self) -> TicksTime {
    self
      .channels
      .iter()
      .flat_map(|channel| channel.intervals())
      .map(|note| note.end())
      .max()
      .unwrap_or_else(TicksTime::zero)
  }
}
