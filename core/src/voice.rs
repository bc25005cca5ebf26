use std::fmt;

use log::{debug, info, trace};
use uuid::Uuid;

use crate::clones::{allocate, AllocationError, CloneVisual, Cue, Placement, VoiceClone};
use crate::note::NoteInterval;
use crate::time::{Division, TicksTime};

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct VoiceId(Uuid);

impl VoiceId {
  pub fn new() -> VoiceId {
    VoiceId(Uuid::new_v4())
  }
}

impl fmt::Display for VoiceId {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceSettings {
  pub grace: TicksTime,
  pub placement: Placement,
  pub visibility_margin: TicksTime,
}

impl Default for VoiceSettings {
  fn default() -> VoiceSettings {
    let division = Division::default();
    VoiceSettings {
      grace: division.grace(4),
      placement: Placement::default(),
      visibility_margin: division.quarter(),
    }
  }
}

/// Controller for an instrument that can only sound one note at a time.
///
/// Overlapping notes of the channel are spread over as many clones as needed,
/// decided once when the voice is created. Every frame the voice forwards the
/// playback tick to all its clones in index order.
pub struct MonophonicVoice {
  id: VoiceId,
  name: String,
  intervals: Vec<NoteInterval>,
  clones: Vec<VoiceClone>,

  // merged [start, end) tick ranges where the instrument is on screen
  windows: Vec<(TicksTime, TicksTime)>,

  current_tick: TicksTime,
  visible: bool,
}

impl MonophonicVoice {
  pub fn new<T, F>(
    name: T,
    intervals: Vec<NoteInterval>,
    settings: &VoiceSettings,
    mut visuals: F,
  ) -> Result<MonophonicVoice, AllocationError>
  where
    T: Into<String>,
    F: FnMut(usize) -> Box<dyn CloneVisual>,
  {
    let id = VoiceId::new();
    let name = name.into();

    let mut clones = allocate(&intervals, settings.grace)?;
    for clone in clones.iter_mut() {
      clone.attach(visuals(clone.index()), settings.placement);
    }

    let mut intervals = intervals;
    intervals.sort();
    let windows = Self::visibility_windows(&intervals, settings.visibility_margin);

    info!(
      "Voice {} [{}]: {} notes over {} clones",
      name,
      id,
      intervals.len(),
      clones.len()
    );

    Ok(MonophonicVoice {
      id,
      name,
      intervals,
      clones,
      windows,
      current_tick: TicksTime::zero(),
      visible: false,
    })
  }

  pub fn id(&self) -> VoiceId {
    self.id
  }

  pub fn name(&self) -> &str {
    self.name.as_str()
  }

  pub fn intervals(&self) -> &[NoteInterval] {
    self.intervals.as_slice()
  }

  pub fn clones(&self) -> &[VoiceClone] {
    self.clones.as_slice()
  }

  pub fn current_tick(&self) -> TicksTime {
    self.current_tick
  }

  pub fn is_visible(&self) -> bool {
    self.visible
  }

  pub fn sounding<'a>(&'a self) -> impl Iterator<Item = usize> + 'a {
    self
      .clones
      .iter()
      .filter(|clone| clone.is_sounding())
      .map(|clone| clone.index())
  }

  pub fn tick(&mut self, tick: TicksTime, delta: f32) -> Vec<(usize, Cue)> {
    self.current_tick = tick;

    let visible = self.visible_at(tick);
    if visible != self.visible {
      let shown = if visible { "shown" } else { "hidden" };
      debug!("Voice {} {} at {}", self.name, shown, tick);
      self.visible = visible;
    }

    let mut cues = Vec::new();
    for clone in self.clones.iter_mut() {
      for cue in clone.tick(tick, delta) {
        trace!("Voice {} clone {}: {:?}", self.name, clone.index(), cue);
        cues.push((clone.index(), cue));
      }
    }
    cues
  }

  fn visible_at(&self, tick: TicksTime) -> bool {
    let index = self.windows.partition_point(|(_, end)| *end <= tick);
    self
      .windows
      .get(index)
      .map(|(start, _)| *start <= tick)
      .unwrap_or(false)
  }

  fn visibility_windows(sorted: &[NoteInterval], margin: TicksTime) -> Vec<(TicksTime, TicksTime)> {
    let mut windows: Vec<(TicksTime, TicksTime)> = Vec::new();
    for note in sorted {
      let start = note.start() - margin;
      let end = note.end() + margin;
      if start == end {
        continue;
      }
      if let Some(last) = windows.last_mut() {
        if start <= last.1 {
          last.1 = last.1.max(end);
          continue;
        }
      }
      windows.push((start, end));
    }
    windows
  }
}
