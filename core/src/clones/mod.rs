pub mod allocator;
pub mod placement;
pub mod visual;

use std::fmt;

use log::trace;

use crate::note::NoteInterval;
use crate::time::TicksTime;

pub use self::allocator::{allocate, AllocationError};
pub use self::placement::{Placement, Transform};
pub use self::visual::{CloneVisual, Detached};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum CloneState {
  Idle,
  Sounding(NoteInterval),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Cue {
  Attack(NoteInterval),
  Release(NoteInterval),
}

/// One visual copy of a monophonic instrument and the notes it plays.
///
/// Notes are kept in chronological order and never overlap, so at any tick at
/// most one of them is sounding.
pub struct VoiceClone {
  index: usize,
  notes: Vec<NoteInterval>,
  placement: Placement,
  visual: Box<dyn CloneVisual>,

  state: CloneState,
  cursor: usize,
  last_tick: Option<TicksTime>,
}

impl VoiceClone {
  pub(crate) fn new(index: usize) -> VoiceClone {
    VoiceClone {
      index,
      notes: Vec::new(),
      placement: Placement::default(),
      visual: Box::new(Detached),

      state: CloneState::Idle,
      cursor: 0,
      last_tick: None,
    }
  }

  ///! Append a note, which must start after the previous one ends plus the grace window
  pub(crate) fn assign(&mut self, note: NoteInterval, grace: TicksTime) {
    if let Some(last) = self.notes.last() {
      assert!(
        last.end() + grace <= note.start(),
        "clone {} would overlap {} with {} (grace {})",
        self.index,
        last,
        note,
        grace
      );
    }
    self.notes.push(note);
  }

  pub fn attach(&mut self, visual: Box<dyn CloneVisual>, placement: Placement) {
    self.visual = visual;
    self.placement = placement;
  }

  pub fn index(&self) -> usize {
    self.index
  }

  pub fn assigned_intervals(&self) -> &[NoteInterval] {
    self.notes.as_slice()
  }

  pub fn state(&self) -> &CloneState {
    &self.state
  }

  pub fn is_sounding(&self) -> bool {
    self.state != CloneState::Idle
  }

  /// The first clone keeps the resting pose on screen, the rest only show up while playing.
  pub fn is_visible(&self) -> bool {
    self.index == 0 || self.is_sounding()
  }

  pub fn position_offset(&self) -> Transform {
    self.placement.offset(self.index)
  }

  pub fn tick(&mut self, tick: TicksTime, delta: f32) -> Vec<Cue> {
    let next_state = self.state_at(tick);

    let mut cues = Vec::new();
    if next_state != self.state {
      if let CloneState::Sounding(note) = self.state {
        cues.push(Cue::Release(note));
      }
      if let CloneState::Sounding(note) = next_state {
        cues.push(Cue::Attack(note));
      }
      self.state = next_state;
    }

    let offset = self.position_offset();
    let visible = self.is_visible();
    self.visual.set_offset(offset);
    self.visual.set_visible(visible);
    for cue in cues.iter() {
      match cue {
        Cue::Attack(note) => self.visual.attack(note),
        Cue::Release(note) => self.visual.release(note),
      }
    }
    self.visual.animate(&self.state, delta);

    cues
  }

  fn state_at(&mut self, tick: TicksTime) -> CloneState {
    match self.last_tick {
      Some(last_tick) if tick < last_tick => {
        trace!("Clone {} seeking back from {} to {}", self.index, last_tick, tick);
        self.cursor = self.notes.partition_point(|note| note.end() <= tick);
      }
      _ => {
        while self.cursor < self.notes.len() && self.notes[self.cursor].end() <= tick {
          self.cursor += 1;
        }
      }
    }
    self.last_tick = Some(tick);

    match self.notes.get(self.cursor) {
      Some(note) if note.contains(tick) => CloneState::Sounding(*note),
      _ => CloneState::Idle,
    }
  }
}

impl fmt::Debug for VoiceClone {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("VoiceClone")
      .field("index", &self.index)
      .field("notes", &self.notes)
      .field("state", &self.state)
      .finish()
  }
}
