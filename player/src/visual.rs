use log::{debug, info, trace};

use voice_clones_core::{
  clones::{CloneState, CloneVisual, Transform},
  note::NoteInterval,
};

/// Stand-in for a rendered clone: reports what a scene would show.
pub struct LoggingVisual {
  voice: String,
  index: usize,
  offset: Option<Transform>,
  visible: Option<bool>,
}

impl LoggingVisual {
  pub fn new<T>(voice: T, index: usize) -> LoggingVisual
  where
    T: Into<String>,
  {
    LoggingVisual {
      voice: voice.into(),
      index,
      offset: None,
      visible: None,
    }
  }
}

impl CloneVisual for LoggingVisual {
  fn set_offset(&mut self, offset: Transform) {
    if self.offset != Some(offset) {
      trace!(
        "{}#{} offset {:?} rotation {}",
        self.voice,
        self.index,
        offset.translation,
        offset.rotation_y
      );
      self.offset = Some(offset);
    }
  }

  fn set_visible(&mut self, visible: bool) {
    if self.visible != Some(visible) {
      debug!("{}#{} {}", self.voice, self.index, if visible { "shown" } else { "hidden" });
      self.visible = Some(visible);
    }
  }

  fn attack(&mut self, note: &NoteInterval) {
    info!("{}#{} attack {}", self.voice, self.index, note);
  }

  fn release(&mut self, note: &NoteInterval) {
    info!("{}#{} release {}", self.voice, self.index, note);
  }

  fn animate(&mut self, state: &CloneState, delta: f32) {
    if let CloneState::Sounding(note) = state {
      trace!("{}#{} holding key {} ({:.3}s)", self.voice, self.index, note.key(), delta);
    }
  }
}
