use crate::clones::{placement::Transform, CloneState};
use crate::note::NoteInterval;

/// Handle to the rendered copy of an instrument.
///
/// The core only positions it and reports discrete cues; everything about
/// meshes, materials or scene graphs stays on the other side of this trait.
pub trait CloneVisual {
  fn set_offset(&mut self, offset: Transform);
  fn set_visible(&mut self, visible: bool);
  fn attack(&mut self, note: &NoteInterval);
  fn release(&mut self, note: &NoteInterval);

  fn animate(&mut self, _state: &CloneState, _delta: f32) {}
}

/// Visual for clones that are not attached to any scene.
pub struct Detached;

impl CloneVisual for Detached {
  fn set_offset(&mut self, _offset: Transform) {}
  fn set_visible(&mut self, _visible: bool) {}
  fn attack(&mut self, _note: &NoteInterval) {}
  fn release(&mut self, _note: &NoteInterval) {}
}
