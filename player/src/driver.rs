use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use voice_clones_core::{
  time::{ClockTime, Division, Tempo, TicksTime},
  voice::MonophonicVoice,
};

use crate::config::{Playback, Seek};

#[derive(Debug, Default, PartialEq)]
pub struct Summary {
  pub frames: u64,
  pub cues: u64,
  pub max_sounding: usize,
}

/// Advances every voice once per frame, converting playback time into ticks.
pub struct FrameDriver {
  division: Division,
  tempo: Tempo,
  playback: Playback,
  voices: Vec<MonophonicVoice>,
}

impl FrameDriver {
  pub fn new(
    division: Division,
    tempo: Tempo,
    playback: Playback,
    voices: Vec<MonophonicVoice>,
  ) -> FrameDriver {
    FrameDriver {
      division,
      tempo,
      playback,
      voices,
    }
  }

  pub fn voices(&self) -> &[MonophonicVoice] {
    self.voices.as_slice()
  }

  pub fn run(&mut self, end: TicksTime) -> Summary {
    let frame_rate = self.playback.frame_rate.max(1);
    let delta = 1.0 / frame_rate as f64;
    let speed = if self.playback.has_valid_speed() {
      self.playback.speed
    } else {
      warn!("Invalid playback speed {}, playing at 1.0", self.playback.speed);
      1.0
    };
    let frame_duration = ClockTime::from_seconds(delta * speed);
    let stop = end.to_clock(self.division, self.tempo)
      + ClockTime::from_seconds(self.playback.tail_seconds);
    let mut pending_seek = self.playback.seek.clone();

    info!(
      "Playing {} voices at {} fps, {} ({:.3}s per quarter), until {:.2}s ...",
      self.voices.len(),
      frame_rate,
      self.tempo,
      self.tempo.quarter_duration().to_seconds(),
      stop.to_seconds()
    );

    let mut summary = Summary::default();
    let mut time = ClockTime::zero();
    while time <= stop {
      let tick = time.to_ticks(self.division, self.tempo);
      for voice in self.voices.iter_mut() {
        summary.cues += voice.tick(tick, delta as f32).len() as u64;
        summary.max_sounding = summary.max_sounding.max(voice.sounding().count());
      }
      summary.frames += 1;

      if self.playback.realtime {
        thread::sleep(Duration::from_secs_f64(delta));
      }

      time = match pending_seek.take() {
        Some(Seek { at_seconds, to_seconds }) if time.to_seconds() >= at_seconds => {
          debug!("Seeking from {:.2}s to {:.2}s", time.to_seconds(), to_seconds);
          ClockTime::from_seconds(to_seconds)
        }
        other => {
          pending_seek = other;
          time + frame_duration
        }
      };
    }

    info!(
      "Played {} frames with {} cues, up to {} clones sounding at once",
      summary.frames, summary.cues, summary.max_sounding
    );
    summary
  }
}
