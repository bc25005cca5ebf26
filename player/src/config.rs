use failure::{Error, Fail};

use serde_derive::Deserialize;

use std::fs::File;
use std::io::Read;

#[derive(Debug, Fail)]
pub enum ConfigError {
  #[fail(display = "Invalid playback speed: {}", speed)]
  InvalidSpeed { speed: f64 },
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
  pub playback: Playback,
}

impl Default for Config {
  fn default() -> Config {
    Config {
      playback: Playback::default(),
    }
  }
}

impl Config {
  pub fn from_file<'a, T>(path: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let mut content = String::new();
    let path_str = path.into();
    let mut file = File::open(path_str)?;
    file.read_to_string(&mut content)?;
    Self::from_str(content.as_str())
  }

  pub fn from_str<'a, T>(content: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let config: Config = toml::from_str(content.into())?;
    if !config.playback.has_valid_speed() {
      return Err(
        ConfigError::InvalidSpeed {
          speed: config.playback.speed,
        }
        .into(),
      );
    }
    Ok(config)
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Seek {
  pub at_seconds: f64,
  pub to_seconds: f64,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Playback {
  pub frame_rate: u32,
  pub speed: f64,
  /// Sleep between frames instead of simulating them as fast as possible
  pub realtime: bool,
  /// Keep running after the last note ends
  pub tail_seconds: f64,
  pub seek: Option<Seek>,
}

impl Playback {
  pub fn has_valid_speed(&self) -> bool {
    self.speed.is_finite() && self.speed > 0.0
  }
}

impl Default for Playback {
  fn default() -> Playback {
    Playback {
      frame_rate: 60,
      speed: 1.0,
      realtime: false,
      tail_seconds: 1.0,
      seek: None,
    }
  }
}
