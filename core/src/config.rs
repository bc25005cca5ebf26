use failure::Error;

use serde_derive::Deserialize;

use std::fs::File;
use std::io::Read;

use crate::clones::Placement;
use crate::time::{Division, TicksTime};
use crate::voice::VoiceSettings;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Clones {
  /// The grace window is a quarter note divided by this
  pub grace_divisor: u64,
  pub placement: Placement,
  /// Quarter notes the instrument stays on screen around its notes
  pub visibility_margin_beats: u64,
}

impl Default for Clones {
  fn default() -> Clones {
    Clones {
      grace_divisor: 4,
      placement: Placement::default(),
      visibility_margin_beats: 1,
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
  pub clones: Clones,
}

impl Default for Config {
  fn default() -> Config {
    Config {
      clones: Clones::default(),
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
    let config: Config = toml::from_str(&content)?;
    Ok(config)
  }

  pub fn from_str<'a, T>(content: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let config: Config = toml::from_str(content.into())?;
    Ok(config)
  }

  pub fn voice_settings(&self, division: Division) -> VoiceSettings {
    VoiceSettings {
      grace: division.grace(self.clones.grace_divisor),
      placement: self.clones.placement,
      visibility_margin: TicksTime::new(
        u64::from(division).saturating_mul(self.clones.visibility_margin_beats),
      ),
    }
  }
}
