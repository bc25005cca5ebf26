use log::{debug, info};

use failure::{Error, Fail};

use voice_clones_core::{
  clones::CloneVisual,
  config::Config as CoreConfig,
  voice::MonophonicVoice,
};

mod config;
use crate::config::Config;

mod driver;
use crate::driver::FrameDriver;

mod performance;
use crate::performance::{Performance, PerformanceError};

mod visual;
use crate::visual::LoggingVisual;

const VOICE_CLONES_CONFIG: &str = "VOICE_CLONES_CONFIG";
const DEFAULT_VOICE_CLONES_CONFIG: &str = "player.toml";

const VOICE_CLONES_LOG_CONFIG: &str = "VOICE_CLONES_LOG_CONFIG";
const DEFAULT_VOICE_CLONES_LOG_CONFIG: &str = "log4rs.yaml";

const DEFAULT_PERFORMANCE: &str = "performance.toml";

#[derive(Debug, Fail)]
enum MainError {
  #[fail(display = "Failed to init logging: {}", cause)]
  LoggingInit { cause: String },
}

fn main() -> Result<(), Error> {
  init_logging()?;

  let (core_config, config) = init_config()?;

  let performance = init_performance()?;

  let voices = init_voices(&core_config, &performance)?;

  let mut driver = FrameDriver::new(
    performance.division,
    performance.tempo,
    config.playback,
    voices,
  );

  driver.run(performance.end());

  for voice in driver.voices() {
    info!("{} used {} clones", voice.name(), voice.clones().len());
  }

  Ok(())
}

fn init_logging() -> Result<(), Error> {
  let log_config_path = std::env::var(VOICE_CLONES_LOG_CONFIG)
    .unwrap_or_else(|_| DEFAULT_VOICE_CLONES_LOG_CONFIG.to_string());

  log4rs::init_file(log_config_path.as_str(), Default::default()).map_err(|err| {
    MainError::LoggingInit {
      cause: err.to_string(),
    }
  })?;

  Ok(())
}

fn init_config() -> Result<(CoreConfig, Config), Error> {
  let config_path =
    std::env::var(VOICE_CLONES_CONFIG).unwrap_or_else(|_| DEFAULT_VOICE_CLONES_CONFIG.to_string());

  info!("Loading configuration from {} ...", config_path);
  let core_config = CoreConfig::from_file(config_path.as_str())?;
  let config = Config::from_file(config_path.as_str())?;
  debug!("{:#?}", core_config);
  debug!("{:#?}", config);

  Ok((core_config, config))
}

fn init_performance() -> Result<Performance, Error> {
  let path = std::env::args()
    .nth(1)
    .unwrap_or_else(|| DEFAULT_PERFORMANCE.to_string());

  info!("Loading performance from {} ...", path);
  Performance::from_file(path.as_str())
}

fn init_voices(config: &CoreConfig, performance: &Performance) -> Result<Vec<MonophonicVoice>, Error> {
  info!("Initialising voices ...");

  let settings = config.voice_settings(performance.division);

  let mut voices = Vec::with_capacity(performance.channels.len());
  for channel in performance.channels.iter() {
    let mut channel_settings = settings;
    if let Some(placement) = channel.placement {
      channel_settings.placement = placement;
    }

    let voice = MonophonicVoice::new(
      channel.name.as_str(),
      channel.intervals(),
      &channel_settings,
      |index| Box::new(LoggingVisual::new(channel.name.as_str(), index)) as Box<dyn CloneVisual>,
    )
    .map_err(|cause| PerformanceError::Channel {
      name: channel.name.clone(),
      cause,
    })?;

    debug!("{}: {} clones", voice.name(), voice.clones().len());
    voices.push(voice);
  }

  Ok(voices)
}
