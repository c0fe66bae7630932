use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub capture: CaptureSettings,
}

#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Realtime conversational backend endpoint
    pub url: String,
    /// Model identifier requested on the channel handshake
    pub model: String,
}

#[derive(Debug, Deserialize)]
pub struct CaptureSettings {
    pub audio: bool,
    pub video: bool,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
