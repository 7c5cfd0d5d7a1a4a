use crate::domain::shared::form::{DEFAULT_CROSS_FADE_DURATION, DEFAULT_NFE_STEP, DEFAULT_SPEED};
use crate::domain::shared::SynthesisForm;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub tts_base_url: String,
    pub request_timeout_secs: u64,
    pub output_dir: PathBuf,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub animation_fps: u32,
    // Form defaults
    pub default_speed: f32,
    pub default_nfe_step: u32,
    pub default_cross_fade: f32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            tts_base_url: env::var("TTS_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()?,
            output_dir: env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| "output".to_string())
                .into(),
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            animation_fps: env::var("ANIMATION_FPS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            default_speed: env::var("DEFAULT_SPEED")
                .unwrap_or_else(|_| DEFAULT_SPEED.to_string())
                .parse()?,
            default_nfe_step: env::var("DEFAULT_NFE_STEP")
                .unwrap_or_else(|_| DEFAULT_NFE_STEP.to_string())
                .parse()?,
            default_cross_fade: env::var("DEFAULT_CROSS_FADE")
                .unwrap_or_else(|_| DEFAULT_CROSS_FADE_DURATION.to_string())
                .parse()?,
        };

        if config.animation_fps == 0 {
            return Err("ANIMATION_FPS must be greater than zero".into());
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Empty form carrying the configured parameter defaults.
    pub fn default_form(&self) -> SynthesisForm {
        SynthesisForm {
            speed: self.default_speed,
            nfe_step: self.default_nfe_step,
            cross_fade_duration: self.default_cross_fade,
            ..SynthesisForm::default()
        }
    }
}
