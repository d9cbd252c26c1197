//! Extension de `sfconfig::Config` pour la section `nowplaying`
//!
//! Les getters persistent la valeur par défaut quand la clé est absente ou
//! invalide, comme les autres extensions de configuration.

use crate::service::{DEFAULT_ALBUM_SIZE, DEFAULT_TIMEOUT, NowPlayingOptions, StoppedPolicy};
use anyhow::Result;
use serde_yaml::{Number, Value};
use sfconfig::Config;
use std::time::Duration;

const ALBUM_SIZE_PATH: &[&str] = &["nowplaying", "album_size"];
const STOPPED_POLICY_PATH: &[&str] = &["nowplaying", "stopped_policy"];
const TIMEOUT_PATH: &[&str] = &["nowplaying", "timeout_secs"];

pub trait NowPlayingConfigExt {
    /// Côté de l'image `/album` en pixels (défaut 420)
    fn get_album_size(&self) -> Result<u32>;
    fn set_album_size(&self, size: u32) -> Result<()>;

    /// Politique appliquée quand rien n'est joué (défaut `retain`)
    fn get_stopped_policy(&self) -> Result<StoppedPolicy>;
    fn set_stopped_policy(&self, policy: StoppedPolicy) -> Result<()>;

    /// Timeout des appels amont (défaut 10 s)
    fn get_nowplaying_timeout(&self) -> Result<Duration>;
    fn set_nowplaying_timeout(&self, timeout: Duration) -> Result<()>;

    /// Rassemble les réglages du service
    fn get_nowplaying_options(&self) -> Result<NowPlayingOptions> {
        Ok(NowPlayingOptions {
            album_size: self.get_album_size()?,
            stopped_policy: self.get_stopped_policy()?,
            timeout: self.get_nowplaying_timeout()?,
        })
    }
}

impl NowPlayingConfigExt for Config {
    fn get_album_size(&self) -> Result<u32> {
        match self.get_value(ALBUM_SIZE_PATH) {
            Ok(Value::Number(n)) => match n.as_u64().and_then(|v| u32::try_from(v).ok()) {
                Some(size) if size > 0 => Ok(size),
                _ => {
                    tracing::warn!("Invalid nowplaying.album_size {:?}, using {}", n, DEFAULT_ALBUM_SIZE);
                    self.set_album_size(DEFAULT_ALBUM_SIZE)?;
                    Ok(DEFAULT_ALBUM_SIZE)
                }
            },
            _ => {
                self.set_album_size(DEFAULT_ALBUM_SIZE)?;
                Ok(DEFAULT_ALBUM_SIZE)
            }
        }
    }

    fn set_album_size(&self, size: u32) -> Result<()> {
        anyhow::ensure!(size > 0, "album size must be positive");
        self.set_value(ALBUM_SIZE_PATH, Value::Number(Number::from(size)))
    }

    fn get_stopped_policy(&self) -> Result<StoppedPolicy> {
        match self.get_value(STOPPED_POLICY_PATH) {
            Ok(Value::String(s)) => match s.parse() {
                Ok(policy) => Ok(policy),
                Err(e) => {
                    tracing::warn!("{}, using 'retain'", e);
                    self.set_stopped_policy(StoppedPolicy::default())?;
                    Ok(StoppedPolicy::default())
                }
            },
            _ => {
                self.set_stopped_policy(StoppedPolicy::default())?;
                Ok(StoppedPolicy::default())
            }
        }
    }

    fn set_stopped_policy(&self, policy: StoppedPolicy) -> Result<()> {
        self.set_value(STOPPED_POLICY_PATH, Value::String(policy.as_str().to_string()))
    }

    fn get_nowplaying_timeout(&self) -> Result<Duration> {
        match self.get_value(TIMEOUT_PATH) {
            Ok(Value::Number(n)) if n.as_u64().is_some_and(|v| v > 0) => {
                Ok(Duration::from_secs(n.as_u64().unwrap_or_default()))
            }
            _ => {
                self.set_nowplaying_timeout(DEFAULT_TIMEOUT)?;
                Ok(DEFAULT_TIMEOUT)
            }
        }
    }

    fn set_nowplaying_timeout(&self, timeout: Duration) -> Result<()> {
        self.set_value(TIMEOUT_PATH, Value::Number(Number::from(timeout.as_secs())))
    }
}
