/// アプリケーション設定
#[toml_cfg::toml_config]
pub struct Config {
    #[default(3000)] // シリアルモニタを開くまでの待ち時間
    startup_delay_ms: u32,
}

/// 設定エラー
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("起動待ち時間が長すぎます: {0}ms (最大60000ms)")]
    StartupDelayTooLong(u32),
}

const MAX_STARTUP_DELAY_MS: u32 = 60_000;

#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub startup_delay_ms: u32,
}

impl AppConfig {
    /// 設定ファイルから設定をロードします
    pub fn load() -> Result<Self, ConfigError> {
        Self::new(CONFIG.startup_delay_ms)
    }

    pub fn new(startup_delay_ms: u32) -> Result<Self, ConfigError> {
        if startup_delay_ms > MAX_STARTUP_DELAY_MS {
            return Err(ConfigError::StartupDelayTooLong(startup_delay_ms));
        }
        Ok(Self { startup_delay_ms })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_delay() {
        assert_eq!(AppConfig::new(3000).unwrap().startup_delay_ms, 3000);
        assert!(matches!(
            AppConfig::new(120_000),
            Err(ConfigError::StartupDelayTooLong(120_000))
        ));
    }
}
