use crate::core::config_validation::{
    validate_http_port, validate_mount_point, validate_retry_interval_ms, validate_wifi_password,
    validate_wifi_ssid, ValidationError,
};

/// アプリケーション設定
///
/// この構造体はビルド時に`cfg.toml`ファイルから読み込まれた設定を保持します。
#[toml_cfg::toml_config]
pub struct Config {
    #[default("")]
    wifi_ssid: &'static str,

    #[default("")]
    wifi_password: &'static str,

    #[default(3000)] // 接続リトライ間隔
    wifi_retry_interval_ms: u32,

    #[default(80)]
    http_port: u16,

    #[default("/sdcard")]
    sd_mount_point: &'static str,

    #[default(10000)] // HTTPハンドラがメインループの応答を待つ時間
    request_timeout_ms: u32,
}

/// 設定エラー
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("WiFi SSIDが設定されていません")]
    MissingWifiSsid,
    #[error("WiFi SSIDが長すぎます ({0}文字、最大32文字)")]
    WifiSsidTooLong(usize),
    #[error("WiFi パスワードが長すぎます ({0}文字、最大64文字)")]
    WifiPasswordTooLong(usize),
    #[error("無効なHTTPポートです: {0}")]
    InvalidHttpPort(u16),
    #[error("無効なマウントポイントです: {0}")]
    InvalidMountPoint(String),
    #[error("WiFi リトライ間隔が短すぎます: {0}ms")]
    InvalidRetryInterval(u32),
}

/// アプリケーション設定を表す構造体
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// WiFi SSID
    pub wifi_ssid: String,

    /// WiFi パスワード
    pub wifi_password: String,

    /// WiFi 接続リトライ間隔（ミリ秒）
    pub wifi_retry_interval_ms: u32,

    /// HTTPサーバーのポート
    pub http_port: u16,

    /// SDカードのマウントポイント
    pub sd_mount_point: String,

    /// HTTPハンドラの応答待ちタイムアウト（ミリ秒）
    pub request_timeout_ms: u32,
}

impl AppConfig {
    /// 設定ファイルから設定をロードします
    pub fn load() -> Result<Self, ConfigError> {
        // toml_cfg によって生成された定数
        let config = CONFIG;

        Self::from_values(
            config.wifi_ssid,
            config.wifi_password,
            config.wifi_retry_interval_ms,
            config.http_port,
            config.sd_mount_point,
            config.request_timeout_ms,
        )
    }

    /// 値を検証して設定を組み立てます
    pub fn from_values(
        wifi_ssid: &str,
        wifi_password: &str,
        wifi_retry_interval_ms: u32,
        http_port: u16,
        sd_mount_point: &str,
        request_timeout_ms: u32,
    ) -> Result<Self, ConfigError> {
        validate_wifi_ssid(wifi_ssid).map_err(map_validation_error)?;
        validate_wifi_password(wifi_password).map_err(map_validation_error)?;
        let wifi_retry_interval_ms =
            validate_retry_interval_ms(wifi_retry_interval_ms).map_err(map_validation_error)?;
        let http_port = validate_http_port(http_port).map_err(map_validation_error)?;
        validate_mount_point(sd_mount_point).map_err(map_validation_error)?;

        Ok(AppConfig {
            wifi_ssid: wifi_ssid.to_string(),
            wifi_password: wifi_password.to_string(),
            wifi_retry_interval_ms,
            http_port,
            sd_mount_point: sd_mount_point.to_string(),
            request_timeout_ms,
        })
    }
}

fn map_validation_error(err: ValidationError) -> ConfigError {
    match err {
        ValidationError::MissingWifiSsid => ConfigError::MissingWifiSsid,
        ValidationError::WifiSsidTooLong(v) => ConfigError::WifiSsidTooLong(v),
        ValidationError::WifiPasswordTooLong(v) => ConfigError::WifiPasswordTooLong(v),
        ValidationError::InvalidHttpPort(v) => ConfigError::InvalidHttpPort(v),
        ValidationError::InvalidMountPoint(v) => ConfigError::InvalidMountPoint(v),
        ValidationError::InvalidRetryInterval(v) => ConfigError::InvalidRetryInterval(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_ok() {
        let config = AppConfig::from_values("ap", "secret", 3000, 80, "/sdcard", 10000).unwrap();
        assert_eq!(config.wifi_ssid, "ap");
        assert_eq!(config.http_port, 80);
        assert_eq!(config.sd_mount_point, "/sdcard");
    }

    #[test]
    fn test_from_values_missing_ssid() {
        let err = AppConfig::from_values("", "secret", 3000, 80, "/sdcard", 10000).unwrap_err();
        assert!(matches!(err, ConfigError::MissingWifiSsid));
    }

    #[test]
    fn test_from_values_bad_port() {
        let err = AppConfig::from_values("ap", "", 3000, 0, "/sdcard", 10000).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHttpPort(0)));
    }
}
