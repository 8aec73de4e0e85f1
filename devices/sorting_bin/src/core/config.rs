use crate::core::config_validation::{
    validate_camera_host, validate_depth_range, validate_echo_timeout_us, validate_home_angle,
    validate_threshold_percent, validate_wifi_password, validate_wifi_ssid, ValidationError,
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

    #[default("")]
    camera_host: &'static str,

    #[default(10000)]
    http_timeout_ms: u32,

    #[default(40.0)] // 充填率 0% の距離
    empty_depth_cm: f32,

    #[default(5.0)] // 充填率 100% の距離
    full_distance_cm: f32,

    #[default(90)]
    full_threshold_percent: u8,

    #[default(90)]
    home_angle: u16,

    #[default(1000)] // サーボ移動後の待ち時間
    servo_settle_ms: u32,

    #[default(500)]
    measure_interval_ms: u32,

    #[default(30000)]
    echo_timeout_us: u32,
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
    #[error("カメラノードのホストが設定されていません")]
    MissingCameraHost,
    #[error("カメラノードのホスト指定が不正です (スキームやパスは不要): {0}")]
    InvalidCameraHost(String),
    #[error("距離の設定が不正です: empty_depth_cm={empty_cm}, full_distance_cm={full_cm}")]
    InvalidDepthRange { empty_cm: f32, full_cm: f32 },
    #[error("満杯しきい値は1-100%で指定してください: {0}")]
    InvalidThreshold(u8),
    #[error("待機角度は0-180度で指定してください: {0}")]
    InvalidHomeAngle(u16),
    #[error("エコータイムアウトが範囲外です: {0}us")]
    InvalidTimeout(u32),
}

/// アプリケーション設定を表す構造体
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub wifi_ssid: String,
    pub wifi_password: String,
    /// カメラノードのホスト (`host[:port]`)
    pub camera_host: String,
    pub http_timeout_ms: u32,
    pub empty_depth_cm: f32,
    pub full_distance_cm: f32,
    pub full_threshold_percent: u8,
    /// 仕分け後にサーボを戻す角度
    pub home_angle: u16,
    pub servo_settle_ms: u32,
    /// 待機中に距離表示を更新する間隔
    pub measure_interval_ms: u32,
    pub echo_timeout_us: u32,
}

impl AppConfig {
    /// 設定ファイルから設定をロードします
    pub fn load() -> Result<Self, ConfigError> {
        // toml_cfg によって生成された定数
        Self::from_config(&CONFIG)
    }

    fn from_config(config: &Config) -> Result<Self, ConfigError> {
        validate_wifi_ssid(config.wifi_ssid).map_err(map_validation_error)?;
        validate_wifi_password(config.wifi_password).map_err(map_validation_error)?;
        validate_camera_host(config.camera_host).map_err(map_validation_error)?;
        validate_depth_range(config.empty_depth_cm, config.full_distance_cm)
            .map_err(map_validation_error)?;
        let full_threshold_percent =
            validate_threshold_percent(config.full_threshold_percent)
                .map_err(map_validation_error)?;
        let home_angle = validate_home_angle(config.home_angle).map_err(map_validation_error)?;
        let echo_timeout_us =
            validate_echo_timeout_us(config.echo_timeout_us).map_err(map_validation_error)?;

        Ok(AppConfig {
            wifi_ssid: config.wifi_ssid.to_string(),
            wifi_password: config.wifi_password.to_string(),
            camera_host: config.camera_host.trim().to_string(),
            http_timeout_ms: config.http_timeout_ms,
            empty_depth_cm: config.empty_depth_cm,
            full_distance_cm: config.full_distance_cm,
            full_threshold_percent,
            home_angle,
            servo_settle_ms: config.servo_settle_ms,
            measure_interval_ms: config.measure_interval_ms,
            echo_timeout_us,
        })
    }

    /// カメラノードへの撮影要求URL
    pub fn takephoto_url(&self) -> String {
        format!("http://{}/takephoto", self.camera_host)
    }
}

fn map_validation_error(err: ValidationError) -> ConfigError {
    match err {
        ValidationError::MissingWifiSsid => ConfigError::MissingWifiSsid,
        ValidationError::WifiSsidTooLong(v) => ConfigError::WifiSsidTooLong(v),
        ValidationError::WifiPasswordTooLong(v) => ConfigError::WifiPasswordTooLong(v),
        ValidationError::MissingCameraHost => ConfigError::MissingCameraHost,
        ValidationError::InvalidCameraHost(v) => ConfigError::InvalidCameraHost(v),
        ValidationError::InvalidDepthRange { empty_cm, full_cm } => {
            ConfigError::InvalidDepthRange { empty_cm, full_cm }
        }
        ValidationError::InvalidThreshold(v) => ConfigError::InvalidThreshold(v),
        ValidationError::InvalidHomeAngle(v) => ConfigError::InvalidHomeAngle(v),
        ValidationError::InvalidTimeout(v) => ConfigError::InvalidTimeout(v),
    }
}
