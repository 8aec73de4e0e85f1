/*!
 * # ESP32-CAM EEPROM Resetter
 *
 * カメラノードの撮影カウンタ (NVS の `tars/pic_count`) を表示し、
 * シリアルで `y` が入力されたら 0 に戻す書き込み用ツール
 */

pub mod core;
#[cfg(target_os = "espidf")]
pub mod hardware;

pub use core::{AppConfig, ConfigError};

/// ライブラリのバージョン情報
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
