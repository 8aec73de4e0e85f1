/*!
 * # ESP32-CAM Capture Node Library
 *
 * HTTP要求に応じて写真を撮影し、SDカードへ保存して仕分け角度を返すカメラノード
 *
 * ## モジュール構成
 * - `core`: 設定、撮影サービス、メインループへの要求受け渡し（ホストでテスト可能）
 * - `hardware`: カメラ、ステータスLED、NVSカウンタ、SDカード
 * - `communication`: WiFi接続とHTTPサーバー
 */

pub mod core;
#[cfg(target_os = "espidf")]
pub mod communication;
#[cfg(target_os = "espidf")]
pub mod hardware;

pub use core::{AppConfig, CameraRequest, CameraWorker, ConfigError, RequestClient};

/// ライブラリのバージョン情報
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
