/*!
 * # TArS Sorting Bin Library
 *
 * ボタンが押されるとカメラノードに撮影を依頼し、返ってきた角度へサーボで
 * ゴミを振り分け、超音波センサーで測った充填率を LCD に表示する
 *
 * ## モジュール構成
 * - `core`: 設定、仕分けサービス、超音波センサー、LCD表示内容（ホストでテスト可能）
 * - `hardware`: サーボ(LEDC)、ボタン割り込み、I2C LCD、ピン定義
 * - `communication`: WiFi接続とカメラノードへのHTTPクライアント
 */

pub mod core;
#[cfg(target_os = "espidf")]
pub mod communication;
#[cfg(target_os = "espidf")]
pub mod hardware;

pub use core::{AppConfig, ConfigError, SortingService};

/// ライブラリのバージョン情報
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
