/*!
 * # TArS Core
 *
 * TArS の各デバイスで共有する、ハードウェア非依存のロジック
 *
 * ## モジュール構成
 * - `distance`: 超音波エコー時間から距離・充填率への変換
 * - `prediction`: カメラノードが返す仕分け角度の生成と解析
 * - `picture_counter`: EEPROM 1バイトで管理する撮影カウンタ
 * - `servo`: サーボ角度から PWM デューティへの変換
 * - `sorting`: ゴミ仕分けの状態機械
 * - `trigger`: 割り込みからメインループへ渡すフラグ
 * - `mjpeg`: MJPEG ストリームのマルチパート書式
 * - `reset`: カウンタリセットの対話処理
 */

pub mod distance;
pub mod mjpeg;
pub mod picture_counter;
pub mod prediction;
pub mod reset;
pub mod servo;
pub mod sorting;
pub mod trigger;

pub use distance::{echo_to_distance_cm, Distance, FillLevel};
pub use picture_counter::{
    CounterError, CounterStore, MemoryCounterStore, PictureCounter, PictureSlot,
};
pub use prediction::{parse_prediction, PredictionError, SortAngle};
pub use reset::{is_confirmation, ResetDialog, ResetOutcome};
pub use servo::ServoCalibration;
pub use sorting::{Action, SortEvent, SortState, SortingMachine};
pub use trigger::TriggerFlag;

/// ライブラリのバージョン情報
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
