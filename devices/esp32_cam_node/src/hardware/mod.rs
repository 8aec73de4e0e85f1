/// ハードウェア制御モジュール
pub mod camera;
pub mod led;
pub mod nvs_counter;
pub mod pins;
pub mod sd_card;

pub use camera::CameraController;
pub use led::StatusLed;
pub use nvs_counter::NvsCounterStore;
pub use pins::CameraPins;
pub use sd_card::SdCard;
