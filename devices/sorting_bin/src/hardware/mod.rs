/// ハードウェア制御モジュール
pub mod button;
pub mod lcd;
pub mod servo;

pub use button::Button;
pub use lcd::LcdPanel;
pub use servo::LedcServo;
