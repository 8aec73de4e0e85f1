/// ハードウェア制御モジュール
pub mod console;
pub mod nvs_counter;

pub use console::UartConsole;
pub use nvs_counter::NvsCounterStore;
