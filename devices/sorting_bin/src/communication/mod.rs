/// 通信モジュール
pub mod network_manager;
pub mod prediction_client;

pub use network_manager::NetworkManager;
pub use prediction_client::HttpPredictionClient;
