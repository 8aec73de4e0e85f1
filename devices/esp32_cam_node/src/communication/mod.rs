/// 通信モジュール
pub mod http_server;
pub mod network_manager;

pub use http_server::CameraHttpServer;
pub use network_manager::WifiManager;
