/// コアシステムモジュール
pub mod answer;
pub mod config;

pub use answer::{wait_for_answer, AnswerSource, ConsoleError};
pub use config::{AppConfig, ConfigError};
