/// コアシステムモジュール
pub mod capacity_display;
pub mod config;
pub mod config_validation;
pub mod sorting_service;
pub mod ultrasonic;

pub use capacity_display::{CapacityDisplay, DisplayError, FillSettings, Screen};
pub use config::{AppConfig, ConfigError};
pub use sorting_service::{
    CycleOutcome, CycleReport, PredictionClient, PredictionRequestError, ServoError, ServoMotor,
    SortingService, SortingSettings,
};
pub use ultrasonic::{RangeFinder, Ultrasonic, UltrasonicError};
