/// コアシステムモジュール
pub mod capture_service;
pub mod config;
pub mod config_validation;
pub mod request;
pub mod routes;
pub mod sensor_tuning;

pub use capture_service::{
    CaptureError, CaptureService, FilePictureSink, FrameSource, PictureSink, TakePhotoOutcome,
};
pub use config::{AppConfig, ConfigError};
pub use request::{CameraRequest, CameraWorker, RequestClient};
pub use routes::{resolve, Route, NOT_FOUND_BODY};
pub use sensor_tuning::{FrameProfile, SensorTuning};
