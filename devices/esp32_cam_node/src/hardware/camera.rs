use esp_camera_rs::Camera;
use esp_idf_svc::sys::camera;
use log::{info, warn};

use crate::core::capture_service::{CaptureError, FrameSource};
use crate::core::sensor_tuning::{FrameProfile, SensorTuning};
use crate::hardware::pins::CameraPins;

/// AI-Thinker ESP32-CAM (OV2640) のカメラ制御
pub struct CameraController {
    camera: Camera<'static>,
    profile: FrameProfile,
}

/// PSRAM が搭載されているか
pub fn psram_found() -> bool {
    unsafe { esp_idf_svc::sys::heap_caps_get_total_size(esp_idf_svc::sys::MALLOC_CAP_SPIRAM) > 0 }
}

impl CameraController {
    /// カメラを JPEG モードで初期化し、画質設定を適用する
    pub fn new(
        pins: CameraPins,
        profile: FrameProfile,
        tuning: SensorTuning,
    ) -> anyhow::Result<Self> {
        let frame_size = match profile {
            FrameProfile::Uxga => camera::framesize_t_FRAMESIZE_UXGA,
            FrameProfile::Svga => camera::framesize_t_FRAMESIZE_SVGA,
        };
        let (width, height) = profile.dimensions();
        info!(
            "カメラを初期化しています: {}x{}, 品質 {}, フレームバッファ {}枚",
            width,
            height,
            profile.jpeg_quality(),
            profile.fb_count()
        );

        let camera = Camera::new(
            pins.pwdn,
            pins.xclk,
            pins.d0,
            pins.d1,
            pins.d2,
            pins.d3,
            pins.d4,
            pins.d5,
            pins.d6,
            pins.d7,
            pins.vsync,
            pins.href,
            pins.pclk,
            pins.sda,
            pins.scl,
            camera::pixformat_t_PIXFORMAT_JPEG,
            frame_size,
        )
        .map_err(|e| anyhow::anyhow!("Camera init failed with error 0x{:x}", e.code()))?;

        let controller = Self { camera, profile };
        controller.apply_tuning(tuning.clamped())?;
        Ok(controller)
    }

    fn apply_tuning(&self, tuning: SensorTuning) -> anyhow::Result<()> {
        let sensor = self.camera.sensor();
        sensor.set_quality(self.profile.jpeg_quality())?;
        sensor.set_brightness(tuning.brightness)?;
        sensor.set_contrast(tuning.contrast)?;
        sensor.set_saturation(tuning.saturation)?;
        sensor.set_special_effect(tuning.special_effect)?;
        sensor.set_whitebal(tuning.whitebal)?;
        sensor.set_awb_gain(tuning.awb_gain)?;
        sensor.set_wb_mode(tuning.wb_mode)?;
        sensor.set_exposure_ctrl(tuning.exposure_ctrl)?;
        sensor.set_aec2(tuning.aec2)?;
        sensor.set_ae_level(tuning.ae_level)?;
        sensor.set_aec_value(tuning.aec_value)?;
        sensor.set_gain_ctrl(tuning.gain_ctrl)?;
        sensor.set_agc_gain(tuning.agc_gain)?;
        sensor.set_gainceiling(tuning.gain_ceiling as camera::gainceiling_t)?;
        sensor.set_bpc(tuning.bpc)?;
        sensor.set_wpc(tuning.wpc)?;
        sensor.set_raw_gma(tuning.raw_gma)?;
        sensor.set_lenc(tuning.lenc)?;
        sensor.set_hmirror(tuning.hmirror)?;
        sensor.set_vflip(tuning.vflip)?;
        sensor.set_dcw(tuning.dcw)?;
        sensor.set_colorbar(tuning.colorbar)?;
        info!("カメラセンサーの設定を適用しました");
        Ok(())
    }
}

impl FrameSource for CameraController {
    fn capture_jpeg(&mut self) -> Result<Vec<u8>, CaptureError> {
        // フレームバッファは drop 時にドライバへ返却される
        match self.camera.get_framebuffer() {
            Some(frame) => Ok(frame.data().to_vec()),
            None => {
                warn!("Camera capture failed");
                Err(CaptureError::CaptureFailed(
                    "フレームバッファを取得できませんでした".to_string(),
                ))
            }
        }
    }
}
