use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::{Gpio33, Output, PinDriver};

/// LEDの制御に関するエラー
#[derive(Debug, thiserror::Error)]
pub enum LedError {
    #[error("LEDの初期化に失敗しました: {0}")]
    InitFailed(String),

    #[error("LEDの点灯制御に失敗しました: {0}")]
    ControlFailed(String),
}

/// WiFi接続インジケータLED (GPIO33, Lowで点灯)
pub struct StatusLed {
    led: PinDriver<'static, Gpio33, Output>,
}

impl StatusLed {
    /// 新しいステータスLEDコントローラーを作成します
    ///
    /// 作成直後は消灯状態です。
    pub fn new(pin: Gpio33) -> Result<Self, LedError> {
        let led = PinDriver::output(pin).map_err(|e| LedError::InitFailed(format!("{:?}", e)))?;
        let mut status_led = Self { led };
        status_led.turn_off()?;
        Ok(status_led)
    }

    /// LEDを点灯させます
    pub fn turn_on(&mut self) -> Result<(), LedError> {
        self.led
            .set_low()
            .map_err(|e| LedError::ControlFailed(format!("{:?}", e)))
    }

    /// LEDを消灯させます
    pub fn turn_off(&mut self) -> Result<(), LedError> {
        self.led
            .set_high()
            .map_err(|e| LedError::ControlFailed(format!("{:?}", e)))
    }

    /// 起動後の接続成功を知らせる点滅 (1秒点灯 / 1秒消灯 を3回)
    pub fn blink_connected(&mut self) -> Result<(), LedError> {
        for _ in 0..3 {
            self.turn_on()?;
            FreeRtos::delay_ms(1000);
            self.turn_off()?;
            FreeRtos::delay_ms(1000);
        }
        Ok(())
    }
}
