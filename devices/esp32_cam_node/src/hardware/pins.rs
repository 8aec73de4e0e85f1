use esp_idf_svc::hal::gpio::*;

/// AI-Thinker ESP32-CAM のカメラピン
pub struct CameraPins {
    pub pwdn: Gpio32,
    pub xclk: Gpio0,
    pub sda: Gpio26,
    pub scl: Gpio27,
    pub d0: Gpio5,
    pub d1: Gpio18,
    pub d2: Gpio19,
    pub d3: Gpio21,
    pub d4: Gpio36,
    pub d5: Gpio39,
    pub d6: Gpio34,
    pub d7: Gpio35,
    pub vsync: Gpio25,
    pub href: Gpio23,
    pub pclk: Gpio22,
}

impl CameraPins {
    /// 個別のピンから作成
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pwdn: Gpio32,
        xclk: Gpio0,
        sda: Gpio26,
        scl: Gpio27,
        d0: Gpio5,
        d1: Gpio18,
        d2: Gpio19,
        d3: Gpio21,
        d4: Gpio36,
        d5: Gpio39,
        d6: Gpio34,
        d7: Gpio35,
        vsync: Gpio25,
        href: Gpio23,
        pclk: Gpio22,
    ) -> Self {
        Self {
            pwdn,
            xclk,
            sda,
            scl,
            d0,
            d1,
            d2,
            d3,
            d4,
            d5,
            d6,
            d7,
            vsync,
            href,
            pclk,
        }
    }
}

/// SDMMC 4bit 接続のピン
pub struct SdCardPins {
    pub cmd: Gpio15,
    pub clk: Gpio14,
    pub d0: Gpio2,
    pub d1: Gpio4,
    pub d2: Gpio12,
    pub d3: Gpio13,
}
