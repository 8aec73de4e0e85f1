use esp_idf_svc::hal::delay::Delay;
use esp_idf_svc::hal::i2c::I2cDriver;
use lcd_i2c::{Geometry, Lcd, DEFAULT_ADDRESS};
use log::info;

use crate::core::capacity_display::{CapacityDisplay, DisplayError, Screen};

/// PCF8574 バックパック付き 20x4 LCD
pub struct LcdPanel {
    lcd: Lcd<I2cDriver<'static>, Delay>,
}

impl LcdPanel {
    pub fn new(i2c: I2cDriver<'static>) -> anyhow::Result<Self> {
        let lcd = Lcd::new(i2c, Delay::new_default(), DEFAULT_ADDRESS, Geometry::LCD_20X4)
            .map_err(|e| anyhow::anyhow!("LCDの初期化に失敗しました: {:?}", e))?;
        info!("LCDを初期化しました (I2C 0x{:02X})", DEFAULT_ADDRESS);
        Ok(Self { lcd })
    }

    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.lcd
            .clear()
            .map_err(|e| DisplayError::WriteFailed(format!("{:?}", e)))
    }
}

impl CapacityDisplay for LcdPanel {
    fn show(&mut self, screen: &Screen) -> Result<(), DisplayError> {
        for (row, line) in screen.lines.iter().enumerate() {
            self.lcd
                .print_line(row as u8, line)
                .map_err(|e| DisplayError::WriteFailed(format!("{:?}", e)))?;
        }
        Ok(())
    }
}
