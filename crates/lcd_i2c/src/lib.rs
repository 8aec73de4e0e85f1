//! HD44780 character LCD driven through a PCF8574 I2C backpack.
//!
//! The backpack maps its 8 output bits as `P0=RS, P1=RW, P2=EN, P3=backlight,
//! P4..P7=D4..D7`, so the controller always runs in 4-bit mode.

#![cfg_attr(not(test), no_std)]

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Default address of the PCF8574 backpack.
pub const DEFAULT_ADDRESS: u8 = 0x27;

const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_HOME: u8 = 0x02;
const CMD_ENTRY_MODE: u8 = 0x04;
const CMD_DISPLAY_CONTROL: u8 = 0x08;
const CMD_FUNCTION_SET: u8 = 0x20;
const CMD_SET_DDRAM: u8 = 0x80;

const ENTRY_LEFT: u8 = 0x02;
const DISPLAY_ON: u8 = 0x04;
const FUNCTION_2LINE: u8 = 0x08;

const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcdError<E> {
    I2c(E),
    OutOfBounds { col: u8, row: u8 },
}

/// Panel geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub cols: u8,
    pub rows: u8,
}

impl Geometry {
    pub const LCD_20X4: Geometry = Geometry { cols: 20, rows: 4 };
}

pub struct Lcd<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    geometry: Geometry,
}

impl<I2C, D, E> Lcd<I2C, D>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
{
    /// Runs the 4-bit initialization sequence and clears the display.
    pub fn new(i2c: I2C, delay: D, address: u8, geometry: Geometry) -> Result<Self, LcdError<E>> {
        let mut lcd = Self {
            i2c,
            delay,
            address,
            geometry,
        };
        lcd.init()?;
        Ok(lcd)
    }

    fn init(&mut self) -> Result<(), LcdError<E>> {
        self.delay.delay_ms(50);
        self.expander_write(0)?;
        self.delay.delay_ms(1);

        // Reset into 8-bit mode three times, then switch to 4-bit.
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(150);
        self.write_nibble(0x20, 0)?;

        self.command(CMD_FUNCTION_SET | FUNCTION_2LINE)?;
        self.command(CMD_DISPLAY_CONTROL | DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE | ENTRY_LEFT)?;
        self.home()
    }

    pub fn clear(&mut self) -> Result<(), LcdError<E>> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    pub fn home(&mut self) -> Result<(), LcdError<E>> {
        self.command(CMD_HOME)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), LcdError<E>> {
        if col >= self.geometry.cols || row >= self.geometry.rows {
            return Err(LcdError::OutOfBounds { col, row });
        }
        self.command(CMD_SET_DDRAM | (col + ROW_OFFSETS[row as usize]))
    }

    /// Writes ASCII text at the cursor. Characters past the end of the line are dropped.
    pub fn print(&mut self, text: &str) -> Result<(), LcdError<E>> {
        for byte in text.bytes().take(self.geometry.cols as usize) {
            self.send(byte, RS)?;
        }
        Ok(())
    }

    /// Writes `text` at the start of `row` and blanks the rest of the line.
    pub fn print_line(&mut self, row: u8, text: &str) -> Result<(), LcdError<E>> {
        self.set_cursor(0, row)?;
        let cols = self.geometry.cols as usize;
        let mut written = 0;
        for byte in text.bytes().take(cols) {
            self.send(byte, RS)?;
            written += 1;
        }
        for _ in written..cols {
            self.send(b' ', RS)?;
        }
        Ok(())
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn command(&mut self, value: u8) -> Result<(), LcdError<E>> {
        self.send(value, 0)
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), LcdError<E>> {
        self.write_nibble(value & 0xF0, mode)?;
        self.write_nibble((value << 4) & 0xF0, mode)
    }

    fn write_nibble(&mut self, nibble: u8, mode: u8) -> Result<(), LcdError<E>> {
        let data = nibble | mode;
        self.expander_write(data)?;
        self.pulse_enable(data)
    }

    fn pulse_enable(&mut self, data: u8) -> Result<(), LcdError<E>> {
        self.expander_write(data | EN)?;
        self.delay.delay_us(1);
        self.expander_write(data & !EN)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(&mut self, data: u8) -> Result<(), LcdError<E>> {
        self.i2c
            .write(self.address, &[data | BACKLIGHT])
            .map_err(LcdError::I2c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_offsets_cover_20x4() {
        // Row 2 continues row 0 on the 20x4 panel.
        assert_eq!(ROW_OFFSETS[2], ROW_OFFSETS[0] + 20);
        assert_eq!(ROW_OFFSETS[3], ROW_OFFSETS[1] + 20);
    }
}
