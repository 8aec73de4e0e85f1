use esp_idf_svc::hal::delay::BLOCK;
use esp_idf_svc::hal::gpio::{AnyIOPin, Gpio1, Gpio3};
use esp_idf_svc::hal::uart::{config::Config, UartDriver, UART0};
use esp_idf_svc::hal::units::Hertz;

use crate::core::answer::{AnswerSource, ConsoleError};

/// シリアルモニタと共有するコンソール UART (115200bps)
pub struct UartConsole {
    uart: UartDriver<'static>,
}

impl UartConsole {
    pub fn new(uart: UART0, tx: Gpio1, rx: Gpio3) -> anyhow::Result<Self> {
        let uart = UartDriver::new(
            uart,
            tx,
            rx,
            Option::<AnyIOPin>::None,
            Option::<AnyIOPin>::None,
            &Config::new().baudrate(Hertz(115_200)),
        )?;
        Ok(Self { uart })
    }
}

impl AnswerSource for UartConsole {
    fn read_byte(&mut self) -> Result<u8, ConsoleError> {
        let mut buf = [0u8; 1];
        loop {
            let len = self
                .uart
                .read(&mut buf, BLOCK)
                .map_err(|e| ConsoleError::ReadFailed(format!("{:?}", e)))?;
            if len == 1 {
                return Ok(buf[0]);
            }
        }
    }
}
