use esp_idf_svc::hal::gpio::Gpio6;
use esp_idf_svc::hal::ledc::config::TimerConfig;
use esp_idf_svc::hal::ledc::{LedcDriver, LedcTimerDriver, Resolution, CHANNEL0, TIMER0};
use esp_idf_svc::hal::units::Hertz;
use log::{debug, info};
use tars_core::ServoCalibration;

use crate::core::sorting_service::{ServoError, ServoMotor};

/// サーボの PWM 周波数
const SERVO_FREQUENCY_HZ: u32 = 50;

/// LEDC で駆動する仕分けサーボ (50Hz, 14bit)
pub struct LedcServo {
    driver: LedcDriver<'static>,
    _timer: LedcTimerDriver<'static, TIMER0>,
    calibration: ServoCalibration,
    max_duty: u32,
}

impl LedcServo {
    pub fn new(timer: TIMER0, channel: CHANNEL0, pin: Gpio6) -> anyhow::Result<Self> {
        let timer_driver = LedcTimerDriver::new(
            timer,
            &TimerConfig::new()
                .frequency(Hertz(SERVO_FREQUENCY_HZ))
                .resolution(Resolution::Bits14),
        )?;
        let mut driver = LedcDriver::new(channel, &timer_driver, pin)?;
        driver.enable()?;
        let max_duty = driver.get_max_duty();
        info!("サーボを初期化しました (max duty {})", max_duty);

        Ok(Self {
            driver,
            _timer: timer_driver,
            calibration: ServoCalibration::default(),
            max_duty,
        })
    }
}

impl ServoMotor for LedcServo {
    fn move_to(&mut self, degrees: u16) -> Result<(), ServoError> {
        let duty = self.calibration.duty_for_angle(degrees, self.max_duty);
        debug!("servo -> {} deg (duty {})", degrees, duty);
        self.driver
            .set_duty(duty)
            .map_err(|e| ServoError(format!("{:?}", e)))
    }
}
