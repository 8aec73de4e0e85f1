//! HC-SR04 超音波距離センサー
//!
//! トリガーに 10µs のパルスを出し、エコーが High の時間から距離を求める。
//! ピンと遅延は embedded-hal、時刻はマイクロ秒を返すクロック関数で受け取る。

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::debug;
use tars_core::Distance;

/// センサー操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UltrasonicError {
    #[error("トリガーピンの操作に失敗しました")]
    Trigger,
    #[error("エコーピンの読み取りに失敗しました")]
    Echo,
}

/// 距離の取得元
pub trait RangeFinder {
    fn measure(&mut self) -> Result<Distance, UltrasonicError>;
}

pub struct Ultrasonic<T, E, D, C> {
    trigger: T,
    echo: E,
    delay: D,
    clock: C,
    timeout_us: u32,
}

impl<T, E, D, C> Ultrasonic<T, E, D, C>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
    C: FnMut() -> u64,
{
    pub fn new(trigger: T, echo: E, delay: D, clock: C, timeout_us: u32) -> Self {
        Self {
            trigger,
            echo,
            delay,
            clock,
            timeout_us,
        }
    }

    fn fire_trigger(&mut self) -> Result<(), UltrasonicError> {
        self.trigger.set_low().map_err(|_| UltrasonicError::Trigger)?;
        self.delay.delay_us(2);
        self.trigger.set_high().map_err(|_| UltrasonicError::Trigger)?;
        self.delay.delay_us(10);
        self.trigger.set_low().map_err(|_| UltrasonicError::Trigger)
    }

    /// エコーが `level` になるまで待つ。`deadline_us` を過ぎたら false
    fn wait_for(&mut self, level: bool, deadline_us: u64) -> Result<bool, UltrasonicError> {
        loop {
            let high = self.echo.is_high().map_err(|_| UltrasonicError::Echo)?;
            if high == level {
                return Ok(true);
            }
            if (self.clock)() > deadline_us {
                return Ok(false);
            }
        }
    }

    /// High パルス幅 (µs)。タイムアウト時は 0
    ///
    /// 前回のエコーが残っている場合はその終わりを待ってから次の立ち上がりを測る。
    /// 3段階の待ちはすべてトリガー直後からの `timeout_us` 以内に収める。
    pub fn pulse_width_us(&mut self) -> Result<u32, UltrasonicError> {
        self.fire_trigger()?;

        let deadline = (self.clock)().saturating_add(self.timeout_us as u64);
        if !self.wait_for(false, deadline)? {
            debug!("previous echo did not end within {}us", self.timeout_us);
            return Ok(0);
        }
        if !self.wait_for(true, deadline)? {
            debug!("echo did not rise within {}us", self.timeout_us);
            return Ok(0);
        }
        let rise = (self.clock)();
        if !self.wait_for(false, deadline)? {
            debug!("echo stayed high past {}us", self.timeout_us);
            return Ok(0);
        }
        let fall = (self.clock)();
        Ok(fall.saturating_sub(rise) as u32)
    }
}

impl<T, E, D, C> RangeFinder for Ultrasonic<T, E, D, C>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
    C: FnMut() -> u64,
{
    fn measure(&mut self) -> Result<Distance, UltrasonicError> {
        Ok(Distance::from_echo_us(self.pulse_width_us()?))
    }
}
