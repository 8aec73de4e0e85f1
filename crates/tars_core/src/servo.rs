/// サーボのPWM周期 (50Hz)
pub const SERVO_PERIOD_US: u32 = 20_000;

/// サーボのパルス幅キャリブレーション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoCalibration {
    pub min_pulse_us: u32,
    pub max_pulse_us: u32,
    pub max_degrees: u16,
}

impl Default for ServoCalibration {
    /// SG90 相当
    fn default() -> Self {
        Self {
            min_pulse_us: 500,
            max_pulse_us: 2500,
            max_degrees: 180,
        }
    }
}

impl ServoCalibration {
    /// 角度に対応するパルス幅 (µs)
    pub fn pulse_width_us(&self, degrees: u16) -> u32 {
        let degrees = degrees.min(self.max_degrees) as u32;
        if self.max_degrees == 0 {
            return self.min_pulse_us;
        }
        let span = self.max_pulse_us.saturating_sub(self.min_pulse_us);
        self.min_pulse_us + span * degrees / self.max_degrees as u32
    }

    /// 角度に対応するデューティ値
    ///
    /// `max_duty` は LEDC ドライバの分解能に応じた最大値。
    pub fn duty_for_angle(&self, degrees: u16, max_duty: u32) -> u32 {
        let pulse = self.pulse_width_us(degrees) as u64;
        (pulse * max_duty as u64 / SERVO_PERIOD_US as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_width_endpoints() {
        let cal = ServoCalibration::default();
        assert_eq!(cal.pulse_width_us(0), 500);
        assert_eq!(cal.pulse_width_us(90), 1500);
        assert_eq!(cal.pulse_width_us(180), 2500);
    }

    #[test]
    fn test_pulse_width_clamped() {
        let cal = ServoCalibration::default();
        assert_eq!(cal.pulse_width_us(270), 2500);
    }

    #[test]
    fn test_duty_14bit() {
        let cal = ServoCalibration::default();
        // 14bit: 16383 * 1500 / 20000 = 1228
        assert_eq!(cal.duty_for_angle(90, 16383), 1228);
        assert_eq!(cal.duty_for_angle(0, 16383), 409);
    }

    #[test]
    fn test_sort_angles_are_ordered() {
        let cal = ServoCalibration::default();
        let left = cal.duty_for_angle(60, 16383);
        let center = cal.duty_for_angle(90, 16383);
        let right = cal.duty_for_angle(120, 16383);
        assert!(left < center && center < right);
    }
}
