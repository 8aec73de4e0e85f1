/// 距離計算ユーティリティ
/// ハードウェア非依存の純粋関数を提供

/// 音速 (cm/µs)
pub const SPEED_OF_SOUND_CM_PER_US: f32 = 0.0343;

/// エコーパルス幅(µs)を距離(cm)に変換する
///
/// 往復分を含むため 2 で割る。
///
/// # Examples
/// ```
/// use tars_core::distance::echo_to_distance_cm;
///
/// let cm = echo_to_distance_cm(1000);
/// assert!((cm - 17.15).abs() < 0.001);
/// ```
pub fn echo_to_distance_cm(echo_us: u32) -> f32 {
    (echo_us as f32 * SPEED_OF_SOUND_CM_PER_US) / 2.0
}

/// 1回分の超音波測定結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance {
    /// 測定成功 (cm)
    Measured(f32),
    /// エコーがタイムアウトした
    Timeout,
}

impl Distance {
    /// パルス幅から測定結果を作成
    ///
    /// パルス幅 0 はタイムアウトとして扱う (Arduino の `pulseIn` と同じ)。
    pub fn from_echo_us(echo_us: u32) -> Self {
        if echo_us == 0 {
            Distance::Timeout
        } else {
            Distance::Measured(echo_to_distance_cm(echo_us))
        }
    }

    pub fn centimeters(&self) -> Option<f32> {
        match self {
            Distance::Measured(cm) => Some(*cm),
            Distance::Timeout => None,
        }
    }
}

/// ゴミ箱の充填率
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillLevel {
    percent: u8,
}

impl FillLevel {
    /// 測定距離から充填率を計算する
    ///
    /// # Arguments
    /// - `distance_cm`: センサーからゴミ表面までの距離
    /// - `empty_depth_cm`: 空の状態での距離 (0%)
    /// - `full_distance_cm`: 満杯とみなす距離 (100%)
    pub fn from_distance(distance_cm: f32, empty_depth_cm: f32, full_distance_cm: f32) -> Self {
        let range_cm = empty_depth_cm - full_distance_cm;

        let percentage = if range_cm <= 0.0 {
            0.0
        } else {
            ((empty_depth_cm - distance_cm) / range_cm * 100.0)
                .max(0.0)
                .min(100.0)
        };

        Self {
            percent: percentage.round() as u8,
        }
    }

    pub fn from_percent(percent: u8) -> Self {
        Self {
            percent: percent.min(100),
        }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn is_full(&self, threshold_percent: u8) -> bool {
        self.percent >= threshold_percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_to_distance_zero() {
        assert_eq!(echo_to_distance_cm(0), 0.0);
    }

    #[test]
    fn test_echo_to_distance_one_meter() {
        // 100cm の往復 ≈ 5831µs
        let cm = echo_to_distance_cm(5831);
        assert!((cm - 100.0).abs() < 0.1, "got {}", cm);
    }

    #[test]
    fn test_distance_timeout() {
        assert_eq!(Distance::from_echo_us(0), Distance::Timeout);
        assert_eq!(Distance::from_echo_us(0).centimeters(), None);
    }

    #[test]
    fn test_distance_measured() {
        let d = Distance::from_echo_us(2000);
        assert!((d.centimeters().unwrap() - 34.3).abs() < 0.001);
    }

    #[test]
    fn test_fill_level_empty() {
        let level = FillLevel::from_distance(40.0, 40.0, 5.0);
        assert_eq!(level.percent(), 0);
    }

    #[test]
    fn test_fill_level_full() {
        let level = FillLevel::from_distance(5.0, 40.0, 5.0);
        assert_eq!(level.percent(), 100);
    }

    #[test]
    fn test_fill_level_half() {
        let level = FillLevel::from_distance(22.5, 40.0, 5.0);
        assert_eq!(level.percent(), 50);
    }

    #[test]
    fn test_fill_level_clamped() {
        // 空の深さより遠い (反射の乱れなど)
        assert_eq!(FillLevel::from_distance(80.0, 40.0, 5.0).percent(), 0);
        // 満杯ラインより近い
        assert_eq!(FillLevel::from_distance(1.0, 40.0, 5.0).percent(), 100);
    }

    #[test]
    fn test_fill_level_invalid_geometry() {
        assert_eq!(FillLevel::from_distance(10.0, 5.0, 40.0).percent(), 0);
        assert_eq!(FillLevel::from_distance(10.0, 20.0, 20.0).percent(), 0);
    }

    #[test]
    fn test_fill_level_threshold() {
        let level = FillLevel::from_percent(90);
        assert!(level.is_full(90));
        assert!(!level.is_full(91));
        assert_eq!(FillLevel::from_percent(150).percent(), 100);
    }
}
