use tars_core::{Distance, FillLevel, SortAngle};

/// 20x4 LCD の1行の文字数
pub const LCD_COLS: usize = 20;
pub const LCD_ROWS: usize = 4;

/// 表示器へのエラー
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("LCDへの書き込みに失敗しました: {0}")]
    WriteFailed(String),
}

/// 4行分の表示内容
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Screen {
    pub lines: [String; LCD_ROWS],
}

impl Screen {
    fn with_line(mut self, row: usize, text: impl Into<String>) -> Self {
        let mut text: String = text.into();
        text.truncate(LCD_COLS);
        self.lines[row] = text;
        self
    }
}

/// 容量の表示先
pub trait CapacityDisplay {
    fn show(&mut self, screen: &Screen) -> Result<(), DisplayError>;
}

/// 充填率の計算と満杯判定の設定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillSettings {
    pub empty_depth_cm: f32,
    pub full_distance_cm: f32,
    pub full_threshold_percent: u8,
}

impl FillSettings {
    /// タイムアウト時は充填率を出さない
    pub fn fill_level(&self, distance: Distance) -> Option<FillLevel> {
        distance
            .centimeters()
            .map(|cm| FillLevel::from_distance(cm, self.empty_depth_cm, self.full_distance_cm))
    }
}

/// 起動画面
///
/// "Starting" を (5,1) に出し、2秒後に "the device" を (4,2) に追加する。
pub fn splash_screen(show_device_line: bool) -> Screen {
    let screen = Screen::default().with_line(1, "     Starting");
    if show_device_line {
        screen.with_line(2, "    the device")
    } else {
        screen
    }
}

/// 起動画面の表示順と各画面の表示時間 (ms)。最後の画面の後に LCD を消去する
pub fn splash_sequence() -> [(Screen, u32); 2] {
    [(splash_screen(false), 2000), (splash_screen(true), 6000)]
}

/// 距離と充填率の画面
pub fn distance_screen(distance: Distance, settings: &FillSettings, status: &str) -> Screen {
    let value = match distance {
        Distance::Measured(cm) => format!("{:.2}", cm),
        Distance::Timeout => "Out of range".to_string(),
    };
    let fill = settings.fill_level(distance);
    let fill_line = match fill {
        Some(level) => format!("Fill: {}%", level.percent()),
        None => "Fill: --".to_string(),
    };
    let status_line = match fill {
        Some(level) if level.is_full(settings.full_threshold_percent) => "FULL - empty the bin",
        _ => status,
    };

    Screen::default()
        .with_line(0, "Distance (in cm): ")
        .with_line(1, value)
        .with_line(2, fill_line)
        .with_line(3, status_line)
}

/// 仕分け中の状態表示
pub fn sorting_status(angle: SortAngle) -> String {
    format!("Sorted to {} deg", angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: FillSettings = FillSettings {
        empty_depth_cm: 40.0,
        full_distance_cm: 5.0,
        full_threshold_percent: 90,
    };

    #[test]
    fn test_splash_screen() {
        let first = splash_screen(false);
        assert_eq!(first.lines[1], "     Starting");
        assert!(first.lines[2].is_empty());
        assert_eq!(splash_screen(true).lines[2], "    the device");
    }

    #[test]
    fn test_splash_sequence_timing() {
        let [(starting, first_ms), (device, hold_ms)] = splash_sequence();
        assert!(starting.lines[2].is_empty());
        assert_eq!(first_ms, 2000);
        assert_eq!(device.lines[2], "    the device");
        assert_eq!(hold_ms, 6000);
    }

    #[test]
    fn test_distance_screen() {
        let screen = distance_screen(Distance::Measured(22.5), &SETTINGS, "Ready");
        assert_eq!(screen.lines[0], "Distance (in cm): ");
        assert_eq!(screen.lines[1], "22.50");
        assert_eq!(screen.lines[2], "Fill: 50%");
        assert_eq!(screen.lines[3], "Ready");
    }

    #[test]
    fn test_full_marker_overrides_status() {
        let screen = distance_screen(Distance::Measured(6.0), &SETTINGS, "Ready");
        assert_eq!(screen.lines[2], "Fill: 97%");
        assert_eq!(screen.lines[3], "FULL - empty the bin");
    }

    #[test]
    fn test_timeout_screen() {
        let screen = distance_screen(Distance::Timeout, &SETTINGS, "Ready");
        assert_eq!(screen.lines[1], "Out of range");
        assert_eq!(screen.lines[2], "Fill: --");
    }

    #[test]
    fn test_lines_fit_panel() {
        let screen = distance_screen(
            Distance::Measured(1.0),
            &SETTINGS,
            "a very long status message",
        );
        assert!(screen.lines.iter().all(|line| line.len() <= LCD_COLS));
    }

    #[test]
    fn test_sorting_status() {
        assert_eq!(sorting_status(SortAngle::Left), "Sorted to 60 deg");
    }
}
