/// OV2640 の画質調整値
///
/// 値の範囲はセンサードライバに準拠する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorTuning {
    /// -2 ~ 2
    pub brightness: i32,
    /// -2 ~ 2
    pub contrast: i32,
    /// -2 ~ 2
    pub saturation: i32,
    /// 0: なし, 1: ネガ, 2: グレースケール, 3: 赤, 4: 緑, 5: 青, 6: セピア
    pub special_effect: i32,
    pub whitebal: bool,
    pub awb_gain: bool,
    /// 0: 自動, 1: 晴天, 2: 曇天, 3: オフィス, 4: 家庭
    pub wb_mode: i32,
    pub exposure_ctrl: bool,
    pub aec2: bool,
    /// -2 ~ 2
    pub ae_level: i32,
    /// 0 ~ 1200
    pub aec_value: i32,
    pub gain_ctrl: bool,
    /// 0 ~ 30
    pub agc_gain: i32,
    /// 0 ~ 6
    pub gain_ceiling: u32,
    pub bpc: bool,
    pub wpc: bool,
    pub raw_gma: bool,
    pub lenc: bool,
    pub hmirror: bool,
    pub vflip: bool,
    pub dcw: bool,
    pub colorbar: bool,
}

impl Default for SensorTuning {
    fn default() -> Self {
        Self {
            brightness: 0,
            contrast: 0,
            saturation: 0,
            special_effect: 0,
            whitebal: true,
            awb_gain: true,
            wb_mode: 0,
            exposure_ctrl: true,
            aec2: false,
            ae_level: 0,
            aec_value: 300,
            gain_ctrl: true,
            agc_gain: 0,
            gain_ceiling: 0,
            bpc: false,
            wpc: true,
            raw_gma: true,
            lenc: true,
            hmirror: false,
            vflip: false,
            dcw: true,
            colorbar: false,
        }
    }
}

impl SensorTuning {
    /// 範囲外の値をセンサーの許容範囲に丸める
    pub fn clamped(self) -> Self {
        Self {
            brightness: self.brightness.clamp(-2, 2),
            contrast: self.contrast.clamp(-2, 2),
            saturation: self.saturation.clamp(-2, 2),
            special_effect: self.special_effect.clamp(0, 6),
            wb_mode: self.wb_mode.clamp(0, 4),
            ae_level: self.ae_level.clamp(-2, 2),
            aec_value: self.aec_value.clamp(0, 1200),
            agc_gain: self.agc_gain.clamp(0, 30),
            gain_ceiling: self.gain_ceiling.min(6),
            ..self
        }
    }
}

/// フレームサイズの選択
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameProfile {
    /// PSRAMあり: UXGA, 品質10, バッファ2枚
    Uxga,
    /// PSRAMなし: SVGA, 品質12, バッファ1枚
    Svga,
}

impl FrameProfile {
    pub fn for_psram(psram_found: bool) -> Self {
        if psram_found {
            FrameProfile::Uxga
        } else {
            FrameProfile::Svga
        }
    }

    pub fn jpeg_quality(&self) -> i32 {
        match self {
            FrameProfile::Uxga => 10,
            FrameProfile::Svga => 12,
        }
    }

    pub fn fb_count(&self) -> usize {
        match self {
            FrameProfile::Uxga => 2,
            FrameProfile::Svga => 1,
        }
    }

    pub fn dimensions(&self) -> (u16, u16) {
        match self {
            FrameProfile::Uxga => (1600, 1200),
            FrameProfile::Svga => (800, 600),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_within_range() {
        let tuning = SensorTuning::default();
        assert_eq!(tuning, tuning.clamped());
        assert_eq!(tuning.aec_value, 300);
    }

    #[test]
    fn test_clamped() {
        let tuning = SensorTuning {
            brightness: 5,
            aec_value: 5000,
            gain_ceiling: 9,
            ..Default::default()
        }
        .clamped();
        assert_eq!(tuning.brightness, 2);
        assert_eq!(tuning.aec_value, 1200);
        assert_eq!(tuning.gain_ceiling, 6);
    }

    #[test]
    fn test_frame_profile() {
        assert_eq!(FrameProfile::for_psram(true), FrameProfile::Uxga);
        assert_eq!(FrameProfile::for_psram(false).jpeg_quality(), 12);
        assert_eq!(FrameProfile::Uxga.fb_count(), 2);
        assert_eq!(FrameProfile::Svga.dimensions(), (800, 600));
    }
}
