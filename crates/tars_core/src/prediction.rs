use std::fmt;

use log::{debug, warn};

/// 仕分け先のサーボ角度
///
/// カメラノードは `/takephoto` の応答本文としてこの角度を返す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortAngle {
    Left,
    Center,
    Right,
}

/// 応答に使う角度の一覧 (度)
pub const ANGLES: [SortAngle; 3] = [SortAngle::Left, SortAngle::Center, SortAngle::Right];

impl SortAngle {
    pub fn degrees(&self) -> u16 {
        match self {
            SortAngle::Left => 60,
            SortAngle::Center => 90,
            SortAngle::Right => 120,
        }
    }

    pub fn from_degrees(degrees: u16) -> Option<Self> {
        ANGLES.iter().copied().find(|a| a.degrees() == degrees)
    }

    /// 乱数値から角度を選ぶ
    pub fn from_random(random: u32) -> Self {
        ANGLES[(random % ANGLES.len() as u32) as usize]
    }
}

impl fmt::Display for SortAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// 予測応答の解析エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictionError {
    #[error("応答本文が空です")]
    Empty,
    #[error("角度として解析できません: '{0}'")]
    NotANumber(String),
    #[error("未対応の角度です: {0}")]
    UnknownAngle(u16),
}

/// カメラノードの応答本文を角度として解析する
///
/// # 引数
/// * `body` - HTTP応答本文 (例: "90")
///
/// # 戻り値
/// * `Result<SortAngle, PredictionError>` - 解析された角度またはエラー
pub fn parse_prediction(body: &str) -> Result<SortAngle, PredictionError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(PredictionError::Empty);
    }

    let degrees = trimmed.parse::<u16>().map_err(|_| {
        warn!("Invalid prediction body: '{}'", trimmed);
        PredictionError::NotANumber(trimmed.to_string())
    })?;

    let angle = SortAngle::from_degrees(degrees).ok_or(PredictionError::UnknownAngle(degrees))?;
    debug!("Parsed prediction: {} deg", degrees);
    Ok(angle)
}
