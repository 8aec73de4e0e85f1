use embedded_hal::delay::DelayNs;
use log::{error, info, warn};
use tars_core::{
    parse_prediction, Action, Distance, FillLevel, SortAngle, SortEvent, SortingMachine,
};

use crate::core::capacity_display::{
    distance_screen, sorting_status, CapacityDisplay, FillSettings, Screen,
};
use crate::core::ultrasonic::RangeFinder;

/// カメラノードへの問い合わせエラー
#[derive(Debug, thiserror::Error)]
pub enum PredictionRequestError {
    #[error("カメラノードに接続できません: {0}")]
    Connection(String),
    #[error("カメラノードがエラーを返しました: HTTP {0}")]
    Status(u16),
    #[error("応答本文を読み取れません: {0}")]
    Body(String),
}

/// 仕分け角度の問い合わせ先
pub trait PredictionClient {
    /// 応答本文 (角度の文字列) を返す
    fn request_prediction(&mut self) -> Result<String, PredictionRequestError>;
}

#[derive(Debug, thiserror::Error)]
#[error("サーボの駆動に失敗しました: {0}")]
pub struct ServoError(pub String);

pub trait ServoMotor {
    fn move_to(&mut self, degrees: u16) -> Result<(), ServoError>;
}

/// 仕分け処理の設定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortingSettings {
    pub home_angle: u16,
    pub servo_settle_ms: u32,
    pub fill: FillSettings,
}

/// 1サイクルの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Sorted,
    PredictionFailed,
    /// 処理中だったため無視した
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    pub outcome: CycleOutcome,
    pub angle: Option<SortAngle>,
    pub distance: Option<Distance>,
    pub fill: Option<FillLevel>,
}

impl CycleReport {
    fn new() -> Self {
        Self {
            outcome: CycleOutcome::Ignored,
            angle: None,
            distance: None,
            fill: None,
        }
    }
}

/// 仕分けサービス - ボタン1回分の仕分けと容量表示を管理
pub struct SortingService<P, S, R, L, D> {
    machine: SortingMachine,
    client: P,
    servo: S,
    range: R,
    display: L,
    delay: D,
    settings: SortingSettings,
    status: String,
}

impl<P, S, R, L, D> SortingService<P, S, R, L, D>
where
    P: PredictionClient,
    S: ServoMotor,
    R: RangeFinder,
    L: CapacityDisplay,
    D: DelayNs,
{
    pub fn new(
        client: P,
        servo: S,
        range: R,
        display: L,
        delay: D,
        settings: SortingSettings,
    ) -> Self {
        Self {
            machine: SortingMachine::new(),
            client,
            servo,
            range,
            display,
            delay,
            settings,
            status: "Ready".to_string(),
        }
    }

    /// サーボを待機角度へ移動する
    pub fn home(&mut self) {
        self.move_servo(self.settings.home_angle);
    }

    /// ボタン押下1回分の仕分けを最後まで進める
    pub fn run_cycle(&mut self) -> CycleReport {
        let mut report = CycleReport::new();
        let mut action = self.machine.handle(SortEvent::ButtonPressed);
        if action == Action::None {
            return report;
        }
        info!("仕分けを開始します");

        loop {
            action = match action {
                Action::RequestPhoto => {
                    self.show_status("Taking photo...");
                    let event = self.request_prediction();
                    self.machine.handle(event)
                }
                Action::MoveServo(angle) => {
                    report.angle = Some(angle);
                    self.move_servo(angle.degrees());
                    self.delay.delay_ms(self.settings.servo_settle_ms);
                    self.machine.handle(SortEvent::ServoSettled)
                }
                Action::ReturnHomeAndMeasure => {
                    self.home();
                    if let Some(angle) = report.angle {
                        self.status = sorting_status(angle);
                    }
                    let distance = self.refresh();
                    report.distance = distance;
                    report.fill = distance.and_then(|d| self.settings.fill.fill_level(d));
                    self.machine.handle(SortEvent::CapacityReported)
                }
                Action::Finish => {
                    report.outcome = CycleOutcome::Sorted;
                    break;
                }
                Action::None => {
                    // 予測失敗で待機状態に戻った
                    report.outcome = CycleOutcome::PredictionFailed;
                    self.status = "Camera error".to_string();
                    report.distance = self.refresh();
                    break;
                }
            };
        }

        info!(
            "仕分けサイクル終了: {:?} (成功 {} / 失敗 {})",
            report.outcome,
            self.machine.completed_cycles(),
            self.machine.failed_cycles()
        );
        report
    }

    /// 距離を測定して LCD を更新する
    ///
    /// センサーエラー時は表示を変えずに None を返す。
    pub fn refresh(&mut self) -> Option<Distance> {
        match self.range.measure() {
            Ok(distance) => {
                let screen = distance_screen(distance, &self.settings.fill, &self.status);
                self.show(&screen);
                Some(distance)
            }
            Err(e) => {
                warn!("距離の測定に失敗しました: {}", e);
                None
            }
        }
    }

    pub fn show(&mut self, screen: &Screen) {
        if let Err(e) = self.display.show(screen) {
            warn!("{}", e);
        }
    }

    pub fn machine(&self) -> &SortingMachine {
        &self.machine
    }

    fn request_prediction(&mut self) -> SortEvent {
        match self.client.request_prediction() {
            Ok(body) => match parse_prediction(&body) {
                Ok(angle) => {
                    info!("予測角度を受信しました: {}", angle);
                    SortEvent::PredictionReceived(angle)
                }
                Err(e) => {
                    error!("予測応答を解析できません: {}", e);
                    SortEvent::PredictionFailed
                }
            },
            Err(e) => {
                error!("{}", e);
                SortEvent::PredictionFailed
            }
        }
    }

    fn move_servo(&mut self, degrees: u16) {
        if let Err(e) = self.servo.move_to(degrees) {
            error!("{}", e);
        }
    }

    fn show_status(&mut self, status: &str) {
        self.status = status.to_string();
        let mut screen = Screen::default();
        screen.lines[3] = self.status.clone();
        self.show(&screen);
    }
}
