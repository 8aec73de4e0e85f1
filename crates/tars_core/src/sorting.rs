//! ゴミ仕分けの状態機械
//!
//! ボタン割り込み → 撮影要求 → 予測受信 → サーボ駆動 → 容量報告 の流れを
//! メインループから1イベントずつ進める。再入はせず、処理中のボタン入力は無視する。

use log::{info, warn};

use crate::prediction::SortAngle;

/// 仕分け処理の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortState {
    /// ボタン待ち
    Idle,
    /// カメラノードからの予測待ち
    AwaitingPrediction,
    /// サーボを予測角度へ動かしている
    Sorting { angle: SortAngle },
    /// 充填率の測定と表示
    Reporting,
}

/// 状態機械へ入力するイベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortEvent {
    ButtonPressed,
    PredictionReceived(SortAngle),
    PredictionFailed,
    ServoSettled,
    CapacityReported,
}

/// 遷移に伴ってメインループが実行すべき処理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    RequestPhoto,
    MoveServo(SortAngle),
    ReturnHomeAndMeasure,
    Finish,
}

/// 仕分け状態機械
#[derive(Debug)]
pub struct SortingMachine {
    state: SortState,
    completed_cycles: u32,
    failed_cycles: u32,
}

impl Default for SortingMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SortingMachine {
    pub fn new() -> Self {
        Self {
            state: SortState::Idle,
            completed_cycles: 0,
            failed_cycles: 0,
        }
    }

    pub fn state(&self) -> SortState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SortState::Idle
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    pub fn failed_cycles(&self) -> u32 {
        self.failed_cycles
    }

    /// イベントを処理して次の状態へ遷移する
    pub fn handle(&mut self, event: SortEvent) -> Action {
        let (next, action) = match (self.state, event) {
            (SortState::Idle, SortEvent::ButtonPressed) => {
                (SortState::AwaitingPrediction, Action::RequestPhoto)
            }
            (SortState::AwaitingPrediction, SortEvent::PredictionReceived(angle)) => {
                (SortState::Sorting { angle }, Action::MoveServo(angle))
            }
            (SortState::AwaitingPrediction, SortEvent::PredictionFailed) => {
                self.failed_cycles += 1;
                (SortState::Idle, Action::None)
            }
            (SortState::Sorting { .. }, SortEvent::ServoSettled) => {
                (SortState::Reporting, Action::ReturnHomeAndMeasure)
            }
            (SortState::Reporting, SortEvent::CapacityReported) => {
                self.completed_cycles += 1;
                (SortState::Idle, Action::Finish)
            }
            (state, event) => {
                warn!("イベントを無視します: {:?} (状態: {:?})", event, state);
                (state, Action::None)
            }
        };

        if next != self.state {
            info!("仕分け状態: {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let mut machine = SortingMachine::new();

        assert_eq!(machine.handle(SortEvent::ButtonPressed), Action::RequestPhoto);
        assert_eq!(machine.state(), SortState::AwaitingPrediction);

        assert_eq!(
            machine.handle(SortEvent::PredictionReceived(SortAngle::Right)),
            Action::MoveServo(SortAngle::Right)
        );
        assert_eq!(machine.state(), SortState::Sorting { angle: SortAngle::Right });

        assert_eq!(machine.handle(SortEvent::ServoSettled), Action::ReturnHomeAndMeasure);
        assert_eq!(machine.state(), SortState::Reporting);

        assert_eq!(machine.handle(SortEvent::CapacityReported), Action::Finish);
        assert!(machine.is_idle());
        assert_eq!(machine.completed_cycles(), 1);
    }

    #[test]
    fn test_prediction_failure_returns_to_idle_without_retry() {
        let mut machine = SortingMachine::new();
        machine.handle(SortEvent::ButtonPressed);

        assert_eq!(machine.handle(SortEvent::PredictionFailed), Action::None);
        assert!(machine.is_idle());
        assert_eq!(machine.failed_cycles(), 1);
        assert_eq!(machine.completed_cycles(), 0);
    }

    #[test]
    fn test_button_ignored_while_busy() {
        let mut machine = SortingMachine::new();
        machine.handle(SortEvent::ButtonPressed);

        assert_eq!(machine.handle(SortEvent::ButtonPressed), Action::None);
        assert_eq!(machine.state(), SortState::AwaitingPrediction);

        machine.handle(SortEvent::PredictionReceived(SortAngle::Left));
        assert_eq!(machine.handle(SortEvent::ButtonPressed), Action::None);
        assert_eq!(machine.state(), SortState::Sorting { angle: SortAngle::Left });
    }

    #[test]
    fn test_out_of_order_events_ignored() {
        let mut machine = SortingMachine::new();
        assert_eq!(machine.handle(SortEvent::ServoSettled), Action::None);
        assert_eq!(machine.handle(SortEvent::CapacityReported), Action::None);
        assert_eq!(
            machine.handle(SortEvent::PredictionReceived(SortAngle::Center)),
            Action::None
        );
        assert!(machine.is_idle());
        assert_eq!(machine.completed_cycles(), 0);
    }
}
