// Sorting Service Tests
// モックのカメラ・サーボ・センサー・LCDで仕分けサイクルを検証します

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use sorting_bin::core::{
    CapacityDisplay, CycleOutcome, DisplayError, FillSettings, PredictionClient,
    PredictionRequestError, RangeFinder, Screen, ServoError, ServoMotor, SortingService,
    SortingSettings, UltrasonicError,
};
use tars_core::{Distance, SortAngle};

/// 応答を順番に返すカメラノード
struct ScriptedCamera {
    responses: VecDeque<Result<String, PredictionRequestError>>,
    requests: Rc<RefCell<usize>>,
}

impl PredictionClient for ScriptedCamera {
    fn request_prediction(&mut self) -> Result<String, PredictionRequestError> {
        *self.requests.borrow_mut() += 1;
        self.responses
            .pop_front()
            .unwrap_or(Err(PredictionRequestError::Connection("no script".to_string())))
    }
}

#[derive(Clone, Default)]
struct RecordingServo {
    angles: Rc<RefCell<Vec<u16>>>,
}

impl ServoMotor for RecordingServo {
    fn move_to(&mut self, degrees: u16) -> Result<(), ServoError> {
        self.angles.borrow_mut().push(degrees);
        Ok(())
    }
}

struct FixedRange {
    result: Result<Distance, UltrasonicError>,
}

impl RangeFinder for FixedRange {
    fn measure(&mut self) -> Result<Distance, UltrasonicError> {
        self.result.clone()
    }
}

#[derive(Clone, Default)]
struct RecordingDisplay {
    screens: Rc<RefCell<Vec<Screen>>>,
}

impl CapacityDisplay for RecordingDisplay {
    fn show(&mut self, screen: &Screen) -> Result<(), DisplayError> {
        self.screens.borrow_mut().push(screen.clone());
        Ok(())
    }
}

/// 待ち時間を合計するだけの遅延
#[derive(Clone, Default)]
struct RecordingDelay {
    total_ns: Rc<RefCell<u64>>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
    }
}

const SETTINGS: SortingSettings = SortingSettings {
    home_angle: 90,
    servo_settle_ms: 1000,
    fill: FillSettings {
        empty_depth_cm: 40.0,
        full_distance_cm: 5.0,
        full_threshold_percent: 90,
    },
};

type TestService =
    SortingService<ScriptedCamera, RecordingServo, FixedRange, RecordingDisplay, RecordingDelay>;

struct Harness {
    service: TestService,
    requests: Rc<RefCell<usize>>,
    servo: RecordingServo,
    display: RecordingDisplay,
    delay: RecordingDelay,
}

fn harness(
    responses: Vec<Result<String, PredictionRequestError>>,
    range: Result<Distance, UltrasonicError>,
) -> Harness {
    let requests = Rc::new(RefCell::new(0));
    let servo = RecordingServo::default();
    let display = RecordingDisplay::default();
    let delay = RecordingDelay::default();
    let service = SortingService::new(
        ScriptedCamera {
            responses: responses.into(),
            requests: requests.clone(),
        },
        servo.clone(),
        FixedRange { result: range },
        display.clone(),
        delay.clone(),
        SETTINGS,
    );
    Harness {
        service,
        requests,
        servo,
        display,
        delay,
    }
}

#[test]
fn test_successful_cycle_moves_servo_and_reports() {
    let mut h = harness(vec![Ok("120".to_string())], Ok(Distance::Measured(22.5)));

    let report = h.service.run_cycle();

    assert_eq!(report.outcome, CycleOutcome::Sorted);
    assert_eq!(report.angle, Some(SortAngle::Right));
    assert_eq!(report.fill.map(|f| f.percent()), Some(50));
    assert_eq!(*h.requests.borrow(), 1);
    // 予測角度へ移動してから待機角度へ戻る
    assert_eq!(*h.servo.angles.borrow(), vec![120, 90]);
    assert_eq!(*h.delay.total_ns.borrow(), 1_000_000_000);
    assert!(h.service.machine().is_idle());
    assert_eq!(h.service.machine().completed_cycles(), 1);

    let screens = h.display.screens.borrow();
    let last = screens.last().unwrap();
    assert_eq!(last.lines[0], "Distance (in cm): ");
    assert_eq!(last.lines[1], "22.50");
    assert_eq!(last.lines[2], "Fill: 50%");
    assert_eq!(last.lines[3], "Sorted to 120 deg");
}

#[test]
fn test_camera_error_keeps_servo_home() {
    let mut h = harness(
        vec![Err(PredictionRequestError::Status(500))],
        Ok(Distance::Measured(30.0)),
    );

    let report = h.service.run_cycle();

    assert_eq!(report.outcome, CycleOutcome::PredictionFailed);
    assert_eq!(report.angle, None);
    assert!(h.servo.angles.borrow().is_empty());
    assert_eq!(h.service.machine().failed_cycles(), 1);
    assert!(h.service.machine().is_idle());
    let screens = h.display.screens.borrow();
    assert_eq!(screens.last().unwrap().lines[3], "Camera error");
}

#[test]
fn test_unparsable_body_is_prediction_failure() {
    let mut h = harness(vec![Ok("banana".to_string())], Ok(Distance::Measured(30.0)));
    assert_eq!(h.service.run_cycle().outcome, CycleOutcome::PredictionFailed);

    let mut h = harness(vec![Ok("45".to_string())], Ok(Distance::Measured(30.0)));
    assert_eq!(h.service.run_cycle().outcome, CycleOutcome::PredictionFailed);
}

#[test]
fn test_no_retry_after_failure() {
    let mut h = harness(
        vec![
            Err(PredictionRequestError::Connection("refused".to_string())),
            Ok("60".to_string()),
        ],
        Ok(Distance::Measured(30.0)),
    );

    h.service.run_cycle();
    assert_eq!(*h.requests.borrow(), 1);

    // 次のボタン押下で次の応答を使う
    let report = h.service.run_cycle();
    assert_eq!(report.angle, Some(SortAngle::Left));
    assert_eq!(*h.requests.borrow(), 2);
}

#[test]
fn test_full_bin_shows_marker() {
    let mut h = harness(vec![Ok("90".to_string())], Ok(Distance::Measured(6.0)));

    let report = h.service.run_cycle();

    assert!(report.fill.unwrap().is_full(90));
    let screens = h.display.screens.borrow();
    assert_eq!(screens.last().unwrap().lines[3], "FULL - empty the bin");
}

#[test]
fn test_sensor_timeout_still_finishes_cycle() {
    let mut h = harness(vec![Ok("60".to_string())], Ok(Distance::Timeout));

    let report = h.service.run_cycle();

    assert_eq!(report.outcome, CycleOutcome::Sorted);
    assert_eq!(report.distance, Some(Distance::Timeout));
    assert_eq!(report.fill, None);
    let screens = h.display.screens.borrow();
    assert_eq!(screens.last().unwrap().lines[1], "Out of range");
}

#[test]
fn test_sensor_error_leaves_display_untouched() {
    let mut h = harness(vec![], Err(UltrasonicError::Echo));

    assert_eq!(h.service.refresh(), None);
    assert!(h.display.screens.borrow().is_empty());
}

#[test]
fn test_idle_refresh_shows_ready() {
    let mut h = harness(vec![], Ok(Distance::Measured(40.0)));

    assert_eq!(h.service.refresh(), Some(Distance::Measured(40.0)));
    let screens = h.display.screens.borrow();
    assert_eq!(screens[0].lines[2], "Fill: 0%");
    assert_eq!(screens[0].lines[3], "Ready");
}
