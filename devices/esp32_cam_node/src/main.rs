#[cfg(target_os = "espidf")]
use std::sync::mpsc::{self, RecvTimeoutError};
#[cfg(target_os = "espidf")]
use std::time::Duration;

#[cfg(target_os = "espidf")]
use esp_idf_svc::{
    eventloop::EspSystemEventLoop, hal::delay::FreeRtos, hal::peripherals::Peripherals,
    nvs::EspDefaultNvsPartition,
};
#[cfg(target_os = "espidf")]
use log::{error, info, warn};

#[cfg(target_os = "espidf")]
use esp32_cam_node::communication::{CameraHttpServer, WifiManager};
#[cfg(target_os = "espidf")]
use esp32_cam_node::core::{
    AppConfig, CameraWorker, FilePictureSink, FrameProfile, RequestClient, SensorTuning,
};
#[cfg(target_os = "espidf")]
use esp32_cam_node::hardware::camera::psram_found;
#[cfg(target_os = "espidf")]
use esp32_cam_node::hardware::pins::SdCardPins;
#[cfg(target_os = "espidf")]
use esp32_cam_node::hardware::{CameraController, CameraPins, NvsCounterStore, SdCard, StatusLed};

/// メインループが要求を待つ間隔
#[cfg(target_os = "espidf")]
const LOOP_POLL_MS: u64 = 100;

/// アプリケーションのメインエントリーポイント
#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    // ESP-IDFの基本初期化
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    FreeRtos::delay_ms(60);
    info!("ESP32-CAM キャプチャノード v{}", esp32_cam_node::VERSION);

    // 設定ファイル読み込み
    let app_config = AppConfig::load().map_err(|e| {
        error!("設定ファイルの読み込みに失敗しました: {}", e);
        anyhow::anyhow!("設定ファイルの読み込みエラー: {}", e)
    })?;

    // ペリフェラルとシステムリソースの初期化
    info!("ペリフェラルを初期化しています");
    let peripherals = Peripherals::take().unwrap();
    let sysloop = EspSystemEventLoop::take()?;
    let nvs_partition = EspDefaultNvsPartition::take()?;
    let pins = peripherals.pins;

    let counter_store = NvsCounterStore::new(nvs_partition.clone())?;

    // カメラ初期化 (失敗時は起動を中止する)
    let profile = FrameProfile::for_psram(psram_found());
    let camera_pins = CameraPins::new(
        pins.gpio32,
        pins.gpio0,
        pins.gpio26,
        pins.gpio27,
        pins.gpio5,
        pins.gpio18,
        pins.gpio19,
        pins.gpio21,
        pins.gpio36,
        pins.gpio39,
        pins.gpio34,
        pins.gpio35,
        pins.gpio25,
        pins.gpio23,
        pins.gpio22,
    );
    let camera = CameraController::new(camera_pins, profile, SensorTuning::default())?;

    // SDカードはマウントに失敗しても起動を続ける
    let sd_pins = SdCardPins {
        cmd: pins.gpio15,
        clk: pins.gpio14,
        d0: pins.gpio2,
        d1: pins.gpio4,
        d2: pins.gpio12,
        d3: pins.gpio13,
    };
    let _sd_card = match SdCard::mount(peripherals.sdmmc1, sd_pins, &app_config.sd_mount_point) {
        Ok(card) => Some(card),
        Err(e) => {
            error!("MicroSDカードのマウントに失敗しました。写真は保存されません: {:?}", e);
            None
        }
    };

    let mut led = StatusLed::new(pins.gpio33)?;

    // WiFi接続 (接続できるまで待つ)
    let mut wifi = WifiManager::connect(peripherals.modem, &sysloop, &nvs_partition, &app_config)?;
    led.blink_connected()?;
    led.turn_on()?;

    // HTTPハンドラはチャネル経由でメインループに処理を依頼する
    let (sender, receiver) = mpsc::channel();
    let client = RequestClient::new(sender, app_config.request_timeout_ms);
    let _server = CameraHttpServer::start(app_config.http_port, client)?;

    let mut worker = CameraWorker::new(
        camera,
        FilePictureSink::new(&app_config.sd_mount_point),
        counter_store,
        || unsafe { esp_idf_svc::sys::esp_random() },
    );

    info!("要求の待ち受けを開始します");
    loop {
        match receiver.recv_timeout(Duration::from_millis(LOOP_POLL_MS)) {
            Ok(request) => worker.serve(request),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                error!("HTTPサーバーとのチャネルが閉じられました");
                return Err(anyhow::anyhow!("request channel disconnected"));
            }
        }

        if !wifi.is_connected() {
            led.turn_off()?;
            while !wifi.ensure_connected() {
                warn!("{}ms 後に再接続します", wifi.retry_interval_ms());
                FreeRtos::delay_ms(wifi.retry_interval_ms());
            }
            led.turn_on()?;
        }
    }
}

/// ホスト環境ではファームウェアを実行できない
#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!(
        "esp32-cam-node v{} is ESP32 firmware; build it with --target xtensa-esp32-espidf",
        esp32_cam_node::VERSION
    );
}
