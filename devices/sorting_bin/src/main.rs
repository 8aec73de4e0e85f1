#[cfg(target_os = "espidf")]
use std::time::{Duration, Instant};

#[cfg(target_os = "espidf")]
use esp_idf_svc::{
    eventloop::EspSystemEventLoop,
    hal::delay::{Ets, FreeRtos},
    hal::gpio::PinDriver,
    hal::i2c::{I2cConfig, I2cDriver},
    hal::peripherals::Peripherals,
    hal::units::KiloHertz,
    nvs::EspDefaultNvsPartition,
};
#[cfg(target_os = "espidf")]
use log::{error, info};

#[cfg(target_os = "espidf")]
use sorting_bin::communication::{HttpPredictionClient, NetworkManager};
#[cfg(target_os = "espidf")]
use sorting_bin::core::capacity_display::splash_sequence;
#[cfg(target_os = "espidf")]
use sorting_bin::core::{
    AppConfig, CapacityDisplay, FillSettings, SortingService, SortingSettings, Ultrasonic,
};
#[cfg(target_os = "espidf")]
use sorting_bin::hardware::{Button, LcdPanel, LedcServo};

/// メインループの周期
#[cfg(target_os = "espidf")]
const LOOP_INTERVAL_MS: u32 = 10;

/// アプリケーションのメインエントリーポイント
#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    // ESP-IDFの基本初期化
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    info!("TArS 仕分けゴミ箱 v{}", sorting_bin::VERSION);

    // 設定ファイル読み込み
    let app_config = AppConfig::load().map_err(|e| {
        error!("設定ファイルの読み込みに失敗しました: {}", e);
        anyhow::anyhow!("設定ファイルの読み込みエラー: {}", e)
    })?;

    // ペリフェラルとシステムリソースの初期化
    let peripherals = Peripherals::take().unwrap();
    let sysloop = EspSystemEventLoop::take()?;
    let nvs_partition = EspDefaultNvsPartition::take()?;
    let pins = peripherals.pins;

    // LCD (SDA 10 / SCL 9) と起動画面
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        pins.gpio10,
        pins.gpio9,
        &I2cConfig::new().baudrate(KiloHertz(100).into()),
    )?;
    let mut lcd = LcdPanel::new(i2c)?;
    for (screen, hold_ms) in splash_sequence() {
        lcd.show(&screen)?;
        FreeRtos::delay_ms(hold_ms);
    }
    lcd.clear()?;

    let mut network =
        NetworkManager::connect(peripherals.modem, &sysloop, &nvs_partition, &app_config)?;

    let servo = LedcServo::new(
        peripherals.ledc.timer0,
        peripherals.ledc.channel0,
        pins.gpio6,
    )?;

    // 超音波センサー (TRIG 4 / ECHO 5)
    let ultrasonic = Ultrasonic::new(
        PinDriver::output(pins.gpio4)?,
        PinDriver::input(pins.gpio5)?,
        Ets,
        || unsafe { esp_idf_svc::sys::esp_timer_get_time() as u64 },
        app_config.echo_timeout_us,
    );

    let mut button = Button::new(pins.gpio7)?;

    let settings = SortingSettings {
        home_angle: app_config.home_angle,
        servo_settle_ms: app_config.servo_settle_ms,
        fill: FillSettings {
            empty_depth_cm: app_config.empty_depth_cm,
            full_distance_cm: app_config.full_distance_cm,
            full_threshold_percent: app_config.full_threshold_percent,
        },
    };
    let client = HttpPredictionClient::new(app_config.takephoto_url(), app_config.http_timeout_ms);
    let mut service = SortingService::new(client, servo, ultrasonic, lcd, FreeRtos, settings);
    service.home();

    info!("ボタン入力の待ち受けを開始します ({})", app_config.takephoto_url());
    let measure_interval = Duration::from_millis(app_config.measure_interval_ms as u64);
    let mut last_measured = Instant::now();
    service.refresh();

    loop {
        if button.take_press() {
            let report = service.run_cycle();
            info!("仕分け結果: {:?}", report);
            button.rearm()?;
            last_measured = Instant::now();
        } else if last_measured.elapsed() >= measure_interval {
            service.refresh();
            last_measured = Instant::now();
        }

        network.maintain();
        FreeRtos::delay_ms(LOOP_INTERVAL_MS);
    }
}

/// ホスト環境ではファームウェアを実行できない
#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!(
        "sorting-bin v{} is ESP32-S3 firmware; build it with --target xtensa-esp32s3-espidf",
        sorting_bin::VERSION
    );
}
