#[cfg(target_os = "espidf")]
use esp_idf_svc::{hal::delay::FreeRtos, hal::peripherals::Peripherals, nvs::EspDefaultNvsPartition};
#[cfg(target_os = "espidf")]
use log::{error, info};

#[cfg(target_os = "espidf")]
use eeprom_resetter::core::{wait_for_answer, AppConfig};
#[cfg(target_os = "espidf")]
use eeprom_resetter::hardware::{NvsCounterStore, UartConsole};
#[cfg(target_os = "espidf")]
use tars_core::ResetDialog;

/// アプリケーションのメインエントリーポイント
#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let app_config = AppConfig::load().map_err(|e| {
        error!("設定ファイルの読み込みに失敗しました: {}", e);
        anyhow::anyhow!("設定ファイルの読み込みエラー: {}", e)
    })?;

    // シリアルモニタを開く時間を確保する
    FreeRtos::delay_ms(app_config.startup_delay_ms);

    let peripherals = Peripherals::take().unwrap();
    let nvs_partition = EspDefaultNvsPartition::take()?;
    let mut store = NvsCounterStore::new(nvs_partition)?;
    let mut console = UartConsole::new(
        peripherals.uart0,
        peripherals.pins.gpio1,
        peripherals.pins.gpio3,
    )?;

    let outcome = ResetDialog::run(&mut store, || match wait_for_answer(&mut console) {
        Ok(answer) => answer,
        Err(e) => {
            // 読み取れなければリセットしない
            error!("{}", e);
            b'n'
        }
    })?;
    info!("完了: {:?}", outcome);

    loop {
        FreeRtos::delay_ms(1000);
    }
}

/// ホスト環境ではファームウェアを実行できない
#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!(
        "eeprom-resetter v{} is ESP32 firmware; build it with --target xtensa-esp32-espidf",
        eeprom_resetter::VERSION
    );
}
