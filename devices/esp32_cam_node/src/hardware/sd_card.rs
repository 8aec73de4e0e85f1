use esp_idf_svc::fs::fatfs::Fatfs;
use esp_idf_svc::hal::gpio::AnyIOPin;
use esp_idf_svc::hal::sd::mmc::{SdMmcHostConfiguration, SdMmcHostDriver, SDMMC1};
use esp_idf_svc::hal::sd::{SdCardConfiguration, SdCardDriver};
use esp_idf_svc::io::vfs::MountedFatfs;
use log::{error, info};

use crate::hardware::pins::SdCardPins;

type SdFatfs = Fatfs<SdCardDriver<SdMmcHostDriver<'static>>>;

/// マウント済みのSDカード
///
/// 破棄するとアンマウントされるため、メインループの間は保持する。
pub struct SdCard {
    _mounted: MountedFatfs<SdFatfs>,
}

impl SdCard {
    /// SDMMC 4bit モードでSDカードをマウントする
    pub fn mount(sdmmc: SDMMC1, pins: SdCardPins, mount_point: &str) -> anyhow::Result<Self> {
        info!("MicroSDカードをマウントしています: {}", mount_point);

        let host = SdMmcHostDriver::new_4bits(
            sdmmc,
            pins.cmd,
            pins.clk,
            pins.d0,
            pins.d1,
            pins.d2,
            pins.d3,
            None::<AnyIOPin>,
            None::<AnyIOPin>,
            &SdMmcHostConfiguration::new(),
        )?;
        let driver = SdCardDriver::new_mmc(host, &SdCardConfiguration::new())?;
        let fatfs = Fatfs::new_sdcard(0, driver)?;
        let mounted = MountedFatfs::mount(fatfs, mount_point, 4).map_err(|e| {
            error!("MicroSDカードのマウントに失敗しました: {:?}", e);
            e
        })?;

        info!("MicroSDカードを初期化しました");
        Ok(Self { _mounted: mounted })
    }
}
