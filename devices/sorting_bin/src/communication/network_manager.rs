use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use log::{info, warn};

use crate::core::config::AppConfig;

/// 接続リトライ間隔
const RETRY_INTERVAL_MS: u32 = 3000;

/// WiFi ステーション接続を管理するモジュール
pub struct NetworkManager {
    wifi: BlockingWifi<EspWifi<'static>>,
}

impl NetworkManager {
    /// STA モードで起動し、接続できるまで3秒ごとにリトライする
    pub fn connect(
        modem: Modem,
        sysloop: &EspSystemEventLoop,
        nvs_partition: &EspDefaultNvsPartition,
        config: &AppConfig,
    ) -> anyhow::Result<Self> {
        let mut wifi = BlockingWifi::wrap(
            EspWifi::new(modem, sysloop.clone(), Some(nvs_partition.clone()))?,
            sysloop.clone(),
        )?;

        wifi.set_configuration(&Configuration::Client(ClientConfiguration {
            ssid: config
                .wifi_ssid
                .as_str()
                .try_into()
                .map_err(|_| anyhow::anyhow!("WiFi SSIDを設定できません"))?,
            password: config
                .wifi_password
                .as_str()
                .try_into()
                .map_err(|_| anyhow::anyhow!("WiFi パスワードを設定できません"))?,
            auth_method: if config.wifi_password.is_empty() {
                AuthMethod::None
            } else {
                AuthMethod::WPA2Personal
            },
            ..Default::default()
        }))?;
        wifi.start()?;
        info!("Connecting to WiFi '{}'", config.wifi_ssid);

        let mut manager = Self { wifi };
        while let Err(e) = manager.try_connect() {
            warn!("WiFi接続に失敗しました。{}ms 後に再試行します: {:?}", RETRY_INTERVAL_MS, e);
            FreeRtos::delay_ms(RETRY_INTERVAL_MS);
        }
        Ok(manager)
    }

    /// 切断されていれば再接続を1回試みる
    pub fn maintain(&mut self) {
        if self.wifi.is_connected().unwrap_or(false) {
            return;
        }
        warn!("WiFi接続が切れました。再接続します");
        if let Err(e) = self.try_connect() {
            warn!("再接続に失敗しました: {:?}", e);
            FreeRtos::delay_ms(RETRY_INTERVAL_MS);
        }
    }

    fn try_connect(&mut self) -> anyhow::Result<()> {
        self.wifi.connect()?;
        self.wifi.wait_netif_up()?;
        let ip_info = self.wifi.wifi().sta_netif().get_ip_info()?;
        info!("Connected to WiFi, IP address: {}", ip_info.ip);
        Ok(())
    }
}
