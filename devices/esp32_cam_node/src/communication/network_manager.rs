use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use log::{info, warn};

use crate::core::config::AppConfig;

/// WiFi ステーション接続を管理するモジュール
pub struct WifiManager {
    wifi: BlockingWifi<EspWifi<'static>>,
    retry_interval_ms: u32,
}

impl WifiManager {
    /// WiFi を STA モードで起動し、接続できるまでリトライする
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

        let auth_method = if config.wifi_password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
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
            auth_method,
            ..Default::default()
        }))?;

        wifi.start()?;
        info!("WiFiをSTAモードで起動しました。'{}' に接続します", config.wifi_ssid);

        let mut manager = Self {
            wifi,
            retry_interval_ms: config.wifi_retry_interval_ms,
        };
        while !manager.try_connect() {
            FreeRtos::delay_ms(manager.retry_interval_ms);
        }
        Ok(manager)
    }

    pub fn is_connected(&self) -> bool {
        self.wifi.is_connected().unwrap_or(false)
    }

    /// 切断されていれば1回だけ再接続を試みる
    ///
    /// 戻り値は呼び出し後に接続されているかどうか。
    pub fn ensure_connected(&mut self) -> bool {
        if self.is_connected() {
            return true;
        }
        warn!("WiFi接続が切れています。再接続します");
        self.try_connect()
    }

    pub fn retry_interval_ms(&self) -> u32 {
        self.retry_interval_ms
    }

    fn try_connect(&mut self) -> bool {
        if let Err(e) = self.wifi.connect() {
            warn!("WiFi接続に失敗しました: {:?}", e);
            return false;
        }
        if let Err(e) = self.wifi.wait_netif_up() {
            warn!("ネットワークインターフェースが起動しませんでした: {:?}", e);
            return false;
        }
        match self.wifi.wifi().sta_netif().get_ip_info() {
            Ok(ip_info) => info!("WiFi接続完了。IPアドレス: {}", ip_info.ip),
            Err(e) => warn!("IPアドレスを取得できませんでした: {:?}", e),
        }
        true
    }
}
