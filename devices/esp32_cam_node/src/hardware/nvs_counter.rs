use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};
use log::info;
use tars_core::{CounterError, CounterStore};

/// NVS 名前空間 (カメラノードとリセットツールで共通)
pub const NVS_NAMESPACE: &str = "tars";
/// 撮影カウンタのキー (EEPROM アドレス0 相当)
pub const COUNTER_KEY: &str = "pic_count";

/// NVS に保存する撮影カウンタ
pub struct NvsCounterStore {
    nvs: EspNvs<NvsDefault>,
}

impl NvsCounterStore {
    pub fn new(partition: EspDefaultNvsPartition) -> anyhow::Result<Self> {
        let nvs = EspNvs::new(partition, NVS_NAMESPACE, true)?;
        info!("NVS名前空間 '{}' を開きました", NVS_NAMESPACE);
        Ok(Self { nvs })
    }
}

impl CounterStore for NvsCounterStore {
    fn read(&mut self) -> Result<u8, CounterError> {
        self.nvs
            .get_u8(COUNTER_KEY)
            .map(|value| value.unwrap_or(0))
            .map_err(|e| CounterError::ReadFailed(format!("{:?}", e)))
    }

    fn write(&mut self, value: u8) -> Result<(), CounterError> {
        // set_u8 は書き込み後に commit まで行う
        self.nvs
            .set_u8(COUNTER_KEY, value)
            .map_err(|e| CounterError::WriteFailed(format!("{:?}", e)))
    }
}
