use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};
use tars_core::{CounterError, CounterStore};

/// カメラノードと同じ名前空間・キー
const NVS_NAMESPACE: &str = "tars";
const COUNTER_KEY: &str = "pic_count";

/// カメラノードの撮影カウンタ
pub struct NvsCounterStore {
    nvs: EspNvs<NvsDefault>,
}

impl NvsCounterStore {
    pub fn new(partition: EspDefaultNvsPartition) -> anyhow::Result<Self> {
        Ok(Self {
            nvs: EspNvs::new(partition, NVS_NAMESPACE, true)?,
        })
    }
}

impl CounterStore for NvsCounterStore {
    fn read(&mut self) -> Result<u8, CounterError> {
        match self.nvs.get_u8(COUNTER_KEY) {
            Ok(value) => Ok(value.unwrap_or(0)),
            Err(e) => Err(CounterError::ReadFailed(format!("{:?}", e))),
        }
    }

    fn write(&mut self, value: u8) -> Result<(), CounterError> {
        self.nvs
            .set_u8(COUNTER_KEY, value)
            .map_err(|e| CounterError::WriteFailed(format!("{:?}", e)))
    }
}
