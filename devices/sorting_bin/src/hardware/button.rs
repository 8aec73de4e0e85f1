use esp_idf_svc::hal::gpio::{Gpio7, Input, InterruptType, PinDriver, Pull};
use log::debug;
use tars_core::TriggerFlag;

/// 割り込みハンドラが立てるフラグ
static BUTTON_PRESSED: TriggerFlag = TriggerFlag::new();

/// 仕分け開始ボタン (GPIO7, プルアップ, 立ち下がりエッジ)
///
/// ESP-IDF は割り込み発生後に割り込みを無効化するため、押下を処理したら
/// `rearm` で再度有効にする。無効の間のチャタリングは無視される。
pub struct Button {
    pin: PinDriver<'static, Gpio7, Input>,
}

impl Button {
    pub fn new(pin: Gpio7) -> anyhow::Result<Self> {
        let mut pin = PinDriver::input(pin)?;
        pin.set_pull(Pull::Up)?;
        pin.set_interrupt_type(InterruptType::NegEdge)?;
        // SAFETY: ハンドラはアトミックなフラグ操作のみで、ヒープもロックも使わない
        unsafe {
            pin.subscribe(|| BUTTON_PRESSED.raise())?;
        }
        pin.enable_interrupt()?;
        Ok(Self { pin })
    }

    /// 押下があればフラグを下ろして true を返す
    pub fn take_press(&self) -> bool {
        let pressed = BUTTON_PRESSED.take();
        if pressed {
            debug!("button pressed");
        }
        pressed
    }

    pub fn rearm(&mut self) -> anyhow::Result<()> {
        self.pin.enable_interrupt()?;
        Ok(())
    }
}
