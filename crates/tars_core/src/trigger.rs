use std::sync::atomic::{AtomicBool, Ordering};

/// 割り込みハンドラからメインループへ渡すフラグ
///
/// ISR 内では `raise()` のみを呼ぶ。保留できる押下は1回分だけ。
#[derive(Debug, Default)]
pub struct TriggerFlag {
    raised: AtomicBool,
}

impl TriggerFlag {
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// フラグを読み取ってクリアする
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears_flag() {
        let flag = TriggerFlag::new();
        assert!(!flag.take());

        flag.raise();
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn test_multiple_raises_collapse() {
        static FLAG: TriggerFlag = TriggerFlag::new();
        FLAG.raise();
        FLAG.raise();
        assert!(FLAG.take());
        assert!(!FLAG.take());
    }
}
