use log::info;

use crate::picture_counter::{CounterError, CounterStore};

/// リセット確認の入力か ('y' / 'Y')
pub fn is_confirmation(input: u8) -> bool {
    matches!(input, b'y' | b'Y')
}

/// リセット対話の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetOutcome {
    pub before: u8,
    pub after: u8,
    pub reset: bool,
}

/// 撮影カウンタのリセット対話
pub struct ResetDialog;

impl ResetDialog {
    /// 現在値を読み、確認入力があれば 0 に戻す
    ///
    /// `read_answer` は現在値の表示後に呼ばれ、1バイトの入力を返す。
    pub fn run<S, F>(store: &mut S, read_answer: F) -> Result<ResetOutcome, CounterError>
    where
        S: CounterStore,
        F: FnOnce() -> u8,
    {
        let before = store.read()?;
        info!("EEPROM value: {}", before);
        info!("Do you want to reset the EEPROM value? (y/n)");

        let answer = read_answer();
        if !is_confirmation(answer) {
            info!("EEPROM value not reset, terminating program ...");
            return Ok(ResetOutcome {
                before,
                after: before,
                reset: false,
            });
        }

        store.write(0)?;
        info!("EEPROM value reset to 0");
        let after = store.read()?;
        info!("EEPROM value: {}", after);
        info!("EEPROM value reset successfully, terminating program ...");

        Ok(ResetOutcome {
            before,
            after,
            reset: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picture_counter::MemoryCounterStore;

    #[test]
    fn test_confirmation_bytes() {
        assert!(is_confirmation(b'y'));
        assert!(is_confirmation(b'Y'));
        assert!(!is_confirmation(b'n'));
        assert!(!is_confirmation(b'\n'));
    }

    #[test]
    fn test_reset_on_yes() {
        let mut store = MemoryCounterStore::new(17);
        let outcome = ResetDialog::run(&mut store, || b'Y').unwrap();
        assert_eq!(
            outcome,
            ResetOutcome {
                before: 17,
                after: 0,
                reset: true
            }
        );
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_keep_on_other_input() {
        let mut store = MemoryCounterStore::new(17);
        let outcome = ResetDialog::run(&mut store, || b'n').unwrap();
        assert!(!outcome.reset);
        assert_eq!(outcome.after, 17);
        assert_eq!(store.writes, 0);
    }
}
