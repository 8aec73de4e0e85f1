// Reset Flow Tests
// シリアル入力のモックでカウンタリセットの対話を検証します

use std::collections::VecDeque;

use eeprom_resetter::core::{wait_for_answer, AnswerSource, ConsoleError};
use tars_core::{CounterStore, MemoryCounterStore, ResetDialog};

/// 入力バイト列を順に返すシリアル
struct MockSerial {
    input: VecDeque<u8>,
}

impl MockSerial {
    fn new(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
        }
    }
}

impl AnswerSource for MockSerial {
    fn read_byte(&mut self) -> Result<u8, ConsoleError> {
        self.input
            .pop_front()
            .ok_or_else(|| ConsoleError::ReadFailed("input exhausted".to_string()))
    }
}

fn run_with_input(initial: u8, input: &[u8]) -> (MemoryCounterStore, bool) {
    let mut store = MemoryCounterStore::new(initial);
    let mut serial = MockSerial::new(input);
    let outcome =
        ResetDialog::run(&mut store, || wait_for_answer(&mut serial).unwrap_or(b'n')).unwrap();
    (store, outcome.reset)
}

#[test]
fn test_line_endings_are_skipped() {
    let mut serial = MockSerial::new(b"\r\n\ny");
    assert_eq!(wait_for_answer(&mut serial).unwrap(), b'y');
}

#[test]
fn test_read_error_propagates() {
    let mut serial = MockSerial::new(b"\n");
    assert!(matches!(wait_for_answer(&mut serial), Err(ConsoleError::ReadFailed(_))));
}

#[test]
fn test_yes_resets_counter() {
    let (mut store, reset) = run_with_input(42, b"y\r\n");
    assert!(reset);
    assert_eq!(store.read().unwrap(), 0);
    assert_eq!(store.writes, 1);
}

#[test]
fn test_uppercase_yes_after_newline() {
    let (store, reset) = run_with_input(7, b"\nY");
    assert!(reset);
    assert_eq!(store.value, 0);
}

#[test]
fn test_other_answer_keeps_counter() {
    let (store, reset) = run_with_input(42, b"n");
    assert!(!reset);
    assert_eq!(store.value, 42);
    assert_eq!(store.writes, 0);
}

#[test]
fn test_no_input_keeps_counter() {
    let (store, reset) = run_with_input(5, b"");
    assert!(!reset);
    assert_eq!(store.value, 5);
}
