use log::info;

/// カウンタ永続化のエラー
#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    #[error("カウンタの読み込みに失敗しました: {0}")]
    ReadFailed(String),

    #[error("カウンタの書き込みに失敗しました: {0}")]
    WriteFailed(String),
}

/// 1バイトのカウンタを保持するストレージ
///
/// 実機では NVS (エミュレートされた EEPROM)、テストではメモリ上の値を使う。
pub trait CounterStore {
    /// 保存されている値を読み込む (未保存なら 0)
    fn read(&mut self) -> Result<u8, CounterError>;

    /// 値を書き込み、確定させる
    fn write(&mut self, value: u8) -> Result<(), CounterError>;
}

/// テスト・ホスト用のメモリ上のストレージ
#[derive(Debug, Default, Clone)]
pub struct MemoryCounterStore {
    pub value: u8,
    pub writes: usize,
}

impl MemoryCounterStore {
    pub fn new(value: u8) -> Self {
        Self { value, writes: 0 }
    }
}

impl CounterStore for MemoryCounterStore {
    fn read(&mut self) -> Result<u8, CounterError> {
        Ok(self.value)
    }

    fn write(&mut self, value: u8) -> Result<(), CounterError> {
        self.value = value;
        self.writes += 1;
        Ok(())
    }
}

/// 次に撮影する写真の番号と保存先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureSlot {
    pub count: u16,
    pub path: String,
}

impl PictureSlot {
    pub fn new(count: u16) -> Self {
        Self {
            count,
            path: format!("/picture{}.jpg", count),
        }
    }

    /// マウントポイントを付けた実際のファイルパス
    pub fn file_path(&self, mount_point: &str) -> String {
        format!("{}{}", mount_point.trim_end_matches('/'), self.path)
    }

    /// EEPROM に書き戻す値 (1バイトに切り詰める)
    pub fn stored_value(&self) -> u8 {
        (self.count & 0xFF) as u8
    }
}

/// 撮影カウンタ
pub struct PictureCounter;

impl PictureCounter {
    /// 保存値 + 1 を次の写真番号とする
    ///
    /// 255 の次は 256 (パスはそのまま)、保存値は 0 に戻る。
    pub fn next_picture<S: CounterStore>(store: &mut S) -> Result<PictureSlot, CounterError> {
        let stored = store.read()?;
        Ok(PictureSlot::new(stored as u16 + 1))
    }

    /// 撮影後にカウンタを書き戻す
    pub fn commit<S: CounterStore>(store: &mut S, slot: &PictureSlot) -> Result<(), CounterError> {
        store.write(slot.stored_value())?;
        info!("撮影カウンタを更新しました: {}", slot.stored_value());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_picture() {
        let mut store = MemoryCounterStore::default();
        let slot = PictureCounter::next_picture(&mut store).unwrap();
        assert_eq!(slot.count, 1);
        assert_eq!(slot.path, "/picture1.jpg");
    }

    #[test]
    fn test_next_picture_does_not_write() {
        let mut store = MemoryCounterStore::new(41);
        let slot = PictureCounter::next_picture(&mut store).unwrap();
        assert_eq!(slot.path, "/picture42.jpg");
        assert_eq!(store.writes, 0);
        assert_eq!(store.value, 41);
    }

    #[test]
    fn test_commit_writes_count() {
        let mut store = MemoryCounterStore::new(41);
        let slot = PictureCounter::next_picture(&mut store).unwrap();
        PictureCounter::commit(&mut store, &slot).unwrap();
        assert_eq!(store.value, 42);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_wraparound_after_255() {
        let mut store = MemoryCounterStore::new(255);
        let slot = PictureCounter::next_picture(&mut store).unwrap();
        assert_eq!(slot.path, "/picture256.jpg");
        PictureCounter::commit(&mut store, &slot).unwrap();
        assert_eq!(store.value, 0);

        let slot = PictureCounter::next_picture(&mut store).unwrap();
        assert_eq!(slot.path, "/picture1.jpg");
    }

    #[test]
    fn test_file_path_with_mount_point() {
        let slot = PictureSlot::new(7);
        assert_eq!(slot.file_path("/sdcard"), "/sdcard/picture7.jpg");
        assert_eq!(slot.file_path("/sdcard/"), "/sdcard/picture7.jpg");
    }
}
