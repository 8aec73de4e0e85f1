use log::debug;

/// コンソール読み取りのエラー
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("シリアルからの読み取りに失敗しました: {0}")]
    ReadFailed(String),
}

/// 1バイトずつ入力を返すコンソール
pub trait AnswerSource {
    /// 入力があるまでブロックする
    fn read_byte(&mut self) -> Result<u8, ConsoleError>;
}

/// 回答の1文字を待つ
///
/// 直前の入力の改行が残っていることがあるため CR/LF は読み飛ばす。
pub fn wait_for_answer<A: AnswerSource>(source: &mut A) -> Result<u8, ConsoleError> {
    loop {
        let byte = source.read_byte()?;
        if byte == b'\r' || byte == b'\n' {
            debug!("skipping line ending 0x{:02x}", byte);
            continue;
        }
        return Ok(byte);
    }
}
