use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use log::{error, warn};
use tars_core::{CounterStore, SortAngle};

use crate::core::capture_service::{CaptureService, FrameSource, PictureSink};

/// HTTPハンドラからメインループへの要求
///
/// カメラ、SDカード、NVS はメインループだけが所有する。
#[derive(Debug)]
pub enum CameraRequest {
    /// 撮影して保存し、仕分け角度を返す
    TakePhoto { reply: Sender<Option<SortAngle>> },
    /// 保存せずに現在のフレームを返す
    Snapshot { reply: Sender<Option<Vec<u8>>> },
}

/// HTTPハンドラ側の要求送信口
#[derive(Debug, Clone)]
pub struct RequestClient {
    sender: Sender<CameraRequest>,
    timeout: Duration,
}

impl RequestClient {
    pub fn new(sender: Sender<CameraRequest>, timeout_ms: u32) -> Self {
        Self {
            sender,
            timeout: Duration::from_millis(timeout_ms as u64),
        }
    }

    /// 撮影を要求し、角度を待つ
    pub fn take_photo(&self) -> Option<SortAngle> {
        let (reply, rx) = mpsc::channel();
        self.sender.send(CameraRequest::TakePhoto { reply }).ok()?;
        self.wait(rx).flatten()
    }

    /// フレームを要求する
    pub fn snapshot(&self) -> Option<Vec<u8>> {
        let (reply, rx) = mpsc::channel();
        self.sender.send(CameraRequest::Snapshot { reply }).ok()?;
        self.wait(rx).flatten()
    }

    fn wait<T>(&self, rx: Receiver<T>) -> Option<T> {
        match rx.recv_timeout(self.timeout) {
            Ok(value) => Some(value),
            Err(RecvTimeoutError::Timeout) => {
                warn!("メインループからの応答がタイムアウトしました");
                None
            }
            Err(RecvTimeoutError::Disconnected) => {
                error!("メインループとの通信が切断されました");
                None
            }
        }
    }
}

/// メインループ側で要求を処理するワーカー
pub struct CameraWorker<F, P, S, R>
where
    F: FrameSource,
    P: PictureSink,
    S: CounterStore,
    R: FnMut() -> u32,
{
    source: F,
    sink: P,
    store: S,
    random: R,
}

impl<F, P, S, R> CameraWorker<F, P, S, R>
where
    F: FrameSource,
    P: PictureSink,
    S: CounterStore,
    R: FnMut() -> u32,
{
    pub fn new(source: F, sink: P, store: S, random: R) -> Self {
        Self {
            source,
            sink,
            store,
            random,
        }
    }

    pub fn serve(&mut self, request: CameraRequest) {
        match request {
            CameraRequest::TakePhoto { reply } => {
                let random = (self.random)();
                let angle = match CaptureService::take_photo(
                    &mut self.source,
                    &mut self.sink,
                    &mut self.store,
                    random,
                ) {
                    Ok(outcome) => Some(outcome.angle),
                    Err(e) => {
                        error!("撮影処理でエラーが発生しました: {}", e);
                        None
                    }
                };
                // ハンドラ側がタイムアウト済みなら送信は失敗するが問題ない
                let _ = reply.send(angle);
            }
            CameraRequest::Snapshot { reply } => {
                let _ = reply.send(CaptureService::snapshot(&mut self.source));
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
