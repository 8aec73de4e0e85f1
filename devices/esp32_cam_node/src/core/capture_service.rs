use std::fs::File;
use std::io::Write;

use log::{error, info, warn};
use tars_core::{CounterError, CounterStore, PictureCounter, PictureSlot, SortAngle};

/// 撮影・保存処理のエラー
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("カメラのキャプチャに失敗しました: {0}")]
    CaptureFailed(String),

    #[error("ファイルを書き込みモードで開けませんでした: {0}")]
    OpenFailed(String),

    #[error("ファイルの書き込みに失敗しました: {0}")]
    WriteFailed(String),

    #[error(transparent)]
    Counter(#[from] CounterError),
}

/// JPEG フレームの取得元
pub trait FrameSource {
    fn capture_jpeg(&mut self) -> Result<Vec<u8>, CaptureError>;
}

/// 撮影した写真の保存先
pub trait PictureSink {
    fn save(&mut self, slot: &PictureSlot, data: &[u8]) -> Result<String, CaptureError>;
}

/// マウント済みファイルシステム (SDカード) へ保存する
pub struct FilePictureSink {
    mount_point: String,
}

impl FilePictureSink {
    pub fn new(mount_point: &str) -> Self {
        Self {
            mount_point: mount_point.to_string(),
        }
    }
}

impl PictureSink for FilePictureSink {
    fn save(&mut self, slot: &PictureSlot, data: &[u8]) -> Result<String, CaptureError> {
        let path = slot.file_path(&self.mount_point);
        let mut file =
            File::create(&path).map_err(|e| CaptureError::OpenFailed(format!("{}: {}", path, e)))?;
        file.write_all(data)
            .map_err(|e| CaptureError::WriteFailed(format!("{}: {}", path, e)))?;
        Ok(path)
    }
}

/// `/takephoto` の処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakePhotoOutcome {
    pub slot: PictureSlot,
    pub saved_path: Option<String>,
    pub angle: SortAngle,
}

/// 撮影サービス - 撮影、保存、カウンタ更新を管理
pub struct CaptureService;

impl CaptureService {
    /// 写真を撮影して保存し、仕分け角度を決める
    ///
    /// 撮影や保存に失敗してもカウンタは進め、角度は必ず返す。
    /// カウンタの読み書きに失敗した場合のみエラーとする。
    pub fn take_photo<F, P, S>(
        source: &mut F,
        sink: &mut P,
        store: &mut S,
        random: u32,
    ) -> Result<TakePhotoOutcome, CaptureError>
    where
        F: FrameSource,
        P: PictureSink,
        S: CounterStore,
    {
        let slot = PictureCounter::next_picture(store)?;

        let saved_path = match source.capture_jpeg() {
            Ok(jpeg) => {
                info!("写真を撮影しました: {} bytes", jpeg.len());
                match sink.save(&slot, &jpeg) {
                    Ok(path) => {
                        info!("ファイルを保存しました: {}", path);
                        Some(path)
                    }
                    Err(e) => {
                        error!("{}", e);
                        None
                    }
                }
            }
            Err(e) => {
                error!("{}", e);
                None
            }
        };

        PictureCounter::commit(store, &slot)?;

        let angle = SortAngle::from_random(random);
        if saved_path.is_none() {
            warn!("写真は保存されていませんが、角度 {} を応答します", angle);
        }
        info!("撮影番号 {} の処理が完了しました ({})", slot.count, slot.path);

        Ok(TakePhotoOutcome {
            slot,
            saved_path,
            angle,
        })
    }

    /// 保存せずに1フレームだけ取得する
    pub fn snapshot<F: FrameSource>(source: &mut F) -> Option<Vec<u8>> {
        match source.capture_jpeg() {
            Ok(jpeg) => Some(jpeg),
            Err(e) => {
                error!("{}", e);
                None
            }
        }
    }
}
