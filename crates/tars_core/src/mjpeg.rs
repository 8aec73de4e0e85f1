/// MJPEG ストリームのマルチパート書式

pub const BOUNDARY: &str = "frame";

pub const STREAM_CONTENT_TYPE: &str = "multipart/x-mixed-replace; boundary=frame";

/// 各フレームの後ろに付ける区切り
pub const FRAME_PART_TRAILER: &[u8] = b"\r\n";

/// 1フレーム分のパートヘッダ
pub fn frame_part_header(jpeg_len: usize) -> String {
    format!(
        "--{}\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\n\r\n",
        BOUNDARY, jpeg_len
    )
}

/// 単発キャプチャ応答のヘッダ
pub fn inline_jpeg_headers() -> [(&'static str, &'static str); 2] {
    [
        ("Content-Type", "image/jpeg"),
        ("Content-Disposition", "inline; filename=capture.jpg"),
    ]
}
