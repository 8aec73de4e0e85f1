use embedded_svc::http::server::Request;
use esp_idf_svc::http::server::{Configuration, EspHttpConnection, EspHttpServer};
use esp_idf_svc::http::Method;
use esp_idf_svc::io::Write;
use log::{info, warn};
use tars_core::mjpeg::{
    frame_part_header, inline_jpeg_headers, FRAME_PART_TRAILER, STREAM_CONTENT_TYPE,
};

use crate::core::request::RequestClient;
use crate::core::routes::{resolve, Route, NOT_FOUND_BODY};

const TEXT_PLAIN: [(&str, &str); 1] = [("Content-Type", "text/plain")];

/// ワイルドカードを登録するメソッド
///
/// httpd は URI が一致してメソッドが違う要求に独自の 405 を返すため、
/// GET 以外も同じハンドラで受けて 404 にする。
const ROUTED_METHODS: [Method; 7] = [
    Method::Get,
    Method::Post,
    Method::Put,
    Method::Delete,
    Method::Head,
    Method::Options,
    Method::Patch,
];

/// カメラノードの HTTP サーバー
///
/// 破棄するとサーバーが停止するため、メインループの間は保持する。
pub struct CameraHttpServer {
    _server: EspHttpServer<'static>,
}

impl CameraHttpServer {
    pub fn start(port: u16, client: RequestClient) -> anyhow::Result<Self> {
        let mut server = EspHttpServer::new(&Configuration {
            http_port: port,
            uri_match_wildcard: true,
            max_uri_handlers: ROUTED_METHODS.len(),
            ..Default::default()
        })?;

        for method in ROUTED_METHODS {
            let client = client.clone();
            server.fn_handler("/*", method, move |req| handle(&client, req))?;
        }

        info!("HTTPサーバーを起動しました (port {})", port);
        Ok(Self { _server: server })
    }
}

fn handle(client: &RequestClient, req: Request<&mut EspHttpConnection<'_>>) -> anyhow::Result<()> {
    let is_get = req.method() == Method::Get;
    match resolve(is_get, req.uri()) {
        Route::TakePhoto => take_photo(client, req),
        Route::Jpeg => jpeg(client, req),
        Route::Stream => stream(client, req),
        Route::NotFound => {
            warn!("未登録のURIへのアクセス: {:?} {}", req.method(), req.uri());
            let mut response = req.into_response(404, Some("Not Found"), &TEXT_PLAIN)?;
            response.write_all(NOT_FOUND_BODY.as_bytes())?;
            Ok(())
        }
    }
}

fn take_photo(
    client: &RequestClient,
    req: Request<&mut EspHttpConnection<'_>>,
) -> anyhow::Result<()> {
    info!("GET /takephoto");
    match client.take_photo() {
        Some(angle) => {
            let mut response = req.into_response(200, Some("OK"), &TEXT_PLAIN)?;
            response.write_all(angle.to_string().as_bytes())?;
        }
        None => capture_failed(req)?,
    }
    Ok(())
}

fn jpeg(client: &RequestClient, req: Request<&mut EspHttpConnection<'_>>) -> anyhow::Result<()> {
    match client.snapshot() {
        Some(jpeg) => {
            let mut response = req.into_response(200, Some("OK"), &inline_jpeg_headers())?;
            response.write_all(&jpeg)?;
        }
        None => capture_failed(req)?,
    }
    Ok(())
}

fn stream(client: &RequestClient, req: Request<&mut EspHttpConnection<'_>>) -> anyhow::Result<()> {
    info!("MJPEG ストリームを開始します");
    let mut response =
        req.into_response(200, Some("OK"), &[("Content-Type", STREAM_CONTENT_TYPE)])?;
    let mut frames: u32 = 0;
    while let Some(jpeg) = client.snapshot() {
        let sent = response
            .write_all(frame_part_header(jpeg.len()).as_bytes())
            .and_then(|_| response.write_all(&jpeg))
            .and_then(|_| response.write_all(FRAME_PART_TRAILER));
        if sent.is_err() {
            break;
        }
        frames += 1;
    }
    info!("MJPEG ストリームを終了しました ({} フレーム)", frames);
    Ok(())
}

fn capture_failed(req: Request<&mut EspHttpConnection<'_>>) -> anyhow::Result<()> {
    let mut response = req.into_response(500, Some("Internal Server Error"), &TEXT_PLAIN)?;
    response.write_all(b"Camera capture failed")?;
    Ok(())
}
