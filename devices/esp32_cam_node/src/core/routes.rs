//! HTTP ルーティング
//!
//! 撮影系のルートは GET のみ受け付け、それ以外は方式を問わず 404 を返す。

/// 404 応答の本文
pub const NOT_FOUND_BODY: &str = "404 Not Found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    TakePhoto,
    Jpeg,
    Stream,
    NotFound,
}

/// メソッドとURIから応答するルートを決める
pub fn resolve(is_get: bool, uri: &str) -> Route {
    if !is_get {
        return Route::NotFound;
    }
    let path = uri.split_once('?').map_or(uri, |(path, _)| path);
    match path {
        "/takephoto" => Route::TakePhoto,
        "/jpg" => Route::Jpeg,
        "/stream" => Route::Stream,
        _ => Route::NotFound,
    }
}
