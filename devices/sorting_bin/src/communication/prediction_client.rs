use std::time::Duration;

use embedded_svc::http::client::Client;
use embedded_svc::io::Read;
use esp_idf_svc::http::client::{Configuration, EspHttpConnection};
use log::debug;

use crate::core::sorting_service::{PredictionClient, PredictionRequestError};

/// 角度の応答は数文字なので、これを超えたら読み捨てる
const MAX_BODY_LEN: usize = 64;

/// カメラノードの `/takephoto` を呼び出すクライアント
pub struct HttpPredictionClient {
    url: String,
    timeout: Duration,
}

impl HttpPredictionClient {
    pub fn new(url: String, timeout_ms: u32) -> Self {
        Self {
            url,
            timeout: Duration::from_millis(timeout_ms as u64),
        }
    }
}

impl PredictionClient for HttpPredictionClient {
    fn request_prediction(&mut self) -> Result<String, PredictionRequestError> {
        debug!("GET {}", self.url);
        let connection = EspHttpConnection::new(&Configuration {
            timeout: Some(self.timeout),
            ..Default::default()
        })
        .map_err(|e| PredictionRequestError::Connection(format!("{:?}", e)))?;
        let mut client = Client::wrap(connection);

        let request = client
            .get(&self.url)
            .map_err(|e| PredictionRequestError::Connection(format!("{:?}", e)))?;
        let mut response = request
            .submit()
            .map_err(|e| PredictionRequestError::Connection(format!("{:?}", e)))?;

        let status = response.status();
        if status != 200 {
            return Err(PredictionRequestError::Status(status));
        }

        let mut body = Vec::new();
        let mut buf = [0u8; 32];
        loop {
            let len = response
                .read(&mut buf)
                .map_err(|e| PredictionRequestError::Body(format!("{:?}", e)))?;
            if len == 0 {
                break;
            }
            body.extend_from_slice(&buf[..len]);
            if body.len() > MAX_BODY_LEN {
                return Err(PredictionRequestError::Body("応答が長すぎます".to_string()));
            }
        }

        String::from_utf8(body).map_err(|e| PredictionRequestError::Body(e.to_string()))
    }
}
