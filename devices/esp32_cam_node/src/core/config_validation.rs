#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingWifiSsid,
    WifiSsidTooLong(usize),
    WifiPasswordTooLong(usize),
    InvalidHttpPort(u16),
    InvalidMountPoint(String),
    InvalidRetryInterval(u32),
}

/// ESP-IDF の ClientConfiguration に収まる長さ
const MAX_SSID_LEN: usize = 32;
const MAX_PASSWORD_LEN: usize = 64;

pub fn validate_wifi_ssid(ssid: &str) -> Result<(), ValidationError> {
    if ssid.is_empty() {
        Err(ValidationError::MissingWifiSsid)
    } else if ssid.len() > MAX_SSID_LEN {
        Err(ValidationError::WifiSsidTooLong(ssid.len()))
    } else {
        Ok(())
    }
}

pub fn validate_wifi_password(password: &str) -> Result<(), ValidationError> {
    // 空文字はオープンネットワークとして許可
    if password.len() > MAX_PASSWORD_LEN {
        Err(ValidationError::WifiPasswordTooLong(password.len()))
    } else {
        Ok(())
    }
}

pub fn validate_http_port(port: u16) -> Result<u16, ValidationError> {
    if port == 0 {
        Err(ValidationError::InvalidHttpPort(port))
    } else {
        Ok(port)
    }
}

pub fn validate_mount_point(mount_point: &str) -> Result<(), ValidationError> {
    if mount_point.len() < 2 || !mount_point.starts_with('/') {
        Err(ValidationError::InvalidMountPoint(mount_point.to_string()))
    } else {
        Ok(())
    }
}

pub fn validate_retry_interval_ms(interval_ms: u32) -> Result<u32, ValidationError> {
    if interval_ms < 100 {
        Err(ValidationError::InvalidRetryInterval(interval_ms))
    } else {
        Ok(interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssid() {
        assert_eq!(validate_wifi_ssid(""), Err(ValidationError::MissingWifiSsid));
        assert!(validate_wifi_ssid("farm-ap").is_ok());
        assert_eq!(
            validate_wifi_ssid(&"a".repeat(33)),
            Err(ValidationError::WifiSsidTooLong(33))
        );
    }

    #[test]
    fn test_password_may_be_empty() {
        assert!(validate_wifi_password("").is_ok());
        assert!(validate_wifi_password(&"p".repeat(65)).is_err());
    }

    #[test]
    fn test_http_port() {
        assert_eq!(validate_http_port(80), Ok(80));
        assert_eq!(validate_http_port(0), Err(ValidationError::InvalidHttpPort(0)));
    }

    #[test]
    fn test_mount_point() {
        assert!(validate_mount_point("/sdcard").is_ok());
        assert!(validate_mount_point("sdcard").is_err());
        assert!(validate_mount_point("/").is_err());
    }

    #[test]
    fn test_retry_interval() {
        assert_eq!(validate_retry_interval_ms(3000), Ok(3000));
        assert!(validate_retry_interval_ms(10).is_err());
    }
}
