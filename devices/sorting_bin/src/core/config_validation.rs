#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingWifiSsid,
    WifiSsidTooLong(usize),
    WifiPasswordTooLong(usize),
    MissingCameraHost,
    InvalidCameraHost(String),
    InvalidDepthRange { empty_cm: f32, full_cm: f32 },
    InvalidThreshold(u8),
    InvalidHomeAngle(u16),
    InvalidTimeout(u32),
}

const MAX_SSID_LEN: usize = 32;
const MAX_PASSWORD_LEN: usize = 64;
const MAX_SERVO_DEGREES: u16 = 180;
/// HC-SR04 の測定上限 (約4m) に相当するエコー時間
const MAX_ECHO_TIMEOUT_US: u32 = 60_000;

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
    if password.len() > MAX_PASSWORD_LEN {
        Err(ValidationError::WifiPasswordTooLong(password.len()))
    } else {
        Ok(())
    }
}

/// `host` または `host:port` のみ許可する (スキームやパスは付けない)
pub fn validate_camera_host(host: &str) -> Result<(), ValidationError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(ValidationError::MissingCameraHost);
    }
    if host.contains("://") || host.contains('/') || host.contains(' ') {
        return Err(ValidationError::InvalidCameraHost(host.to_string()));
    }
    Ok(())
}

pub fn validate_depth_range(empty_cm: f32, full_cm: f32) -> Result<(), ValidationError> {
    if full_cm < 0.0 || empty_cm <= full_cm {
        Err(ValidationError::InvalidDepthRange { empty_cm, full_cm })
    } else {
        Ok(())
    }
}

pub fn validate_threshold_percent(percent: u8) -> Result<u8, ValidationError> {
    if percent == 0 || percent > 100 {
        Err(ValidationError::InvalidThreshold(percent))
    } else {
        Ok(percent)
    }
}

pub fn validate_home_angle(degrees: u16) -> Result<u16, ValidationError> {
    if degrees > MAX_SERVO_DEGREES {
        Err(ValidationError::InvalidHomeAngle(degrees))
    } else {
        Ok(degrees)
    }
}

pub fn validate_echo_timeout_us(timeout_us: u32) -> Result<u32, ValidationError> {
    if timeout_us == 0 || timeout_us > MAX_ECHO_TIMEOUT_US {
        Err(ValidationError::InvalidTimeout(timeout_us))
    } else {
        Ok(timeout_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_host() {
        assert!(validate_camera_host("192.168.1.50").is_ok());
        assert!(validate_camera_host("esp32-cam.local:8080").is_ok());
        assert_eq!(validate_camera_host(" "), Err(ValidationError::MissingCameraHost));
        assert!(matches!(
            validate_camera_host("http://cam/takephoto"),
            Err(ValidationError::InvalidCameraHost(_))
        ));
    }

    #[test]
    fn test_depth_range() {
        assert!(validate_depth_range(40.0, 5.0).is_ok());
        assert!(validate_depth_range(5.0, 5.0).is_err());
        assert!(validate_depth_range(40.0, -1.0).is_err());
    }

    #[test]
    fn test_threshold_percent() {
        assert_eq!(validate_threshold_percent(90), Ok(90));
        assert!(validate_threshold_percent(0).is_err());
        assert!(validate_threshold_percent(101).is_err());
    }

    #[test]
    fn test_home_angle() {
        assert_eq!(validate_home_angle(90), Ok(90));
        assert_eq!(validate_home_angle(181), Err(ValidationError::InvalidHomeAngle(181)));
    }

    #[test]
    fn test_echo_timeout() {
        assert_eq!(validate_echo_timeout_us(30_000), Ok(30_000));
        assert!(validate_echo_timeout_us(0).is_err());
        assert!(validate_echo_timeout_us(100_000).is_err());
    }
}
