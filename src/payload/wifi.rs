use std::fmt;
use std::str::FromStr;

use crate::error::StyleError;

/// Wi-Fi authentication type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WifiSecurity {
    /// WPA/WPA2/WPA3 personal
    #[default]
    Wpa,
    /// Legacy WEP
    Wep,
    /// Open network
    NoPass,
}

impl WifiSecurity {
    /// Token used in the `T:` field
    pub fn token(&self) -> &'static str {
        match self {
            WifiSecurity::Wpa => "WPA",
            WifiSecurity::Wep => "WEP",
            WifiSecurity::NoPass => "nopass",
        }
    }
}

impl fmt::Display for WifiSecurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for WifiSecurity {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wpa" | "wpa2" | "wpa3" => Ok(WifiSecurity::Wpa),
            "wep" => Ok(WifiSecurity::Wep),
            "nopass" | "none" | "open" => Ok(WifiSecurity::NoPass),
            _ => Err(StyleError::Payload(format!("unknown wifi security '{s}'"))),
        }
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ';' | ',' | '"' | ':') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `WIFI:T:<security>;S:<ssid>;P:<password>;H:<hidden>;;` with special
/// characters in the SSID and password backslash-escaped
pub fn build_wifi_payload(ssid: &str, password: &str, security: WifiSecurity, hidden: bool) -> String {
    format!(
        "WIFI:T:{};S:{};P:{};H:{};;",
        security,
        escape(ssid),
        escape(password),
        hidden
    )
}
