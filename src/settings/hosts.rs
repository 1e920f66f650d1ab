use std::path::Path;

use serde::Deserialize;

use crate::{
    lib::errors::SettingsError,
    session::credentials::{ConsoleTarget, HostMac, MorningToken, RegistKey},
};

/// A console paired with this client by an earlier registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredHost {
    pub nickname: String,
    /// Last known address; may be empty when the console was registered by broadcast.
    pub address: String,
    pub target: ConsoleTarget,
    pub regist_key: RegistKey,
    pub morning: MorningToken,
    pub server_mac: HostMac,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawRegisteredHost {
    pub nickname: Option<String>,
    pub address: Option<String>,
    pub target: Option<String>,
    pub regist_key: Option<String>,
    pub morning: Option<String>,
    pub server_mac: Option<String>,
}

pub fn parse_registered_hosts(
    raw: Option<Vec<RawRegisteredHost>>,
    path: &Path,
) -> Result<Vec<RegisteredHost>, SettingsError> {
    raw.unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, host)| parse_registered_host(index, host, path))
        .collect()
}

fn parse_registered_host(
    index: usize,
    raw: RawRegisteredHost,
    path: &Path,
) -> Result<RegisteredHost, SettingsError> {
    let missing = |field: &'static str| SettingsError::MissingField {
        path: path.to_path_buf(),
        field,
        message: format!("registered host #{index}"),
    };
    let invalid = |field: &'static str, message: String| SettingsError::InvalidField {
        path: path.to_path_buf(),
        field,
        message: format!("registered host #{index}: {message}"),
    };

    let nickname = raw
        .nickname
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| missing("registered_hosts.nickname"))?;

    let target = match raw.target {
        Some(value) => value
            .parse::<ConsoleTarget>()
            .map_err(|message| invalid("registered_hosts.target", message))?,
        None => ConsoleTarget::default(),
    };

    let regist_key = raw
        .regist_key
        .ok_or_else(|| missing("registered_hosts.regist_key"))
        .and_then(|value| {
            RegistKey::from_hex(&value).map_err(|err| {
                invalid(
                    "registered_hosts.regist_key",
                    format!("expected 32 hex digits ({err})"),
                )
            })
        })?;

    let morning = raw
        .morning
        .ok_or_else(|| missing("registered_hosts.morning"))
        .and_then(|value| {
            MorningToken::from_hex(&value).map_err(|err| {
                invalid(
                    "registered_hosts.morning",
                    format!("expected 32 hex digits ({err})"),
                )
            })
        })?;

    let server_mac = match raw.server_mac {
        Some(value) => value.parse::<HostMac>().map_err(|err| {
            invalid(
                "registered_hosts.server_mac",
                format!("expected 6 hex-encoded bytes ({err})"),
            )
        })?,
        None => HostMac::default(),
    };

    Ok(RegisteredHost {
        nickname,
        address: raw.address.unwrap_or_default().trim().to_string(),
        target,
        regist_key,
        morning,
        server_mac,
    })
}
