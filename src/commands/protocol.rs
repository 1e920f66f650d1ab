//! Text datagrams of the LAN discovery/wake-up exchange.
use std::{collections::BTreeMap, fmt};

pub const PS4_DISCOVERY_PORT: u16 = 987;
pub const PS5_DISCOVERY_PORT: u16 = 9302;
pub const PS4_PROTOCOL_VERSION: &str = "00020020";
pub const PS5_PROTOCOL_VERSION: &str = "00030010";

/// Console family, which decides port and protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleFamily {
    Ps4,
    Ps5,
}

impl ConsoleFamily {
    pub const fn from_ps5_flag(ps5: bool) -> Self {
        if ps5 {
            ConsoleFamily::Ps5
        } else {
            ConsoleFamily::Ps4
        }
    }

    pub const fn port(&self) -> u16 {
        match self {
            ConsoleFamily::Ps4 => PS4_DISCOVERY_PORT,
            ConsoleFamily::Ps5 => PS5_DISCOVERY_PORT,
        }
    }

    pub const fn protocol_version(&self) -> &'static str {
        match self {
            ConsoleFamily::Ps4 => PS4_PROTOCOL_VERSION,
            ConsoleFamily::Ps5 => PS5_PROTOCOL_VERSION,
        }
    }
}

pub fn search_packet(family: ConsoleFamily) -> String {
    format!(
        "SRCH * HTTP/1.1\ndevice-discovery-protocol-version:{}\n",
        family.protocol_version()
    )
}

pub fn wakeup_packet(family: ConsoleFamily, credential: u64) -> String {
    format!(
        "WAKEUP * HTTP/1.1\nclient-type:vr\nauth-type:R\nmodel:w\napp-type:r\nuser-credential:{credential}\ndevice-discovery-protocol-version:{}\n",
        family.protocol_version()
    )
}

/// Registration keys are hexadecimal; the wake-up datagram carries their decimal value.
pub fn credential_from_regist_key(regist_key: &str) -> Option<u64> {
    let digits = regist_key.trim().trim_end_matches('\0');
    if digits.is_empty() {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Ready,
    Standby,
    Unknown,
}

impl HostState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            HostState::Ready => "ready",
            HostState::Standby => "standby",
            HostState::Unknown => "unknown",
        }
    }
}

/// One console's answer to a search datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryReply {
    pub state: HostState,
    pub fields: BTreeMap<String, String>,
}

impl DiscoveryReply {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn host_name(&self) -> Option<&str> {
        self.field("host-name")
    }

    pub fn host_type(&self) -> Option<&str> {
        self.field("host-type")
    }

    pub fn host_id(&self) -> Option<&str> {
        self.field("host-id")
    }

    pub fn request_port(&self) -> Option<u16> {
        self.field("host-request-port")
            .and_then(|value| value.parse().ok())
    }
}

/// Parse `HTTP/1.1 <code> <reason>` followed by `key:value` lines.
pub fn parse_reply(datagram: &str) -> Option<DiscoveryReply> {
    let mut lines = datagram.lines();
    let status_line = lines.next()?.trim();
    let mut parts = status_line.splitn(3, ' ');
    if !parts.next()?.starts_with("HTTP/") {
        return None;
    }
    let state = match parts.next()? {
        "200" => HostState::Ready,
        "620" => HostState::Standby,
        _ => HostState::Unknown,
    };

    let fields = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect();

    Some(DiscoveryReply { state, fields })
}

impl fmt::Display for DiscoveryReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Host: {}", self.host_name().unwrap_or("<unnamed>"))?;
        writeln!(f, "  state: {}", self.state.as_str())?;
        for (key, value) in &self.fields {
            if key != "host-name" {
                writeln!(f, "  {key}: {value}")?;
            }
        }
        Ok(())
    }
}
