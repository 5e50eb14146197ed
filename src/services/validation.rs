//! Subdomain label and record-target validation.
//!
//! All pure and deterministic: the same input always yields the same result.

use std::fmt;
use std::net::Ipv4Addr;

use crate::error::{AppError, Result};

/// Product policy: labels must be at least this long, stricter than the
/// general one-character DNS label rule.
pub const MIN_LABEL_LEN: usize = 3;
/// DNS label length limit.
pub const MAX_LABEL_LEN: usize = 63;

/// Maximum length for a record target value.
pub const MAX_TARGET_LEN: usize = 255;

/// Strip a candidate label down to `[a-z0-9-]`, lowercasing first.
///
/// This is forgiving input cleanup, not the pass/fail check itself.
pub fn sanitize_label(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Sanitize and validate a subdomain label, returning the cleaned label.
///
/// The cleaned label must match `^[a-z0-9]([a-z0-9-]*[a-z0-9])?$` and be
/// 3..=63 characters long.
pub fn validate_label(input: &str) -> Result<String> {
    let label = sanitize_label(input);

    if label.len() < MIN_LABEL_LEN {
        return Err(AppError::Validation(format!(
            "Subdomain must be at least {} characters",
            MIN_LABEL_LEN
        )));
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(AppError::Validation(format!(
            "Subdomain must be {} characters or less",
            MAX_LABEL_LEN
        )));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(AppError::Validation(
            "Subdomain must not start or end with a hyphen".to_string(),
        ));
    }

    Ok(label)
}

/// Supported DNS record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    A,
    Cname,
    Txt,
    Srv,
    Mx,
}

impl RecordType {
    pub const ALL: [RecordType; 5] = [
        RecordType::A,
        RecordType::Cname,
        RecordType::Txt,
        RecordType::Srv,
        RecordType::Mx,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Cname => "CNAME",
            RecordType::Txt => "TXT",
            RecordType::Srv => "SRV",
            RecordType::Mx => "MX",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "A" => Ok(RecordType::A),
            "CNAME" => Ok(RecordType::Cname),
            "TXT" => Ok(RecordType::Txt),
            "SRV" => Ok(RecordType::Srv),
            "MX" => Ok(RecordType::Mx),
            other => Err(AppError::Validation(format!(
                "Unsupported record type: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record target, parsed per record type.
///
/// The wire/storage form is a single string column; this is its validated
/// shape. `A` holds an IPv4 literal, `Cname` a hostname, `Txt` opaque text,
/// `Srv` a `priority weight port target` quadruple, `Mx` a `priority host`
/// pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Cname(String),
    Txt(String),
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
    Mx {
        priority: u16,
        host: String,
    },
}

impl RecordData {
    /// Parse and validate a target value for the given record type.
    pub fn parse(record_type: RecordType, target: &str) -> Result<Self> {
        let target = target.trim();
        if target.is_empty() {
            return Err(AppError::Validation("Target value is required".to_string()));
        }
        if target.len() > MAX_TARGET_LEN {
            return Err(AppError::Validation(format!(
                "Target value must be {} characters or less",
                MAX_TARGET_LEN
            )));
        }

        match record_type {
            RecordType::A => {
                let addr: Ipv4Addr = target.parse().map_err(|_| {
                    AppError::Validation(format!("'{}' is not a valid IPv4 address", target))
                })?;
                Ok(RecordData::A(addr))
            }
            RecordType::Cname => {
                validate_hostname(target)?;
                Ok(RecordData::Cname(target.to_string()))
            }
            RecordType::Txt => Ok(RecordData::Txt(target.to_string())),
            RecordType::Srv => {
                let parts: Vec<&str> = target.split_whitespace().collect();
                if parts.len() != 4 {
                    return Err(AppError::Validation(
                        "SRV target must be 'priority weight port target'".to_string(),
                    ));
                }
                let priority = parse_u16(parts[0], "SRV priority")?;
                let weight = parse_u16(parts[1], "SRV weight")?;
                let port = parse_u16(parts[2], "SRV port")?;
                validate_hostname(parts[3])?;
                Ok(RecordData::Srv {
                    priority,
                    weight,
                    port,
                    target: parts[3].to_string(),
                })
            }
            RecordType::Mx => {
                let parts: Vec<&str> = target.split_whitespace().collect();
                if parts.len() != 2 {
                    return Err(AppError::Validation(
                        "MX target must be 'priority host'".to_string(),
                    ));
                }
                let priority = parse_u16(parts[0], "MX priority")?;
                validate_hostname(parts[1])?;
                Ok(RecordData::Mx {
                    priority,
                    host: parts[1].to_string(),
                })
            }
        }
    }
}

fn parse_u16(s: &str, what: &str) -> Result<u16> {
    s.parse()
        .map_err(|_| AppError::Validation(format!("{} must be a number in 0..=65535", what)))
}

/// Hostname check for CNAME/SRV/MX targets: dot-separated labels of
/// `[a-z0-9-]` (case-insensitive), no empty or hyphen-edged labels.
fn validate_hostname(host: &str) -> Result<()> {
    let host = host.strip_suffix('.').unwrap_or(host);
    if host.is_empty() || host.len() > 253 {
        return Err(AppError::Validation(format!(
            "'{}' is not a valid hostname",
            host
        )));
    }

    for label in host.split('.') {
        let valid = !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(AppError::Validation(format!(
                "'{}' is not a valid hostname",
                host
            )));
        }
    }

    Ok(())
}

/// TTL bounds in seconds; the plan policy narrows this further per tier.
pub fn validate_ttl(ttl: i64) -> Result<()> {
    if !(60..=86400).contains(&ttl) {
        return Err(AppError::Validation(
            "TTL must be between 60 and 86400 seconds".to_string(),
        ));
    }
    Ok(())
}
