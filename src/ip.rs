//! Dotted-quad IPv4 text codec.

use crate::{Error, Result};

/// Parse a dotted-quad IPv4 address into a host-order u32.
///
/// Accepts exactly four `.`-separated decimal octets, each in `[0, 255]`,
/// with no surrounding garbage. The result packs the octets big-endian:
/// `"1.2.3.4"` parses to `0x01020304`.
pub fn parse_ipv4(text: &str) -> Result<u32> {
    let mut value = 0u32;
    let mut octets = 0;

    for part in text.split('.') {
        octets += 1;
        if octets > 4 {
            return Err(Error::InvalidIp(text.to_string()));
        }
        value = (value << 8) | parse_octet(part).ok_or_else(|| Error::InvalidIp(text.to_string()))?;
    }

    if octets != 4 {
        return Err(Error::InvalidIp(text.to_string()));
    }

    Ok(value)
}

/// Parse one decimal octet. Digits only, 1-3 of them, value <= 255.
fn parse_octet(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = part.parse().ok()?;
    if value > 255 {
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_addresses() {
        assert_eq!(parse_ipv4("1.2.3.4").unwrap(), 0x01020304);
        assert_eq!(parse_ipv4("0.0.0.0").unwrap(), 0);
        assert_eq!(parse_ipv4("255.255.255.255").unwrap(), u32::MAX);
        assert_eq!(parse_ipv4("192.168.0.1").unwrap(), 0xC0A80001);
    }

    #[test]
    fn test_leading_zeros_are_decimal() {
        assert_eq!(parse_ipv4("001.002.003.004").unwrap(), 0x01020304);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "1.2.3",
            "1.2.3.4.5",
            "1.2.3.",
            ".1.2.3.4",
            "1..2.3",
            "256.0.0.1",
            "1.2.3.999",
            "a.b.c.d",
            "1.2.3.4x",
            "1.2.3.x4",
            " 1.2.3.4",
            "1.2.3.4 ",
            "1.2.3.+4",
            "1.2.3.1000",
        ] {
            assert!(parse_ipv4(bad).is_err(), "accepted {:?}", bad);
        }
    }
}
