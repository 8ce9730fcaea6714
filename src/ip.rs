//! The IP compaction codec (component A): elides the longest run of zero bytes in a
//! 16-byte address, and base32-hex encodes the result for embedding in synthetic NS
//! labels produced by the target resolver.
use std::net::{Ipv4Addr, Ipv6Addr};

use data_encoding::BASE32HEX_NOPAD;

use crate::error::{DNSError, DNSResult};

/// Address family recovered from a decoded synthetic label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    A,
    Aaaa,
}

/// Finds the longest run of zero bytes in `addr`, earliest start wins ties. Returns
/// `(start, len)`, both `< 16` unless the whole address is zero, in which case
/// `(0, 16)` is returned and the caller falls back to the uncompressed encoding.
fn longest_zero_run(addr: &[u8; 16]) -> (usize, usize) {
    let mut best = (0usize, 0usize);
    let mut i = 0usize;
    while i < 16 {
        if addr[i] == 0 {
            let start = i;
            let mut j = i;
            while j < 16 && addr[j] == 0 {
                j += 1;
            }
            let len = j - start;
            if len > best.1 {
                best = (start, len);
            }
            i = j;
        } else {
            i += 1;
        }
    }
    best
}

/// Compacts a 16-byte address into `1 + (16 - len)` bytes: a header byte
/// `(start << 4) | len` followed by the bytes before and after the elided run.
pub fn compact(addr: &[u8; 16]) -> Vec<u8> {
    let (start, len) = longest_zero_run(addr);

    // the whole address is zero: a run of 16 can't fit in a 4-bit length, so fall
    // back to the literal encoding (header 0x00, all 16 bytes present)
    if len == 16 {
        let mut out = Vec::with_capacity(17);
        out.push(0u8);
        out.extend_from_slice(addr);
        return out;
    }

    let header = ((start as u8) << 4) | (len as u8);
    let mut out = Vec::with_capacity(1 + 16 - len);
    out.push(header);
    out.extend_from_slice(&addr[..start]);
    out.extend_from_slice(&addr[start + len..]);
    out
}

/// Expands a compacted address back to its 16 bytes.
pub fn expand(data: &[u8]) -> DNSResult<[u8; 16]> {
    if data.is_empty() {
        return Err(DNSError::malformed("empty compacted IP payload"));
    }
    let header = data[0];
    let start = (header >> 4) as usize;
    let len = (header & 0x0F) as usize;
    if start + len > 16 {
        return Err(DNSError::malformed(format!(
            "compacted IP header start={} len={} overflows 16 bytes",
            start, len
        )));
    }
    let expected_len = 1 + (16 - len);
    if data.len() != expected_len {
        return Err(DNSError::malformed(format!(
            "compacted IP payload is {} bytes, expected {}",
            data.len(),
            expected_len
        )));
    }

    let mut out = [0u8; 16];
    out[..start].copy_from_slice(&data[1..1 + start]);
    out[start + len..].copy_from_slice(&data[1 + start..]);
    Ok(out)
}

/// Embeds an IPv4 address as an IPv4-mapped IPv6 address (`::ffff:a.b.c.d`).
pub fn map_v4_to_v6(v4: Ipv4Addr) -> [u8; 16] {
    v4.to_ipv6_mapped().octets()
}

/// True when `bytes` carries the `::ffff:0:0/96` IPv4-mapped prefix.
fn is_v4_mapped(bytes: &[u8; 16]) -> bool {
    bytes[..10] == [0u8; 10] && bytes[10] == 0xFF && bytes[11] == 0xFF
}

/// Base32-hex (no padding) encodes the compacted form of a 16-byte address, for use
/// as the `_<b32>` label of a synthetic NS name. Upper bound: 29 characters.
pub fn to_b32(addr: &[u8; 16]) -> String {
    BASE32HEX_NOPAD.encode(&compact(addr)).to_lowercase()
}

/// Builds the synthetic label (without leading underscore) for an IPv4 address.
pub fn v4_to_b32(v4: Ipv4Addr) -> String {
    to_b32(&map_v4_to_v6(v4))
}

/// Builds the synthetic label (without leading underscore) for an IPv6 address.
pub fn v6_to_b32(v6: Ipv6Addr) -> String {
    to_b32(&v6.octets())
}

/// Parses a synthetic label's `_<b32>` payload (the leading underscore already
/// stripped by the caller) back into an address and its recovered family.
pub fn from_b32(payload: &str) -> DNSResult<(std::net::IpAddr, Family)> {
    if !(1..=28).contains(&payload.len()) {
        return Err(DNSError::malformed(format!(
            "synthetic label payload length {} out of range",
            payload.len()
        )));
    }
    let decoded = BASE32HEX_NOPAD
        .decode(payload.to_uppercase().as_bytes())
        .map_err(|e| DNSError::malformed(format!("invalid base32hex payload: {}", e)))?;
    let bytes = expand(&decoded)?;

    if is_v4_mapped(&bytes) {
        let v4 = Ipv4Addr::new(bytes[12], bytes[13], bytes[14], bytes[15]);
        Ok((std::net::IpAddr::V4(v4), Family::A))
    } else {
        Ok((std::net::IpAddr::V6(Ipv6Addr::from(bytes)), Family::Aaaa))
    }
}

/// Splits a synthetic label's first component into its `_` prefix and base32hex
/// payload, enforcing the `_<b32>` shape (total label length 2-29).
fn split_synthetic_label(label: &str) -> Option<&str> {
    if !(2..=29).contains(&label.len()) {
        return None;
    }
    label.strip_prefix('_')
}

/// True when `name`'s first label parses as the `_<b32>` synthetic form. Exposed at
/// the crate root as `is_pointer`, matching the public API contract.
pub fn is_pointer(name: &str) -> bool {
    let first = name.split('.').next().unwrap_or("");
    match split_synthetic_label(first) {
        Some(payload) => from_b32(payload).is_ok(),
        None => false,
    }
}

/// Parses the synthetic owner/target name produced by the target resolver back into
/// an address and family, for callers that need to invert the encoding.
pub fn parse_synthetic_name(name: &str) -> DNSResult<(std::net::IpAddr, Family)> {
    let first = name.split('.').next().unwrap_or("");
    let payload = split_synthetic_label(first)
        .ok_or_else(|| DNSError::malformed("not a synthetic pointer name"))?;
    from_b32(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_all_zero() {
        let addr = [0u8; 16];
        let packed = compact(&addr);
        assert_eq!(packed.len(), 17);
        assert_eq!(expand(&packed).unwrap(), addr);
    }

    #[test]
    fn round_trip_localhost() {
        let addr = Ipv6Addr::LOCALHOST.octets();
        let packed = compact(&addr);
        assert_eq!(expand(&packed).unwrap(), addr);
    }

    #[test]
    fn round_trip_no_zero_run() {
        let addr: [u8; 16] = [
            1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16,
        ];
        let packed = compact(&addr);
        assert_eq!(packed.len(), 17);
        assert_eq!(expand(&packed).unwrap(), addr);
    }

    #[test]
    fn round_trip_ipv4_mapped() {
        let v4 = Ipv4Addr::new(192, 0, 2, 1);
        let mapped = map_v4_to_v6(v4);
        let packed = compact(&mapped);
        assert_eq!(expand(&packed).unwrap(), mapped);
    }

    #[test]
    fn synthetic_round_trip_v4() {
        let v4 = Ipv4Addr::new(198, 51, 100, 7);
        let label = v4_to_b32(v4);
        assert!(label.len() <= 29);
        let (addr, family) = from_b32(&label).unwrap();
        assert_eq!(addr, std::net::IpAddr::V4(v4));
        assert_eq!(family, Family::A);
    }

    #[test]
    fn synthetic_round_trip_v6() {
        let v6: Ipv6Addr = "2001:db8::dead:beef".parse().unwrap();
        let label = v6_to_b32(v6);
        let (addr, family) = from_b32(&label).unwrap();
        assert_eq!(addr, std::net::IpAddr::V6(v6));
        assert_eq!(family, Family::Aaaa);
    }

    #[test]
    fn is_pointer_recognizes_synthetic_names() {
        let v4 = Ipv4Addr::new(10, 0, 0, 1);
        let label = v4_to_b32(v4);
        let name = format!("_{}.hns.", label);
        assert!(is_pointer(&name));
        assert!(!is_pointer("ns1.example."));
    }

    #[test]
    fn expand_rejects_overflowing_header() {
        assert!(expand(&[0xFF]).is_err());
    }
}
