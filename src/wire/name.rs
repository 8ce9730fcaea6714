//! RFC 1035 §4.1.4 name decoding with compression-pointer resolution, grounded on
//! `DomainName::from_position` from the query library this crate grew out of.
use crate::error::{DNSError, DNSResult};

/// True when `byte` is the first octet of a compression pointer: its two high bits
/// are both set (`11......`), which can never be a label length since labels are
/// capped at 63 octets.
pub fn is_pointer(byte: u8) -> bool {
    byte >= 0xC0
}

/// Decodes a (possibly compressed) name starting at `pos` within `buf`, returning
/// the dotted, FQDN-terminated string and the position just past the name's own
/// bytes (a pointer counts as 2 bytes regardless of how far it jumps).
pub fn decode_name(buf: &[u8], pos: usize) -> DNSResult<(String, usize)> {
    let mut labels: Vec<String> = Vec::new();
    let mut index = pos;
    let mut end: Option<usize> = None;
    // bound the number of pointer hops so a cyclic pointer chain can't loop forever
    let mut hops = 0usize;

    loop {
        if index >= buf.len() {
            return Err(DNSError::malformed("name decoding ran past end of buffer"));
        }

        let lead = buf[index];

        if lead == 0 {
            if end.is_none() {
                end = Some(index + 1);
            }
            break;
        }

        if is_pointer(lead) {
            if index + 1 >= buf.len() {
                return Err(DNSError::malformed("truncated compression pointer"));
            }
            if end.is_none() {
                end = Some(index + 2);
            }
            hops += 1;
            if hops > buf.len() {
                return Err(DNSError::malformed("compression pointer loop"));
            }
            let pointer = (((lead as u16) << 8 | buf[index + 1] as u16) << 2) >> 2;
            index = pointer as usize;
            continue;
        }

        let len = lead as usize;
        if index + 1 + len > buf.len() {
            return Err(DNSError::malformed("label runs past end of buffer"));
        }
        let label = std::str::from_utf8(&buf[index + 1..index + 1 + len])?;
        labels.push(label.to_string());
        index += 1 + len;
    }

    let name = if labels.is_empty() {
        ".".to_string()
    } else {
        let mut s = labels.join(".");
        s.push('.');
        s
    };

    if name.len() > 255 {
        return Err(DNSError::malformed("decoded name exceeds 255 bytes"));
    }

    Ok((name, end.unwrap()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = &[
        0x41, 0x2a, 0x81, 0x80, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x06, 0x67, 0x6f,
        0x6f, 0x67, 0x6c, 0x65, 0x03, 0x63, 0x6f, 0x6d, 0x00, 0x00, 0x05, 0x00, 0x01, 0xc0, 0x0c,
        0x00, 0x06, 0x00, 0x01, 0x00, 0x00, 0x00, 0x3c, 0x00, 0x26, 0x03, 0x6e, 0x73, 0x31, 0xc0,
        0x0c, 0x09, 0x64, 0x6e, 0x73, 0x2d, 0x61, 0x64, 0x6d, 0x69, 0x6e, 0xc0, 0x0c,
    ];

    #[test]
    fn plain_name() {
        let (name, next) = decode_name(SAMPLE, 12).unwrap();
        assert_eq!(name, "google.com.");
        assert_eq!(next, 24);
    }

    #[test]
    fn pointer_name() {
        let (name, next) = decode_name(SAMPLE, 28).unwrap();
        assert_eq!(name, "google.com.");
        assert_eq!(next, 30);
    }

    #[test]
    fn label_then_pointer() {
        let (name, next) = decode_name(SAMPLE, 40).unwrap();
        assert_eq!(name, "ns1.google.com.");
        assert_eq!(next, 46);
    }

    #[test]
    fn root_only() {
        let (name, next) = decode_name(&[0x00], 0).unwrap();
        assert_eq!(name, ".");
        assert_eq!(next, 1);
    }

    #[test]
    fn truncated_label_rejected() {
        assert!(decode_name(&[0x05, b'a', b'b'], 0).is_err());
    }
}
