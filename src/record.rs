//! `Record`: the tagged union decoded from each `{type, body}` pair in a resource
//! blob (component B/C). One variant per wire type id in the range 1-20, plus the
//! catch-all 255 (EXTRA).
use crate::constants::{MAX_DIGEST_LEN, MAX_MAGNET_NIN_LEN, MAX_STRING_LEN};
use crate::error::DNSError;
use crate::error::DNSResult;
use crate::target::Target;
use crate::wire::Reader;

#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub service: String,
    pub protocol: String,
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: Target,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub version: u8,
    pub size: u8,
    pub horiz_pre: u8,
    pub vert_pre: u8,
    pub lat: u32,
    pub lon: u32,
    pub alt: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Magnet {
    pub nid: String,
    pub nin: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ds {
    pub key_tag: u16,
    pub algorithm: u8,
    pub digest_type: u8,
    pub digest: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tls {
    pub protocol: u8,
    pub port: u16,
    pub usage: u8,
    pub selector: u8,
    pub matching_type: u8,
    pub certificate: Vec<u8>,
}

/// SSHFP and PGP share this layout on the wire (§3).
#[derive(Debug, Clone, PartialEq)]
pub struct Fingerprint {
    pub algorithm: u8,
    pub key_type: u8,
    pub fingerprint: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Addr {
    pub currency: String,
    pub address: String,
    pub ctype: u8,
    pub testnet: bool,
    pub version: u8,
    pub hash: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extra {
    pub rtype: u8,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Inet4(Target),
    Inet6(Target),
    Onion(Target),
    OnionNg(Target),
    Name(Target),
    Glue(Target),
    Canonical(Target),
    Delegate(Target),
    Ns(Target),
    Service(Service),
    Url(String),
    Email(String),
    Text(String),
    Location(Location),
    Magnet(Magnet),
    Ds(Ds),
    Tls(Tls),
    Ssh(Fingerprint),
    Pgp(Fingerprint),
    Addr(Addr),
    Extra(Extra),
}

fn read_capped_bytes(r: &mut Reader, cap: usize) -> DNSResult<Vec<u8>> {
    let len = r.read_u8()? as usize;
    if len > cap {
        return Err(DNSError::malformed(format!(
            "field of length {} exceeds cap of {}",
            len, cap
        )));
    }
    r.read_bytes(len)
}

impl Record {
    /// The wire type id this record was (or would be) decoded from.
    pub fn type_id(&self) -> u8 {
        match self {
            Record::Inet4(_) => 1,
            Record::Inet6(_) => 2,
            Record::Onion(_) => 3,
            Record::OnionNg(_) => 4,
            Record::Name(_) => 5,
            Record::Glue(_) => 6,
            Record::Canonical(_) => 7,
            Record::Delegate(_) => 8,
            Record::Ns(_) => 9,
            Record::Service(_) => 10,
            Record::Url(_) => 11,
            Record::Email(_) => 12,
            Record::Text(_) => 13,
            Record::Location(_) => 14,
            Record::Magnet(_) => 15,
            Record::Ds(_) => 16,
            Record::Tls(_) => 17,
            Record::Ssh(_) => 18,
            Record::Pgp(_) => 19,
            Record::Addr(_) => 20,
            Record::Extra(_) => 255,
        }
    }

    /// Decodes a single `{type, body}` pair. Unknown type ids fail the whole decode.
    pub fn decode(r: &mut Reader) -> DNSResult<Record> {
        let kind = r.read_u8()?;
        match kind {
            1 => Ok(Record::Inet4(Target::decode(r)?)),
            2 => Ok(Record::Inet6(Target::decode(r)?)),
            3 => Ok(Record::Onion(Target::decode(r)?)),
            4 => Ok(Record::OnionNg(Target::decode(r)?)),
            5 => Ok(Record::Name(Target::decode(r)?)),
            6 => Ok(Record::Glue(Target::decode(r)?)),
            7 => Ok(Record::Canonical(Target::decode(r)?)),
            8 => Ok(Record::Delegate(Target::decode(r)?)),
            9 => Ok(Record::Ns(Target::decode(r)?)),
            10 => Ok(Record::Service(Service {
                service: r.read_string(MAX_STRING_LEN)?,
                protocol: r.read_string(MAX_STRING_LEN)?,
                priority: r.read_u16()?,
                weight: r.read_u16()?,
                port: r.read_u16()?,
                target: Target::decode(r)?,
            })),
            11 => Ok(Record::Url(r.read_string(MAX_STRING_LEN)?)),
            12 => Ok(Record::Email(r.read_string(MAX_STRING_LEN)?)),
            13 => Ok(Record::Text(r.read_string(MAX_STRING_LEN)?)),
            14 => Ok(Record::Location(Location {
                version: r.read_u8()?,
                size: r.read_u8()?,
                horiz_pre: r.read_u8()?,
                vert_pre: r.read_u8()?,
                lat: r.read_u32()?,
                lon: r.read_u32()?,
                alt: r.read_u32()?,
            })),
            15 => Ok(Record::Magnet(Magnet {
                nid: r.read_string(MAX_STRING_LEN)?,
                nin: read_capped_bytes(r, MAX_MAGNET_NIN_LEN)?,
            })),
            16 => Ok(Record::Ds(Ds {
                key_tag: r.read_u16()?,
                algorithm: r.read_u8()?,
                digest_type: r.read_u8()?,
                digest: read_capped_bytes(r, MAX_DIGEST_LEN)?,
            })),
            17 => Ok(Record::Tls(Tls {
                protocol: r.read_u8()?,
                port: r.read_u16()?,
                usage: r.read_u8()?,
                selector: r.read_u8()?,
                matching_type: r.read_u8()?,
                certificate: read_capped_bytes(r, MAX_DIGEST_LEN)?,
            })),
            18 => Ok(Record::Ssh(Fingerprint {
                algorithm: r.read_u8()?,
                key_type: r.read_u8()?,
                fingerprint: read_capped_bytes(r, MAX_DIGEST_LEN)?,
            })),
            19 => Ok(Record::Pgp(Fingerprint {
                algorithm: r.read_u8()?,
                key_type: r.read_u8()?,
                fingerprint: read_capped_bytes(r, MAX_DIGEST_LEN)?,
            })),
            20 => Ok(Record::Addr(Addr {
                currency: r.read_string(MAX_STRING_LEN)?,
                address: r.read_string(MAX_STRING_LEN)?,
                ctype: r.read_u8()?,
                testnet: r.read_u8()? != 0,
                version: r.read_u8()?,
                hash: read_capped_bytes(r, MAX_DIGEST_LEN)?,
            })),
            255 => Ok(Record::Extra(Extra {
                rtype: r.read_u8()?,
                data: read_capped_bytes(r, MAX_STRING_LEN)?,
            })),
            other => Err(DNSError::malformed(format!(
                "unknown record type id {}",
                other
            ))),
        }
    }

    /// The record's host target, for the record kinds that carry one (types 1-9).
    pub fn target(&self) -> Option<&Target> {
        match self {
            Record::Inet4(t)
            | Record::Inet6(t)
            | Record::Onion(t)
            | Record::OnionNg(t)
            | Record::Name(t)
            | Record::Glue(t)
            | Record::Canonical(t)
            | Record::Delegate(t)
            | Record::Ns(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_inet4_record() {
        let bytes = [1u8, 0, 192, 0, 2, 1];
        let mut r = Reader::new(&bytes);
        let rec = Record::decode(&mut r).unwrap();
        assert_eq!(rec.type_id(), 1);
        assert_eq!(
            rec.target().unwrap().as_inet4(),
            Some("192.0.2.1".parse().unwrap())
        );
    }

    #[test]
    fn decode_text_record() {
        let mut bytes = vec![13u8, 5];
        bytes.extend_from_slice(b"hello");
        let mut r = Reader::new(&bytes);
        let rec = Record::decode(&mut r).unwrap();
        assert_eq!(rec, Record::Text("hello".to_string()));
    }

    #[test]
    fn decode_unknown_type_fails() {
        let bytes = [254u8];
        let mut r = Reader::new(&bytes);
        assert!(Record::decode(&mut r).is_err());
    }

    #[test]
    fn digest_over_cap_fails() {
        let mut bytes = vec![16u8, 0, 1, 1, 1, 200];
        bytes.extend(std::iter::repeat(0u8).take(200));
        let mut r = Reader::new(&bytes);
        assert!(Record::decode(&mut r).is_err());
    }
}
