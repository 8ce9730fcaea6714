//! The resource decoder (component C): parses a version byte followed by a
//! sequence of `{type, body}` records until the blob is exhausted.
use log::{debug, trace};

use crate::constants::{DEFAULT_TTL, MAX_RECORDS};
use crate::error::{DNSError, DNSResult};
use crate::record::Record;
use crate::wire::Reader;

/// A decoded resource. Immutable once built; the TTL is not read from the wire but
/// fixed to the implementation-wide default (§3).
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub version: u8,
    pub ttl: u32,
    pub records: Vec<Record>,
}

impl Resource {
    pub fn decode(blob: &[u8]) -> DNSResult<Resource> {
        let mut r = Reader::new(blob);

        let version = r.read_u8()?;
        if version != 0 {
            return Err(DNSError::malformed(format!(
                "unsupported resource version {}",
                version
            )));
        }

        let mut records = Vec::new();
        while !r.is_empty() {
            if records.len() >= MAX_RECORDS {
                return Err(DNSError::malformed("resource exceeds 255 records"));
            }
            let record = Record::decode(&mut r)?;
            trace!("decoded record type {}: {:?}", record.type_id(), record);
            records.push(record);
        }

        debug!("decoded resource with {} record(s)", records.len());

        Ok(Resource {
            version,
            ttl: DEFAULT_TTL,
            records,
        })
    }

    /// The first record of the given wire type id, if any.
    pub fn get(&self, type_id: u8) -> Option<&Record> {
        self.records.iter().find(|r| r.type_id() == type_id)
    }

    pub fn has(&self, type_id: u8) -> bool {
        self.get(type_id).is_some()
    }

    /// All records of the given wire type id, in decode order.
    pub fn all(&self, type_id: u8) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(move |r| r.type_id() == type_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_version_only() {
        let resource = Resource::decode(&[0x00]).unwrap();
        assert_eq!(resource.version, 0);
        assert!(resource.records.is_empty());
    }

    #[test]
    fn decode_single_inet4() {
        // version, type=INET4(1), target_type=INET4(0), 192.0.2.1
        let blob = [0x00, 0x01, 0x00, 192, 0, 2, 1];
        let resource = Resource::decode(&blob).unwrap();
        assert_eq!(resource.records.len(), 1);
        assert_eq!(
            resource.records[0].target().unwrap().as_inet4(),
            Some("192.0.2.1".parse().unwrap())
        );
    }

    #[test]
    fn decode_rejects_nonzero_version() {
        assert!(Resource::decode(&[0x01]).is_err());
    }

    #[test]
    fn decode_rejects_unknown_type() {
        assert!(Resource::decode(&[0x00, 0xFE]).is_err());
    }

    #[test]
    fn get_and_has() {
        let blob = [0x00, 0x01, 0x00, 192, 0, 2, 1];
        let resource = Resource::decode(&blob).unwrap();
        assert!(resource.has(1));
        assert!(!resource.has(9));
        assert!(resource.get(1).is_some());
    }
}
