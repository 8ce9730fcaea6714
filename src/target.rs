//! `Target`: the tagged union every host-bearing record points through (component B
//! readers, the rest of §4 consumes it as an opaque union).
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::error::{DNSError, DNSResult};
use crate::ip;
use crate::wire::Reader;

/// An FQDN: non-empty, ends with a literal `.`, at most 255 bytes. A newtype instead
/// of a bare `String` so every call site that needs a dotted DNS name can trust the
/// invariant instead of re-checking it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    pub fn new(s: impl Into<String>) -> DNSResult<Self> {
        let s = s.into();
        if s.is_empty() || !s.ends_with('.') {
            return Err(DNSError::malformed(format!("'{}' is not a FQDN", s)));
        }
        if s.len() > 255 {
            return Err(DNSError::malformed("name exceeds 255 bytes"));
        }
        Ok(Name(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Labels, excluding the trailing root label (so `"a.b.example."` has 3).
    pub fn label_count(&self) -> usize {
        if self.0 == "." {
            0
        } else {
            self.0.trim_end_matches('.').split('.').count()
        }
    }

    /// The last non-root label, e.g. `"com"` for `"example.com."`.
    pub fn last_label(&self) -> DNSResult<&str> {
        self.0
            .trim_end_matches('.')
            .rsplit('.')
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DNSError::invalid_query_name("name has no labels"))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The GLUE target: an FQDN plus optional inline addresses. Per §4, either or both
/// addresses may be zeroed-out to signal absence; that tail is read as raw fixed
/// bytes, not run through the IP compaction codec (§4.A applies only to INET6).
#[derive(Debug, Clone, PartialEq)]
pub struct Glue {
    pub name: Name,
    pub inet4: Option<Ipv4Addr>,
    pub inet6: Option<Ipv6Addr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Name(Name),
    Glue(Glue),
    Inet4(Ipv4Addr),
    Inet6(Ipv6Addr),
    Onion([u8; 33]),
    OnionNg([u8; 33]),
}

impl Target {
    /// Reads a target from the wire: a one-byte discriminant followed by the body
    /// for that variant. Assigned one less than the wire record type id each
    /// host-bearing record kind shares its name with (INET4 record id 1 -> target
    /// discriminant 0, INET6 2 -> 1, ONION 3 -> 2, ONIONNG 4 -> 3, NAME 5 -> 4,
    /// GLUE 6 -> 5), per the worked decode example.
    pub fn decode(r: &mut Reader) -> DNSResult<Target> {
        let kind = r.read_u8()?;
        match kind {
            0 => {
                let raw: [u8; 4] = r.read_fixed()?;
                Ok(Target::Inet4(Ipv4Addr::from(raw)))
            }
            1 => {
                // the header byte alone determines the total compacted length
                let header = r.read_u8()?;
                let elided = (header & 0x0F) as usize;
                let tail = r.read_bytes(16 - elided)?;
                let mut compacted = Vec::with_capacity(1 + tail.len());
                compacted.push(header);
                compacted.extend_from_slice(&tail);
                let raw = ip::expand(&compacted)?;
                Ok(Target::Inet6(Ipv6Addr::from(raw)))
            }
            2 => Ok(Target::Onion(r.read_fixed()?)),
            3 => Ok(Target::OnionNg(r.read_fixed()?)),
            4 => Ok(Target::Name(Name::new(r.read_name()?)?)),
            5 => {
                let name = Name::new(r.read_name()?)?;
                let raw4: [u8; 4] = r.read_fixed()?;
                let raw6: [u8; 16] = r.read_fixed()?;
                let inet4 = (raw4 != [0u8; 4]).then(|| Ipv4Addr::from(raw4));
                let inet6 = (raw6 != [0u8; 16]).then(|| Ipv6Addr::from(raw6));
                Ok(Target::Glue(Glue {
                    name,
                    inet4,
                    inet6,
                }))
            }
            other => Err(DNSError::malformed(format!(
                "unknown target discriminant {}",
                other
            ))),
        }
    }

    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Target::Name(n) => Some(n),
            Target::Glue(g) => Some(&g.name),
            _ => None,
        }
    }

    pub fn as_inet4(&self) -> Option<Ipv4Addr> {
        match self {
            Target::Inet4(v4) => Some(*v4),
            _ => None,
        }
    }

    pub fn as_inet6(&self) -> Option<Ipv6Addr> {
        match self {
            Target::Inet6(v6) => Some(*v6),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_requires_trailing_dot() {
        assert!(Name::new("example.com").is_err());
        assert!(Name::new("example.com.").is_ok());
    }

    #[test]
    fn last_label_is_tld() {
        let n = Name::new("sub.example.com.").unwrap();
        assert_eq!(n.last_label().unwrap(), "com");
        assert_eq!(n.label_count(), 3);
    }

    #[test]
    fn decode_inet4_target() {
        let bytes = [0u8, 192, 0, 2, 1];
        let mut r = Reader::new(&bytes);
        let t = Target::decode(&mut r).unwrap();
        assert_eq!(t, Target::Inet4(Ipv4Addr::new(192, 0, 2, 1)));
    }

    #[test]
    fn decode_unknown_discriminant_fails() {
        let bytes = [9u8];
        let mut r = Reader::new(&bytes);
        assert!(Target::decode(&mut r).is_err());
    }
}
