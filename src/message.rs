//! The in-memory DNS message model every composer and projector builds into.
//! Serialising a `Message` to wire bytes is the external encoder's job (out of
//! scope here, per the system overview); this module only needs to hold typed,
//! owned RRs so callers downstream can encode or inspect them.
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::rfc1035::{QClass, QType, ResponseCode};

#[derive(Debug, Clone, PartialEq)]
pub enum RData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Cname(String),
    Dname(String),
    Ns(String),
    Mx {
        preference: u16,
        exchange: String,
    },
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
    Txt(String),
    Loc {
        version: u8,
        size: u8,
        horiz_pre: u8,
        vert_pre: u8,
        lat: u32,
        lon: u32,
        alt: u32,
    },
    Ds {
        key_tag: u16,
        algorithm: u8,
        digest_type: u8,
        digest: Vec<u8>,
    },
    Sshfp {
        algorithm: u8,
        key_type: u8,
        fingerprint: Vec<u8>,
    },
    Uri {
        priority: u16,
        weight: u16,
        data: String,
    },
    Rp {
        mbox: String,
        txt: String,
    },
    Soa {
        mname: String,
        rname: String,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },
    Nsec {
        next: String,
        type_bitmap: Vec<u8>,
    },
    Dnskey {
        flags: u16,
        protocol: u8,
        algorithm: u8,
        public_key: Vec<u8>,
    },
    Rrsig {
        type_covered: QType,
        algorithm: u8,
        labels: u8,
        original_ttl: u32,
        expiration: u32,
        inception: u32,
        key_tag: u16,
        signer_name: String,
        signature: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rr {
    pub name: String,
    pub rtype: QType,
    pub class: QClass,
    pub ttl: u32,
    pub rdata: RData,
}

impl Rr {
    pub fn new(name: impl Into<String>, rtype: QType, ttl: u32, rdata: RData) -> Self {
        Rr {
            name: name.into(),
            rtype,
            class: QClass::IN,
            ttl,
            rdata,
        }
    }
}

impl fmt::Display for Rr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} {:?} ttl={} {:?}", self.name, self.class, self.rtype, self.ttl, self.rdata)
    }
}

/// A synthesised DNS response. The three sections are plain vectors (rather than
/// the single `Option<DNSResourceRecord>` fields of a query packet) since a
/// composed answer routinely carries several RRs plus their RRSIGs and glue.
#[derive(Debug, Clone)]
pub struct Message {
    pub response_code: ResponseCode,
    pub authoritative: bool,
    pub question_name: String,
    pub question_type: QType,
    pub answer: Vec<Rr>,
    pub authority: Vec<Rr>,
    pub additional: Vec<Rr>,
}

impl Message {
    pub fn new(question_name: impl Into<String>, question_type: QType) -> Self {
        Message {
            response_code: ResponseCode::NoError,
            authoritative: false,
            question_name: question_name.into(),
            question_type,
            answer: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }

    /// Sets the AA flag based on whether any RR has been pushed into the answer
    /// section; call once composition of the answer section is finished (the
    /// empty-proof and NX paths set it explicitly instead).
    pub fn refresh_aa_flag(&mut self) {
        self.authoritative = !self.answer.is_empty();
    }
}
