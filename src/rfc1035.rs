//! DNS protocol constants shared by the composed response model (`message.rs`).
//! Taken from https://datatracker.ietf.org/doc/html/rfc1035 and the IANA DNS
//! parameters registry.
//!
//! The DnsEnum procedural macro automatically implements Default, FromStr,
//! TryFrom<u8> and TryFrom<u16> for these closed, integer-discriminant enums.
use dns_derive::DnsEnum;

#[derive(Debug, Clone, Copy, PartialEq, DnsEnum)]
#[repr(u16)]
pub enum ResponseCode {
    NoError = 0,  // No Error	[RFC1035]
    FormErr = 1,  // Format Error	[RFC1035]
    ServFail = 2, // Server Failure	[RFC1035]
    NXDomain = 3, // Non-Existent Domain	[RFC1035]
    NotImp = 4,   // Not Implemented	[RFC1035]
    Refused = 5,  // Query Refused	[RFC1035]
    YXDomain = 6, // Name Exists when it should not	[RFC2136][RFC6672]
    YXRRSet = 7,  // RR Set Exists when it should not	[RFC2136]
    NXRRSet = 8,  // RR Set that should exist does not	[RFC2136]
    NotAuth = 9,    // Not Authorized	[RFC8945]
    NotZone = 10,   // Name not contained in zone	[RFC2136]
    DSOTYPENI = 11, // DSO-TYPE Not Implemented	[RFC8490]
    BADVERS = 16, // Bad OPT Version	[RFC6891]
    BADKEY = 17,    // Key not recognized	[RFC8945]
    BADTIME = 18,   // Signature out of time window	[RFC8945]
    BADMODE = 19,   // Bad TKEY Mode	[RFC2930]
    BADNAME = 20,   // Duplicate key name	[RFC2930]
    BADALG = 21,    // Algorithm not supported	[RFC2930]
    BADTRUNC = 22,  // Bad Truncation	[RFC8945]
    BADCOOKIE = 23, // Bad/missing Server Cookie	[RFC7873]
}

// RR type codes: https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
#[derive(Debug, Copy, Clone, PartialEq, DnsEnum)]
#[repr(u16)]
pub enum QType {
    A = 1,           // a host address	[RFC1035]
    NS = 2,          // an authoritative name server	[RFC1035]
    CNAME = 5,       // the canonical name for an alias	[RFC1035]
    SOA = 6,         // marks the start of a zone of authority	[RFC1035]
    PTR = 12,        // a domain name pointer	[RFC1035]
    MX = 15,         // mail exchange	[RFC1035]
    TXT = 16,        // text strings	[RFC1035]
    RP = 17,         // for Responsible Person	[RFC1183]
    SIG = 24,        // for security signature	[RFC2536][RFC2931][RFC3110][RFC4034]
    KEY = 25,        // for security key	[RFC2536][RFC2539][RFC3110][RFC4034]
    AAAA = 28,       // IP6 Address	[RFC3596]
    LOC = 29,        // Location Information	[RFC1876]
    SRV = 33,    // Server Selection	[RFC2782]
    DNAME = 39, // DNAME	[RFC6672]
    DS = 43,   // Delegation Signer	[RFC4034]
    SSHFP = 44, // SSH Key Fingerprint	[RFC4255]
    RRSIG = 46, // RRSIG	[RFC4034]
    NSEC = 47, // NSEC	[RFC4034][RFC9077]
    DNSKEY = 48, // DNSKEY	[RFC4034]
    ANY = 255, // A request for some or all records the server has available	[RFC1035][RFC6895][RFC8482]
    URI = 256, // URI	[RFC7553]
}

// RR Class values: https://datatracker.ietf.org/doc/html/rfc1035#section-3.2.4
#[derive(Debug, Copy, Clone, PartialEq, DnsEnum)]
#[repr(u16)]
pub enum QClass {
    IN = 1, // the Internet
    CS = 2, // the CSNET class (Obsolete - used only for examples in some obsolete RFCs)
    CH = 3, // the CHAOS class
    HS = 4, // Hesiod [Dyer 87]
    ANY = 255,
}
