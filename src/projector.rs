//! Record projectors (component E): one function per RRTYPE, each walking the
//! resource's records once and pushing DNS RRs into a caller-supplied section.
//! Semantic mismatches (e.g. a CANONICAL record pointing at an address target) are
//! silently skipped, never reported as an error — only a malformed blob is a
//! decode-time failure.
use log::trace;

use crate::constants::{MAX_MAGNET_NIN_LEN, MAX_URI_LEN};
use crate::error::DNSResult;
use crate::message::{RData, Rr};
use crate::record::Record;
use crate::resolve::resolve;
use crate::resource::Resource;
use crate::rfc1035::QType;
use crate::target::{Name, Target};

fn push_glue(target: &Target, ttl: u32, out: &mut Vec<Rr>) {
    if let Target::Glue(glue) = target {
        if let Some(v4) = glue.inet4 {
            out.push(Rr::new(glue.name.as_str(), QType::A, ttl, RData::A(v4)));
        }
        if let Some(v6) = glue.inet6 {
            out.push(Rr::new(glue.name.as_str(), QType::AAAA, ttl, RData::Aaaa(v6)));
        }
    }
}

/// Glue for a resolved pointer: when `target` is itself an address (INET4/INET6),
/// the resolver's synthetic name needs an accompanying A/AAAA so the pointer
/// actually resolves (NSIP / MXIP in the component design).
fn push_address_glue(target: &Target, query_name: &Name, ttl: u32, out: &mut Vec<Rr>) -> DNSResult<()> {
    if let Some(owner) = resolve(target, query_name)? {
        match target {
            Target::Inet4(v4) => out.push(Rr::new(owner, QType::A, ttl, RData::A(*v4))),
            Target::Inet6(v6) => out.push(Rr::new(owner, QType::AAAA, ttl, RData::Aaaa(*v6))),
            _ => {}
        }
    }
    Ok(())
}

pub fn project_a(resource: &Resource, owner: &str, out: &mut Vec<Rr>) {
    for rec in resource.all(1) {
        if let Some(v4) = rec.target().and_then(Target::as_inet4) {
            out.push(Rr::new(owner, QType::A, resource.ttl, RData::A(v4)));
        }
    }
}

pub fn project_aaaa(resource: &Resource, owner: &str, out: &mut Vec<Rr>) {
    for rec in resource.all(2) {
        if let Some(v6) = rec.target().and_then(Target::as_inet6) {
            out.push(Rr::new(owner, QType::AAAA, resource.ttl, RData::Aaaa(v6)));
        }
    }
}

pub fn project_cname(
    resource: &Resource,
    owner: &str,
    query_name: &Name,
    answer: &mut Vec<Rr>,
    additional: &mut Vec<Rr>,
) -> DNSResult<()> {
    for rec in resource.all(7) {
        let target = match rec.target() {
            Some(t) => t,
            None => continue,
        };
        // CNAME only projects NAME/GLUE targets; an address target is a mismatch
        // silently skipped, never an error.
        if target.as_name().is_none() {
            continue;
        }
        if let Some(resolved) = resolve(target, query_name)? {
            answer.push(Rr::new(owner, QType::CNAME, resource.ttl, RData::Cname(resolved)));
            push_glue(target, resource.ttl, additional);
        }
    }
    Ok(())
}

pub fn project_dname(
    resource: &Resource,
    owner: &str,
    query_name: &Name,
    answer: &mut Vec<Rr>,
    additional: &mut Vec<Rr>,
) -> DNSResult<()> {
    for rec in resource.all(8) {
        let target = match rec.target() {
            Some(t) => t,
            None => continue,
        };
        // DNAME only projects NAME/GLUE targets; an address target is a mismatch
        // silently skipped, never an error.
        if target.as_name().is_none() {
            continue;
        }
        if let Some(resolved) = resolve(target, query_name)? {
            answer.push(Rr::new(owner, QType::DNAME, resource.ttl, RData::Dname(resolved)));
            push_glue(target, resource.ttl, additional);
        }
    }
    Ok(())
}

/// NS plus the GLUE4/GLUE6/SYNTH4/SYNTH6 classification folded in: every record of
/// wire kind NS (9) is emitted, with the RDATA name depending on its target's
/// discriminant. An address target gets a synthetic `_<b32>._synth.` name; a
/// NAME/GLUE target is used verbatim.
pub fn project_ns(resource: &Resource, owner: &str, out: &mut Vec<Rr>) -> DNSResult<()> {
    for rec in resource.all(9) {
        let target = match rec.target() {
            Some(t) => t,
            None => continue,
        };
        let ns_name = match target {
            Target::Name(n) => n.as_str().to_string(),
            Target::Glue(g) => g.name.as_str().to_string(),
            Target::Inet4(v4) => format!("_{}._synth.", crate::ip::v4_to_b32(*v4)),
            Target::Inet6(v6) => format!("_{}._synth.", crate::ip::v6_to_b32(*v6)),
            Target::Onion(_) | Target::OnionNg(_) => continue,
        };
        trace!("NS record at {} -> {}", owner, ns_name);
        out.push(Rr::new(owner, QType::NS, resource.ttl, RData::Ns(ns_name)));
    }
    Ok(())
}

/// Additional-section glue for `project_ns`'s output: address targets get an A/AAAA
/// owned by the query-scoped synthetic pointer name (4.D), GLUE targets get their
/// inline addresses.
pub fn project_nsip(resource: &Resource, query_name: &Name, out: &mut Vec<Rr>) -> DNSResult<()> {
    for rec in resource.all(9) {
        let target = match rec.target() {
            Some(t) => t,
            None => continue,
        };
        push_glue(target, resource.ttl, out);
        push_address_glue(target, query_name, resource.ttl, out)?;
    }
    Ok(())
}

fn is_smtp_tcp(service: &str, protocol: &str) -> bool {
    service.eq_ignore_ascii_case("smtp.") && protocol.eq_ignore_ascii_case("tcp.")
}

pub fn project_mx(resource: &Resource, owner: &str, query_name: &Name, out: &mut Vec<Rr>) -> DNSResult<()> {
    for rec in resource.all(10) {
        if let Record::Service(svc) = rec {
            if !is_smtp_tcp(&svc.service, &svc.protocol) {
                continue;
            }
            if let Some(exchange) = resolve(&svc.target, query_name)? {
                out.push(Rr::new(
                    owner,
                    QType::MX,
                    resource.ttl,
                    RData::Mx {
                        preference: svc.priority,
                        exchange,
                    },
                ));
            }
        }
    }
    Ok(())
}

pub fn project_mxip(resource: &Resource, query_name: &Name, out: &mut Vec<Rr>) -> DNSResult<()> {
    for rec in resource.all(10) {
        if let Record::Service(svc) = rec {
            if !is_smtp_tcp(&svc.service, &svc.protocol) {
                continue;
            }
            push_glue(&svc.target, resource.ttl, out);
            push_address_glue(&svc.target, query_name, resource.ttl, out)?;
        }
    }
    Ok(())
}

pub fn project_srv(
    resource: &Resource,
    owner: &str,
    service: &str,
    protocol: &str,
    query_name: &Name,
    out: &mut Vec<Rr>,
) -> DNSResult<()> {
    for rec in resource.all(10) {
        if let Record::Service(svc) = rec {
            if !svc.service.eq_ignore_ascii_case(service) || !svc.protocol.eq_ignore_ascii_case(protocol) {
                continue;
            }
            if let Some(target) = resolve(&svc.target, query_name)? {
                out.push(Rr::new(
                    owner,
                    QType::SRV,
                    resource.ttl,
                    RData::Srv {
                        priority: svc.priority,
                        weight: svc.weight,
                        port: svc.port,
                        target,
                    },
                ));
            }
        }
    }
    Ok(())
}

pub fn project_txt(resource: &Resource, owner: &str, out: &mut Vec<Rr>) {
    for rec in resource.all(13) {
        if let Record::Text(text) = rec {
            out.push(Rr::new(owner, QType::TXT, resource.ttl, RData::Txt(text.clone())));
        }
    }
}

pub fn project_loc(resource: &Resource, owner: &str, out: &mut Vec<Rr>) {
    for rec in resource.all(14) {
        if let Record::Location(loc) = rec {
            out.push(Rr::new(
                owner,
                QType::LOC,
                resource.ttl,
                RData::Loc {
                    version: loc.version,
                    size: loc.size,
                    horiz_pre: loc.horiz_pre,
                    vert_pre: loc.vert_pre,
                    lat: loc.lat,
                    lon: loc.lon,
                    alt: loc.alt,
                },
            ));
        }
    }
}

pub fn project_ds(resource: &Resource, owner: &str, out: &mut Vec<Rr>) {
    for rec in resource.all(16) {
        if let Record::Ds(ds) = rec {
            out.push(Rr::new(
                owner,
                QType::DS,
                resource.ttl,
                RData::Ds {
                    key_tag: ds.key_tag,
                    algorithm: ds.algorithm,
                    digest_type: ds.digest_type,
                    digest: ds.digest.clone(),
                },
            ));
        }
    }
}

pub fn project_sshfp(resource: &Resource, owner: &str, out: &mut Vec<Rr>) {
    for rec in resource.all(18) {
        if let Record::Ssh(fp) = rec {
            out.push(Rr::new(
                owner,
                QType::SSHFP,
                resource.ttl,
                RData::Sshfp {
                    algorithm: fp.algorithm,
                    key_type: fp.key_type,
                    fingerprint: fp.fingerprint.clone(),
                },
            ));
        }
    }
}

pub fn project_uri(resource: &Resource, owner: &str, out: &mut Vec<Rr>) {
    for rec in resource.all(11) {
        if let Record::Url(text) = rec {
            out.push(Rr::new(
                owner,
                QType::URI,
                resource.ttl,
                RData::Uri {
                    priority: 0,
                    weight: 0,
                    data: text.clone(),
                },
            ));
        }
    }

    for rec in resource.all(15) {
        if let Record::Magnet(magnet) = rec {
            if magnet.nin.len() > MAX_MAGNET_NIN_LEN {
                continue;
            }
            let data = format!("magnet:?xt=urn:{}:{}", magnet.nid, hex::encode(&magnet.nin));
            if data.len() > MAX_URI_LEN {
                continue;
            }
            out.push(Rr::new(
                owner,
                QType::URI,
                resource.ttl,
                RData::Uri {
                    priority: 0,
                    weight: 0,
                    data,
                },
            ));
        }
    }

    for rec in resource.all(20) {
        if let Record::Addr(addr) = rec {
            let data = match addr.ctype {
                0 => format!("{}:{}", addr.currency, addr.address),
                3 => format!("{}:0x{}", addr.currency, hex::encode(&addr.hash)),
                _ => continue,
            };
            if data.len() > MAX_URI_LEN {
                continue;
            }
            out.push(Rr::new(
                owner,
                QType::URI,
                resource.ttl,
                RData::Uri {
                    priority: 0,
                    weight: 0,
                    data,
                },
            ));
        }
    }
}

pub fn project_rp(resource: &Resource, owner: &str, out: &mut Vec<Rr>) {
    for rec in resource.all(12) {
        if let Record::Email(text) = rec {
            if text.len() > 63 {
                continue;
            }
            let mbox = format!("{}.", text);
            if Name::new(&mbox).is_err() {
                continue;
            }
            out.push(Rr::new(
                owner,
                QType::RP,
                resource.ttl,
                RData::Rp {
                    mbox,
                    txt: ".".to_string(),
                },
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cname_skips_mismatched_address_target() {
        // version, record type=CANONICAL(7), target type=INET4(0), 192.0.2.1
        let blob = [0x00u8, 0x07, 0x00, 192, 0, 2, 1];
        let resource = Resource::decode(&blob).unwrap();
        let query_name = Name::new("example.").unwrap();

        let mut answer = Vec::new();
        let mut additional = Vec::new();
        project_cname(&resource, "example.", &query_name, &mut answer, &mut additional).unwrap();

        assert!(answer.is_empty());
        assert!(additional.is_empty());
    }

    #[test]
    fn dname_skips_mismatched_address_target() {
        // version, record type=DELEGATE(8), target type=INET6(1), header 0x00 + 16 literal bytes
        let mut blob = vec![0x00u8, 0x08, 0x01, 0x00];
        blob.extend_from_slice(&[0u8; 16]);
        let resource = Resource::decode(&blob).unwrap();
        let query_name = Name::new("example.").unwrap();

        let mut answer = Vec::new();
        let mut additional = Vec::new();
        project_dname(&resource, "example.", &query_name, &mut answer, &mut additional).unwrap();

        assert!(answer.is_empty());
        assert!(additional.is_empty());
    }
}
