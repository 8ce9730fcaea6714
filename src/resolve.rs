//! The target resolver (component D): turns a `Target` plus the query name being
//! answered into the on-wire DNS name a projector should emit.
use crate::error::DNSResult;
use crate::ip;
use crate::target::{Name, Target};

/// Resolves `target` against `query_name`. `NAME`/`GLUE` targets resolve to their
/// stored FQDN; `INET4`/`INET6` targets synthesise `_<b32>.<tld>.` where `<tld>` is
/// `query_name`'s last label. Any other discriminant is "not applicable" and
/// resolves to `None` so the caller can skip it.
pub fn resolve(target: &Target, query_name: &Name) -> DNSResult<Option<String>> {
    match target {
        Target::Name(n) => Ok(Some(n.as_str().to_string())),
        Target::Glue(g) => Ok(Some(g.name.as_str().to_string())),
        Target::Inet4(v4) => {
            let tld = query_name.last_label()?;
            Ok(Some(format!("_{}.{}.", ip::v4_to_b32(*v4), tld)))
        }
        Target::Inet6(v6) => {
            let tld = query_name.last_label()?;
            Ok(Some(format!("_{}.{}.", ip::v6_to_b32(*v6), tld)))
        }
        Target::Onion(_) | Target::OnionNg(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_target_resolves_literally() {
        let query = Name::new("sub.example.").unwrap();
        let target = Target::Name(Name::new("ns1.example.").unwrap());
        assert_eq!(
            resolve(&target, &query).unwrap(),
            Some("ns1.example.".to_string())
        );
    }

    #[test]
    fn inet4_target_synthesises_pointer() {
        let query = Name::new("sub.example.").unwrap();
        let target = Target::Inet4("192.0.2.1".parse().unwrap());
        let resolved = resolve(&target, &query).unwrap().unwrap();
        assert!(resolved.starts_with('_'));
        assert!(resolved.ends_with(".example."));
        assert!(ip::is_pointer(&resolved));
    }

    #[test]
    fn onion_target_is_not_applicable() {
        let query = Name::new("example.").unwrap();
        let target = Target::Onion([0u8; 33]);
        assert_eq!(resolve(&target, &query).unwrap(), None);
    }
}
