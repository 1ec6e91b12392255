use trust_dns_resolver::Resolver;
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};

use tracing::debug;

use super::{MxError, MxRecord, MxStatus};

/// Look up MX records for `domain` using the system resolver.
///
/// The domain is normalized via IDNA before querying DNS. The resulting
/// [`MxStatus`] carries the records sorted by ascending preference, with
/// exchange hostnames lowercased and the trailing dot trimmed. A domain
/// whose zone simply has no MX records yields [`MxStatus::NoRecords`], not
/// an error.
pub fn resolve_mx(domain: &str) -> Result<MxStatus, MxError> {
    let ascii = normalize_domain(domain)?;
    let resolver = Resolver::from_system_conf().map_err(MxError::resolver_init)?;
    resolve_with(&resolver, &ascii)
}

pub(crate) fn resolve_with<R>(resolver: &R, ascii_domain: &str) -> Result<MxStatus, MxError>
where
    R: LookupMx,
{
    let mut records = match resolver.lookup_mx(ascii_domain) {
        Ok(records) => records,
        Err(err) => match err.kind() {
            ResolveErrorKind::NoRecordsFound { .. } => Vec::new(),
            _ => return Err(MxError::lookup(err)),
        },
    };

    records.sort();
    records.dedup();

    if records.is_empty() {
        debug!(domain = ascii_domain, "no MX records");
        Ok(MxStatus::NoRecords)
    } else {
        debug!(
            domain = ascii_domain,
            count = records.len(),
            "MX records resolved"
        );
        Ok(MxStatus::Records(records))
    }
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, MxError> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(MxError::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(MxError::idna)
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}

pub(crate) trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError>;
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        let lookup = Resolver::mx_lookup(self, domain)?;
        let mut records = Vec::new();
        for mx in lookup.iter() {
            let exchange = normalize_exchange(mx.exchange().to_utf8());
            records.push(MxRecord::new(mx.preference(), exchange));
        }
        Ok(records)
    }
}

#[cfg(test)]
impl LookupMx for crate::mx::tests::StubResolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        (self.on_lookup)(domain)
    }
}
