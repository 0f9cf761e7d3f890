//! Caller identity resolution.
//!
//! A credential is an opaque blob (for example a serialized MSP identity) that
//! embeds one PEM-encoded X.509 certificate. The holder is the certificate's
//! subject common name and the organization is the first issuer organization,
//! cut at its first `.` so that `org1.example.com` becomes `org1`.

use crate::errors::IdentityError;
use crate::types::{Identity, LedgerKey};
use rustls_pemfile::Item;
use tracing::debug;
use x509_parser::parse_x509_certificate;

const BEGIN_MARKER: &[u8] = b"-----BEGIN CERTIFICATE-----";
const END_MARKER: &[u8] = b"-----END CERTIFICATE-----";

/// The opaque credential presented by the caller of an invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential(Vec<u8>);

impl Credential {
    /// Wraps raw credential bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// The raw credential bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Locates the PEM certificate block embedded in the credential.
    pub fn pem_block(&self) -> Result<&[u8], IdentityError> {
        let begin = find(&self.0, BEGIN_MARKER).ok_or_else(|| {
            IdentityError::MalformedCredential("missing BEGIN CERTIFICATE marker".to_string())
        })?;
        let end = rfind(&self.0, END_MARKER).ok_or_else(|| {
            IdentityError::MalformedCredential("missing END CERTIFICATE marker".to_string())
        })?;

        if end < begin + BEGIN_MARKER.len() {
            return Err(IdentityError::MalformedCredential(
                "certificate markers out of order".to_string(),
            ));
        }

        Ok(&self.0[begin..end + END_MARKER.len()])
    }

    /// Resolves the credential into the caller's identity.
    pub fn resolve(&self) -> Result<Identity, IdentityError> {
        let mut block = self.pem_block()?;

        let der = match rustls_pemfile::read_one(&mut block) {
            Ok(Some(Item::X509Certificate(der))) => der,
            Ok(_) => {
                return Err(IdentityError::CertificateDecode(
                    "PEM block does not hold a certificate".to_string(),
                ))
            }
            Err(e) => return Err(IdentityError::CertificateDecode(e.to_string())),
        };

        let (_, cert) = parse_x509_certificate(&der)
            .map_err(|e| IdentityError::CertificateDecode(e.to_string()))?;

        let organization = match cert.issuer().iter_organization().next() {
            Some(attr) => attr
                .as_str()
                .map_err(|e| IdentityError::CertificateDecode(e.to_string()))?,
            None => return Err(IdentityError::MissingOrganization),
        };
        let organization = organization.split('.').next().unwrap_or_default();
        if organization.is_empty() {
            return Err(IdentityError::MissingOrganization);
        }

        let holder = match cert.subject().iter_common_name().next() {
            Some(attr) => attr
                .as_str()
                .map_err(|e| IdentityError::CertificateDecode(e.to_string()))?,
            None => "",
        };
        if holder.is_empty() {
            return Err(IdentityError::EmptyCommonName);
        }

        debug!(holder, organization, "resolved caller identity");

        Ok(Identity::new(holder, organization))
    }

    /// Resolves the credential straight to the caller's ledger key.
    pub fn ledger_key(&self) -> Result<LedgerKey, IdentityError> {
        self.resolve().map(|identity| identity.key())
    }
}

impl From<Vec<u8>> for Credential {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}
