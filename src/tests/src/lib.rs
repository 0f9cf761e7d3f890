//! Integration tests for the payment ledger.

pub mod cli_tests;
pub mod relay_tests;
pub mod scenario_tests;

use payment_core::Credential;
use rcgen::{BasicConstraints, Certificate, CertificateParams, DistinguishedName, DnType, IsCa};

/// Issues a PEM leaf certificate for `holder` signed by a CA of `organization`.
pub fn certificate_pem(holder: &str, organization: &str) -> anyhow::Result<String> {
    let mut ca_params = CertificateParams::new(Vec::<String>::new());
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let mut ca_name = DistinguishedName::new();
    ca_name.push(DnType::OrganizationName, organization);
    ca_name.push(DnType::CommonName, format!("ca.{}", organization));
    ca_params.distinguished_name = ca_name;
    let ca = Certificate::from_params(ca_params)?;

    let mut leaf_params = CertificateParams::new(Vec::<String>::new());
    let mut leaf_name = DistinguishedName::new();
    leaf_name.push(DnType::CommonName, holder);
    leaf_params.distinguished_name = leaf_name;
    let leaf = Certificate::from_params(leaf_params)?;

    Ok(leaf.serialize_pem_with_signer(&ca)?)
}

/// A credential for `holder` issued by `organization`.
pub fn credential(holder: &str, organization: &str) -> Credential {
    let pem = certificate_pem(holder, organization).unwrap();
    Credential::new(pem.into_bytes())
}

/// Converts string literals into invocation arguments.
pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
