//! Certificate fixtures shared by the unit tests.

use crate::identity::Credential;
use rcgen::{BasicConstraints, Certificate, CertificateParams, DistinguishedName, DnType, IsCa};

/// Issues a PEM leaf certificate signed by a CA of the given organization.
pub fn certificate(holder: Option<&str>, organization: Option<&str>) -> String {
    let mut ca_params = CertificateParams::new(Vec::<String>::new());
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let mut ca_name = DistinguishedName::new();
    if let Some(organization) = organization {
        ca_name.push(DnType::OrganizationName, organization);
    }
    ca_name.push(DnType::CommonName, "ca");
    ca_params.distinguished_name = ca_name;
    let ca = Certificate::from_params(ca_params).unwrap();

    let mut leaf_params = CertificateParams::new(Vec::<String>::new());
    let mut leaf_name = DistinguishedName::new();
    leaf_name.push(DnType::OrganizationalUnitName, "client");
    if let Some(holder) = holder {
        leaf_name.push(DnType::CommonName, holder);
    }
    leaf_params.distinguished_name = leaf_name;
    let leaf = Certificate::from_params(leaf_params).unwrap();

    leaf.serialize_pem_with_signer(&ca).unwrap()
}

/// A credential for `holder` issued by `organization`.
pub fn credential(holder: &str, organization: &str) -> Credential {
    Credential::new(certificate(Some(holder), Some(organization)).into_bytes())
}
