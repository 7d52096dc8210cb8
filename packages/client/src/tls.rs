//! Trust roots for `https` / `wss` servers.

use std::{path::Path, sync::Arc};

use rustls::{
    ClientConfig, RootCertStore,
    crypto::ring,
    pki_types::{CertificateDer, pem::PemObject},
};

use crate::error::ClientError;

/// Read every certificate of a PEM bundle
pub fn load_ca_certificates(path: &Path) -> Result<Vec<CertificateDer<'static>>, ClientError> {
    let tls_error = |e: rustls::pki_types::pem::Error| {
        ClientError::Tls(format!("failed to read CA file '{}': {e}", path.display()))
    };
    let certs = CertificateDer::pem_file_iter(path)
        .map_err(tls_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(tls_error)?;
    if certs.is_empty() {
        return Err(ClientError::Tls(format!(
            "no certificate found in '{}'",
            path.display()
        )));
    }
    Ok(certs)
}

/// Client config trusting the bundled web PKI roots plus `ca_certs`
pub fn client_config(
    ca_certs: Option<&[CertificateDer<'static>]>,
) -> Result<Arc<ClientConfig>, ClientError> {
    let mut roots = RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    };
    for cert in ca_certs.unwrap_or_default() {
        roots
            .add(cert.clone())
            .map_err(|e| ClientError::Tls(format!("unusable CA certificate: {e}")))?;
    }

    let config = ClientConfig::builder_with_provider(Arc::new(ring::default_provider()))
        .with_safe_default_protocol_versions()
        .map_err(|e| ClientError::Tls(e.to_string()))?
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(Arc::new(config))
}
