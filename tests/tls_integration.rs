//! Certificate verification against a local server with a self-signed
//! certificate.

use std::sync::Arc;

use rcgen::{CertifiedKey, KeyPair};
use rustls::ServerConfig;
use rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

use httpget_core::{Config, FetchError, Silent, run};

fn generate_self_signed_cert() -> Result<CertifiedKey, rcgen::Error> {
    let subject_alt_names = vec!["localhost".to_string(), "127.0.0.1".to_string()];

    let mut params = rcgen::CertificateParams::new(subject_alt_names)?;
    params.distinguished_name = rcgen::DistinguishedName::new();
    params
        .distinguished_name
        .push(rcgen::DnType::CommonName, "localhost");

    let key_pair = KeyPair::generate()?;
    let cert = params.self_signed(&key_pair)?;

    Ok(CertifiedKey { cert, key_pair })
}

fn server_config() -> ServerConfig {
    let certified_key = generate_self_signed_cert().unwrap();
    let key_der = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(
        certified_key.key_pair.serialize_der(),
    ));

    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
    ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(vec![certified_key.cert.der().clone()], key_der)
        .unwrap()
}

/// Starts an HTTPS server answering every request with `ok`.
///
/// Handshakes the client rejects are ignored.
async fn setup_tls_server() -> String {
    let acceptor = TlsAcceptor::from(Arc::new(server_config()));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                let Ok(mut stream) = acceptor.accept(socket).await else {
                    return;
                };
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let reply = "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok";
                let _ = stream.write_all(reply.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("https://127.0.0.1:{port}/")
}

async fn fetch(config: &Config) -> (Result<(), FetchError>, String) {
    let mut out = Vec::new();
    let result = run(config, &mut out, &mut Silent).await;
    (result, String::from_utf8(out).expect("output is utf-8"))
}

#[tokio::test]
async fn test_self_signed_certificate_rejected_by_default() {
    let url = setup_tls_server().await;
    let config = Config::builder().url(url).timeout("5s").build().unwrap();

    let (result, output) = fetch(&config).await;

    let err = result.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }), "{err:?}");
    assert!(
        err.to_string().starts_with("error performing request: "),
        "{err}"
    );
    assert!(!err.is_timeout());
    assert!(output.is_empty());
}

#[tokio::test]
async fn test_insecure_accepts_self_signed_certificate() {
    let url = setup_tls_server().await;
    let config = Config::builder()
        .url(url)
        .insecure(true)
        .timeout("5s")
        .build()
        .unwrap();

    let (result, output) = fetch(&config).await;

    assert!(result.is_ok(), "insecure fetch should succeed: {result:?}");
    assert_eq!(output, "ok");
}
