#![allow(dead_code)]
use hawk_interceptor::{
    Artifacts, AuthenticateOptions, Credentials, HawkClient, HeaderOptions, Response,
    SignedHeader, SERVER_AUTHORIZATION,
};
use ring::{digest, hmac};
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

/// What the test client remembers about a signed request.
#[derive(Debug, Clone, PartialEq)]
pub struct TestArtifacts {
    pub ts: u64,
    pub nonce: String,
    pub method: String,
    pub resource: String,
    pub host: String,
    pub port: u16,
}

/// A small, deterministic Hawk client: the timestamp and nonce are fixed, so signing the same
/// request twice gives the same header.
pub struct TestClient {
    pub ts: u64,
    pub nonce: String,
    pub header_calls: AtomicUsize,
    pub authenticate_calls: AtomicUsize,
}

impl Default for TestClient {
    fn default() -> Self {
        TestClient {
            ts: 1353832234,
            nonce: "j4h3g2".to_string(),
            header_calls: AtomicUsize::new(0),
            authenticate_calls: AtomicUsize::new(0),
        }
    }
}

fn hmac_algorithm(algorithm: &str) -> Result<hmac::Algorithm, String> {
    match algorithm {
        "sha256" => Ok(hmac::HMAC_SHA256),
        "sha1" => Ok(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY),
        other => Err(format!("Unknown algorithm {}", other)),
    }
}

fn mac(
    credentials: &Credentials,
    kind: &str,
    artifacts: &TestArtifacts,
    hash: Option<&str>,
) -> Result<String, String> {
    let key = hmac::Key::new(hmac_algorithm(&credentials.algorithm)?, credentials.key.as_bytes());
    let normalized = format!(
        "hawk.1.{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n\n",
        kind,
        artifacts.ts,
        artifacts.nonce,
        artifacts.method,
        artifacts.resource,
        artifacts.host,
        artifacts.port,
        hash.unwrap_or(""),
    );
    Ok(base64::encode(hmac::sign(&key, normalized.as_bytes()).as_ref()))
}

/// Hash a response payload the way a Hawk server does.
pub fn payload_hash(content_type: &str, payload: &[u8]) -> String {
    let mut ctx = digest::Context::new(&digest::SHA256);
    ctx.update(b"hawk.1.payload\n");
    ctx.update(content_type.as_bytes());
    ctx.update(b"\n");
    ctx.update(payload);
    ctx.update(b"\n");
    base64::encode(ctx.finish().as_ref())
}

/// Build the `Server-Authorization` header a well-behaved server would send.
pub fn server_authorization(
    credentials: &Credentials,
    artifacts: &Artifacts,
    payload: Option<(&str, &[u8])>,
) -> String {
    let artifacts = artifacts.downcast_ref::<TestArtifacts>().unwrap();
    let hash = payload.map(|(ct, p)| payload_hash(ct, p));
    let mac = mac(credentials, "response", artifacts, hash.as_deref()).unwrap();
    match hash {
        Some(hash) => format!("Hawk mac=\"{}\", hash=\"{}\"", mac, hash),
        None => format!("Hawk mac=\"{}\"", mac),
    }
}

fn attribute<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    let start = header.find(&format!("{}=\"", name))? + name.len() + 2;
    let len = header[start..].find('"')?;
    Some(&header[start..start + len])
}

impl TestClient {
    pub fn header_calls(&self) -> usize {
        self.header_calls.load(Ordering::SeqCst)
    }

    pub fn authenticate_calls(&self) -> usize {
        self.authenticate_calls.load(Ordering::SeqCst)
    }
}

impl HawkClient for TestClient {
    fn header(
        &self,
        url: &str,
        method: &str,
        options: &HeaderOptions,
    ) -> Result<SignedHeader, String> {
        self.header_calls.fetch_add(1, Ordering::SeqCst);
        let url = Url::parse(url).map_err(|e| format!("Invalid URL: {}", e))?;
        let resource = match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        };
        let artifacts = TestArtifacts {
            ts: self.ts,
            nonce: self.nonce.clone(),
            method: method.to_uppercase(),
            resource,
            host: url.host_str().ok_or("URL has no host")?.to_string(),
            port: url.port_or_known_default().ok_or("URL has no port")?,
        };
        let mac = mac(&options.credentials, "header", &artifacts, None)?;
        Ok(SignedHeader {
            field: format!(
                "Hawk id=\"{}\", ts=\"{}\", nonce=\"{}\", mac=\"{}\"",
                options.credentials.id, artifacts.ts, artifacts.nonce, mac
            ),
            artifacts: Artifacts::new(artifacts),
        })
    }

    fn authenticate(
        &self,
        response: &Response,
        credentials: &Credentials,
        artifacts: Option<&Artifacts>,
        options: &AuthenticateOptions,
    ) -> bool {
        self.authenticate_calls.fetch_add(1, Ordering::SeqCst);
        let header = match response.get_response_header(SERVER_AUTHORIZATION) {
            Some(header) => header,
            None => return !options.required,
        };
        let artifacts = match artifacts.and_then(|a| a.downcast_ref::<TestArtifacts>()) {
            Some(artifacts) => artifacts,
            None => return false,
        };
        let hash = attribute(header, "hash");
        match mac(credentials, "response", artifacts, hash) {
            Ok(ref expected) if Some(expected.as_str()) == attribute(header, "mac") => (),
            _ => return false,
        }
        if let (Some(hash), Some(payload)) = (hash, options.payload) {
            let content_type = response.get_response_header("content-type").unwrap_or("");
            return payload_hash(content_type, payload) == hash;
        }
        true
    }
}
