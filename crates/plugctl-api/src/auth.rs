use std::fmt;

use secrecy::SecretString;
use url::Url;

use crate::error::Error;

/// HTTP Basic credentials for a device.
///
/// Only constructed when both parts are present; an address without
/// credentials means unauthenticated requests.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Returns `None` unless both the username and the password are non-empty.
    pub fn new(username: impl Into<String>, password: SecretString) -> Option<Self> {
        use secrecy::ExposeSecret;

        let username = username.into();
        if username.is_empty() || password.expose_secret().is_empty() {
            return None;
        }
        Some(Self { username, password })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

/// A resolved device endpoint: host, optional port, optional credentials.
#[derive(Debug, Clone)]
pub struct DeviceAddress {
    host: String,
    port: Option<u16>,
    credentials: Option<Credentials>,
}

impl DeviceAddress {
    /// Parse a bare host (`192.168.1.20`, `plug.lan:8080`) or an
    /// `http://[user:pass@]host[:port]` URL.
    ///
    /// Credentials embedded in a URL are percent-decoded, so `p%40ss`
    /// means the password `p@ss`.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::InvalidAddress {
                reason: "address is empty".into(),
            });
        }

        let candidate = if raw.contains("://") {
            raw.to_owned()
        } else {
            format!("http://{raw}")
        };

        let url = Url::parse(&candidate).map_err(|e| Error::InvalidAddress {
            reason: format!("{raw}: {e}"),
        })?;

        Self::from_url(&url)
    }

    /// Build an address from an already-parsed URL.
    pub fn from_url(url: &Url) -> Result<Self, Error> {
        if url.scheme() != "http" {
            return Err(Error::InvalidAddress {
                reason: format!("unsupported scheme '{}', devices speak plain http", url.scheme()),
            });
        }

        let host = match url.host_str() {
            Some(h) if !h.is_empty() => h.to_owned(),
            _ => {
                return Err(Error::InvalidAddress {
                    reason: format!("{url}: address has no host"),
                });
            }
        };

        let credentials = match url.password() {
            Some(password) => Credentials::new(
                decode_userinfo(url.username())?,
                SecretString::from(decode_userinfo(password)?),
            ),
            None => None,
        };

        Ok(Self {
            host,
            port: url.port(),
            credentials,
        })
    }

    /// Replace the credentials. `None` clears any URL-embedded ones.
    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// `host` or `host:port`.
    pub fn authority(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{port}", self.host),
            None => self.host.clone(),
        }
    }

    /// `http://<authority>/<path>`
    pub fn endpoint(&self, path: &str) -> String {
        format!("http://{}/{}", self.authority(), path.trim_start_matches('/'))
    }
}

fn decode_userinfo(raw: &str) -> Result<String, Error> {
    urlencoding::decode(raw)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| Error::InvalidAddress {
            reason: format!("credentials are not valid UTF-8 once decoded: {e}"),
        })
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.authority())
    }
}
