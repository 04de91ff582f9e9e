// ABOUTME: MAAS API client over hyper HTTP/1.1.
// ABOUTME: One OAuth-signed request per connection, with connect and request timeouts.

use super::error::{
    ConnectSnafu, ControllerError, DecodeSnafu, HttpSnafu, InvalidUrlSnafu, RequestSnafu,
    StatusSnafu, TimeoutSnafu,
};
use super::oauth;
use super::traits::{BootResourceOps, MachineOps};
use super::types::{ImageCatalogEntry, MachineState};
use crate::config::MaasConfig;
use crate::types::{ApiKey, SystemId};
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{ACCEPT, AUTHORIZATION, CONNECTION, CONTENT_TYPE, HOST};
use hyper::{Method, Request, Uri};
use hyper_util::rt::TokioIo;
use serde::de::DeserializeOwned;
use snafu::ResultExt;
use std::time::Duration;
use tokio::net::TcpStream;

const API_ROOT: &str = "/api/2.0";

/// Where the MAAS region API lives, split for raw HTTP/1.1 use.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BaseUrl {
    /// `host:port` to dial.
    authority: String,
    /// Value of the `Host` header.
    host_header: String,
    /// Path prefix without trailing slash, e.g. `/MAAS`.
    path: String,
}

impl BaseUrl {
    fn parse(url: &str) -> Result<Self, ControllerError> {
        let uri: Uri = url.parse().map_err(|e: hyper::http::uri::InvalidUri| {
            InvalidUrlSnafu {
                url,
                reason: e.to_string(),
            }
            .build()
        })?;

        match uri.scheme_str() {
            Some("http") => {}
            Some(other) => {
                return InvalidUrlSnafu {
                    url,
                    reason: format!("unsupported scheme {}", other),
                }
                .fail();
            }
            None => {
                return InvalidUrlSnafu {
                    url,
                    reason: "missing scheme",
                }
                .fail();
            }
        }

        let host = uri.host().ok_or_else(|| {
            InvalidUrlSnafu {
                url,
                reason: "missing host",
            }
            .build()
        })?;
        let port = uri.port_u16().unwrap_or(80);

        let host_header = match uri.port_u16() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok(Self {
            authority: format!("{}:{}", host, port),
            host_header,
            path: uri.path().trim_end_matches('/').to_string(),
        })
    }
}

/// HTTP client for the MAAS 2.0 API.
#[derive(Debug, Clone)]
pub struct MaasClient {
    base: BaseUrl,
    api_key: ApiKey,
    timeout: Duration,
    connect_timeout: Duration,
}

impl MaasClient {
    pub fn new(url: &str, api_key: ApiKey) -> Result<Self, ControllerError> {
        Ok(Self {
            base: BaseUrl::parse(url)?,
            api_key,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        })
    }

    /// Build a client from resolved configuration.
    pub fn from_config(config: &MaasConfig) -> crate::error::Result<Self> {
        let url = config.resolve_url()?;
        let api_key = config.resolve_api_key()?;
        Ok(Self::new(&url, api_key)?
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout))
    }

    /// Limit for a whole request, connect included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    fn machine_path(system_id: &SystemId, suffix: &str) -> String {
        format!(
            "{}/machines/{}/{}",
            API_ROOT,
            urlencoding::encode(system_id.as_str()),
            suffix
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ControllerError> {
        let body = self.send(Method::GET, path, None).await?;
        serde_json::from_slice(&body).context(DecodeSnafu { path })
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<(), ControllerError> {
        self.send(Method::POST, path, Some(form)).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        form: Option<&[(&str, &str)]>,
    ) -> Result<Bytes, ControllerError> {
        let full_path = format!("{}{}", self.base.path, path);
        tracing::debug!("{} {}", method, full_path);

        match tokio::time::timeout(self.timeout, self.exchange(&method, &full_path, form)).await {
            Ok(result) => result,
            Err(_elapsed) => TimeoutSnafu {
                method: method.as_str(),
                path: full_path.as_str(),
                timeout: self.timeout,
            }
            .fail(),
        }
    }

    async fn exchange(
        &self,
        method: &Method,
        path: &str,
        form: Option<&[(&str, &str)]>,
    ) -> Result<Bytes, ControllerError> {
        let stream = tokio::time::timeout(
            self.connect_timeout,
            TcpStream::connect(&self.base.authority),
        )
        .await
        .map_err(|_| {
            TimeoutSnafu {
                method: "CONNECT",
                path: self.base.authority.as_str(),
                timeout: self.connect_timeout,
            }
            .build()
        })?
        .context(ConnectSnafu {
            authority: self.base.authority.as_str(),
        })?;

        let io = TokioIo::new(stream);
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .context(HttpSnafu { path })?;

        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::warn!("MAAS connection error: {}", e);
            }
        });

        let mut builder = Request::builder()
            .method(method.clone())
            .uri(path)
            .header(HOST, self.base.host_header.as_str())
            .header(AUTHORIZATION, oauth::authorization_header(&self.api_key))
            .header(ACCEPT, "application/json")
            .header(CONNECTION, "close");

        let body = match form {
            Some(pairs) => {
                builder = builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
                Bytes::from(encode_form(pairs))
            }
            None => Bytes::new(),
        };

        let req = builder
            .body(Full::new(body))
            .context(RequestSnafu { path })?;

        let resp = sender
            .send_request(req)
            .await
            .context(HttpSnafu { path })?;

        let status = resp.status();
        let body = resp
            .into_body()
            .collect()
            .await
            .context(HttpSnafu { path })?
            .to_bytes();

        if !status.is_success() {
            return StatusSnafu {
                method: method.as_str(),
                path,
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).trim().to_string(),
            }
            .fail();
        }

        Ok(body)
    }
}

fn encode_form(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[async_trait]
impl MachineOps for MaasClient {
    async fn get_machine(&self, system_id: &SystemId) -> Result<MachineState, ControllerError> {
        self.get_json(&Self::machine_path(system_id, "")).await
    }

    async fn release_machine(
        &self,
        system_id: &SystemId,
        comment: &str,
    ) -> Result<(), ControllerError> {
        self.post_form(
            &Self::machine_path(system_id, "op-release"),
            &[("comment", comment)],
        )
        .await
    }

    async fn deploy_machine(
        &self,
        system_id: &SystemId,
        distro_series: &str,
    ) -> Result<(), ControllerError> {
        self.post_form(
            &Self::machine_path(system_id, "op-deploy"),
            &[("distro_series", distro_series)],
        )
        .await
    }
}

#[async_trait]
impl BootResourceOps for MaasClient {
    async fn list_boot_resources(&self) -> Result<Vec<ImageCatalogEntry>, ControllerError> {
        self.get_json(&format!("{}/boot-resources/", API_ROOT)).await
    }
}
