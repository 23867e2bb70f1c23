//! HTTP client for the records backend.
//!
//! [`ApiClient`] is a thin layer over `reqwest`: it joins endpoint paths onto
//! the configured base URL, attaches the configured credential, bounds every
//! request by the configured timeout and turns responses into typed values or
//! an [`ApiError`].

use std::fmt;
use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, COOKIE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use unirecords_config::{ClientConfig, Credentials};
use unirecords_core::{ApiError, QueryParams};

use crate::metrics::track_api_request;

/// Multipart field name the bulk upload endpoints read the file from.
pub const UPLOAD_FIELD: &str = "file";

/// A backend path as a list of segments.
///
/// Fixed prefixes are split on `/`. Every value added with [`Endpoint::push`]
/// stays a single segment on the wire, so a matric number such as
/// `CSC/2023/001` is sent as `CSC%2F2023%2F001`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
}

impl Endpoint {
    pub fn new(prefix: &str) -> Self {
        Self {
            segments: prefix
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn push(mut self, segment: impl fmt::Display) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl From<&str> for Endpoint {
    fn from(prefix: &str) -> Self {
        Self::new(prefix)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Url,
    credentials: Credentials,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base = Url::parse(&config.api_url)
            .map_err(|e| ApiError::transport(format!("invalid API URL {}: {e}", config.api_url)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::transport(format!(
                "invalid API URL {}: not a base URL",
                config.api_url
            )));
        }

        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::transport(e.to_string()))?;

        Ok(Self {
            client,
            base,
            credentials: config.credentials.clone(),
            timeout: config.timeout,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("unirecords/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for an endpoint, with `query` appended in order.
    pub fn url(
        &self,
        endpoint: impl Into<Endpoint>,
        query: &[(&'static str, String)],
    ) -> Result<Url, ApiError> {
        let endpoint = endpoint.into();
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::transport(format!("invalid API URL {}", self.base)))?
            .pop_if_empty()
            .extend(endpoint.segments());

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: impl Into<Endpoint>) -> Result<T, ApiError> {
        self.get_query(endpoint, &[]).await
    }

    /// GET with a list parameter struct serialised into the query string.
    pub async fn get_with<T, P>(&self, endpoint: impl Into<Endpoint>, params: &P) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        P: QueryParams + ?Sized,
    {
        self.get_query(endpoint, &params.query_pairs()).await
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        endpoint: impl Into<Endpoint>,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let bytes = self.send(Method::GET, &endpoint.into(), query, |req| req).await?;
        decode(&bytes)
    }

    /// GET returning the raw body, for file downloads.
    pub async fn get_bytes(
        &self,
        endpoint: impl Into<Endpoint>,
        query: &[(&'static str, String)],
    ) -> Result<Bytes, ApiError> {
        self.send(Method::GET, &endpoint.into(), query, |req| req).await
    }

    pub async fn post<T, B>(&self, endpoint: impl Into<Endpoint>, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let bytes = self
            .send(Method::POST, &endpoint.into(), &[], |req| req.json(body))
            .await?;
        decode(&bytes)
    }

    /// POST without a request body.
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        endpoint: impl Into<Endpoint>,
    ) -> Result<T, ApiError> {
        let bytes = self.send(Method::POST, &endpoint.into(), &[], |req| req).await?;
        decode(&bytes)
    }

    pub async fn patch<T, B>(&self, endpoint: impl Into<Endpoint>, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let bytes = self
            .send(Method::PATCH, &endpoint.into(), &[], |req| req.json(body))
            .await?;
        decode(&bytes)
    }

    /// PATCH without a request body, for state transitions encoded in the path.
    pub async fn patch_empty<T: DeserializeOwned>(
        &self,
        endpoint: impl Into<Endpoint>,
    ) -> Result<T, ApiError> {
        let bytes = self.send(Method::PATCH, &endpoint.into(), &[], |req| req).await?;
        decode(&bytes)
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: impl Into<Endpoint>,
    ) -> Result<T, ApiError> {
        let bytes = self.send(Method::DELETE, &endpoint.into(), &[], |req| req).await?;
        decode(&bytes)
    }

    /// Uploads `contents` as a `multipart/form-data` file field.
    pub async fn post_file<T: DeserializeOwned>(
        &self,
        endpoint: impl Into<Endpoint>,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<T, ApiError> {
        let file_name = file_name.to_string();
        let bytes = self
            .send(Method::POST, &endpoint.into(), &[], move |req| {
                let part = Part::bytes(contents).file_name(file_name);
                req.multipart(Form::new().part(UPLOAD_FIELD, part))
            })
            .await?;
        decode(&bytes)
    }

    #[instrument(skip(self, query, build), fields(http.method = %method, http.path = %endpoint, http.status = tracing::field::Empty))]
    async fn send<F>(
        &self,
        method: Method,
        endpoint: &Endpoint,
        query: &[(&'static str, String)],
        build: F,
    ) -> Result<Bytes, ApiError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(endpoint.clone(), query)?;
        let request = self.authorize(self.client.request(method.clone(), url));
        let started = Instant::now();

        let response = build(request)
            .send()
            .await
            .map_err(|e| self.transport_error(&method, endpoint, e))?;

        let status = response.status().as_u16();
        tracing::Span::current().record("http.status", status);
        track_api_request(method.as_str(), status, started.elapsed());

        self.read_body(response, &method, endpoint).await
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Credentials::None => request,
            Credentials::Bearer(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            Credentials::Cookie(cookie) => request.header(COOKIE, cookie.as_str()),
        }
    }

    async fn read_body(
        &self,
        response: Response,
        method: &Method,
        endpoint: &Endpoint,
    ) -> Result<Bytes, ApiError> {
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(method, endpoint, e))?;

        if status.is_success() {
            debug!(http.status = status.as_u16(), body.len = bytes.len(), "Request succeeded");
            return Ok(bytes);
        }

        let error = ApiError::from_response(status.as_u16(), &bytes);
        if status.is_server_error() {
            warn!(http.status = status.as_u16(), error = %error, "Backend returned a server error");
        } else {
            debug!(http.status = status.as_u16(), error = %error, "Backend rejected the request");
        }
        Err(error)
    }

    fn transport_error(&self, method: &Method, endpoint: &Endpoint, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            warn!(
                http.method = %method,
                http.path = %endpoint,
                timeout_seconds = self.timeout.as_secs(),
                "Request timed out"
            );
            return ApiError::Timeout {
                seconds: self.timeout.as_secs(),
            };
        }

        warn!(http.method = %method, http.path = %endpoint, error = %error, "Request failed without a response");
        ApiError::transport(error.to_string())
    }
}

/// Decodes a success body. An empty body decodes as JSON `null`, so unit and
/// optional responses work against endpoints that reply `204 No Content`.
fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let body = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        bytes
    };
    serde_json::from_slice(body).map_err(|e| ApiError::decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_url: &str) -> ApiClient {
        ApiClient::new(&ClientConfig::default().with_api_url(api_url)).unwrap()
    }

    #[test]
    fn test_url_joins_path_onto_base() {
        let api = client("http://localhost:8000/");
        let url = api.url("/admin/faculties", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/admin/faculties");
    }

    #[test]
    fn test_url_keeps_base_path_prefix() {
        let api = client("https://records.example.edu/backend");
        let url = api.url("/api/sessions/active", &[]).unwrap();
        assert_eq!(url.as_str(), "https://records.example.edu/backend/api/sessions/active");
    }

    #[test]
    fn test_url_appends_query_in_order() {
        let api = client("http://localhost:8000");
        let url = api
            .url(
                "/admin/students",
                &[("page", "2".to_string()), ("search", "ada lovelace".to_string())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/admin/students?page=2&search=ada+lovelace"
        );
    }

    #[test]
    fn test_url_keeps_pushed_values_as_single_segments() {
        let api = client("http://localhost:8000");
        let url = api
            .url(Endpoint::new("/admin/students/matric").push("CSC/2023/001"), &[])
            .unwrap();
        assert_eq!(url.path(), "/admin/students/matric/CSC%2F2023%2F001");

        let url = api
            .url(Endpoint::new("/admin/faculties/by-code").push("FOS?x#frag"), &[])
            .unwrap();
        assert_eq!(url.path(), "/admin/faculties/by-code/FOS%3Fx%23frag");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_endpoint_display_joins_segments() {
        let endpoint = Endpoint::new("/admin/departments/").push("dep_1").push("hod");
        assert_eq!(endpoint.to_string(), "/admin/departments/dep_1/hod");
        assert_eq!(endpoint.segments().len(), 4);
    }

    #[test]
    fn test_base_url_has_no_trailing_slash() {
        assert_eq!(client("http://localhost:8000/").base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = ApiClient::new(&ClientConfig::default().with_api_url("not a url"));
        assert!(matches!(result, Err(ApiError::Transport { .. })));
    }

    #[test]
    fn test_decode_empty_body_as_null() {
        let _: () = decode(b"").unwrap();
        let missing: Option<u32> = decode(b"  ").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_decode_mismatched_body_is_decode_error() {
        let result: Result<Vec<u32>, _> = decode(br#"{"data": []}"#);
        assert!(matches!(result, Err(ApiError::Decode { .. })));
    }
}
