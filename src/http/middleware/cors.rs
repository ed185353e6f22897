//! Cross-origin policy enforcement.
//!
//! The first stage of the pipeline. Disallowed origins and methods are
//! rejected here, before any parsing or routing runs; allowed requests are
//! annotated with the response headers browsers need. Preflight requests
//! short-circuit with the allow-headers and never enter the router.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

use crate::config::CorsConfig;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Origin side of the policy.
#[derive(Debug, Clone)]
enum AllowedOrigin {
    Any,
    Exact(HeaderValue),
}

/// Compiled cross-origin policy, built once from the validated config.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    origin: AllowedOrigin,
    allow_credentials: bool,
    methods: Vec<Method>,
    methods_header: HeaderValue,
}

impl CorsPolicy {
    pub fn from_config(config: &CorsConfig) -> Self {
        let origin = if config.allowed_origin == "*" {
            AllowedOrigin::Any
        } else {
            match HeaderValue::from_str(&config.allowed_origin) {
                Ok(value) => AllowedOrigin::Exact(value),
                // An origin that cannot be a header value matches nothing.
                Err(_) => AllowedOrigin::Exact(HeaderValue::from_static("null")),
            }
        };

        let methods: Vec<Method> = config
            .allowed_methods
            .iter()
            .filter_map(|m| Method::from_bytes(m.as_bytes()).ok())
            .collect();

        let joined = methods
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let methods_header =
            HeaderValue::from_str(&joined).unwrap_or_else(|_| HeaderValue::from_static("GET"));

        Self {
            origin,
            allow_credentials: config.allow_credentials,
            methods,
            methods_header,
        }
    }

    /// Whether the given `Origin` header value passes the policy.
    pub fn origin_allowed(&self, origin: &HeaderValue) -> bool {
        match &self.origin {
            AllowedOrigin::Any => true,
            AllowedOrigin::Exact(allowed) => origin == allowed,
        }
    }

    /// Whether the method is inside the allowed set.
    pub fn method_allowed(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }

    /// The `Access-Control-Allow-Origin` value for a request carrying
    /// `request_origin`.
    ///
    /// The wildcard is never combined with credentials on the wire;
    /// credentialed wildcard policies echo the caller's origin instead.
    fn allow_origin_value(&self, request_origin: &HeaderValue) -> HeaderValue {
        match &self.origin {
            AllowedOrigin::Exact(allowed) => allowed.clone(),
            AllowedOrigin::Any if self.allow_credentials => request_origin.clone(),
            AllowedOrigin::Any => HeaderValue::from_static("*"),
        }
    }

    /// Whether the allow-origin value varies by caller.
    fn echoes_origin(&self) -> bool {
        !matches!(&self.origin, AllowedOrigin::Any if !self.allow_credentials)
    }

    fn append_response_headers(&self, response: &mut Response, request_origin: &HeaderValue) {
        let headers = response.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            self.allow_origin_value(request_origin),
        );
        if self.allow_credentials {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }
        if self.echoes_origin() {
            headers.append(header::VARY, HeaderValue::from_static("origin"));
        }
    }
}

/// Pipeline stage enforcing the policy.
pub async fn enforce_cors(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let policy = &state.cors;
    let origin = request.headers().get(header::ORIGIN).cloned();

    if let Some(origin) = &origin {
        if !policy.origin_allowed(origin) {
            let shown = origin.to_str().unwrap_or("<opaque>").to_string();
            return Err(ApiError::OriginNotAllowed(shown));
        }
    }

    // Preflight requests are answered here and never enter the router.
    if request.method() == Method::OPTIONS {
        if let (Some(origin), Some(requested)) = (
            &origin,
            request
                .headers()
                .get(header::ACCESS_CONTROL_REQUEST_METHOD),
        ) {
            let allowed = Method::from_bytes(requested.as_bytes())
                .map(|m| policy.method_allowed(&m))
                .unwrap_or(false);
            if !allowed {
                let shown = requested.to_str().unwrap_or("<opaque>").to_string();
                return Err(ApiError::MethodNotAllowed(shown));
            }
            return Ok(preflight_response(policy, origin, request.headers()));
        }
    }

    // Uniform method check; non-preflight OPTIONS is held to the same set.
    if !policy.method_allowed(request.method()) {
        return Err(ApiError::MethodNotAllowed(request.method().to_string()));
    }

    let mut response = next.run(request).await;
    if let Some(origin) = &origin {
        policy.append_response_headers(&mut response, origin);
    }
    Ok(response)
}

fn preflight_response(
    policy: &CorsPolicy,
    origin: &HeaderValue,
    request_headers: &axum::http::HeaderMap,
) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;

    policy.append_response_headers(&mut response, origin);
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        policy.methods_header.clone(),
    );
    let allow_headers = request_headers
        .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("*"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, allow_headers);

    response
}
