//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, pointer + length instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;

use criticide_core::{ApiError, HttpMethod, RequestConfig, RequestOutcome, ResponseBody};

/// Opaque handle to a `CriticideClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiClient {
    pub(crate) inner: criticide_core::CriticideClient,
}

/// Completion callback. Receives ownership of `outcome`, which must be
/// released with `criticide_free_outcome`.
pub type FfiCallback = extern "C" fn(outcome: *mut FfiOutcome, user_data: *mut c_void);

/// Caller-supplied context passed back to the callback on the worker thread.
pub(crate) struct UserData(*mut c_void);

// The C caller guarantees `user_data` may be used from the worker thread.
unsafe impl Send for UserData {}

impl UserData {
    pub(crate) fn new(ptr: *mut c_void) -> Self {
        Self(ptr)
    }

    pub(crate) fn get(&self) -> *mut c_void {
        self.0
    }
}

/// Heap-allocate `s` as a C string. Interior NULs yield an empty string.
pub(crate) fn c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

/// Borrow a C string. `None` for null or non-UTF-8 input.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn borrow_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

/// A single HTTP header owned by this library.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A borrowed key-value pair supplied by the C caller.
#[repr(C)]
pub struct FfiKeyValue {
    pub key: *const c_char,
    pub value: *const c_char,
}

/// Per-call configuration supplied by the C caller. Every pointer may be
/// null; the library reads but never frees these fields.
#[repr(C)]
pub struct FfiRequestConfig {
    pub headers: *const FfiKeyValue,
    pub headers_len: u32,
    pub query_parameters: *const FfiKeyValue,
    pub query_parameters_len: u32,
    pub security_scheme: *const c_char,
}

impl FfiRequestConfig {
    /// Copy a caller configuration into a core `RequestConfig`.
    ///
    /// # Safety
    /// `config` must be null or point to a valid `FfiRequestConfig` whose
    /// arrays hold at least the advertised number of entries.
    pub(crate) unsafe fn to_core(config: *const Self) -> Result<Option<RequestConfig>, String> {
        if config.is_null() {
            return Ok(None);
        }
        let config = unsafe { &*config };
        let headers = unsafe { pairs(config.headers, config.headers_len) }?;
        let query = unsafe { pairs(config.query_parameters, config.query_parameters_len) }?;

        let mut core = RequestConfig::new();
        for (k, v) in headers {
            core = core.header(k, v);
        }
        for (k, v) in query {
            core = core.query(k, v);
        }
        if !config.security_scheme.is_null() {
            let scheme = unsafe { borrow_str(config.security_scheme) }
                .ok_or_else(|| "security_scheme is not valid UTF-8".to_string())?;
            core = core.scheme(scheme);
        }
        Ok(Some(core))
    }
}

unsafe fn pairs(ptr: *const FfiKeyValue, len: u32) -> Result<Vec<(String, String)>, String> {
    if ptr.is_null() || len == 0 {
        return Ok(Vec::new());
    }
    let entries = unsafe { std::slice::from_raw_parts(ptr, len as usize) };
    entries
        .iter()
        .map(|kv| {
            let key = unsafe { borrow_str(kv.key) }.ok_or_else(|| "null or invalid key".to_string())?;
            let value = unsafe { borrow_str(kv.value) }
                .ok_or_else(|| format!("null or invalid value for {key}"))?;
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `criticide_build_*` functions. The C caller executes the request
/// and passes the response back through `criticide_parse_response`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: criticide_core::HttpRequest) -> *mut Self {
        let url = c_string(req.url);
        let body = match req.body {
            Some(b) => c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this after executing an `FfiHttpRequest` and
/// passes a pointer to `criticide_parse_response`. The FFI layer reads but
/// does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Status codes for configuration calls and outcomes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Http = 1,
    Transport = 2,
    Serialization = 3,
    Deserialization = 4,
    Config = 5,
    NullArg = 6,
    InvalidArg = 7,
    Panic = 8,
}

impl From<&ApiError> for FfiErrorCode {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Http { .. } => FfiErrorCode::Http,
            ApiError::Transport { .. } => FfiErrorCode::Transport,
            ApiError::Serialization(_) => FfiErrorCode::Serialization,
            ApiError::Deserialization(_) => FfiErrorCode::Deserialization,
        }
    }
}

/// Result of a request.
///
/// On success `error_code` is `Ok`, `error_message` is null and `body` holds
/// the response text (null when the response had no body); `body_is_json`
/// tells whether it parsed as JSON. On failure `error_code` describes the
/// category, `error_message` is a human-readable C string and `body` is null.
/// `http_status` is the response status, or 0 when no response was received.
#[repr(C)]
pub struct FfiOutcome {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub body: *mut c_char,
    pub body_is_json: bool,
}

impl FfiOutcome {
    pub(crate) fn from_core(outcome: RequestOutcome) -> *mut Self {
        let http_status = outcome.raw.as_ref().map_or(0, |r| r.status);
        let ffi = match outcome.result {
            Ok(body) => {
                let (body, body_is_json) = match body {
                    Some(ResponseBody::Json(value)) => (c_string(value.to_string()), true),
                    Some(ResponseBody::Text(text)) => (c_string(text), false),
                    None => (std::ptr::null_mut(), false),
                };
                FfiOutcome {
                    error_code: FfiErrorCode::Ok,
                    error_message: std::ptr::null_mut(),
                    http_status,
                    body,
                    body_is_json,
                }
            }
            Err(err) => FfiOutcome {
                error_code: FfiErrorCode::from(&err),
                error_message: c_string(err.message()),
                http_status: err.status(),
                body: std::ptr::null_mut(),
                body_is_json: false,
            },
        };
        Box::into_raw(Box::new(ffi))
    }

    /// Failure that happened before any request was sent.
    pub(crate) fn failure(error_code: FfiErrorCode, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiOutcome {
            error_code,
            error_message: c_string(msg),
            http_status: 0,
            body: std::ptr::null_mut(),
            body_is_json: false,
        }))
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, &format!("null argument: {name}"))
    }
}
