//! C-ABI wrapper around `criticide-core`.
//!
//! # Overview
//! Exposes the Criticide client through `extern "C"` functions so any
//! language with a C FFI can configure authentication, build and parse
//! requests itself, or let the library execute them and report back through
//! a completion callback.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Configuration calls return an `FfiErrorCode`; request-time failures are
//!   always delivered as an `FfiOutcome`.
//! - `criticide_post_data_source` / `criticide_get_service_account` call the
//!   callback exactly once, from a worker thread, when they return `Ok`.
//! - The C caller owns all returned pointers and must call the matching
//!   `criticide_free_*` function to release them.

pub mod types;

use std::ffi::{c_void, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use criticide_core::{normalize, CriticideClient, HttpResponse, RequestConfig};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new client bound to `endpoint`, or to the default endpoint when
/// `endpoint` is null.
///
/// Returns null if `endpoint` is empty or not valid UTF-8.
/// The caller must free the returned pointer with `criticide_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn criticide_client_new(endpoint: *const c_char) -> *mut FfiClient {
    catch_unwind(|| {
        let endpoint = if endpoint.is_null() {
            None
        } else {
            match unsafe { borrow_str(endpoint) } {
                Some(endpoint) => Some(endpoint),
                None => return std::ptr::null_mut(),
            }
        };
        match CriticideClient::new(endpoint) {
            Ok(client) => Box::into_raw(Box::new(FfiClient { inner: client })),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `criticide_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn criticide_client_free(client: *mut FfiClient) {
    if !client.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(client) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Security configuration
// ---------------------------------------------------------------------------

/// Authenticate with an API key. `location` is `"HEADER"` or `"QUERY"` in
/// any case; null defaults to `"HEADER"`.
///
/// Returns `Config` for an unknown location; the previous security is kept.
#[unsafe(no_mangle)]
pub extern "C" fn criticide_configure_api_token(
    client: *mut FfiClient,
    name: *const c_char,
    value: *const c_char,
    location: *const c_char,
) -> FfiErrorCode {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() || name.is_null() || value.is_null() {
            return FfiErrorCode::NullArg;
        }
        let client = unsafe { &mut *client };
        let (Some(name), Some(value)) = (unsafe { borrow_str(name) }, unsafe { borrow_str(value) })
        else {
            return FfiErrorCode::InvalidArg;
        };
        let location = if location.is_null() {
            None
        } else {
            match unsafe { borrow_str(location) } {
                Some(location) => Some(location),
                None => return FfiErrorCode::InvalidArg,
            }
        };
        match client.inner.configure_global_api_token(name, value, location) {
            Ok(()) => FfiErrorCode::Ok,
            Err(_) => FfiErrorCode::Config,
        }
    }))
    .unwrap_or(FfiErrorCode::Panic)
}

/// Authenticate with an OAuth2 bearer token.
#[unsafe(no_mangle)]
pub extern "C" fn criticide_configure_oauth2_token(
    client: *mut FfiClient,
    token: *const c_char,
) -> FfiErrorCode {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() || token.is_null() {
            return FfiErrorCode::NullArg;
        }
        let client = unsafe { &mut *client };
        match unsafe { borrow_str(token) } {
            Some(token) => {
                client.inner.configure_global_oauth2_token(token);
                FfiErrorCode::Ok
            }
            None => FfiErrorCode::InvalidArg,
        }
    }))
    .unwrap_or(FfiErrorCode::Panic)
}

/// Authenticate with HTTP Basic credentials.
#[unsafe(no_mangle)]
pub extern "C" fn criticide_configure_basic_auth(
    client: *mut FfiClient,
    username: *const c_char,
    key: *const c_char,
) -> FfiErrorCode {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() || username.is_null() || key.is_null() {
            return FfiErrorCode::NullArg;
        }
        let client = unsafe { &mut *client };
        match (unsafe { borrow_str(username) }, unsafe { borrow_str(key) }) {
            (Some(username), Some(key)) => {
                client.inner.configure_global_basic_authentication(username, key);
                FfiErrorCode::Ok
            }
            _ => FfiErrorCode::InvalidArg,
        }
    }))
    .unwrap_or(FfiErrorCode::Panic)
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Parse a JSON body argument.
fn json_arg(body: *const c_char) -> Result<serde_json::Value, String> {
    let text = unsafe { borrow_str(body) }.ok_or_else(|| "body is not valid UTF-8".to_string())?;
    serde_json::from_str(text).map_err(|e| format!("body is not valid JSON: {e}"))
}

/// Build an HTTP request for `POST /data-source` with `body_json` as payload.
///
/// `config` may be null. Returns null if `client` or `body_json` is null, or
/// if the body or config is invalid.
/// The caller must free the returned pointer with `criticide_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn criticide_build_post_data_source(
    client: *const FfiClient,
    body_json: *const c_char,
    config: *const FfiRequestConfig,
) -> *mut FfiHttpRequest {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() || body_json.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let (Ok(body), Ok(config)) = (json_arg(body_json), unsafe { FfiRequestConfig::to_core(config) })
        else {
            return std::ptr::null_mut();
        };
        match client.inner.build_post_data_source(&body, config.as_ref()) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request for `GET /service-account`.
///
/// `config` may be null. Returns null if `client` is null or `config` is
/// invalid.
#[unsafe(no_mangle)]
pub extern "C" fn criticide_build_get_service_account(
    client: *const FfiClient,
    config: *const FfiRequestConfig,
) -> *mut FfiHttpRequest {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match unsafe { FfiRequestConfig::to_core(config) } {
            Ok(config) => FfiHttpRequest::from_core(client.inner.build_get_service_account(config.as_ref())),
            Err(_) => std::ptr::null_mut(),
        }
    }))
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response
// ---------------------------------------------------------------------------

/// Normalize an HTTP response executed by the caller.
///
/// A null body is treated as empty.
/// The caller must free the returned pointer with `criticide_free_outcome`.
#[unsafe(no_mangle)]
pub extern "C" fn criticide_parse_response(response: *const FfiHttpResponse) -> *mut FfiOutcome {
    catch_unwind(|| {
        if response.is_null() {
            return FfiOutcome::null_arg("response");
        }
        let resp = unsafe { &*response };
        let body = if resp.body.is_null() {
            String::new()
        } else {
            match unsafe { borrow_str(resp.body) } {
                Some(body) => body.to_string(),
                None => {
                    return FfiOutcome::failure(FfiErrorCode::InvalidArg, "response body is not valid UTF-8")
                }
            }
        };
        FfiOutcome::from_core(normalize(HttpResponse {
            status: resp.status,
            headers: Vec::new(),
            body,
        }))
    })
    .unwrap_or_else(|_| FfiOutcome::failure(FfiErrorCode::Panic, "panic in criticide_parse_response"))
}

// ---------------------------------------------------------------------------
// Executing functions
// ---------------------------------------------------------------------------

/// Deliver a failure that happened before the request was sent. Runs on a
/// worker thread like every other completion.
fn fail_later(callback: FfiCallback, user_data: UserData, code: FfiErrorCode, msg: String) {
    std::thread::spawn(move || callback(FfiOutcome::failure(code, &msg), user_data.get()));
}

fn decoded_config(
    config: *const FfiRequestConfig,
) -> Result<Option<RequestConfig>, (FfiErrorCode, String)> {
    unsafe { FfiRequestConfig::to_core(config) }.map_err(|e| (FfiErrorCode::InvalidArg, e))
}

/// Execute `POST /data-source` over the built-in transport.
///
/// Returns `NullArg` without calling back when `callback` is null. Otherwise
/// returns `Ok` and `callback` receives exactly one outcome, including for
/// invalid arguments. `client` may be freed as soon as this returns.
#[unsafe(no_mangle)]
pub extern "C" fn criticide_post_data_source(
    client: *const FfiClient,
    body_json: *const c_char,
    config: *const FfiRequestConfig,
    callback: Option<FfiCallback>,
    user_data: *mut c_void,
) -> FfiErrorCode {
    let Some(callback) = callback else {
        return FfiErrorCode::NullArg;
    };
    let user_data = UserData::new(user_data);
    catch_unwind(AssertUnwindSafe(move || {
        if client.is_null() {
            fail_later(callback, user_data, FfiErrorCode::NullArg, "null argument: client".to_string());
            return;
        }
        if body_json.is_null() {
            fail_later(callback, user_data, FfiErrorCode::NullArg, "null argument: body_json".to_string());
            return;
        }
        let client = unsafe { &*client };
        let body = match json_arg(body_json) {
            Ok(body) => body,
            Err(msg) => return fail_later(callback, user_data, FfiErrorCode::InvalidArg, msg),
        };
        let config = match decoded_config(config) {
            Ok(config) => config,
            Err((code, msg)) => return fail_later(callback, user_data, code, msg),
        };
        client.inner.post_data_source_with(&body, config.as_ref(), move |outcome| {
            callback(FfiOutcome::from_core(outcome), user_data.get())
        });
    }))
    .map(|()| FfiErrorCode::Ok)
    .unwrap_or(FfiErrorCode::Panic)
}

/// Execute `GET /service-account` over the built-in transport.
///
/// Same callback contract as `criticide_post_data_source`.
#[unsafe(no_mangle)]
pub extern "C" fn criticide_get_service_account(
    client: *const FfiClient,
    config: *const FfiRequestConfig,
    callback: Option<FfiCallback>,
    user_data: *mut c_void,
) -> FfiErrorCode {
    let Some(callback) = callback else {
        return FfiErrorCode::NullArg;
    };
    let user_data = UserData::new(user_data);
    catch_unwind(AssertUnwindSafe(move || {
        if client.is_null() {
            fail_later(callback, user_data, FfiErrorCode::NullArg, "null argument: client".to_string());
            return;
        }
        let client = unsafe { &*client };
        let config = match decoded_config(config) {
            Ok(config) => config,
            Err((code, msg)) => return fail_later(callback, user_data, code, msg),
        };
        client.inner.get_service_account_with(config.as_ref(), move |outcome| {
            callback(FfiOutcome::from_core(outcome), user_data.get())
        });
    }))
    .map(|()| FfiErrorCode::Ok)
    .unwrap_or(FfiErrorCode::Panic)
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `criticide_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn criticide_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    }));
}

/// Free an `FfiOutcome` returned by `criticide_parse_response` or handed to
/// a completion callback. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn criticide_free_outcome(outcome: *mut FfiOutcome) {
    if outcome.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let outcome = unsafe { Box::from_raw(outcome) };
        free_c_string(outcome.error_message);
        free_c_string(outcome.body);
    }));
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn criticide_free_string(s: *mut c_char) {
    let _ = catch_unwind(AssertUnwindSafe(|| free_c_string(s)));
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::{CStr, CString};
    use std::sync::mpsc;

    const URL: &str = "http://localhost:3000";

    fn new_client(url: &str) -> *mut FfiClient {
        let url = CString::new(url).unwrap();
        criticide_client_new(url.as_ptr())
    }

    fn read(ptr: *const c_char) -> Option<String> {
        if ptr.is_null() {
            None
        } else {
            Some(unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string())
        }
    }

    fn request_headers(req: &FfiHttpRequest) -> Vec<(String, String)> {
        if req.headers.is_null() {
            return Vec::new();
        }
        let headers = unsafe { std::slice::from_raw_parts(req.headers, req.headers_len as usize) };
        headers
            .iter()
            .map(|h| (read(h.key).unwrap(), read(h.value).unwrap()))
            .collect()
    }

    #[derive(Debug)]
    struct Recorded {
        code: FfiErrorCode,
        status: u16,
        message: Option<String>,
        body: Option<String>,
        body_is_json: bool,
    }

    extern "C" fn record(outcome: *mut FfiOutcome, user_data: *mut c_void) {
        let tx = unsafe { &*(user_data as *const mpsc::Sender<Recorded>) };
        let o = unsafe { &*outcome };
        tx.send(Recorded {
            code: o.error_code,
            status: o.http_status,
            message: read(o.error_message),
            body: read(o.body),
            body_is_json: o.body_is_json,
        })
        .unwrap();
        criticide_free_outcome(outcome);
    }

    fn start_server() -> String {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                mock_server::run(listener).await
            })
            .unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn client_new_and_free() {
        let client = new_client(URL);
        assert!(!client.is_null());
        criticide_client_free(client);
    }

    #[test]
    fn client_new_null_uses_default_endpoint() {
        let client = criticide_client_new(std::ptr::null());
        assert!(!client.is_null());
        assert_eq!(unsafe { &*client }.inner.endpoint(), criticide_core::DEFAULT_ENDPOINT);
        criticide_client_free(client);
    }

    #[test]
    fn client_new_empty_returns_null() {
        assert!(new_client("").is_null());
    }

    #[test]
    fn client_free_null_is_safe() {
        criticide_client_free(std::ptr::null_mut());
    }

    #[test]
    fn configure_api_token_rejects_unknown_location() {
        let client = new_client(URL);
        let name = CString::new("x-api-key").unwrap();
        let value = CString::new("k").unwrap();
        let bad = CString::new("cookie").unwrap();
        let code = criticide_configure_api_token(client, name.as_ptr(), value.as_ptr(), bad.as_ptr());
        assert_eq!(code, FfiErrorCode::Config);

        let code = criticide_configure_api_token(client, name.as_ptr(), value.as_ptr(), std::ptr::null());
        assert_eq!(code, FfiErrorCode::Ok);

        let req = criticide_build_get_service_account(client, std::ptr::null());
        let headers = request_headers(unsafe { &*req });
        assert_eq!(headers, vec![("x-api-key".to_string(), "k".to_string())]);

        criticide_free_request(req);
        criticide_client_free(client);
    }

    #[test]
    fn configure_null_args() {
        let token = CString::new("t").unwrap();
        assert_eq!(
            criticide_configure_oauth2_token(std::ptr::null_mut(), token.as_ptr()),
            FfiErrorCode::NullArg
        );
        let client = new_client(URL);
        assert_eq!(
            criticide_configure_basic_auth(client, token.as_ptr(), std::ptr::null()),
            FfiErrorCode::NullArg
        );
        criticide_client_free(client);
    }

    #[test]
    fn build_get_service_account_with_basic_auth_and_query() {
        let client = new_client(URL);
        let user = CString::new("u").unwrap();
        let key = CString::new("p").unwrap();
        assert_eq!(
            criticide_configure_basic_auth(client, user.as_ptr(), key.as_ptr()),
            FfiErrorCode::Ok
        );

        let q_key = CString::new("page").unwrap();
        let q_value = CString::new("2").unwrap();
        let query = [FfiKeyValue {
            key: q_key.as_ptr(),
            value: q_value.as_ptr(),
        }];
        let config = FfiRequestConfig {
            headers: std::ptr::null(),
            headers_len: 0,
            query_parameters: query.as_ptr(),
            query_parameters_len: 1,
            security_scheme: std::ptr::null(),
        };
        let req = criticide_build_get_service_account(client, &config);
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert_eq!(req_ref.method, FfiHttpMethod::Get);
        assert_eq!(read(req_ref.url).unwrap(), "http://localhost:3000/service-account?page=2");
        assert!(req_ref.body.is_null());
        assert_eq!(
            request_headers(req_ref),
            vec![("Authorization".to_string(), "Basic dTpw".to_string())]
        );

        criticide_free_request(req);
        criticide_client_free(client);
    }

    #[test]
    fn build_post_data_source_produces_post_with_json_body() {
        let client = new_client(URL);
        let body = CString::new(r#"{"label":"sample label","uri":"sample uri"}"#).unwrap();
        let req = criticide_build_post_data_source(client, body.as_ptr(), std::ptr::null());
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert_eq!(req_ref.method, FfiHttpMethod::Post);
        assert_eq!(read(req_ref.url).unwrap(), "http://localhost:3000/data-source");
        assert_eq!(req_ref.headers_len, 1);
        let sent: serde_json::Value = serde_json::from_str(&read(req_ref.body).unwrap()).unwrap();
        assert_eq!(sent["label"], "sample label");

        criticide_free_request(req);
        criticide_client_free(client);
    }

    #[test]
    fn build_post_data_source_invalid_json_returns_null() {
        let client = new_client(URL);
        let body = CString::new("{not json").unwrap();
        assert!(criticide_build_post_data_source(client, body.as_ptr(), std::ptr::null()).is_null());
        criticide_client_free(client);
    }

    #[test]
    fn build_null_client_returns_null() {
        assert!(criticide_build_get_service_account(std::ptr::null(), std::ptr::null()).is_null());
    }

    #[test]
    fn parse_response_success_json() {
        let body = CString::new(r#"{"accountId":"a1"}"#).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let outcome = criticide_parse_response(&resp);
        let o = unsafe { &*outcome };
        assert_eq!(o.error_code, FfiErrorCode::Ok);
        assert!(o.error_message.is_null());
        assert_eq!(o.http_status, 200);
        assert!(o.body_is_json);
        let value: serde_json::Value = serde_json::from_str(&read(o.body).unwrap()).unwrap();
        assert_eq!(value["accountId"], "a1");
        criticide_free_outcome(outcome);
    }

    #[test]
    fn parse_response_empty_body() {
        let resp = FfiHttpResponse {
            status: 204,
            body: std::ptr::null(),
        };
        let outcome = criticide_parse_response(&resp);
        let o = unsafe { &*outcome };
        assert_eq!(o.error_code, FfiErrorCode::Ok);
        assert!(o.body.is_null());
        criticide_free_outcome(outcome);
    }

    #[test]
    fn parse_response_http_error() {
        let body = CString::new(r#"{"message":"missing credentials"}"#).unwrap();
        let resp = FfiHttpResponse {
            status: 401,
            body: body.as_ptr(),
        };
        let outcome = criticide_parse_response(&resp);
        let o = unsafe { &*outcome };
        assert_eq!(o.error_code, FfiErrorCode::Http);
        assert_eq!(o.http_status, 401);
        assert_eq!(read(o.error_message).as_deref(), Some("missing credentials"));
        assert!(o.body.is_null());
        criticide_free_outcome(outcome);
    }

    #[test]
    fn parse_null_response_returns_null_arg() {
        let outcome = criticide_parse_response(std::ptr::null());
        assert_eq!(unsafe { &*outcome }.error_code, FfiErrorCode::NullArg);
        criticide_free_outcome(outcome);
    }

    #[test]
    fn execute_without_callback_returns_null_arg() {
        let client = new_client(URL);
        let code = criticide_get_service_account(client, std::ptr::null(), None, std::ptr::null_mut());
        assert_eq!(code, FfiErrorCode::NullArg);
        criticide_client_free(client);
    }

    #[test]
    fn execute_reports_argument_errors_through_callback() {
        let (tx, rx) = mpsc::channel::<Recorded>();
        let code = criticide_get_service_account(
            std::ptr::null(),
            std::ptr::null(),
            Some(record),
            &tx as *const _ as *mut c_void,
        );
        assert_eq!(code, FfiErrorCode::Ok);
        let recorded = rx.recv().unwrap();
        assert_eq!(recorded.code, FfiErrorCode::NullArg);
        assert_eq!(recorded.message.as_deref(), Some("null argument: client"));
    }

    #[test]
    fn execute_against_mock_server() {
        let url = start_server();
        let client = new_client(&url);
        let (tx, rx) = mpsc::channel::<Recorded>();
        let user_data = &tx as *const _ as *mut c_void;

        // Unauthenticated: HTTP error with server message.
        let code = criticide_get_service_account(client, std::ptr::null(), Some(record), user_data);
        assert_eq!(code, FfiErrorCode::Ok);
        let recorded = rx.recv().unwrap();
        assert_eq!(recorded.code, FfiErrorCode::Http);
        assert_eq!(recorded.status, 401);
        assert!(recorded.body.is_none());

        // Bearer token: create, then read back.
        let token = CString::new("tok").unwrap();
        assert_eq!(criticide_configure_oauth2_token(client, token.as_ptr()), FfiErrorCode::Ok);

        let body = CString::new(r#"{"label":"from c","workspace":"ws-c"}"#).unwrap();
        let code = criticide_post_data_source(client, body.as_ptr(), std::ptr::null(), Some(record), user_data);
        assert_eq!(code, FfiErrorCode::Ok);
        let recorded = rx.recv().unwrap();
        assert_eq!(recorded.code, FfiErrorCode::Ok, "{:?}", recorded.message);
        assert_eq!(recorded.status, 201);
        assert!(recorded.body_is_json);

        let code = criticide_get_service_account(client, std::ptr::null(), Some(record), user_data);
        assert_eq!(code, FfiErrorCode::Ok);
        let recorded = rx.recv().unwrap();
        assert_eq!(recorded.code, FfiErrorCode::Ok);
        let account: serde_json::Value = serde_json::from_str(&recorded.body.unwrap()).unwrap();
        assert_eq!(account["workspace"], serde_json::json!(["ws-c"]));

        criticide_client_free(client);
    }

    #[test]
    fn free_request_null_is_safe() {
        criticide_free_request(std::ptr::null_mut());
    }

    #[test]
    fn free_outcome_null_is_safe() {
        criticide_free_outcome(std::ptr::null_mut());
    }

    #[test]
    fn free_string_null_is_safe() {
        criticide_free_string(std::ptr::null_mut());
    }
}
