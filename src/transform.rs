//! Envelope transforms shared by every resource.
//!
//! FreshBooks wraps every payload: accounting calls answer with
//! `{"response": {"result": {<key>: ...}}}` or
//! `{"response": {"errors": [...]}}`, auth calls with `{"response": {...}}`
//! or a top-level `{"error", ...}` object. Resource models only describe the
//! inner object; these helpers peel the envelope and decide between the
//! resource and an [`ApiError`].

use reqwest::StatusCode;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult, ErrorDetail, ErrorSurface, FreshBooksError, Result};
use crate::pagination::{Page, Pagination};

#[derive(Deserialize)]
struct AccountingErrorEnvelope {
    response: AccountingErrors,
}

#[derive(Deserialize)]
struct AccountingErrors {
    errors: Vec<RawErrorEntry>,
}

#[derive(Deserialize)]
struct RawErrorEntry {
    errno: i64,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AuthErrorEnvelope {
    Described {
        error: String,
        #[serde(default)]
        error_description: String,
    },
    Typed {
        error_type: String,
        #[serde(default)]
        message: String,
    },
}

/// Recognize an error envelope by its structure.
///
/// The accounting shape is tried first; a body matches at most one shape.
pub fn decode_error(body: &Value) -> Option<ApiError> {
    if let Ok(envelope) = AccountingErrorEnvelope::deserialize(body) {
        let first = envelope.response.errors.first()?;
        let code = first.errno.to_string();
        let message = first.message.clone();
        let errors = envelope
            .response
            .errors
            .into_iter()
            .map(|e| ErrorDetail {
                number: e.errno,
                message: e.message,
            })
            .collect();
        return Some(ApiError {
            name: None,
            code,
            message,
            errors,
            status: None,
            surface: ErrorSurface::Accounting,
        });
    }

    let (code, message) = match AuthErrorEnvelope::deserialize(body).ok()? {
        AuthErrorEnvelope::Described {
            error,
            error_description,
        } => (error, error_description),
        AuthErrorEnvelope::Typed {
            error_type,
            message,
        } => (error_type, message),
    };

    Some(ApiError {
        name: None,
        code,
        message,
        errors: Vec::new(),
        status: None,
        surface: ErrorSurface::Auth,
    })
}

/// Parse a body, returning either the JSON value or the error envelope it
/// carries.
///
/// A non-success status whose body is not a recognized error envelope is an
/// [`FreshBooksError::UnexpectedResponse`].
fn classify(status: StatusCode, body: &str) -> Result<ApiResult<Value>> {
    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(_) if !status.is_success() => {
            return Err(FreshBooksError::UnexpectedResponse {
                status: status.as_u16(),
                body: body.to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(error) = decode_error(&value) {
        return Ok(Err(error.with_status(status.as_u16())));
    }

    if !status.is_success() {
        return Err(FreshBooksError::UnexpectedResponse {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    Ok(Ok(value))
}

fn take(value: &mut Value, key: &str) -> Result<Value> {
    value
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| serde_json::Error::custom(format!("missing field `{key}`")).into())
}

/// Decode `{"response": {"result": {<key>: {...}}}}`.
pub fn decode_single<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    key: &str,
) -> Result<ApiResult<T>> {
    let mut value = match classify(status, body)? {
        Ok(value) => value,
        Err(error) => return Ok(Err(error)),
    };
    let mut result = take(&mut take(&mut value, "response")?, "result")?;
    let item = serde_json::from_value(take(&mut result, key)?)?;
    Ok(Ok(item))
}

/// Decode `{"response": {"result": {<key>: [...], page, pages, per_page, total}}}`.
pub fn decode_list<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    key: &str,
) -> Result<ApiResult<Page<T>>> {
    let mut value = match classify(status, body)? {
        Ok(value) => value,
        Err(error) => return Ok(Err(error)),
    };
    let mut result = take(&mut take(&mut value, "response")?, "result")?;
    let items: Vec<T> = serde_json::from_value(take(&mut result, key)?)?;
    let pages: Pagination = serde_json::from_value(result)?;
    Ok(Ok(Page::new(items, pages)))
}

/// Decode an auth-service body of the form `{"response": {...}}`.
pub fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<ApiResult<T>> {
    let mut value = match classify(status, body)? {
        Ok(value) => value,
        Err(error) => return Ok(Err(error)),
    };
    let item = serde_json::from_value(take(&mut value, "response")?)?;
    Ok(Ok(item))
}

/// Decode an un-enveloped body (the token endpoint answers at top level).
pub fn decode_bare<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<ApiResult<T>> {
    match classify(status, body)? {
        Ok(value) => Ok(Ok(serde_json::from_value(value)?)),
        Err(error) => Ok(Err(error)),
    }
}

/// Encode a model as a request body `{<key>: {...}}`, dropping the keys the
/// server owns.
pub fn encode_request<T: Serialize>(key: &str, model: &T, read_only: &[&str]) -> Result<Value> {
    let mut inner = serde_json::to_value(model)?;
    strip_keys(&mut inner, read_only);
    let mut outer = Map::new();
    outer.insert(key.to_string(), inner);
    Ok(Value::Object(outer))
}

/// Remove `keys` from a JSON object; other values are left alone.
pub fn strip_keys(value: &mut Value, keys: &[&str]) {
    if let Value::Object(map) = value {
        for key in keys {
            map.remove(*key);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        id: i64,
    }

    #[test]
    fn test_accounting_error_envelope() {
        let body = json!({"response": {"errors": [
            {"errno": 1003, "message": "Not authorized"},
            {"errno": 1012, "message": "Second"}
        ]}});
        let error = decode_error(&body).unwrap();
        assert_eq!(error.code, "1003");
        assert_eq!(error.message, "Not authorized");
        assert_eq!(error.errors.len(), 2);
        assert_eq!(error.errors[1].number, 1012);
        assert_eq!(error.surface, ErrorSurface::Accounting);
    }

    #[test]
    fn test_auth_error_shapes() {
        let described = json!({"error": "unauthenticated", "error_description": "Log in"});
        let error = decode_error(&described).unwrap();
        assert_eq!(error.code, "unauthenticated");
        assert_eq!(error.message, "Log in");
        assert_eq!(error.surface, ErrorSurface::Auth);

        let typed = json!({"error_type": "not_found", "message": "Gone"});
        let error = decode_error(&typed).unwrap();
        assert_eq!(error.code, "not_found");
        assert_eq!(error.message, "Gone");
    }

    #[test]
    fn test_success_envelope_is_not_an_error() {
        assert!(decode_error(&json!({"response": {"result": {"thing": {"id": 1}}}})).is_none());
        assert!(decode_error(&json!({"response": {"id": 1}})).is_none());
    }

    #[test]
    fn test_error_on_success_status_is_still_an_error() {
        let body = r#"{"response":{"errors":[{"errno":2001,"message":"Bad"}]}}"#;
        let result = decode_single::<Thing>(StatusCode::OK, body, "thing").unwrap();
        let error = result.unwrap_err();
        assert_eq!(error.code, "2001");
        assert_eq!(error.status, Some(200));
    }

    #[test]
    fn test_decode_single_and_response() {
        let body = r#"{"response":{"result":{"thing":{"id":7}}}}"#;
        let thing = decode_single::<Thing>(StatusCode::OK, body, "thing").unwrap();
        assert_eq!(thing, Ok(Thing { id: 7 }));

        let body = r#"{"response":{"id":2192788}}"#;
        let thing = decode_response::<Thing>(StatusCode::OK, body).unwrap();
        assert_eq!(thing, Ok(Thing { id: 2192788 }));
    }

    #[test]
    fn test_decode_empty_list_keeps_pagination() {
        let body = r#"{"response":{"result":{"things":[],"page":1,"pages":1,"per_page":15,"total":7}}}"#;
        let page = decode_list::<Thing>(StatusCode::OK, body, "things")
            .unwrap()
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(
            page.pages,
            Pagination {
                page: 1,
                pages: 1,
                size: 15,
                total: 7
            }
        );
    }

    #[test]
    fn test_unrecognized_failure_is_unexpected() {
        let result = decode_single::<Thing>(StatusCode::BAD_GATEWAY, "<html>", "thing");
        assert!(matches!(
            result,
            Err(FreshBooksError::UnexpectedResponse { status: 502, .. })
        ));
    }

    #[test]
    fn test_malformed_success_body_is_parse_error() {
        let result = decode_single::<Thing>(StatusCode::OK, "not json", "thing");
        assert!(matches!(result, Err(FreshBooksError::ParseError(_))));

        let result = decode_single::<Thing>(StatusCode::OK, r#"{"response":{}}"#, "thing");
        assert!(matches!(result, Err(FreshBooksError::ParseError(_))));
    }

    #[test]
    fn test_encode_request_strips_read_only() {
        let body = encode_request("thing", &json!({"id": 1, "name": "x"}), &["id"]).unwrap();
        assert_eq!(body, json!({"thing": {"name": "x"}}));
    }
}
