//! Request construction and argument validation.
//!
//! Each builder checks its arguments and produces an [`ApiRequest`]
//! without touching the network, so a rejected call never reaches the
//! transport.

use std::fmt;

use serde::Serialize;

use super::ClientError;
use crate::constants::{AUTHENTICATE_PATH, USERS_PATH};
use crate::models::{AuthoritySet, Credentials, NewUser, PageableQuery};

/// HTTP methods used by the user API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// A transport-agnostic request. `path` is relative to the base URL and
/// may carry a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            headers: vec![("Accept".into(), "application/json".into())],
            body: None,
        }
    }

    fn post_json<T: Serialize>(path: impl Into<String>, body: &T) -> Result<Self, ClientError> {
        let body = serde_json::to_string(body).map_err(|e| ClientError::Encode(e.to_string()))?;
        Ok(Self {
            method: Method::Post,
            path: path.into(),
            headers: vec![
                ("Accept".into(), "application/json".into()),
                ("Content-Type".into(), "application/json".into()),
            ],
            body: Some(body),
        })
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Body of `POST /users`. Profile fields are omitted entirely when unset.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserBody<'a> {
    username: &'a str,
    password: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    authority: Option<&'a str>,
}

/// Fail with [`ClientError::InvalidArgument`] naming every empty field.
fn require_non_empty(operation: &str, fields: &[(&str, &str)]) -> Result<(), ClientError> {
    let empty: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();

    if empty.is_empty() {
        return Ok(());
    }

    Err(ClientError::InvalidArgument(format!(
        "{operation}: {} must not be empty",
        empty.join(", ")
    )))
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// `GET /users`, optionally paged.
///
/// A query must set all four paging fields or none of them.
pub fn list_users(query: Option<&PageableQuery>) -> Result<ApiRequest, ClientError> {
    let query = match query {
        Some(q) if !q.is_empty() => q,
        _ => return Ok(ApiRequest::get(USERS_PATH)),
    };

    let (Some(page), Some(offset), Some(sort), Some(order)) =
        (query.page, query.offset, query.sort.as_deref(), query.order.as_deref())
    else {
        return Err(ClientError::InvalidArgument(format!(
            "list_users: paging needs page, offset, sort, and order together (got {} of 4)",
            query.present_fields()
        )));
    };

    require_non_empty("list_users", &[("sort", sort), ("order", order)])?;

    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("page", &page.to_string())
        .append_pair("offset", &offset.to_string())
        .append_pair("sort", sort)
        .append_pair("order", order)
        .finish();

    Ok(ApiRequest::get(format!("{USERS_PATH}?{encoded}")))
}

/// `GET /users/{id}`.
pub fn get_user(id: i64) -> ApiRequest {
    ApiRequest::get(format!("{USERS_PATH}/{id}"))
}

/// `POST /users`.
///
/// The profile fields are sent only when first name, last name, and
/// authority are all given and non-empty; the authority is then resolved
/// against `authorities`.
pub fn create_user(user: &NewUser, authorities: &AuthoritySet) -> Result<ApiRequest, ClientError> {
    require_non_empty(
        "create_user",
        &[
            ("username", user.username.as_str()),
            ("password", user.password.as_str()),
            ("email", user.email.as_str()),
        ],
    )?;

    let profile = match (
        non_empty(&user.first_name),
        non_empty(&user.last_name),
        non_empty(&user.authority),
    ) {
        (Some(first), Some(last), Some(authority)) => {
            Some((first, last, authorities.resolve(authority)))
        }
        _ => None,
    };

    let body = CreateUserBody {
        username: &user.username,
        password: &user.password,
        email: &user.email,
        first_name: profile.map(|(first, _, _)| first),
        last_name: profile.map(|(_, last, _)| last),
        authority: profile.map(|(_, _, authority)| authority),
    };

    ApiRequest::post_json(USERS_PATH, &body)
}

/// `POST /users/authenticate`.
pub fn authenticate(credentials: &Credentials) -> Result<ApiRequest, ClientError> {
    require_non_empty(
        "authenticate",
        &[
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ],
    )?;

    ApiRequest::post_json(AUTHENTICATE_PATH, credentials)
}
