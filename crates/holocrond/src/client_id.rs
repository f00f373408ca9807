//! Client identity carried in the `client-id` cookie

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use rand::Rng;

/// Cookie holding the client identifier
pub const COOKIE_NAME: &str = "client-id";

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 8;

/// Identifier of the calling client.
///
/// Taken from the request cookie, or freshly minted when the request has
/// none; a minted id is handed back to the client with `Set-Cookie`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId {
    id: String,
    minted: bool,
}

impl ClientId {
    /// Read the id from request headers, minting one if absent
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match cookie_value(headers, COOKIE_NAME) {
            Some(id) => Self { id, minted: false },
            None => Self {
                id: mint(),
                minted: true,
            },
        }
    }

    /// The identifier
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Attach `Set-Cookie` to `response` if the id was minted
    pub fn attach(&self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        if self.minted {
            let cookie = format!("{}={}; Path=/", COOKIE_NAME, self.id);
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }
        response
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Random lowercase base-36 identifier
fn mint() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Value of cookie `name` across every `Cookie` header, ignoring empty values
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
