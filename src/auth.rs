use std::{convert::Infallible, sync::Arc};

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;

/// Role
///
/// The closed set of role tags the auth backend issues. The tags keep the
/// backend's casing: `"Admin"`, `"client"`, `"helper"`. Any other tag decodes
/// to `Unrecognized`, which is denied everywhere and has `/` as its home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Admin")]
    Admin,
    #[serde(rename = "client")]
    Client,
    #[serde(rename = "helper")]
    Helper,
    #[serde(other)]
    Unrecognized,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Client => "client",
            Role::Helper => "helper",
            Role::Unrecognized => "unrecognized",
        }
    }
}

/// SessionClaims
///
/// The JWT payload issued by the external auth backend. Only the fields the
/// gate reads are modelled; unknown claims are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Role tag.
    #[serde(rename = "type")]
    pub role: Role,
    /// Username, unique within role and company.
    pub name: String,
    /// Tenant id. Present for clients and helpers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,
}

/// SessionToken
///
/// The read-only triple the access rules work on. Built once per request from
/// verified claims and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub role: Role,
    pub identity: String,
    pub company_id: Option<String>,
}

impl From<SessionClaims> for SessionToken {
    fn from(claims: SessionClaims) -> Self {
        Self {
            role: claims.role,
            identity: claims.name,
            company_id: claims.company_id,
        }
    }
}

/// SessionError
///
/// Why a presented token was not accepted. The gate never surfaces these to
/// the caller: every variant degrades to an anonymous request.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session header is not valid UTF-8")]
    InvalidHeader,
    #[error("session token has expired")]
    Expired,
    #[error("session token rejected: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("session claim `{0}` cannot form a route segment")]
    InvalidClaims(&'static str),
}

/// SessionDecoder
///
/// The seam to the external auth collaborator. Implementations look at the
/// request headers and return the session, `None` when no token was presented,
/// or an error when one was presented but could not be trusted.
#[async_trait]
pub trait SessionDecoder: Send + Sync {
    async fn decode(&self, headers: &HeaderMap) -> Result<Option<SessionToken>, SessionError>;
}

pub type SessionDecoderState = Arc<dyn SessionDecoder>;

/// JwtSessionDecoder
///
/// Verifies HS256 session JWTs signed with the shared secret. The token is
/// taken from the session cookie (plain or `__Secure-` prefixed) and, failing
/// that, from an `Authorization: Bearer` header.
pub struct JwtSessionDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
    cookie_names: Vec<String>,
}

impl JwtSessionDecoder {
    pub fn new(secret: &str, cookie_name: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            cookie_names: vec![
                cookie_name.to_string(),
                format!("__Secure-{}", cookie_name),
            ],
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.session_secret, &config.session_cookie)
    }

    fn verify(&self, token: &str) -> Result<SessionToken, SessionError> {
        let claims = match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => return Err(SessionError::Expired),
                _ => return Err(SessionError::InvalidToken(e)),
            },
        };

        // Identity and tenant are spliced into the home route, so each must be
        // exactly one non-empty path segment.
        if !is_route_segment(&claims.name) {
            return Err(SessionError::InvalidClaims("name"));
        }
        if claims
            .company_id
            .as_deref()
            .is_some_and(|company_id| !is_route_segment(company_id))
        {
            return Err(SessionError::InvalidClaims("company_id"));
        }

        Ok(claims.into())
    }
}

fn is_route_segment(value: &str) -> bool {
    !value.is_empty() && !value.contains('/')
}

#[async_trait]
impl SessionDecoder for JwtSessionDecoder {
    async fn decode(&self, headers: &HeaderMap) -> Result<Option<SessionToken>, SessionError> {
        let Some(token) = extract_token(headers, &self.cookie_names)? else {
            return Ok(None);
        };
        self.verify(&token).map(Some)
    }
}

/// extract_token
///
/// Looks for the first matching session cookie, then a bearer token.
pub fn extract_token(
    headers: &HeaderMap,
    cookie_names: &[String],
) -> Result<Option<String>, SessionError> {
    for value in headers.get_all(header::COOKIE) {
        let cookies = value.to_str().map_err(|_| SessionError::InvalidHeader)?;
        for name in cookie_names {
            if let Some(token) = find_cookie(cookies, name) {
                return Ok(Some(token.to_string()));
            }
        }
    }

    match headers.get(header::AUTHORIZATION) {
        Some(value) => {
            let value = value.to_str().map_err(|_| SessionError::InvalidHeader)?;
            Ok(value
                .strip_prefix("Bearer ")
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string))
        }
        None => Ok(None),
    }
}

fn find_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies.split(';').find_map(|cookie| {
        let (key, value) = cookie.trim().split_once('=')?;
        (key == name && !value.is_empty()).then_some(value)
    })
}

/// CurrentSession Extractor
///
/// Gives page handlers the session the gate admitted the request with. The
/// gate stores it in the request extensions; unguarded pages and anonymous
/// visitors see `None`. Never rejects.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<SessionToken>);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentSession(parts.extensions.get::<SessionToken>().cloned()))
    }
}
