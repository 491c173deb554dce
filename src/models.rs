use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ExecuteError;

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "MethodRepr")]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 2] = [HttpMethod::GET, HttpMethod::POST];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
        }
    }

    pub fn next(&self) -> HttpMethod {
        match self {
            HttpMethod::GET => HttpMethod::POST,
            HttpMethod::POST => HttpMethod::GET,
        }
    }

    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::POST)
    }

    /// Position in the method selector, as stored on disk
    pub fn index(&self) -> u8 {
        match self {
            HttpMethod::GET => 0,
            HttpMethod::POST => 1,
        }
    }
}

impl Serialize for HttpMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index())
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ExecuteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::GET),
            "POST" => Ok(HttpMethod::POST),
            other => Err(ExecuteError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// On-disk method: the selector index, or a method name
#[derive(Deserialize)]
#[serde(untagged)]
enum MethodRepr {
    Name(String),
    Index(u64),
}

impl TryFrom<MethodRepr> for HttpMethod {
    type Error = String;

    fn try_from(repr: MethodRepr) -> Result<Self, Self::Error> {
        match repr {
            MethodRepr::Name(name) => name.parse().map_err(|e: ExecuteError| e.to_string()),
            MethodRepr::Index(index) => HttpMethod::ALL
                .get(index as usize)
                .copied()
                .ok_or_else(|| format!("unknown method index {}", index)),
        }
    }
}

/// A saved request, as persisted in the store file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Method")]
    pub method: HttpMethod,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Body")]
    pub body: String,
    #[serde(rename = "Response")]
    pub response: String,
}

impl Request {
    pub fn new(
        name: impl Into<String>,
        method: HttpMethod,
        url: impl Into<String>,
        body: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Request {
            name: name.into(),
            method,
            url: url.into(),
            body: body.into(),
            response: response.into(),
        }
    }
}

/// Raw result of a single HTTP exchange, before any formatting
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub body: Vec<u8>,
    /// Status line such as `200 OK`
    pub status: String,
    /// Value of the `Content-Type` header, empty when absent
    pub content_type: String,
}

impl RawResponse {
    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
