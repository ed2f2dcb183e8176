// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Resource requests and the compound token calling convention.

use bytes::Bytes;
use http::Method;
use hmacapi_core::{Error, Result};
use serde::Serialize;
use serde_json::Value;

use crate::constants::*;

/// ApiRequest is a call against one API resource: a verb, the resource path
/// and an optional JSON payload.
///
/// A request always targets a resource, so the path holds at least one
/// non-empty segment.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: Vec<String>,
    payload: Option<Value>,
}

impl ApiRequest {
    /// Create a new request for `path` without payload.
    ///
    /// Returns a `RequestInvalid` error if the method is not one of
    /// `GET`, `POST`, `PUT` and `DELETE`, or if the path is empty.
    pub fn new<I, S>(method: Method, path: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        check_method(&method)?;

        let path: Vec<String> = path.into_iter().map(Into::into).collect();
        if path.is_empty() {
            return Err(Error::request_invalid(
                "request must target a resource: no path segments",
            ));
        }
        if let Some(idx) = path.iter().position(|s| s.is_empty()) {
            return Err(Error::request_invalid(format!(
                "path segment {idx} is empty"
            )));
        }

        Ok(Self {
            method,
            path,
            payload: None,
        })
    }

    /// Create a `GET` request.
    pub fn get<I, S>(path: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, path)
    }

    /// Create a `POST` request.
    pub fn post<I, S>(path: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, path)
    }

    /// Create a `PUT` request.
    pub fn put<I, S>(path: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::PUT, path)
    }

    /// Create a `DELETE` request.
    pub fn delete<I, S>(path: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::DELETE, path)
    }

    /// Create a request from positional call arguments.
    ///
    /// See [`resolve_args`] for how the arguments split into path and payload.
    pub fn from_args(method: Method, args: &[Value]) -> Result<Self> {
        let (path, payload) = resolve_args(args)?;
        let mut req = Self::new(method, path)?;
        req.payload = payload;
        Ok(req)
    }

    /// Create a request from a full compound token such as `GET___prices__buy`.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// token = VERB "___" segment *( "__" segment )
    /// VERB  = "GET" / "POST" / "PUT" / "DELETE"   ; case-insensitive
    /// ```
    pub fn from_compound(token: &str) -> Result<Self> {
        let (verb, path) = token.split_once(VERB_SEPARATOR).ok_or_else(|| {
            Error::request_invalid(format!(
                "compound token {token:?} has no {VERB_SEPARATOR:?} between verb and path"
            ))
        })?;

        Self::from_compound_path(parse_method(verb)?, path)
    }

    /// Create a request from the path part of a compound token, such as
    /// `prices__buy`, with the verb given separately.
    pub fn from_compound_path(method: Method, path: &str) -> Result<Self> {
        if path.is_empty() {
            return Self::new(method, Vec::<String>::new());
        }

        Self::new(method, path.split(SEGMENT_SEPARATOR))
    }

    /// Attach a payload, serialized to JSON once here.
    pub fn with_payload<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self> {
        let value = serde_json::to_value(payload).map_err(|e| {
            Error::request_invalid("payload cannot be serialized as JSON").with_source(e)
        })?;
        self.payload = Some(value);
        Ok(self)
    }

    /// Attach an already built JSON payload.
    pub fn with_json(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// HTTP method of this request.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path segments of this request, unencoded.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Payload of this request, if any.
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Render this request back as a compound token, payload excluded.
    ///
    /// Returns a `RequestInvalid` error if a segment cannot be expressed in
    /// the grammar: it contains `__` or starts or ends with `_`.
    pub fn to_compound(&self) -> Result<String> {
        if let Some(seg) = self
            .path
            .iter()
            .find(|s| s.contains(SEGMENT_SEPARATOR) || s.starts_with('_') || s.ends_with('_'))
        {
            return Err(Error::request_invalid(format!(
                "path segment {seg:?} cannot be written as a compound token"
            )));
        }

        Ok(format!(
            "{}{VERB_SEPARATOR}{}",
            self.method,
            self.path.join(SEGMENT_SEPARATOR)
        ))
    }

    /// Full url of this request: `base_url + "/" + path joined by "/"`.
    ///
    /// Segments are joined verbatim. A segment may carry its own `/`, a
    /// query such as `spot_rate?currency=USD`, or already percent-encoded
    /// bytes; none of them is rewritten here.
    pub fn url(&self, base_url: &str) -> String {
        format!("{base_url}/{}", self.path.join("/"))
    }

    /// JSON encoding of the payload, or empty bytes without payload.
    pub fn body(&self) -> Result<Bytes> {
        match &self.payload {
            None => Ok(Bytes::new()),
            Some(v) => serde_json::to_vec(v).map(Bytes::from).map_err(|e| {
                Error::request_invalid("payload cannot be serialized as JSON").with_source(e)
            }),
        }
    }
}

/// Split positional call arguments into path segments and payload.
///
/// - A trailing object or array is the payload and is not part of the path.
/// - Strings, numbers and booleans are path segments, numbers and booleans
///   in their JSON rendering.
/// - An object or array anywhere else, or `null` anywhere, is a
///   `RequestInvalid` error.
/// - Zero remaining path segments is a `RequestInvalid` error.
pub fn resolve_args(args: &[Value]) -> Result<(Vec<String>, Option<Value>)> {
    let (segments, payload) = match args.split_last() {
        Some((last, rest)) if matches!(last, Value::Object(_) | Value::Array(_)) => {
            (rest, Some(last.clone()))
        }
        _ => (args, None),
    };

    let path = segments
        .iter()
        .enumerate()
        .map(|(idx, arg)| match arg {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Null => Err(Error::request_invalid(format!(
                "argument {idx} is null"
            ))),
            Value::Object(_) | Value::Array(_) => Err(Error::request_invalid(format!(
                "argument {idx} is structured but only the last argument may be a payload"
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    if path.is_empty() {
        return Err(Error::request_invalid(
            "request must target a resource: no path segments",
        ));
    }

    Ok((path, payload))
}

/// Parse a verb, case-insensitive, into one of the supported methods.
pub fn parse_method(verb: &str) -> Result<Method> {
    match verb.to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "DELETE" => Ok(Method::DELETE),
        _ => Err(Error::request_invalid(format!(
            "unsupported verb {verb:?}, expect one of GET, POST, PUT, DELETE"
        ))),
    }
}

fn check_method(method: &Method) -> Result<()> {
    if [Method::GET, Method::POST, Method::PUT, Method::DELETE].contains(method) {
        return Ok(());
    }

    Err(Error::request_invalid(format!(
        "unsupported method {method}, expect one of GET, POST, PUT, DELETE"
    )))
}
