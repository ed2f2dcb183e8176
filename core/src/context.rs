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

use crate::{Error, Result};
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

/// Context bundles the I/O a client needs: reading the config file, sending
/// signed requests and looking up the environment.
///
/// A fresh context can do none of these. Reads and sends fail and the
/// environment is empty until real implementations are plugged in:
///
/// ```
/// use hmacapi_core::{Context, OsEnv};
///
/// let ctx = Context::new().with_env(OsEnv);
/// assert_eq!(ctx.env_var("HMACAPI_SURELY_UNSET_VARIABLE"), None);
/// ```
#[derive(Clone, Debug)]
pub struct Context {
    fs: Arc<dyn FileRead>,
    http: Arc<dyn HttpSend>,
    env: Arc<dyn Env>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a context without file, transport or environment access.
    pub fn new() -> Self {
        Self {
            fs: Arc::new(NoopFileRead),
            http: Arc::new(NoopHttpSend),
            env: Arc::new(NoopEnv),
        }
    }

    /// Use `fs` to read config files.
    pub fn with_file_read(mut self, fs: impl FileRead) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    /// Use `http` as the transport.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Use `env` for environment variables and the home directory.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Read a whole file.
    pub async fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        self.fs.file_read(path).await
    }

    /// Read a whole file as text, replacing invalid utf-8.
    pub async fn file_read_as_string(&self, path: &str) -> Result<String> {
        let bytes = self.file_read(path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Hand `req` to the transport.
    pub async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.http.http_send(req).await
    }

    /// Resolve a leading `~/` against the home directory.
    ///
    /// Other paths come back unchanged; `None` means the path needs a home
    /// directory and there is none.
    pub fn expand_home_dir(&self, path: &str) -> Option<String> {
        match path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
            None => Some(path.to_string()),
            Some(rest) => {
                let home = self.env.home_dir()?;
                Some(home.join(rest).to_string_lossy().into_owned())
            }
        }
    }

    /// Look up an environment variable; unset and non-utf-8 values are `None`.
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }
}

/// FileRead loads the INI config file.
#[async_trait::async_trait]
pub trait FileRead: Debug + Send + Sync + 'static {
    /// Read the whole file at `path`.
    async fn file_read(&self, path: &str) -> Result<Vec<u8>>;
}

/// HttpSend is the transport that carries signed requests to the API.
///
/// Implementations must return the response as-is: non-2xx statuses are
/// not errors at this layer, and no retry should happen here.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send `req` and return whatever the server answered.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// Env is where `HMACAPI_*` variables and `~` come from.
pub trait Env: Debug + Send + Sync + 'static {
    /// Value of `key`, `None` if unset or not utf-8.
    fn var(&self, key: &str) -> Option<String>;

    /// Home directory of the current user, if known.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Env of the running process.
#[derive(Debug, Copy, Clone)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key)?.into_string().ok()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        home::home_dir()
    }
}

/// Fixed env, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// Home directory, `None` for a user without one.
    pub home_dir: Option<PathBuf>,
    /// Variables by name.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir.clone()
    }
}

/// File reader of a fresh [`Context`]: every read fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFileRead;

#[async_trait::async_trait]
impl FileRead for NoopFileRead {
    async fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        Err(Error::unexpected(format!(
            "cannot read {path}: no file reader configured"
        )))
    }
}

/// Transport of a fresh [`Context`]: every send fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::transport(format!(
            "cannot send {} {}: no transport configured",
            req.method(),
            req.uri()
        )))
    }
}

/// Env of a fresh [`Context`]: no variables, no home directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnv;

impl Env for NoopEnv {
    fn var(&self, _: &str) -> Option<String> {
        None
    }

    fn home_dir(&self) -> Option<PathBuf> {
        None
    }
}
