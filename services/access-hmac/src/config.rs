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

use std::fmt::{Debug, Formatter};

use crate::constants::*;
use hmacapi_core::utils::Redact;
use hmacapi_core::Context;

/// Config carries all the configuration for the API client.
///
/// Every field is optional: anything left unset falls through to the next
/// source of the [`DefaultCredentialProvider`](crate::DefaultCredentialProvider)
/// chain.
#[derive(Clone, Default)]
pub struct Config {
    /// `base_url` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`HMACAPI_BASE_URL`]
    pub base_url: Option<String>,
    /// `access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`HMACAPI_ACCESS_KEY`]
    pub access_key: Option<String>,
    /// `access_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`HMACAPI_ACCESS_SECRET`]
    pub access_secret: Option<String>,
    /// `config_file` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`HMACAPI_CONFIG_FILE`]
    /// - default to: `~/.hmacapi/config`
    pub config_file: Option<String>,
    /// `profile` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`HMACAPI_PROFILE`]
    /// - default to: `default`
    pub profile: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base_url
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set access_key
    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    /// Set access_secret
    pub fn with_access_secret(mut self, access_secret: impl Into<String>) -> Self {
        self.access_secret = Some(access_secret.into());
        self
    }

    /// Set config_file
    pub fn with_config_file(mut self, config_file: impl Into<String>) -> Self {
        self.config_file = Some(config_file.into());
        self
    }

    /// Set profile
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(HMACAPI_BASE_URL) {
            self.base_url.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(HMACAPI_ACCESS_KEY) {
            self.access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(HMACAPI_ACCESS_SECRET) {
            self.access_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(HMACAPI_CONFIG_FILE) {
            self.config_file.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(HMACAPI_PROFILE) {
            self.profile.get_or_insert(v);
        }

        self
    }

    /// The config file path to read, before `~` expansion.
    pub fn config_file_or_default(&self) -> &str {
        self.config_file.as_deref().unwrap_or(DEFAULT_CONFIG_FILE)
    }

    /// The config file section to read.
    pub fn profile_or_default(&self) -> &str {
        self.profile.as_deref().unwrap_or(DEFAULT_PROFILE)
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("access_key", &self.access_key.as_ref().map(Redact::from))
            .field(
                "access_secret",
                &self.access_secret.as_ref().map(Redact::from),
            )
            .field("config_file", &self.config_file)
            .field("profile", &self.profile)
            .finish()
    }
}
