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

use crate::constants::*;
use crate::{Config, Credential};
use async_trait::async_trait;
use hmacapi_core::{Context, Error, ProvideCredential, Result};
use ini::Ini;
use log::debug;
use std::sync::Arc;

/// FileCredentialProvider loads the credential from an INI config file.
///
/// ```ini
/// [default]
/// baseurl = https://api.example.com/v1
/// key = my-access-key
/// secret = my-access-secret
/// ```
///
/// The file path is taken from [`Config::config_file`], then `HMACAPI_CONFIG_FILE`,
/// then `~/.hmacapi/config`. The section is taken from [`Config::profile`], then
/// `HMACAPI_PROFILE`, then `default`.
///
/// An absent or unreadable file yields no credential. A file that exists but
/// cannot be parsed, lacks the section, or lacks any of `baseurl`, `key` and
/// `secret` is a configuration error.
#[derive(Debug, Default)]
pub struct FileCredentialProvider {
    config: Arc<Config>,
}

impl FileCredentialProvider {
    /// Create a new FileCredentialProvider with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new FileCredentialProvider reading file and profile from config.
    pub fn with_config(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for FileCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let config = self.config.as_ref().clone().from_env(ctx);
        let path = config.config_file_or_default();
        let profile = config.profile_or_default();

        let Some(path) = ctx.expand_home_dir(path) else {
            debug!("failed to expand homedir for path: {path}");
            return Ok(None);
        };

        let content = match ctx.file_read_as_string(&path).await {
            Ok(content) => content,
            Err(err) => {
                debug!("failed to read config file {path}: {err:?}");
                return Ok(None);
            }
        };

        let conf = Ini::load_from_str(&content).map_err(|e| {
            Error::config_invalid(format!("failed to parse config file {path}")).with_source(e)
        })?;
        let props = conf.section(Some(profile)).ok_or_else(|| {
            Error::config_invalid(format!("section [{profile}] not found in {path}"))
        })?;

        let source = format!("config file {path} [{profile}]");
        Credential::from_fields(
            props.get(CONFIG_BASE_URL).map(str::to_string),
            props.get(CONFIG_KEY).map(str::to_string),
            props.get(CONFIG_SECRET).map(str::to_string),
            &source,
        )?
        .map(Some)
        .ok_or_else(|| {
            Error::config_invalid(format!(
                "{source}: missing {CONFIG_BASE_URL}, {CONFIG_KEY}, {CONFIG_SECRET}"
            ))
        })
    }
}
