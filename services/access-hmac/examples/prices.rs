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

use hmacapi::{parse_method, ApiRequest, Client, Config};
use hmacapi_core::{Context, Error, OsEnv, Result};
use hmacapi_file_read_tokio::TokioFileRead;
use hmacapi_http_send_reqwest::ReqwestHttpSend;
use log::info;
use serde_json::Value;
use std::env;

const USAGE: &str = "\
usage: prices [--profile NAME] VERB___seg1__seg2 [PAYLOAD]
       prices [--profile NAME] VERB seg1 [seg2 ...] [PAYLOAD]

Credentials are read from HMACAPI_BASE_URL, HMACAPI_ACCESS_KEY and
HMACAPI_ACCESS_SECRET, or from the profile in HMACAPI_CONFIG_FILE
(default ~/.hmacapi/config). PAYLOAD is a JSON object.

examples:
  prices GET___prices__buy
  prices GET prices spot_rate '{\"currency\": \"USD\"}'
  prices --profile sandbox POST___buttons '{\"name\": \"test\", \"price\": \"5.00\"}'";

fn parse_args(args: &[String]) -> Result<(Config, ApiRequest)> {
    let mut config = Config::new();
    let mut args = args;
    if let [flag, profile, rest @ ..] = args {
        if flag == "--profile" {
            config = config.with_profile(profile.as_str());
            args = rest;
        }
    }

    let Some((first, rest)) = args.split_first() else {
        return Err(Error::request_invalid("missing request"));
    };

    let (payload, rest) = match rest.split_last() {
        Some((last, init)) if last.trim_start().starts_with('{') => {
            let payload: Value = serde_json::from_str(last).map_err(|e| {
                Error::request_invalid("payload must be a JSON object").with_source(e)
            })?;
            (Some(payload), init)
        }
        _ => (None, rest),
    };

    let req = if rest.is_empty() {
        ApiRequest::from_compound(first)?
    } else {
        ApiRequest::new(parse_method(first)?, rest.iter().cloned())?
    };

    Ok((
        config,
        match payload {
            Some(payload) => req.with_json(payload),
            None => req,
        },
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = env::args().skip(1).collect::<Vec<_>>();
    let (config, req) = match parse_args(&args) {
        Ok(v) => v,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let client = Client::with_config(ctx, config).await?;
    info!("calling {} /{}", req.method(), req.path().join("/"));

    let body = client.execute(&req).await?;
    println!("{}", String::from_utf8_lossy(&body));
    Ok(())
}
