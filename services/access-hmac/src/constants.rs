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

use http::HeaderName;

// Env values used by the hmacapi client.
pub const HMACAPI_BASE_URL: &str = "HMACAPI_BASE_URL";
pub const HMACAPI_ACCESS_KEY: &str = "HMACAPI_ACCESS_KEY";
pub const HMACAPI_ACCESS_SECRET: &str = "HMACAPI_ACCESS_SECRET";
pub const HMACAPI_CONFIG_FILE: &str = "HMACAPI_CONFIG_FILE";
pub const HMACAPI_PROFILE: &str = "HMACAPI_PROFILE";

// Config file defaults.
pub const DEFAULT_CONFIG_FILE: &str = "~/.hmacapi/config";
pub const DEFAULT_PROFILE: &str = "default";

// Keys inside a config file section.
pub const CONFIG_BASE_URL: &str = "baseurl";
pub const CONFIG_KEY: &str = "key";
pub const CONFIG_SECRET: &str = "secret";

// Headers attached to every signed request.

/// Header carrying the per-request nonce, also the first part of the signed message.
pub const ACCESS_NONCE: HeaderName = HeaderName::from_static("access_nonce");
/// Header carrying the configured access key verbatim.
pub const ACCESS_KEY: HeaderName = HeaderName::from_static("access_key");
/// Header carrying the lowercase hex HMAC-SHA256 signature.
pub const ACCESS_SIGNATURE: HeaderName = HeaderName::from_static("access_signature");
pub const APPLICATION_JSON: &str = "application/json";

// Compound token grammar: VERB + "___" + seg1 + "__" + seg2 + ...
pub const VERB_SEPARATOR: &str = "___";
pub const SEGMENT_SEPARATOR: &str = "__";
