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

//! Time related utils.

use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Microseconds since the unix epoch.
///
/// Instants before the epoch are clamped to zero.
pub fn unix_micros(t: DateTime) -> u64 {
    u64::try_from(t.timestamp_micros()).unwrap_or(0)
}

/// Format time as whole seconds since the epoch followed by the
/// zero-padded 6-digit microsecond fraction: "1660582212000042".
pub fn format_unix_micros(t: DateTime) -> String {
    format!("{}{:06}", t.timestamp(), t.timestamp_subsec_micros())
}
