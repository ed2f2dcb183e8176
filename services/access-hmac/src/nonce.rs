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

use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

use hmacapi_core::time::{now, unix_micros, DateTime};

/// Last nonce handed out by [`Nonce::next`] in this process.
static LAST_NONCE: AtomicU64 = AtomicU64::new(0);

/// Nonce is a per-request value that the server uses to reject replays.
///
/// It renders as whole seconds since the epoch followed by the 6-digit
/// zero-padded microsecond fraction, e.g. `1660582212000042`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nonce(u64);

impl Nonce {
    /// Sample the clock for a new nonce.
    ///
    /// Nonces are strictly increasing within a process: two calls landing
    /// in the same microsecond, or a clock stepping backwards, still yield
    /// a value above the previous one.
    ///
    /// The clock alone cannot promise that, so the last value handed out is
    /// kept in one process-wide atomic; updating it never takes a lock.
    pub fn next() -> Self {
        let sampled = unix_micros(now());
        let prev = LAST_NONCE
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(sampled.max(last + 1))
            })
            // The closure never returns `None`.
            .unwrap_or_else(|last| last);

        Nonce(sampled.max(prev + 1))
    }

    /// Build the nonce for the given instant without touching the clock.
    pub fn at(time: DateTime) -> Self {
        Nonce(unix_micros(time))
    }

    /// Microseconds since the unix epoch.
    pub fn as_micros(&self) -> u64 {
        self.0
    }
}

impl Display for Nonce {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:06}", self.0 / 1_000_000, self.0 % 1_000_000)
    }
}
