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

use criterion::{criterion_group, criterion_main, Criterion};
use hmacapi::{signature, ApiRequest, Client, Credential};
use hmacapi_core::Context;
use serde_json::json;
use std::hint::black_box;

criterion_group!(benches, bench);
criterion_main!(benches);

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("access_hmac");

    let client = Client::with_credential(
        Context::new(),
        Credential::new("https://api.example.com/v1", "access_key", "access_secret"),
    )
    .expect("client must be built");

    group.bench_function("build_request_without_payload", |b| {
        let req = ApiRequest::get(["prices", "buy"]).expect("request must be valid");
        b.iter(|| client.build_request(black_box(&req)).expect("must success"))
    });

    group.bench_function("build_request_with_payload", |b| {
        let req = ApiRequest::post(["buttons"])
            .expect("request must be valid")
            .with_json(json!({
                "name": "test",
                "price": "5.00",
                "currency": "USD",
                "type": "buy_now",
                "style": "custom_large",
            }));
        b.iter(|| client.build_request(black_box(&req)).expect("must success"))
    });

    group.bench_function("signature", |b| {
        let body = vec![b'x'; 4096];
        b.iter(|| {
            signature(
                black_box("access_secret"),
                black_box("1660582212000042"),
                black_box("https://api.example.com/v1/buttons"),
                black_box(&body),
            )
        })
    });

    group.finish();
}
