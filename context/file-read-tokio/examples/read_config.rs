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

use hmacapi_core::{Context, OsEnv, Result};
use hmacapi_file_read_tokio::TokioFileRead;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    let ctx = Context::new().with_file_read(TokioFileRead).with_env(OsEnv);

    // Get the path from command line arguments or use the client's default.
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "~/.hmacapi/config".to_string());
    let Some(path) = ctx.expand_home_dir(&path) else {
        eprintln!("Cannot expand {path}: home directory unknown");
        return Ok(());
    };

    println!("Attempting to read file: {path}");

    match ctx.file_read_as_string(&path).await {
        Ok(text) => {
            println!("Successfully read {} bytes from {path}", text.len());
            // Only section headers: the file holds secrets.
            for line in text.lines().filter(|l| l.trim_start().starts_with('[')) {
                println!("  {}", line.trim());
            }
        }
        Err(e) => {
            eprintln!("Failed to read file: {e}");
        }
    }

    Ok(())
}
