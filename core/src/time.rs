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

/// DateTime is the UTC timestamp type used across adsign.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a new DateTime for the current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Seconds since unix epoch, the format of `oauth_timestamp`.
pub fn unix_timestamp(t: DateTime) -> String {
    t.timestamp().to_string()
}
