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

// Env values used by the Twitter Ads client.
pub const TWITTER_ADS_CONSUMER_KEY: &str = "TWITTER_ADS_CONSUMER_KEY";
pub const TWITTER_ADS_CONSUMER_SECRET: &str = "TWITTER_ADS_CONSUMER_SECRET";
pub const TWITTER_ADS_ACCESS_TOKEN: &str = "TWITTER_ADS_ACCESS_TOKEN";
pub const TWITTER_ADS_ACCESS_TOKEN_SECRET: &str = "TWITTER_ADS_ACCESS_TOKEN_SECRET";
pub const TWITTER_ADS_BASE_DOMAIN: &str = "TWITTER_ADS_BASE_DOMAIN";
pub const TWITTER_ADS_API_VERSION: &str = "TWITTER_ADS_API_VERSION";

// Client defaults.
pub const DEFAULT_BASE_DOMAIN: &str = "twitter.com";
pub const DEFAULT_API_VERSION: &str = "12";

// OAuth1 protocol parameters.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_NONCE: &str = "oauth_nonce";
pub const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_TOKEN: &str = "oauth_token";
pub const OAUTH_VERSION: &str = "oauth_version";
pub const OAUTH_VERSION_1_0: &str = "1.0";
