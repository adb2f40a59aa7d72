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

//! Encoders used to build urls and OAuth1 signature base strings.
//!
//! Two strictness levels live here and must stay separate:
//!
//! - [`form_urlencode`]: `application/x-www-form-urlencoded`, used for the
//!   query string of [`Request::url`](crate::Request::url) and form bodies.
//!   Space becomes `+`, `*` is kept verbatim.
//! - [`rfc3986_encode`]: the RFC 3986 unreserved set, used for everything
//!   that takes part in a signature. Space becomes `%20`, `!*'()` are escaped.

use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// AsciiSet for [RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986#section-2.3) encoding.
///
/// - Percent encode every byte except the unreserved characters:
///   'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static RFC3986_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent encode input with [`RFC3986_ENCODE_SET`].
pub fn rfc3986_encode(s: &str) -> String {
    utf8_percent_encode(s, &RFC3986_ENCODE_SET).to_string()
}

/// Encode input as an `application/x-www-form-urlencoded` value.
pub fn form_urlencode(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

/// Build the query string used in request urls and form bodies.
///
/// Pairs are sorted by key (then value) before being form encoded, so the
/// output does not depend on insertion order.
///
/// ```text
/// [(b, "x y"), (a, "1")] => "a=1&b=x+y"
/// ```
pub fn build_form_query(mut query: Vec<(String, String)>) -> String {
    query.sort();

    form_urlencoded::Serializer::new(String::with_capacity(16))
        .extend_pairs(query)
        .finish()
}

/// Build the canonical query string that takes part in OAuth1 signing.
///
/// Keys and values are RFC 3986 encoded first and then sorted byte-wise,
/// which is the normalization OAuth1 requires. Empty values still keep
/// their `=`.
///
/// ```text
/// [(b, "x y"), (a, "1")] => "a=1&b=x%20y"
/// ```
pub fn build_http_query(query: Vec<(String, String)>) -> String {
    let mut query = query
        .into_iter()
        .map(|(k, v)| (rfc3986_encode(&k), rfc3986_encode(&v)))
        .collect::<Vec<_>>();
    query.sort();

    let mut s = String::with_capacity(16);
    for (idx, (k, v)) in query.into_iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }

        s.push_str(&k);
        s.push('=');
        s.push_str(&v);
    }

    s
}

/// Construct the OAuth1 signature base string.
///
/// ## Format
///
/// ```text
/// rfc3986(METHOD) + "&" +
/// rfc3986(URL) + "&" +
/// rfc3986(SignableParameters)
/// ```
pub fn signature_base_string(method: &str, url: &str, signable_parameters: &str) -> String {
    [method, url, signable_parameters]
        .iter()
        .map(|part| rfc3986_encode(part))
        .collect::<Vec<_>>()
        .join("&")
}
