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

//! `multipart/form-data` encoding for requests carrying file parameters.

use adsign_core::Parameters;
use bytes::{BufMut, Bytes, BytesMut};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a random multipart boundary.
pub(crate) fn boundary() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect();
    format!("adsign-{suffix}")
}

/// Encode `fields` as text parts and `files` as binary parts.
///
/// File parameters carry no file name of their own, so the parameter key
/// is sent as both `name` and `filename` of the part.
///
/// ```text
/// --<boundary>\r\n
/// Content-Disposition: form-data; name="<key>"[; filename="<key>"]\r\n
/// [Content-Type: application/octet-stream\r\n]
/// \r\n
/// <value>\r\n
/// --<boundary>--\r\n
/// ```
pub(crate) fn encode(boundary: &str, fields: &Parameters, files: &Parameters) -> Bytes {
    let mut buf = BytesMut::new();

    for (name, value) in fields.iter() {
        put_part_header(&mut buf, boundary, name, false);
        buf.put_slice(value.as_bytes());
        buf.put_slice(b"\r\n");
    }
    for (name, value) in files.iter() {
        put_part_header(&mut buf, boundary, name, true);
        buf.put_slice(value.as_bytes());
        buf.put_slice(b"\r\n");
    }

    buf.put_slice(format!("--{boundary}--\r\n").as_bytes());
    buf.freeze()
}

fn put_part_header(buf: &mut BytesMut, boundary: &str, name: &str, is_file: bool) {
    let name = escape_quoted(name);
    buf.put_slice(format!("--{boundary}\r\n").as_bytes());
    if is_file {
        buf.put_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
    } else {
        buf.put_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
    }
}

fn escape_quoted(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace(['\r', '\n'], " ")
}
