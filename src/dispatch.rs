//! Classification of API responses.

use crate::http_utils::HttpResponse;
use reqwest::StatusCode;
use std::io::{self, Write};

/// The three ways a completed request can end.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome {
    /// `200 OK`; carries the body.
    Success(Vec<u8>),
    /// `500 Internal Server Error`; the body is shown to the user as is.
    ServerError(Vec<u8>),
    /// Any other status.
    OtherError { status: StatusCode, body: Vec<u8> },
}

impl From<HttpResponse> for ResponseOutcome {
    fn from(response: HttpResponse) -> Self {
        match response.status {
            StatusCode::OK => ResponseOutcome::Success(response.body),
            StatusCode::INTERNAL_SERVER_ERROR => ResponseOutcome::ServerError(response.body),
            status => ResponseOutcome::OtherError {
                status,
                body: response.body,
            },
        }
    }
}

/// Write a response body exactly as received, followed by a newline.
pub fn write_body(out: &mut dyn Write, body: &[u8]) -> io::Result<()> {
    out.write_all(body)?;
    writeln!(out)
}
