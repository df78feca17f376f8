//! In-memory `multipart/form-data` encoding.
//!
//! reqwest streams its own multipart forms, so the bytes (and the boundary) are not known until the request is on the
//! wire. Sumsub signs the body, so we need the exact bytes up front.
use rand::{distributions::Alphanumeric, Rng};

const BOUNDARY_LEN: usize = 30;

#[derive(Debug, Clone)]
pub struct MultipartBody {
    boundary: String,
    body: Vec<u8>,
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartBody {
    pub fn new() -> Self {
        let token: String = rand::thread_rng().sample_iter(&Alphanumeric).take(BOUNDARY_LEN).map(char::from).collect();
        Self::with_boundary(&format!("----kyc-gateway-{token}"))
    }

    pub fn with_boundary(boundary: &str) -> Self {
        Self { boundary: boundary.to_string(), body: Vec::new() }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Appends a plain text field.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.open_part();
        self.push(&format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", escape(name)));
        self.body.extend_from_slice(value.as_bytes());
        self.push("\r\n");
        self
    }

    /// Appends a file field.
    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, content: &[u8]) -> Self {
        self.open_part();
        self.push(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            escape(name),
            escape(file_name),
            single_line(content_type)
        ));
        self.body.extend_from_slice(content);
        self.push("\r\n");
        self
    }

    /// Closes the form, returning the `Content-Type` header value and the encoded body.
    pub fn finish(mut self) -> (String, Vec<u8>) {
        let closing = format!("--{}--\r\n", self.boundary);
        self.push(&closing);
        (format!("multipart/form-data; boundary={}", self.boundary), self.body)
    }

    fn open_part(&mut self) {
        let delimiter = format!("--{}\r\n", self.boundary);
        self.push(&delimiter);
    }

    fn push(&mut self, s: &str) {
        self.body.extend_from_slice(s.as_bytes());
    }
}

// Quotes and line breaks would end the header parameter early.
fn escape(s: &str) -> String {
    single_line(&s.replace('\\', "\\\\").replace('"', "\\\""))
}

// A line break in a header value would start a new header.
fn single_line(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}
