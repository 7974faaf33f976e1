/// Boundary used by every test multipart body
pub const BOUNDARY: &str = "----template-translator-test-boundary";

/// Build a `multipart/form-data` body from text fields and `files` parts.
///
/// Returns the content type header value and the encoded body.
pub fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str)]) -> (String, Vec<u8>) {
    let mut body = String::new();

    for (name, value) in fields {
        body.push_str(&format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            BOUNDARY, name, value
        ));
    }

    for (file_name, content) in files {
        body.push_str(&format!(
            "--{}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n{}\r\n",
            BOUNDARY, file_name, content
        ));
    }

    body.push_str(&format!("--{}--\r\n", BOUNDARY));

    (
        format!("multipart/form-data; boundary={}", BOUNDARY),
        body.into_bytes(),
    )
}
