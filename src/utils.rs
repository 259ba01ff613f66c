use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ADDRESS_RE: Regex = Regex::new(r"^0x[a-fA-F0-9]{40}$").unwrap();
}

// Check an account address: 0x followed by exactly 40 hex characters.
// Case is preserved, callers wanting canonical comparison lower-case both sides.
pub fn is_valid_address(address: &str) -> bool {
    ADDRESS_RE.is_match(address)
}

const IMAGE_EXTENSIONS: [&str; 8] = [
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".bmp", ".ico",
];

// Judge whether a string references an image: by extension, MIME hint,
// ipfs link narrowed by either, or inline data URL.
pub fn is_image_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }
    let lower = url.to_lowercase();

    let has_image_extension = IMAGE_EXTENSIONS.iter().any(|ext| lower.contains(ext));
    let has_image_mime_type = lower.contains("image/");
    let is_ipfs_image = lower.contains("ipfs") && (has_image_extension || has_image_mime_type);
    let is_base64_image = lower.starts_with("data:image/");

    has_image_extension || has_image_mime_type || is_ipfs_image || is_base64_image
}

// First image in an ordered file list, input order preserved.
pub fn find_first_image_url(file_urls: &[String]) -> Option<String> {
    file_urls.iter().find(|url| is_image_url(url)).cloned()
}

// The upload server persists under /uploads/ but serves under /static/.
pub fn rewrite_upload_url(url: &str) -> String {
    url.replacen("/uploads/", "/static/", 1)
}
