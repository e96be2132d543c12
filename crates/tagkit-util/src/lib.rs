pub mod result_ext;

/// Hex string of a tag identifier, for logs
pub fn hex_id(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
