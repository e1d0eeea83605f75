//! Splitting tokens across size-limited metadata fields
//!
//! Payment-session metadata accepts at most 500 characters per value. Short
//! tokens travel in a single `design` field; longer ones are cut into
//! fixed-size pieces `design_0`, `design_1`, ... with the piece count in
//! `design_chunks`.

use std::collections::BTreeMap;

use crate::error::{CodecError, CodecResult};

/// Hard per-field character ceiling of the transport.
pub const FIELD_LIMIT: usize = 500;
/// Characters per chunk when a token has to be split.
pub const CHUNK_SIZE: usize = 450;
/// Upper bound on chunk count accepted when reassembling.
pub const MAX_CHUNKS: usize = 40;

/// Longest token [`split`] will place; [`join`] accepts no more.
pub const MAX_TOKEN_LEN: usize = MAX_CHUNKS * CHUNK_SIZE;

pub const TOKEN_FIELD: &str = "design";
pub const COUNT_FIELD: &str = "design_chunks";

pub fn chunk_field(index: usize) -> String {
    format!("{}_{}", TOKEN_FIELD, index)
}

/// Place `token` into metadata fields.
pub fn split(token: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    let chars: Vec<char> = token.chars().collect();

    if chars.len() <= FIELD_LIMIT {
        fields.insert(TOKEN_FIELD.to_string(), token.to_string());
        return fields;
    }

    let chunks: Vec<String> = chars
        .chunks(CHUNK_SIZE)
        .map(|chunk| chunk.iter().collect())
        .collect();
    fields.insert(COUNT_FIELD.to_string(), chunks.len().to_string());
    for (index, chunk) in chunks.into_iter().enumerate() {
        fields.insert(chunk_field(index), chunk);
    }
    fields
}

/// Reassemble a token from metadata fields written by [`split`].
pub fn join(fields: &BTreeMap<String, String>) -> CodecResult<String> {
    if let Some(token) = fields.get(TOKEN_FIELD) {
        check_length(TOKEN_FIELD, token)?;
        return Ok(token.clone());
    }

    let raw_count = fields.get(COUNT_FIELD).ok_or(CodecError::MissingToken)?;
    let count: usize = raw_count
        .trim()
        .parse()
        .map_err(|_| CodecError::BadChunkCount(raw_count.clone()))?;
    if count == 0 || count > MAX_CHUNKS {
        return Err(CodecError::BadChunkCount(raw_count.clone()));
    }

    let mut token = String::new();
    for index in 0..count {
        let name = chunk_field(index);
        let chunk = fields.get(&name).ok_or(CodecError::MissingChunk(index))?;
        check_length(&name, chunk)?;
        token.push_str(chunk);
    }
    Ok(token)
}

fn check_length(field: &str, value: &str) -> CodecResult<()> {
    let len = value.chars().count();
    if len > FIELD_LIMIT {
        return Err(CodecError::FieldTooLong {
            field: field.to_string(),
            len,
            limit: FIELD_LIMIT,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_token_uses_single_field() {
        let fields = split("abc");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get(TOKEN_FIELD).map(String::as_str), Some("abc"));
        assert_eq!(join(&fields).unwrap(), "abc");
    }

    #[test]
    fn test_token_at_limit_is_not_split() {
        let token = "x".repeat(FIELD_LIMIT);
        assert_eq!(split(&token).len(), 1);
    }

    #[test]
    fn test_long_token_is_chunked_in_order() {
        let token: String = (0..1000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let fields = split(&token);
        assert_eq!(fields.get(COUNT_FIELD).map(String::as_str), Some("3"));
        assert_eq!(fields["design_0"].chars().count(), CHUNK_SIZE);
        assert_eq!(fields["design_2"].chars().count(), 100);
        assert!(fields.values().all(|v| v.chars().count() <= FIELD_LIMIT));
        assert_eq!(join(&fields).unwrap(), token);
    }

    #[test]
    fn test_multibyte_chunks_split_on_chars() {
        let token = "é".repeat(700);
        let fields = split(&token);
        assert_eq!(join(&fields).unwrap(), token);
    }

    #[test]
    fn test_missing_chunk_is_reported() {
        let mut fields = split(&"y".repeat(1200));
        fields.remove("design_1");
        assert!(matches!(join(&fields), Err(CodecError::MissingChunk(1))));
    }

    #[test]
    fn test_bad_count_is_reported() {
        let mut fields = BTreeMap::new();
        fields.insert(COUNT_FIELD.to_string(), "lots".to_string());
        assert!(matches!(join(&fields), Err(CodecError::BadChunkCount(_))));
        fields.insert(COUNT_FIELD.to_string(), "0".to_string());
        assert!(matches!(join(&fields), Err(CodecError::BadChunkCount(_))));
        assert!(matches!(join(&BTreeMap::new()), Err(CodecError::MissingToken)));
    }
}
