//! Snapshot codec (JSON array of posts) and file helpers.
//!
//! Decoding is strict: a snapshot with duplicate IDs, or IDs the allocator
//! could never have produced, is rejected as malformed rather than partially
//! applied.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use bytes::Bytes;

use blog_core::{BlogError, Post, PostId, Result};

/// Encode posts into snapshot bytes.
pub fn encode(posts: &[Post]) -> Result<Bytes> {
    serde_json::to_vec(posts)
        .map(Bytes::from)
        .map_err(|e| BlogError::Internal(format!("snapshot encode failed: {e}")))
}

/// Decode and validate snapshot bytes.
pub fn decode(raw: &[u8]) -> Result<Vec<Post>> {
    let posts: Vec<Post> = serde_json::from_slice(raw)
        .map_err(|e| BlogError::Deserialization(format!("invalid snapshot json: {e}")))?;

    let mut seen: HashSet<PostId> = HashSet::with_capacity(posts.len());
    for p in &posts {
        // Allocatable IDs are 1..i64::MAX; the allocator never hands out MAX.
        if !(1..PostId::MAX).contains(&p.id) {
            return Err(BlogError::Deserialization(format!(
                "snapshot post id out of range: {}",
                p.id
            )));
        }
        if !seen.insert(p.id) {
            return Err(BlogError::Deserialization(format!(
                "snapshot contains duplicate post id: {}",
                p.id
            )));
        }
    }
    Ok(posts)
}

/// Write snapshot bytes to `path`.
///
/// Data goes to a sibling `.tmp` file first and is renamed over the target;
/// an interrupted write leaves the previous snapshot in place.
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    fs::write(tmp, data).map_err(|e| {
        BlogError::PersistenceIo(format!("write {} failed: {e}", tmp.display()))
    })?;
    fs::rename(tmp, path).map_err(|e| {
        BlogError::PersistenceIo(format!("rename to {} failed: {e}", path.display()))
    })
}

/// Read snapshot bytes from `path`.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path)
        .map_err(|e| BlogError::PersistenceIo(format!("read {} failed: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_malformed_json() {
        let err = decode(b"{not json").unwrap_err();
        assert!(matches!(err, BlogError::Deserialization(_)));
    }

    #[test]
    fn decode_rejects_duplicate_ids() {
        let raw = br#"[
            {"id": 1, "title": "a", "content": "b", "author": "c"},
            {"id": 1, "title": "d", "content": "e", "author": "f"}
        ]"#;
        let err = decode(raw).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn decode_rejects_non_positive_ids() {
        let raw = br#"[{"id": 0, "title": "a", "content": "b", "author": "c"}]"#;
        assert!(matches!(decode(raw), Err(BlogError::Deserialization(_))));
    }

    #[test]
    fn decode_rejects_ids_the_allocator_never_produces() {
        let raw = format!(
            r#"[{{"id": {}, "title": "a", "content": "b", "author": "c"}}]"#,
            PostId::MAX
        );
        assert!(matches!(decode(raw.as_bytes()), Err(BlogError::Deserialization(_))));

        let raw = format!(
            r#"[{{"id": {}, "title": "a", "content": "b", "author": "c"}}]"#,
            PostId::MAX - 1
        );
        assert_eq!(decode(raw.as_bytes()).unwrap()[0].id, PostId::MAX - 1);
    }

    #[test]
    fn decode_accepts_empty_array() {
        assert!(decode(b"[]").unwrap().is_empty());
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let err = read_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, BlogError::PersistenceIo(_)));
    }
}
