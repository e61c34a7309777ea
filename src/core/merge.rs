// src/core/merge.rs

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MergeError {
    #[error("Cannot merge into a non-mapping destination value.")]
    DestinationNotAMapping,
    #[error("Cannot merge from a non-mapping source value.")]
    SourceNotAMapping,
}

/// Recursively merges `src` into `dest`.
///
/// Keys only present in `src` are inserted. Keys present on both sides merge
/// recursively when the source value is itself a mapping; any other source
/// value overwrites the destination wholesale (lists are replaced, never
/// concatenated). Both arguments must be mappings, and a mapping on the
/// source side can only merge into a mapping on the destination side.
///
/// The point of the shape: a deeply nested default document survives while a
/// thin override replaces only the leaves it names, without having to repeat
/// the rest of the structure.
pub fn merge_value(dest: &mut Value, src: &Value) -> Result<(), MergeError> {
    let src_map = src.as_object().ok_or(MergeError::SourceNotAMapping)?;
    let dest_map = dest.as_object_mut().ok_or(MergeError::DestinationNotAMapping)?;

    for (key, src_value) in src_map {
        match dest_map.get_mut(key) {
            None => {
                dest_map.insert(key.clone(), src_value.clone());
            }
            Some(dest_value) => {
                if src_value.is_object() {
                    merge_value(dest_value, src_value)?;
                } else {
                    *dest_value = src_value.clone();
                }
            }
        }
    }
    Ok(())
}
