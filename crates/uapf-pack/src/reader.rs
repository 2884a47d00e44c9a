//! # Archive Member Reader
//!
//! Pulls member bytes out of an open zip archive and decodes JSON members.
//! Absence and malformed content are distinct errors so callers can tell a
//! missing file from a broken one.

use std::io::{Read, Seek};

use serde_json::Value;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{PackageError, PackageResult};
use crate::package::RawMembers;

/// Read the raw bytes of `member`.
///
/// # Errors
///
/// [`PackageError::MemberNotFound`] if the archive has no such member,
/// [`PackageError::MemberUnreadable`] if extraction fails.
pub fn read_member_bytes<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    member: &str,
) -> PackageResult<Vec<u8>> {
    let mut file = match archive.by_name(member) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => {
            return Err(PackageError::MemberNotFound {
                member: member.to_string(),
            })
        }
        Err(source) => {
            return Err(PackageError::MemberUnreadable {
                member: member.to_string(),
                source,
            })
        }
    };

    let declared = file.size();
    read_entry(&mut file, declared).map_err(|e| PackageError::MemberUnreadable {
        member: member.to_string(),
        source: e.into(),
    })
}

/// Upper bound on the buffer reserved up front for one member.
///
/// The declared size comes from the archive itself and is not trusted.
const MAX_PREALLOC: u64 = 1 << 20;

fn read_entry(entry: &mut impl Read, declared_size: u64) -> std::io::Result<Vec<u8>> {
    let hint = usize::try_from(declared_size.min(MAX_PREALLOC)).unwrap_or(0);
    let mut bytes = Vec::with_capacity(hint);
    entry.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// UTF-8 byte order mark, tolerated at the start of a JSON member.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read `member` and decode it as a JSON document.
///
/// # Errors
///
/// As [`read_member_bytes`], plus [`PackageError::MalformedJson`] with the
/// parser's line and column if the bytes are not valid JSON.
pub fn read_json<R: Read + Seek>(archive: &mut ZipArchive<R>, member: &str) -> PackageResult<Value> {
    let bytes = read_member_bytes(archive, member)?;
    tracing::debug!(member, size = bytes.len(), "read archive member");
    let text = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);
    serde_json::from_slice(text).map_err(|source| PackageError::MalformedJson {
        member: member.to_string(),
        source,
    })
}

/// Copy every member of the archive, in archive order.
///
/// Directory entries are kept with empty content.
pub fn snapshot_members<R: Read + Seek>(archive: &mut ZipArchive<R>) -> PackageResult<RawMembers> {
    let mut members = RawMembers::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|source| PackageError::MemberUnreadable {
                member: format!("#{index}"),
                source,
            })?;
        let name = file.name().to_string();
        let declared = file.size();
        let bytes = read_entry(&mut file, declared).map_err(|e| PackageError::MemberUnreadable {
            member: name.clone(),
            source: e.into(),
        })?;
        members.insert(name, bytes);
    }
    Ok(members)
}
