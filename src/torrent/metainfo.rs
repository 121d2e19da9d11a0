use super::Pieces;
use crate::bencode::{self, Value};
use crate::error::{Result, TorrentError};
use bytes::Bytes;
use indexmap::IndexMap;
use sha1::{Digest, Sha1};

/// A checksum carried by the info dictionary or a file entry.
///
/// The metainfo format spells these as `md5sum`, `md5` or `sha1` keys; when
/// several are present the last one listed here wins, matching the lookup
/// order of the original tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checksum {
    Md5(Bytes),
    Sha1(Bytes),
}

impl Checksum {
    pub fn kind(&self) -> &'static str {
        match self {
            Checksum::Md5(_) => "MD5",
            Checksum::Sha1(_) => "SHA1",
        }
    }

    pub fn value(&self) -> &[u8] {
        match self {
            Checksum::Md5(v) | Checksum::Sha1(v) => v,
        }
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.value())
    }
}

/// One entry of the `files` list (multi-file mode)
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path components, relative to the torrent's directory name
    pub path: Vec<String>,
    pub length: Option<u64>,
    pub checksum: Option<Checksum>,
}

/// The `info` dictionary of a metainfo file.
///
/// Every field is optional: the schema layer only looks keys up, it never
/// turns an absent or mistyped key into a decode error.
#[derive(Debug, Clone)]
pub struct TorrentInfo {
    /// Suggested name for the file or directory
    pub name: Option<String>,
    /// Number of bytes in each piece
    pub piece_length: Option<u64>,
    /// SHA1 hashes of all pieces
    pub pieces: Option<Pieces>,
    /// Whether the torrent is restricted to its listed trackers
    pub private: Option<bool>,
    /// Total size, single-file mode only
    pub length: Option<u64>,
    /// Whole-content checksum, single-file mode only
    pub checksum: Option<Checksum>,
    /// File entries, multi-file mode only
    pub files: Vec<FileEntry>,
}

impl TorrentInfo {
    fn from_bencode(value: &Value) -> Result<Self> {
        let dict = value
            .as_dict()
            .ok_or_else(|| TorrentError::InvalidTorrent("info must be a dictionary".to_string()))?;

        let files = dict
            .get(b"files".as_ref())
            .and_then(|v| v.as_list())
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry.as_dict())
                    .map(FileEntry::from_dict)
                    .collect()
            })
            .unwrap_or_default();

        Ok(TorrentInfo {
            name: value.dict_get_str(b"name").map(String::from),
            piece_length: dict_get_u64(dict, b"piece length"),
            pieces: dict
                .get(b"pieces".as_ref())
                .and_then(|v| v.as_bytes())
                .and_then(|raw| Pieces::from_bytes(raw).ok()),
            private: value.dict_get_int(b"private").map(|n| n != 0),
            length: dict_get_u64(dict, b"length"),
            checksum: checksum_from(dict),
            files,
        })
    }

    /// Single-file mode carries no `files` list
    pub fn is_single_file(&self) -> bool {
        self.files.is_empty()
    }

    /// Total size in bytes across all files
    pub fn total_length(&self) -> u64 {
        if self.is_single_file() {
            self.length.unwrap_or(0)
        } else {
            self.files.iter().filter_map(|f| f.length).sum()
        }
    }
}

impl FileEntry {
    fn from_dict(dict: &IndexMap<Bytes, Value>) -> Self {
        let path = dict
            .get(b"path".as_ref())
            .and_then(|v| v.as_list())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        FileEntry {
            path,
            length: dict_get_u64(dict, b"length"),
            checksum: checksum_from(dict),
        }
    }
}

/// Top-level structure of a .torrent file.
///
/// Built once per parse; nothing here is shared between decode calls.
#[derive(Debug, Clone)]
pub struct Metainfo {
    /// URL of the tracker
    pub announce: Option<String>,
    /// Tiered list of additional tracker URLs
    pub announce_list: Option<Vec<Vec<String>>>,
    /// Unix timestamp of creation
    pub creation_date: Option<i64>,
    pub comment: Option<String>,
    pub created_by: Option<String>,
    /// Character encoding of string fields
    pub encoding: Option<String>,
    pub info: Option<TorrentInfo>,
    /// SHA1 hash of the bencoded info dictionary
    pub info_hash: Option<[u8; 20]>,
}

impl Metainfo {
    pub fn from_bencode(value: &Value, raw_data: &[u8]) -> Result<Self> {
        let dict = value.as_dict().ok_or_else(|| {
            TorrentError::InvalidTorrent("torrent must be a dictionary".to_string())
        })?;

        let announce_list = dict.get(b"announce-list".as_ref()).and_then(|v| {
            v.as_list().map(|tiers| {
                tiers
                    .iter()
                    .filter_map(|tier| {
                        tier.as_list().map(|urls| {
                            urls.iter()
                                .filter_map(|u| u.as_str().map(String::from))
                                .collect()
                        })
                    })
                    .collect()
            })
        });

        let info = match dict.get(b"info".as_ref()) {
            Some(info_value) => Some(TorrentInfo::from_bencode(info_value)?),
            None => None,
        };

        let info_hash = match info {
            Some(_) => Some(compute_info_hash(raw_data)?),
            None => None,
        };

        Ok(Metainfo {
            announce: value.dict_get_str(b"announce").map(String::from),
            announce_list,
            creation_date: value
                .dict_get_int(b"creation date")
                .and_then(|n| i64::try_from(n).ok()),
            comment: value.dict_get_str(b"comment").map(String::from),
            created_by: value.dict_get_str(b"created by").map(String::from),
            encoding: value.dict_get_str(b"encoding").map(String::from),
            info,
            info_hash,
        })
    }

    /// Get the info hash as a hex string
    pub fn info_hash_hex(&self) -> Option<String> {
        self.info_hash.map(hex::encode)
    }
}

fn dict_get_u64(dict: &IndexMap<Bytes, Value>, key: &[u8]) -> Option<u64> {
    dict.get(key)
        .and_then(|v| v.as_integer())
        .and_then(|n| u64::try_from(n).ok())
}

fn checksum_from(dict: &IndexMap<Bytes, Value>) -> Option<Checksum> {
    let mut checksum = None;
    if let Some(v) = dict.get(b"md5sum".as_ref()).and_then(|v| v.as_bytes()) {
        checksum = Some(Checksum::Md5(Bytes::copy_from_slice(v)));
    }
    if let Some(v) = dict.get(b"md5".as_ref()).and_then(|v| v.as_bytes()) {
        checksum = Some(Checksum::Md5(Bytes::copy_from_slice(v)));
    }
    if let Some(v) = dict.get(b"sha1".as_ref()).and_then(|v| v.as_bytes()) {
        checksum = Some(Checksum::Sha1(Bytes::copy_from_slice(v)));
    }
    checksum
}

/// SHA1 over the exact bencoded bytes of the top-level `info` value.
fn compute_info_hash(raw_data: &[u8]) -> Result<[u8; 20]> {
    let span = info_value_span(raw_data)?;

    let mut hasher = Sha1::new();
    hasher.update(&raw_data[span]);
    let hash = hasher.finalize();

    let mut result = [0u8; 20];
    result.copy_from_slice(&hash);
    Ok(result)
}

/// Locate the byte range of the `info` value by walking the top-level
/// dictionary with the decoders' consumed-length contract. No re-encoding,
/// so the hash covers the file's bytes verbatim.
fn info_value_span(data: &[u8]) -> Result<std::ops::Range<usize>> {
    if data.first() != Some(&b'd') {
        return Err(TorrentError::InvalidTorrent(
            "torrent must be a dictionary".to_string(),
        ));
    }

    let mut cursor = 1;
    while let Some(&byte) = data.get(cursor) {
        if byte == b'e' {
            break;
        }

        let (key, used) = bencode::decode_byte_string(&data[cursor..])?;
        cursor += used;

        let (_, used) = bencode::decode_item(&data[cursor..])?;
        if key.as_ref() == b"info" {
            return Ok(cursor..cursor + used);
        }
        cursor += used;
    }

    Err(TorrentError::InvalidTorrent(
        "missing info dictionary".to_string(),
    ))
}
