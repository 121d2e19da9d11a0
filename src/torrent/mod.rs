mod metainfo;
mod piece;

pub use metainfo::{Checksum, FileEntry, Metainfo, TorrentInfo};
pub use piece::{PieceHash, Pieces};

use crate::bencode::decode;
use crate::error::Result;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Load and parse a .torrent file
pub async fn load_torrent_file<P: AsRef<Path>>(path: P) -> Result<Metainfo> {
    let data = fs::read(path.as_ref()).await?;
    debug!(
        path = %path.as_ref().display(),
        bytes = data.len(),
        "read torrent file"
    );
    parse_torrent(&data)
}

/// Parse torrent data from bytes
pub fn parse_torrent(data: &[u8]) -> Result<Metainfo> {
    let value = decode(data)?;
    Metainfo::from_bencode(&value, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TorrentError;
    use sha1::{Digest, Sha1};

    fn bstr(s: &str) -> String {
        format!("{}:{}", s.len(), s)
    }

    fn single_file_torrent() -> (String, String) {
        let pieces = "a".repeat(40);
        let info = format!(
            "d{len_k}i1024e{md5_k}{md5_v}{name_k}{name_v}{pl_k}i512e{pieces_k}{pieces_v}{priv_k}i1ee",
            len_k = bstr("length"),
            md5_k = bstr("md5sum"),
            md5_v = bstr("d41d8cd98f00b204e9800998ecf8427e"),
            name_k = bstr("name"),
            name_v = bstr("file.iso"),
            pl_k = bstr("piece length"),
            pieces_k = bstr("pieces"),
            pieces_v = bstr(&pieces),
            priv_k = bstr("private"),
        );
        let data = format!(
            "d{ann_k}{ann_v}{al_k}ll{t1}el{t2}ee{com_k}{com_v}{cd_k}i1411657858e{cb_k}{cb_v}{enc_k}{enc_v}{info_k}{info}e",
            ann_k = bstr("announce"),
            ann_v = bstr("http://tracker.example/announce"),
            al_k = bstr("announce-list"),
            t1 = bstr("http://tracker.example/announce"),
            t2 = bstr("http://backup.example/announce"),
            com_k = bstr("comment"),
            com_v = bstr("a test torrent"),
            cd_k = bstr("creation date"),
            cb_k = bstr("created by"),
            cb_v = bstr("torrentinfo"),
            enc_k = bstr("encoding"),
            enc_v = bstr("UTF-8"),
            info_k = bstr("info"),
            info = info,
        );
        (data, info)
    }

    #[test]
    fn test_parse_single_file_torrent() {
        let (data, _) = single_file_torrent();
        let meta = parse_torrent(data.as_bytes()).unwrap();

        assert_eq!(
            meta.announce.as_deref(),
            Some("http://tracker.example/announce")
        );
        assert_eq!(
            meta.announce_list,
            Some(vec![
                vec!["http://tracker.example/announce".to_string()],
                vec!["http://backup.example/announce".to_string()],
            ])
        );
        assert_eq!(meta.creation_date, Some(1411657858));
        assert_eq!(meta.comment.as_deref(), Some("a test torrent"));
        assert_eq!(meta.created_by.as_deref(), Some("torrentinfo"));
        assert_eq!(meta.encoding.as_deref(), Some("UTF-8"));

        let info = meta.info.unwrap();
        assert_eq!(info.name.as_deref(), Some("file.iso"));
        assert_eq!(info.piece_length, Some(512));
        assert_eq!(info.length, Some(1024));
        assert_eq!(info.private, Some(true));
        assert!(info.is_single_file());
        assert_eq!(info.total_length(), 1024);
        assert_eq!(info.pieces.unwrap().len(), 2);

        let checksum = info.checksum.unwrap();
        assert_eq!(checksum.kind(), "MD5");
        assert_eq!(checksum.value(), b"d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_parse_multi_file_torrent() {
        let file1 = format!(
            "d{}i100e{}l{}{}ee",
            bstr("length"),
            bstr("path"),
            bstr("docs"),
            bstr("a.txt"),
        );
        let file2 = format!(
            "d{}i200e{}{}{}l{}ee",
            bstr("length"),
            bstr("sha1"),
            bstr("0123456789abcdef0123"),
            bstr("path"),
            bstr("b.bin"),
        );
        let info = format!(
            "d{}l{}{}e{}{}{}i16384e{}{}e",
            bstr("files"),
            file1,
            file2,
            bstr("name"),
            bstr("release"),
            bstr("piece length"),
            bstr("pieces"),
            bstr(""),
        );
        let data = format!("d{}{}e", bstr("info"), info);

        let meta = parse_torrent(data.as_bytes()).unwrap();
        assert!(meta.announce.is_none());

        let info = meta.info.unwrap();
        assert_eq!(info.name.as_deref(), Some("release"));
        assert!(!info.is_single_file());
        assert_eq!(info.total_length(), 300);

        assert_eq!(info.files.len(), 2);
        assert_eq!(info.files[0].path, vec!["docs", "a.txt"]);
        assert_eq!(info.files[0].length, Some(100));
        assert!(info.files[0].checksum.is_none());

        assert_eq!(info.files[1].path, vec!["b.bin"]);
        assert_eq!(info.files[1].length, Some(200));
        let checksum = info.files[1].checksum.as_ref().unwrap();
        assert_eq!(checksum.kind(), "SHA1");
    }

    #[test]
    fn test_info_hash_covers_exact_info_bytes() {
        let (data, info) = single_file_torrent();
        let meta = parse_torrent(data.as_bytes()).unwrap();

        let expected = Sha1::digest(info.as_bytes());
        assert_eq!(meta.info_hash.unwrap()[..], expected[..]);
        assert_eq!(meta.info_hash_hex().unwrap(), hex::encode(expected));
    }

    #[test]
    fn test_missing_optional_fields() {
        let meta = parse_torrent(b"de").unwrap();
        assert!(meta.announce.is_none());
        assert!(meta.info.is_none());
        assert!(meta.info_hash.is_none());
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let err = parse_torrent(b"not a torrent").unwrap_err();
        assert!(matches!(err, TorrentError::Bencode(_)));
    }

    #[test]
    fn test_non_dictionary_top_level() {
        let err = parse_torrent(b"i42e").unwrap_err();
        assert!(matches!(err, TorrentError::InvalidTorrent(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let err = load_torrent_file("/no/such/file.torrent")
            .await
            .unwrap_err();
        assert!(matches!(err, TorrentError::Io(_)));
    }
}
