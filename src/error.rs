use crate::bencode::BencodeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TorrentError {
    #[error("bencode decode error: {0}")]
    Bencode(#[from] BencodeError),

    #[error("not a valid torrent file: {0}")]
    InvalidTorrent(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TorrentError>;
