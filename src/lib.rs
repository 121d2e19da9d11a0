pub mod bencode;
pub mod cli;
pub mod error;
pub mod torrent;
