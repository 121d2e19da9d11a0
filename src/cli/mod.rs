use crate::error::{Result, TorrentError};
use crate::torrent::{Metainfo, TorrentInfo};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "torrentinfo")]
#[command(about = "Read the contents of a .torrent file", long_about = None)]
pub struct Cli {
    /// Paths to the torrent files
    #[arg(required = true, value_name = "path")]
    torrents: Vec<PathBuf>,

    /// Show additional information about the torrent file
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub async fn run(&self) -> Result<()> {
        for path in &self.torrents {
            match crate::torrent::load_torrent_file(path).await {
                Ok(metainfo) => print_metainfo(&metainfo, self.verbose),
                // A missing file and a malformed file are different failures;
                // report both and keep going with the remaining paths.
                Err(TorrentError::Io(err)) => {
                    eprintln!("{}: cannot read file: {}", path.display(), err)
                }
                Err(err) => eprintln!("{}: {}", path.display(), err),
            }
        }

        Ok(())
    }
}

fn print_metainfo(metainfo: &Metainfo, verbose: bool) {
    println!("Tracker URL: {}", display_opt(&metainfo.announce));

    if let Some(announce_list) = &metainfo.announce_list {
        println!("Tracker List:");
        for (tier, trackers) in announce_list.iter().enumerate() {
            println!("  Tier {}:", tier + 1);
            for tracker in trackers {
                println!("    - {}", tracker);
            }
        }
    }

    match metainfo.creation_date {
        Some(unix_time) => println!("Creation Date: {} (unix)", unix_time),
        None => println!("Creation Date: -"),
    }
    println!("Created By: {}", display_opt(&metainfo.created_by));
    println!("Comment: {}", display_opt(&metainfo.comment));

    if verbose {
        println!("Encoding: {}", display_opt(&metainfo.encoding));
        if let Some(hash) = metainfo.info_hash_hex() {
            println!("Info Hash: {}", hash);
        }
    }

    match &metainfo.info {
        Some(info) => print_info(info, verbose),
        None => println!("No info dictionary present."),
    }
}

fn print_info(info: &TorrentInfo, verbose: bool) {
    println!(
        "No External Peer Source: {}",
        info.private.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string())
    );

    if verbose {
        if let Some(piece_length) = info.piece_length {
            println!("Size per Piece: {} bytes", piece_length);
        }
        if let Some(pieces) = &info.pieces {
            println!("Pieces: {}", pieces.len());
            for hash in pieces.iter() {
                println!("  {}", hash.to_hex());
            }
        }
    }

    if info.is_single_file() {
        println!("File Path: {}", display_opt(&info.name));
        println!("File Size: {} bytes", info.total_length());
        if let Some(checksum) = &info.checksum {
            println!("File Checksum ({}): {}", checksum.kind(), checksum.to_hex());
        }
    } else {
        println!("Directory: {}", display_opt(&info.name));
        println!("Total Size: {} bytes", info.total_length());
        for file in &info.files {
            println!("File Path: {}", file.path.join("/"));
            println!("File Size: {} bytes", file.length.unwrap_or(0));
            if let Some(checksum) = &file.checksum {
                println!("File Checksum ({}): {}", checksum.kind(), checksum.to_hex());
            }
        }
    }
}

fn display_opt(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("-")
}
