//! Example: Build a fingerprint database from audio files
//!
//! Usage: `cargo run --example build_database -- db.json "Artist - Title.mp3" ...`
//!
//! File stems of the form "Artist - Title" are split into metadata; other
//! stems become the title with an unknown artist.

use std::path::Path;
use stratum_fingerprint::io::decode_file;
use stratum_fingerprint::{FingerprintConfig, Recognizer};

fn split_stem(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.split_once(" - ") {
        Some((artist, title)) => (title.trim().to_string(), artist.trim().to_string()),
        None => (stem, "Unknown".to_string()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let db_path = args.next().ok_or("usage: build_database <db.json> <audio files...>")?;
    let audio_files: Vec<String> = args.collect();

    let recognizer = Recognizer::new(FingerprintConfig::default())?;

    println!("Processing {} files...", audio_files.len());
    for (i, file) in audio_files.iter().enumerate() {
        let path = Path::new(file);
        println!("[{}/{}] Processing: {}", i + 1, audio_files.len(), path.display());

        let audio = match decode_file(path) {
            Ok(audio) => audio,
            Err(e) => {
                eprintln!("  Error: {}", e);
                continue;
            }
        };

        let (title, artist) = split_stem(path);
        match recognizer.add_song(&title, &artist, &audio.samples, audio.sample_rate) {
            Ok(id) => println!("  Stored as #{}: {} by {}", id, title, artist),
            Err(e) => eprintln!("  Error: {}", e),
        }
    }

    recognizer.save(&db_path)?;
    println!();
    print!("{}", recognizer.catalog());
    println!("Database written to {}", db_path);

    Ok(())
}
