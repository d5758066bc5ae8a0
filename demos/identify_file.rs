//! Example: Identify an audio clip against a saved database
//!
//! Usage: `cargo run --example identify_file -- db.json clip.wav [--aligned]`

use stratum_fingerprint::io::decode_file;
use stratum_fingerprint::{MatchStrategy, Recognizer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        return Err("usage: identify_file <db.json> <clip> [--aligned]".into());
    }
    let strategy = if args.iter().any(|a| a == "--aligned") {
        MatchStrategy::Aligned
    } else {
        MatchStrategy::Votes
    };

    let recognizer = Recognizer::load(&args[0])?;
    let clip = decode_file(&args[1])?;

    let result = recognizer.identify_with(&clip.samples, clip.sample_rate, strategy)?;

    println!("Recognition Results:");
    println!("  Clip: {:.2} s at {} Hz", clip.duration_seconds(), clip.sample_rate);
    println!(
        "  Peaks: {}, fingerprints: {}",
        result.metadata.num_peaks, result.metadata.num_fingerprints
    );
    println!("  Processing time: {:.2} ms", result.metadata.processing_time_ms);

    match result.best() {
        Some(best) => {
            println!("  The song that matches this is {}.", best.label());
            if let Some(offset) = best.offset_seconds {
                println!("  Clip starts about {:.1} s into the song", offset);
            }
            for m in result.matches.iter().take(5) {
                println!("    {:>6}  {}", m.score, m.label());
            }
        }
        None => println!("  This clip does not match any song in the database."),
    }

    Ok(())
}
