//! Example: Measure recognition accuracy on random sub-clips of a song
//!
//! Usage: `cargo run --example evaluate_clips -- db.json song.mp3 <song id> [clips] [seconds]`

use rand::rngs::StdRng;
use rand::SeedableRng;
use stratum_fingerprint::analysis::evaluation::{evaluate, random_clips};
use stratum_fingerprint::io::decode_file;
use stratum_fingerprint::{MatchStrategy, Recognizer, SongId};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        return Err("usage: evaluate_clips <db.json> <song> <song id> [clips] [seconds]".into());
    }
    let expected = SongId(args[2].parse()?);
    let n: usize = args.get(3).map(|s| s.parse()).transpose()?.unwrap_or(20);
    let seconds: f32 = args.get(4).map(|s| s.parse()).transpose()?.unwrap_or(5.0);

    let recognizer = Recognizer::load(&args[0])?;
    let song = decode_file(&args[1])?;

    let mut rng = StdRng::seed_from_u64(0);
    let clips = random_clips(&song.samples, song.sample_rate, n, seconds, &mut rng)?;

    for strategy in [MatchStrategy::Votes, MatchStrategy::Aligned] {
        let report = evaluate(&recognizer, expected, &clips, song.sample_rate, strategy)?;
        println!(
            "{:?}: {}/{} correct ({:.1}%), {} without match",
            strategy,
            report.hits,
            report.clips,
            report.accuracy() * 100.0,
            report.no_match
        );
    }

    Ok(())
}
