use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Write a synthetic candidates CSV for trying out the dashboard.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Cli {
    /// Number of candidates to generate.
    #[arg(default_value_t = 40)]
    rows: usize,

    /// Seed of the generator; the same seed gives the same file.
    #[arg(default_value_t = 42)]
    seed: u64,

    /// Output file.
    #[arg(short, long, default_value = "sample_candidates.csv")]
    output: PathBuf,
}

const PARTIES: [&str; 9] = ["Ap", "H", "FrP", "SV", "Sp", "KrF", "V", "MDG", "R"];
const FIRST_NAMES: [&str; 12] = [
    "Kari", "Ola", "Ingrid", "Jonas", "Marte", "Erik", "Sofie", "Nora", "Henrik", "Lars", "Ida",
    "Magnus",
];
const LAST_NAMES: [&str; 10] = [
    "Nordmann", "Vik", "Berg", "Lunde", "Dahl", "Haugen", "Bakke", "Strand", "Moe", "Lie",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Uniform in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// One synthetic row: views spread over three orders of magnitude, each
/// count a plausible fraction of views.
fn candidate_row(rng: &mut SimpleRng) -> [String; 7] {
    let name = format!("{} {}", rng.pick(&FIRST_NAMES), rng.pick(&LAST_NAMES));
    let party = rng.pick(&PARTIES).to_string();

    let views = 10f64.powf(rng.uniform(4.0, 7.0)).round();
    let likes = (views * rng.uniform(0.02, 0.12)).round();
    let comments = (likes * rng.uniform(0.02, 0.10)).round();
    let shares = (likes * rng.uniform(0.01, 0.05)).round();
    let sum = views + likes + comments + shares;

    let [likes, comments, shares, views, sum] =
        [likes, comments, shares, views, sum].map(|v| v.to_string());
    [name, party, likes, comments, shares, views, sum]
}

/// Kept equal to `schema::REQUIRED` followed by `schema::SUM` in the main
/// binary; the dashboard rejects files that lack a required column.
const HEADER: [&str; 7] = [
    "Kandidat",
    "Parti",
    "Likerklikk",
    "Kommentarer",
    "Delinger",
    "Visninger",
    "SUM",
];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = SimpleRng::new(cli.seed);

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    writer.write_record(HEADER)?;
    for _ in 0..cli.rows {
        writer.write_record(candidate_row(&mut rng))?;
    }
    writer.flush()?;

    println!("Wrote {} candidates to {}", cli.rows, cli.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str) -> usize {
        HEADER.iter().position(|h| *h == name).unwrap()
    }

    #[test]
    fn rows_line_up_with_the_header() {
        let mut rng = SimpleRng::new(7);
        let row = candidate_row(&mut rng);
        assert_eq!(row.len(), HEADER.len());

        let value = |name: &str| row[column(name)].parse::<f64>().unwrap();
        let counts = value("Likerklikk") + value("Kommentarer") + value("Delinger");
        assert_eq!(value("SUM"), value("Visninger") + counts);
    }

    #[test]
    fn same_seed_gives_same_rows() {
        let mut a = SimpleRng::new(42);
        let mut b = SimpleRng::new(42);
        assert_eq!(candidate_row(&mut a), candidate_row(&mut b));
    }
}
