use std::path::PathBuf;

use anyhow::{Context, Result};
use shodo_karte::config::DEFAULT_DATA_FILE;
use shodo_karte::data::model::{Record, RecordSet};
use shodo_karte::data::store::TableStore;

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    /// `None` roughly one time in `one_in`.
    fn sometimes_null(&mut self, one_in: usize, value: &str) -> Option<String> {
        (self.below(one_in) != 0).then(|| value.to_string())
    }
}

const FAMILY_NAMES: &[&str] = &["山田", "佐藤", "鈴木", "田中", "高橋", "伊藤", "渡辺", "中村"];
const AGE_BRACKETS: &[&str] = &["10代", "20代", "30代", "40代", "50代", "60代以上"];
const REASONS: &[&str] = &["健康", "趣味", "字をきれいに", "子どもの付き添い", "資格取得"];
const GOALS: &[&str] = &["楷書を整える", "行書を書けるようになる", "年賀状を手書き", "段位取得"];
const CONCERNS: &[&str] = &["筆圧", "姿勢", "バランス", "止め", "はね", "はらい", "墨の量"];
const CONCERN_JOINERS: &[&str] = &["、", ",", " "];
const NOTES: &[&str] = &[
    "穂先の向きを意識",
    "半紙の中心をとる練習",
    "ゆっくり書くこと",
    "手本をよく観察する",
];
const TOOLS: &[&str] = &["筆", "筆ペン", "硬筆"];

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    let mut rng = SimpleRng::new(42);
    let mut records = Vec::new();

    for (i, family) in FAMILY_NAMES.iter().enumerate() {
        let n_concerns = 1 + rng.below(3);
        let joiner = rng.pick(CONCERN_JOINERS);
        let concerns: Vec<&str> = (0..n_concerns).map(|_| rng.pick(CONCERNS)).collect();
        let note = rng.pick(NOTES);

        records.push(Record {
            name: Some(format!("{family}{}", i + 1)),
            age_bracket: Some(rng.pick(AGE_BRACKETS).to_string()),
            reason_started: Some(rng.pick(REASONS).to_string()),
            goal: Some(rng.pick(GOALS).to_string()),
            concerns: rng.sometimes_null(6, &concerns.join(joiner)),
            coaching_notes: rng.sometimes_null(3, note),
            tool: Some(rng.pick(TOOLS).to_string()),
        });
    }

    let set = RecordSet::from_records(records);
    TableStore::new(&output_path)
        .persist(&set)
        .with_context(|| format!("writing {}", output_path.display()))?;

    println!("Wrote {} students to {}", set.len(), output_path.display());
    Ok(())
}
