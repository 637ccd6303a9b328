use std::{
    io::{self, BufRead, Write},
    time::Duration,
};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    random_string(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Opaque value echoed back by the authorization callback.
pub fn generate_state() -> String {
    random_string(16)
}

fn random_string(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Ratcliff/Obershelp similarity of two strings, ignoring case.
///
/// Returns `2 * M / T` where `T` is the total number of characters in both
/// strings and `M` the number of characters in the matching blocks. The
/// matching blocks are found by taking the longest common substring and
/// recursing into the pieces left and right of it. Two empty strings are
/// considered identical.
///
/// The pair is put into a canonical order first, which keeps the result
/// symmetric even where the block search would pick different blocks for
/// `(a, b)` and `(b, a)`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let (a, b) = if a <= b { (a, b) } else { (b, a) };

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }

        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

// Longest common block of a[alo..ahi] and b[blo..bhi]. Ties go to the block
// starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);
    let width = bhi - blo + 1;
    let mut prev = vec![0usize; width];

    for i in alo..ahi {
        let mut curr = vec![0usize; width];
        for j in blo..bhi {
            if a[i] == b[j] {
                let k = prev[j - blo] + 1;
                curr[j - blo + 1] = k;
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            }
        }
        prev = curr;
    }

    best
}

/// Value parser for `--threshold`.
pub fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid value '{}': expected a number", s.trim()))?;

    if !(0.0..=1.0).contains(&value) {
        return Err(format!(
            "invalid value '{}': threshold must be between 0 and 1",
            s.trim()
        ));
    }
    Ok(value)
}

pub fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Prints `label` and reads one trimmed line from stdin.
pub fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
