/// Lazy iterator over every `r`-combination of `0..n` in lexicographic order.
///
/// Yields nothing when `r == 0` or `r > n`.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, r: usize) -> Self {
        Self {
            n,
            indices: (0..r).collect(),
            started: false,
            done: r == 0 || r > n,
        }
    }

    /// Advance `indices` to the next combination in place.
    fn advance(&mut self) -> bool {
        let r = self.indices.len();
        // Rightmost position that can still move right
        let Some(pos) = (0..r).rev().find(|&i| self.indices[i] < self.n - r + i) else {
            return false;
        };
        self.indices[pos] += 1;
        for i in pos + 1..r {
            self.indices[i] = self.indices[i - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.started {
            if !self.advance() {
                self.done = true;
                return None;
            }
        } else {
            self.started = true;
        }
        Some(self.indices.clone())
    }
}

/// C(n, r), or `None` if it does not fit in a `u64`.
pub fn combination_count(n: usize, r: usize) -> Option<u64> {
    if r > n {
        return Some(0);
    }
    let r = r.min(n - r) as u128;
    let n = n as u128;
    let mut count: u128 = 1;
    for i in 0..r {
        // Exact at every step: count * (n - i) is divisible by i + 1
        count = count.checked_mul(n - i)? / (i + 1);
    }
    u64::try_from(count).ok()
}
