//! Grouping of file names into numbered collections.
//!
//! Every run of digits in a name is a candidate frame field. Names sharing the
//! text before (`head`) and after (`tail`) a run, with a compatible padding,
//! form a candidate collection. Candidates are claimed greedily, largest
//! first, so each name lands in at most one collection.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::core::FrameRange;

/// Smallest number of members that makes a collection.
pub const MIN_COLLECTION_ITEMS: usize = 2;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("static regex"));

/// Numbered collection of items sharing `head` and `tail`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collection {
    pub head: String,
    pub tail: String,
    /// Fixed index width, `0` when indexes are unpadded.
    pub padding: usize,
    members: Vec<(i64, String)>,
}

impl Collection {
    /// Items ordered by index.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(_, item)| item.as_str())
    }

    /// Indexes in ascending order.
    pub fn indexes(&self) -> impl Iterator<Item = i64> + '_ {
        self.members.iter().map(|(index, _)| *index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// `(min index, max index)`.
    pub fn range(&self) -> Option<FrameRange> {
        let first = self.members.first()?.0;
        let last = self.members.last()?.0;
        Some(FrameRange { first, last })
    }

    /// Indexes absent between the first and last member.
    pub fn holes(&self) -> Vec<i64> {
        self.members
            .windows(2)
            .flat_map(|pair| (pair[0].0 + 1)..pair[1].0)
            .collect()
    }

    pub fn is_contiguous(&self) -> bool {
        self.members.windows(2).all(|pair| pair[1].0 == pair[0].0 + 1)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.padding == 0 {
            "%d".to_string()
        } else {
            format!("%0{}d", self.padding)
        };
        write!(f, "{}{}{}", self.head, token, self.tail)?;
        if let Some(range) = self.range() {
            write!(f, " [{range}]")?;
        }
        Ok(())
    }
}

/// Result of [`assemble`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assembly {
    /// Largest collection first; equal sizes ordered by `(head, tail)`.
    pub collections: Vec<Collection>,
    /// Items outside every collection, in input order.
    pub remainders: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct CandidateKey {
    head: String,
    tail: String,
    padding: usize,
}

/// Group `items` into collections and remainders.
pub fn assemble<I, S>(items: I) -> Assembly
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let items: Vec<String> = items.into_iter().map(Into::into).collect();

    let mut candidates: BTreeMap<CandidateKey, Vec<(usize, i64)>> = BTreeMap::new();
    for (pos, item) in items.iter().enumerate() {
        for run in DIGITS.find_iter(item) {
            let digits = run.as_str();
            let Ok(index) = digits.parse::<i64>() else {
                continue;
            };
            let head = &item[..run.start()];
            let tail = &item[run.end()..];
            let padded = digits.len() > 1 && digits.starts_with('0');

            let key = CandidateKey {
                head: head.to_string(),
                tail: tail.to_string(),
                padding: digits.len(),
            };
            if !padded {
                // "1001" fits both a 4-wide field and a variable-width one.
                candidates
                    .entry(CandidateKey {
                        padding: 0,
                        ..key.clone()
                    })
                    .or_default()
                    .push((pos, index));
            }
            candidates.entry(key).or_default().push((pos, index));
        }
    }

    let mut assigned = vec![false; items.len()];
    let mut collections = Vec::new();
    loop {
        let best = candidates
            .iter()
            .filter_map(|(key, members)| {
                let live: Vec<(usize, i64)> = members
                    .iter()
                    .filter(|(pos, _)| !assigned[*pos])
                    .copied()
                    .collect();
                (live.len() >= MIN_COLLECTION_ITEMS).then_some((key, live))
            })
            .max_by(|a, b| compare_candidates(a.0, a.1.len(), b.0, b.1.len()));

        let Some((key, mut live)) = best else {
            break;
        };
        live.sort_by_key(|(_, index)| *index);
        for (pos, _) in &live {
            assigned[*pos] = true;
        }
        collections.push(Collection {
            head: key.head.clone(),
            tail: key.tail.clone(),
            padding: key.padding,
            members: live
                .into_iter()
                .map(|(pos, index)| (index, items[pos].clone()))
                .collect(),
        });
    }

    collections.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then_with(|| (&a.head, &a.tail).cmp(&(&b.head, &b.tail)))
    });

    let remainders = items
        .into_iter()
        .zip(assigned)
        .filter_map(|(item, taken)| (!taken).then_some(item))
        .collect();

    Assembly {
        collections,
        remainders,
    }
}

/// Ordering for candidate selection; the greatest candidate wins.
///
/// More members first, then fixed padding over variable width, then the
/// lexicographically smallest `(head, tail)`, then the narrowest padding.
fn compare_candidates(a: &CandidateKey, a_len: usize, b: &CandidateKey, b_len: usize) -> Ordering {
    a_len
        .cmp(&b_len)
        .then_with(|| (a.padding != 0).cmp(&(b.padding != 0)))
        .then_with(|| (&b.head, &b.tail).cmp(&(&a.head, &a.tail)))
        .then_with(|| b.padding.cmp(&a.padding))
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/assemble.rs"]
mod tests;
