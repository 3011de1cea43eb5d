//! Answer-class pools and multi-picks for deck generation.

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use tracing::warn;

use crate::card::Title;
use crate::error::{TarotError, TarotResult};

/// Build the list of titles for `count` cards.
///
/// When the distribution's counts add up to at least `count`, each title is
/// repeated by its count, the pool is shuffled and cut to `count`, so the
/// deck follows the distribution exactly. Otherwise each card gets a title
/// drawn independently, using the counts as weights.
pub fn build_title_pool(
    distribution: &[(Title, u32)],
    count: usize,
    rng: &mut StdRng,
) -> TarotResult<Vec<Title>> {
    let total: u64 = distribution.iter().map(|(_, n)| u64::from(*n)).sum();

    if total >= count as u64 {
        let mut pool: Vec<Title> = distribution
            .iter()
            .flat_map(|(title, n)| std::iter::repeat_n(*title, *n as usize))
            .collect();
        pool.shuffle(rng);
        pool.truncate(count);
        return Ok(pool);
    }

    warn!(
        total,
        count, "title_distribution covers fewer cards than requested, drawing titles by weight"
    );
    (0..count)
        .map(|_| {
            distribution
                .choose_weighted(rng, |(_, weight)| *weight)
                .map(|(title, _)| *title)
                .map_err(|e| TarotError::InvalidConfig(format!("title_distribution: {e}")))
        })
        .collect()
}

/// Pick `count` entries from `list`.
///
/// Entries are distinct when the list is long enough; shorter lists are
/// sampled with repetition. An empty list yields nothing.
pub fn pick_multiple<T: Clone>(list: &[T], count: usize, rng: &mut StdRng) -> Vec<T> {
    if list.is_empty() {
        return Vec::new();
    }
    if list.len() < count {
        warn!(
            available = list.len(),
            count, "table too short for distinct picks, entries will repeat"
        );
        return (0..count)
            .filter_map(|_| list.choose(rng).cloned())
            .collect();
    }
    list.choose_multiple(rng, count).cloned().collect()
}
