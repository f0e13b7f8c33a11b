use crate::models::Asn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Rank given to vantage points without an externally supplied AS rank. Sorts after every real
/// rank.
pub const DEFAULT_AS_RANK: u32 = 500_000;

/// Aggregated announcement statistic of one vantage point over a set of route dumps.
///
/// `no_path_poisoning_prefix_id_set` is always a subset of `prefix_id_set`: both are only ever
/// extended through [VantagePointStat::add_announcement] and [VantagePointStat::merge].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VantagePointStat {
    pub asn: Asn,
    pub as_rank: u32,
    /// distinct prefix IDs announced by this vantage point
    pub prefix_id_set: BTreeSet<u64>,
    /// prefix IDs with at least one announcement carrying no path poisoning indicator
    pub no_path_poisoning_prefix_id_set: BTreeSet<u64>,
    /// number of announcements counted, not deduplicated by prefix
    pub ann_count: u64,
}

impl VantagePointStat {
    pub fn new(asn: impl Into<Asn>, as_rank: u32) -> Self {
        VantagePointStat {
            asn: asn.into(),
            as_rank,
            prefix_id_set: BTreeSet::new(),
            no_path_poisoning_prefix_id_set: BTreeSet::new(),
            ann_count: 0,
        }
    }

    /// Record one announcement of `prefix_id`.
    ///
    /// Poisoning is judged per announcement: a prefix announced once cleanly lands in
    /// `no_path_poisoning_prefix_id_set` no matter how many poisoned announcements it also has.
    pub fn add_announcement(&mut self, prefix_id: u64, is_path_poisoning: bool) {
        self.prefix_id_set.insert(prefix_id);
        self.ann_count += 1;
        if !is_path_poisoning {
            self.no_path_poisoning_prefix_id_set.insert(prefix_id);
        }
    }

    /// Fold a partial statistic of the same vantage point into this one.
    ///
    /// Sets are unioned and counts summed, so merging is associative and commutative. The rank of
    /// `self` is kept.
    pub fn merge(&mut self, other: VantagePointStat) {
        debug_assert_eq!(self.asn, other.asn, "merging stats of different vantage points");
        self.ann_count += other.ann_count;
        if self.prefix_id_set.len() < other.prefix_id_set.len() {
            let mine = std::mem::replace(&mut self.prefix_id_set, other.prefix_id_set);
            self.prefix_id_set.extend(mine);
        } else {
            self.prefix_id_set.extend(other.prefix_id_set);
        }
        self.no_path_poisoning_prefix_id_set
            .extend(other.no_path_poisoning_prefix_id_set);
    }

    pub fn prefix_count(&self) -> usize {
        self.prefix_id_set.len()
    }

    pub fn no_path_poisoning_prefix_count(&self) -> usize {
        self.no_path_poisoning_prefix_id_set.len()
    }

    /// Ranking order used for reporting.
    ///
    /// Lower `as_rank` first; on equal rank, more announcements first; finally lower ASN first.
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        self.as_rank
            .cmp(&other.as_rank)
            .then_with(|| other.ann_count.cmp(&self.ann_count))
            .then_with(|| self.asn.cmp(&other.asn))
    }

    /// Strict "sorts before" form of [VantagePointStat::cmp_rank].
    pub fn is_ranked_before(&self, other: &Self) -> bool {
        self.cmp_rank(other) == Ordering::Less
    }
}

/// Sort stats into reporting order, best ranked first.
pub fn sort_by_rank(stats: &mut [VantagePointStat]) {
    stats.sort_by(VantagePointStat::cmp_rank);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(asn: u32, as_rank: u32, ann_count: u64) -> VantagePointStat {
        let mut stat = VantagePointStat::new(asn, as_rank);
        stat.ann_count = ann_count;
        stat
    }

    #[test]
    fn test_add_announcement() {
        let mut stat = VantagePointStat::new(100, DEFAULT_AS_RANK);
        stat.add_announcement(10, false);
        stat.add_announcement(10, true);
        stat.add_announcement(11, true);
        stat.add_announcement(11, true);

        assert_eq!(stat.ann_count, 4);
        assert_eq!(stat.prefix_id_set, BTreeSet::from([10, 11]));
        assert_eq!(stat.no_path_poisoning_prefix_id_set, BTreeSet::from([10]));
    }

    #[test]
    fn test_clean_after_poisoned() {
        let mut stat = VantagePointStat::new(100, 1);
        stat.add_announcement(42, true);
        assert!(stat.no_path_poisoning_prefix_id_set.is_empty());
        stat.add_announcement(42, false);
        assert_eq!(stat.no_path_poisoning_prefix_id_set, BTreeSet::from([42]));
        assert_eq!(stat.prefix_count(), 1);
        assert_eq!(stat.no_path_poisoning_prefix_count(), 1);
    }

    #[test]
    fn test_merge() {
        let mut a = VantagePointStat::new(100, 3);
        a.add_announcement(1, false);
        a.add_announcement(2, true);

        let mut b = VantagePointStat::new(100, 3);
        b.add_announcement(2, false);
        b.add_announcement(3, true);
        b.add_announcement(4, true);

        let mut ab = a.clone();
        ab.merge(b.clone());
        let mut ba = b.clone();
        ba.merge(a.clone());

        assert_eq!(ab, ba);
        assert_eq!(ab.ann_count, 5);
        assert_eq!(ab.prefix_id_set, BTreeSet::from([1, 2, 3, 4]));
        assert_eq!(ab.no_path_poisoning_prefix_id_set, BTreeSet::from([1, 2]));
        assert!(ab
            .no_path_poisoning_prefix_id_set
            .is_subset(&ab.prefix_id_set));
    }

    #[test]
    fn test_merge_empty_identity() {
        let mut a = VantagePointStat::new(7, DEFAULT_AS_RANK);
        a.add_announcement(9, false);
        let expected = a.clone();
        a.merge(VantagePointStat::new(7, DEFAULT_AS_RANK));
        assert_eq!(a, expected);
    }

    #[test]
    fn test_rank_order() {
        let rank1_count100 = stat(300, 1, 100);
        let rank1_count50 = stat(200, 1, 50);
        let rank2_count999 = stat(100, 2, 999);

        assert!(rank1_count100.is_ranked_before(&rank1_count50));
        assert!(!rank1_count50.is_ranked_before(&rank1_count100));
        assert!(rank1_count50.is_ranked_before(&rank2_count999));
        assert!(rank1_count100.is_ranked_before(&rank2_count999));

        let mut stats = vec![
            rank2_count999.clone(),
            rank1_count50.clone(),
            rank1_count100.clone(),
        ];
        sort_by_rank(&mut stats);
        assert_eq!(
            stats.iter().map(|s| s.asn.to_u32()).collect::<Vec<_>>(),
            vec![300, 200, 100]
        );
    }

    #[test]
    fn test_rank_tie_break_on_asn() {
        let low = stat(10, 5, 20);
        let high = stat(11, 5, 20);
        assert!(low.is_ranked_before(&high));
        assert!(!high.is_ranked_before(&low));
        // irreflexive
        assert!(!low.is_ranked_before(&low));
        assert_eq!(low.cmp_rank(&low), Ordering::Equal);
    }

    #[test]
    fn test_unranked_sorts_last() {
        let ranked = stat(1, 40_000, 0);
        let unranked = stat(2, DEFAULT_AS_RANK, 1_000_000);
        assert!(ranked.is_ranked_before(&unranked));
    }
}
