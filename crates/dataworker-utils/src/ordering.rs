use std::cmp::Ordering;
use std::fmt::Debug;

/// Compares two keys that are expected to be totally ordered with no ties.
///
/// Several of the Dataworker's sorting comparators (the slow-relay leaf
/// order on `(originChainId, depositId)`, the relayer-refund leaf order on
/// `(chainId, l2TokenAddress, groupIndex)`) rely on their key tuples being
/// unique across the input they're sorting. A tie there means two supposedly
/// distinct leaves collapsed onto the same key, which is a data invariant
/// violation upstream, not a recoverable sort ambiguity, so this panics
/// instead of returning `Ordering::Equal`.
pub fn strict_compare<K: Ord + Debug>(a: &K, b: &K) -> Ordering {
    match a.cmp(b) {
        Ordering::Equal => panic!("unexpected tie between supposedly-unique keys: {a:?} == {b:?}"),
        ord => ord
    }
}
