//! Stable move-to-index for ordered collections.
//!
//! All three reorder axes (topics, subtopics, questions) go through
//! [`move_item`]. It never touches its input: callers build the new sequence
//! and swap it in, so the previous order stays intact until the swap.

/// True when `from -> to` is an actual move inside a sequence of `len` items.
pub fn is_valid_move(len: usize, from: usize, to: usize) -> bool {
    from < len && to < len && from != to
}

/// Removes the element at `from` and reinserts it at `to`.
///
/// Every other element keeps its relative order. Out-of-range indices return
/// an unchanged copy.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut result = items.to_vec();
    if from >= result.len() || to >= result.len() {
        return result;
    }
    let moved = result.remove(from);
    result.insert(to, moved);
    result
}
