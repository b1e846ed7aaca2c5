use std::collections::HashMap;
use std::hash::Hash;

/// Most frequent value and how often it occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode<T> {
    pub value: T,
    pub count: usize,
}

impl<T> Mode<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Mode<U> {
        Mode {
            value: f(self.value),
            count: self.count,
        }
    }
}

/// Most frequent value in `values`, or `None` when empty.
///
/// Ties go to the value encountered first, so the result depends only on
/// input order, never on hashing.
pub fn mode<T, I>(values: I) -> Option<Mode<T>>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    // value → (count, first position)
    let mut tally: HashMap<T, (usize, usize)> = HashMap::new();
    for (pos, v) in values.into_iter().enumerate() {
        tally.entry(v).or_insert((0, pos)).0 += 1;
    }

    tally
        .into_iter()
        .max_by(|(_, (ca, pa)), (_, (cb, pb))| ca.cmp(cb).then(pb.cmp(pa)))
        .map(|(value, (count, _))| Mode { value, count })
}
