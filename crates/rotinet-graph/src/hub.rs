use std::collections::HashMap;

/// Most frequent value; ties go to the value encountered first.
pub fn select_hub<'a, I>(targets: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    // value -> (count, first index)
    let mut counts: HashMap<&'a str, (usize, usize)> = HashMap::new();
    for (idx, target) in targets.into_iter().enumerate() {
        counts.entry(target).or_insert((0, idx)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (ca, fa)), (_, (cb, fb))| ca.cmp(cb).then(fb.cmp(fa)))
        .map(|(value, _)| value)
}
