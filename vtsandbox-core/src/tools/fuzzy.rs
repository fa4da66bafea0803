use similar::TextDiff;

/// Case-insensitive partial similarity on a 0-100 scale.
///
/// The shorter string is compared against every window of the same length in
/// the longer one and the best character-level ratio wins.
pub fn partial_ratio(left: &str, right: &str) -> u8 {
    let left = left.to_lowercase();
    let right = right.to_lowercase();

    let (short, long) = if left.chars().count() <= right.chars().count() {
        (left.as_str(), right.as_str())
    } else {
        (right.as_str(), left.as_str())
    };

    let short_len = short.chars().count();
    if short_len == 0 {
        return 0;
    }

    // Byte offsets of every char boundary so windows slice cleanly
    let boundaries: Vec<usize> = long
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(long.len()))
        .collect();
    let long_len = boundaries.len() - 1;

    let mut best = 0.0_f32;
    for start in 0..=(long_len - short_len) {
        let window = &long[boundaries[start]..boundaries[start + short_len]];
        let ratio = TextDiff::from_chars(short, window).ratio();
        if ratio > best {
            best = ratio;
            if best >= 1.0 {
                break;
            }
        }
    }

    (best * 100.0).round() as u8
}
