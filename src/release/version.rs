use std::cmp::Ordering;

/// Compare two dotted-numeric versions segment by segment.
///
/// A leading `v` is ignored, each segment is compared by its leading decimal
/// digits (a segment without digits counts as 0) and the shorter version is
/// padded with zeros, so `1.0` and `1.0.0` are equal and `1.9 < 1.10`.
/// Segments of any length compare numerically.
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let left = segments(left);
    let right = segments(right);
    let len = left.len().max(right.len());

    (0..len)
        .map(|i| {
            let a = left.get(i).copied().unwrap_or_default();
            let b = right.get(i).copied().unwrap_or_default();
            compare_digits(a, b)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// True when `candidate` is a non-empty version strictly greater than `installed`.
pub fn is_newer(candidate: &str, installed: &str) -> bool {
    !candidate.trim().is_empty() && compare_versions(candidate, installed) == Ordering::Greater
}

/// Leading digits of each segment with leading zeros removed; `""` is zero
fn segments(version: &str) -> Vec<&str> {
    let version = version.trim();
    let version = version.strip_prefix(['v', 'V']).unwrap_or(version);

    version
        .split('.')
        .map(|segment| {
            let end = segment
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(segment.len());
            segment[..end].trim_start_matches('0')
        })
        .collect()
}

/// Without leading zeros, a longer digit run is the larger number
fn compare_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
