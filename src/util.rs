use std::borrow::Cow;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Deterministic pseudo-random pair in [-1, 1], derived from an id. Used to
/// jitter initial node placement so reloading a graph yields the same layout.
pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

pub fn ellipsize(text: &str, max_chars: usize) -> Cow<'_, str> {
    if text.chars().count() <= max_chars {
        return Cow::Borrowed(text);
    }

    let truncated = text
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    Cow::Owned(format!("{}…", truncated.trim_end()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let (x1, y1) = stable_pair("Justice Verma");
        let (x2, y2) = stable_pair("Justice Verma");
        assert_eq!((x1, y1), (x2, y2));
        assert!((-1.0..=1.0).contains(&x1));
        assert!((-1.0..=1.0).contains(&y1));
    }

    #[test]
    fn stable_pair_differs_across_ids() {
        assert_ne!(stable_pair("a"), stable_pair("b"));
    }

    #[test]
    fn ellipsize_keeps_short_names() {
        assert_eq!(ellipsize("Ramesh Kumar", 32), "Ramesh Kumar");
    }

    #[test]
    fn ellipsize_truncates_long_names() {
        let long = "State of Maharashtra vs. Ramchandra Keshav Adke and others";
        let short = ellipsize(long, 20);
        assert!(short.chars().count() <= 20);
        assert!(short.ends_with('…'));
    }
}
