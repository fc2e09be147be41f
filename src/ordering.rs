//! Deterministic ordering of work records.
//!
//! Every listing on the site (home featured grid, work index) is derived from
//! the same immutable record set by the functions in this module. They are
//! pure: nothing here mutates its input, performs I/O, or can fail.
//!
//! ## Sort policy
//!
//! [`compare_records`] applies four keys lexicographically:
//!
//! 1. **Explicit priority**: [`coerce_order`] of the `order` field, ascending.
//!    Records without a usable priority share the `+∞` sentinel and fall
//!    through to the next key.
//! 2. **Title**: [`natural_cmp`] (case-insensitive, locale-aware,
//!    numeric-aware, so `"Item 9"` sorts before `"Item 10"` and `"Łódź"`
//!    before `"Zebra"`).
//! 3. **Slug**: same comparison as title.
//! 4. **Id**: plain byte-wise comparison. Ids are unique, so no two distinct
//!    records ever compare equal and the output never depends on input order.
//!
//! The generated pages are rebuilt from scratch on every run; a total order is
//! what keeps cards from swapping places between otherwise identical builds.

use crate::types::{ContentRecord, OrderValue};
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Convert an author-supplied `order` value into a numeric sort key.
///
/// | input                    | result     |
/// |--------------------------|------------|
/// | finite number            | unchanged  |
/// | text parsing to a finite | that value |
/// | anything else            | `+∞`       |
///
/// Text is trimmed before parsing, so `"  7  "` is `7`.
pub fn coerce_order(value: Option<&OrderValue>) -> f64 {
    match value {
        Some(OrderValue::Number(n)) if n.is_finite() => *n,
        Some(OrderValue::Text(text)) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .unwrap_or(f64::INFINITY),
        _ => f64::INFINITY,
    }
}

/// Total order over records: order → title → slug → id.
pub fn compare_records(a: &ContentRecord, b: &ContentRecord) -> Ordering {
    let (ao, bo) = (coerce_order(a.order.as_ref()), coerce_order(b.order.as_ref()));
    // Neither side can be NaN after coercion.
    ao.partial_cmp(&bo)
        .unwrap_or(Ordering::Equal)
        .then_with(|| natural_cmp(&a.title, &b.title))
        .then_with(|| natural_cmp(&a.slug, &b.slug))
        .then_with(|| a.id.cmp(&b.id))
}

/// Return the records in [`compare_records`] order.
///
/// Accepts any iterator of borrowed records and returns a fresh vector; the
/// records themselves are never touched.
pub fn sort_records<'a, I>(records: I) -> Vec<&'a ContentRecord>
where
    I: IntoIterator<Item = &'a ContentRecord>,
{
    let mut sorted: Vec<&ContentRecord> = records.into_iter().collect();
    sorted.sort_by(|a, b| compare_records(a, b));
    sorted
}

/// Split records into `(featured, rest)`, keeping relative input order.
///
/// Does not sort; callers pass each half through [`sort_records`].
pub fn partition_featured<'a, I>(records: I) -> (Vec<&'a ContentRecord>, Vec<&'a ContentRecord>)
where
    I: IntoIterator<Item = &'a ContentRecord>,
{
    records.into_iter().partition(|r| r.featured)
}

/// First `min(n, len)` items of `list`, in the list's existing order.
pub fn select_top<T>(list: &[T], n: usize) -> &[T] {
    &list[..n.min(list.len())]
}

/// Tags that fit in a compact surface plus how many were left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedTags<'a> {
    pub shown: &'a [String],
    pub overflow: usize,
}

/// Keep the first `max` tags and count the rest.
pub fn clamp_tags(tags: &[String], max: usize) -> ClampedTags<'_> {
    ClampedTags {
        shown: select_top(tags, max),
        overflow: tags.len().saturating_sub(max),
    }
}

/// The ordered views the site renders, derived once per build.
#[derive(Debug)]
pub struct WorkViews<'a> {
    /// Featured records in sort order.
    pub featured: Vec<&'a ContentRecord>,
    /// Non-featured records in sort order.
    pub rest: Vec<&'a ContentRecord>,
}

impl<'a> WorkViews<'a> {
    pub fn new(records: &'a [ContentRecord]) -> Self {
        let (featured, rest) = partition_featured(records);
        Self {
            featured: sort_records(featured),
            rest: sort_records(rest),
        }
    }

    /// Leading featured records for the landing page.
    pub fn top_featured(&self, n: usize) -> &[&'a ContentRecord] {
        select_top(&self.featured, n)
    }

    pub fn is_empty(&self) -> bool {
        self.featured.is_empty() && self.rest.is_empty()
    }
}

// ============================================================================
// Natural string comparison
// ============================================================================

/// Locale-aware, case- and accent-insensitive comparison where digit runs
/// compare by value.
///
/// Both strings are reduced to collation keys first (see [`collation_key`]),
/// then walked side by side. Characters rank by class before code point:
/// whitespace, then punctuation and symbols, then numbers, then letters.
///
/// - `"Item 9"` < `"Item 10"`
/// - `"alpha"` == `"ALPHA"` == `"Alphá"` (equal at this level; callers
///   break the tie with another key)
/// - `"Straße"` == `"Strasse"`, `"Łódź"` < `"Zebra"`
/// - `"007"` == `"7"`
/// - `"~Notes"` < `"Alpha"`, `"A_b"` < `"A1"`
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = collation_key(a);
    let right = collation_key(b);
    let (mut i, mut j) = (0, 0);

    loop {
        match (left.get(i), right.get(j)) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_end = digit_run_end(&left, i);
                let r_end = digit_run_end(&right, j);
                let ord = compare_digit_runs(&left[i..l_end], &right[j..r_end]);
                if ord != Ordering::Equal {
                    return ord;
                }
                i = l_end;
                j = r_end;
            }
            (Some(&l), Some(&r)) => {
                let ord = Weight::of(l).cmp(&Weight::of(r));
                if ord != Ordering::Equal {
                    return ord;
                }
                i += 1;
                j += 1;
            }
        }
    }
}

/// Primary collation weight of a single folded character.
///
/// Variant order is the class order; the payload only matters within a class.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Weight {
    Space(char),
    Symbol(char),
    Number,
    Letter(char),
}

impl Weight {
    fn of(c: char) -> Self {
        if c.is_whitespace() {
            Weight::Space(c)
        } else if c.is_ascii_digit() {
            Weight::Number
        } else if c.is_alphanumeric() {
            Weight::Letter(c)
        } else {
            Weight::Symbol(c)
        }
    }
}

/// Fold a string down to the characters that matter at primary strength.
///
/// Compatibility decomposition splits accented letters, ligatures and
/// full-width forms into base characters; combining marks are then dropped
/// and the rest lowercased. Letters that carry their diacritic as part of the
/// glyph (`ł`, `ø`, `đ`) or expand to two letters (`ß`, `æ`, `œ`) are mapped
/// explicitly.
fn collation_key(s: &str) -> Vec<char> {
    let mut key = Vec::with_capacity(s.len());
    for c in s.nfkd().filter(|c| !is_combining_mark(*c)) {
        match c {
            'ß' | 'ẞ' => key.extend(['s', 's']),
            'æ' | 'Æ' => key.extend(['a', 'e']),
            'œ' | 'Œ' => key.extend(['o', 'e']),
            'ø' | 'Ø' => key.push('o'),
            'ł' | 'Ł' => key.push('l'),
            'đ' | 'Đ' => key.push('d'),
            'ħ' | 'Ħ' => key.push('h'),
            other => key.extend(other.to_lowercase()),
        }
    }
    key
}

fn digit_run_end(key: &[char], start: usize) -> usize {
    key[start..]
        .iter()
        .position(|c| !c.is_ascii_digit())
        .map_or(key.len(), |n| start + n)
}

/// Compare two ASCII digit runs by numeric value, without overflow.
fn compare_digit_runs(a: &[char], b: &[char]) -> Ordering {
    let a = trim_leading_zeros(a);
    let b = trim_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn trim_leading_zeros(run: &[char]) -> &[char] {
    let zeros = run.iter().take_while(|&&c| c == '0').count();
    &run[zeros..]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, slug: &str, order: Option<OrderValue>) -> ContentRecord {
        ContentRecord {
            id: id.to_string(),
            title: title.to_string(),
            slug: slug.to_string(),
            permalink: format!("/work/{slug}"),
            summary: None,
            tags: vec![],
            featured: false,
            order,
            date: None,
            cover: None,
            body: String::new(),
        }
    }

    fn num(n: f64) -> Option<OrderValue> {
        Some(OrderValue::Number(n))
    }

    fn text(s: &str) -> Option<OrderValue> {
        Some(OrderValue::Text(s.to_string()))
    }

    fn ids(sorted: &[&ContentRecord]) -> Vec<String> {
        sorted.iter().map(|r| r.id.clone()).collect()
    }

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Every permutation of `items` (Heap's algorithm).
    fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
        fn heap<T: Clone>(k: usize, items: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
            if k <= 1 {
                out.push(items.clone());
                return;
            }
            for i in 0..k {
                heap(k - 1, items, out);
                if k % 2 == 0 {
                    items.swap(i, k - 1);
                } else {
                    items.swap(0, k - 1);
                }
            }
        }
        let mut work = items.to_vec();
        let mut out = Vec::new();
        heap(work.len(), &mut work, &mut out);
        out
    }

    // =========================================================================
    // coerce_order
    // =========================================================================

    #[test]
    fn coerce_numeric_text() {
        assert_eq!(coerce_order(text("3").as_ref()), 3.0);
    }

    #[test]
    fn coerce_number_unchanged() {
        assert_eq!(coerce_order(num(3.0).as_ref()), 3.0);
        assert_eq!(coerce_order(num(-1.5).as_ref()), -1.5);
    }

    #[test]
    fn coerce_non_numeric_text_is_sentinel() {
        assert_eq!(coerce_order(text("abc").as_ref()), f64::INFINITY);
    }

    #[test]
    fn coerce_absent_is_sentinel() {
        assert_eq!(coerce_order(None), f64::INFINITY);
    }

    #[test]
    fn coerce_trims_whitespace() {
        assert_eq!(coerce_order(text("  7  ").as_ref()), 7.0);
    }

    #[test]
    fn coerce_non_finite_is_sentinel() {
        assert_eq!(coerce_order(num(f64::NAN).as_ref()), f64::INFINITY);
        assert_eq!(coerce_order(num(f64::NEG_INFINITY).as_ref()), f64::INFINITY);
        assert_eq!(coerce_order(text("inf").as_ref()), f64::INFINITY);
        assert_eq!(coerce_order(text("NaN").as_ref()), f64::INFINITY);
    }

    #[test]
    fn coerce_blank_text_is_sentinel() {
        assert_eq!(coerce_order(text("").as_ref()), f64::INFINITY);
        assert_eq!(coerce_order(text("   ").as_ref()), f64::INFINITY);
    }

    #[test]
    fn coerce_fractional_and_exponent_text() {
        assert_eq!(coerce_order(text("2.5").as_ref()), 2.5);
        assert_eq!(coerce_order(text("1e2").as_ref()), 100.0);
    }

    // =========================================================================
    // natural_cmp
    // =========================================================================

    #[test]
    fn natural_numbers_compare_by_value() {
        assert_eq!(natural_cmp("Item 9", "Item 10"), Ordering::Less);
        assert_eq!(natural_cmp("Item 10", "Item 9"), Ordering::Greater);
    }

    #[test]
    fn natural_ignores_case() {
        assert_eq!(natural_cmp("Alpha", "alpha"), Ordering::Equal);
        assert_eq!(natural_cmp("alpha", "Beta"), Ordering::Less);
    }

    #[test]
    fn natural_ignores_accents() {
        assert_eq!(natural_cmp("Café", "cafe"), Ordering::Equal);
    }

    #[test]
    fn natural_leading_zeros_equal() {
        assert_eq!(natural_cmp("v007", "v7"), Ordering::Equal);
    }

    #[test]
    fn natural_prefix_sorts_first() {
        assert_eq!(natural_cmp("Item", "Item 2"), Ordering::Less);
    }

    #[test]
    fn natural_huge_digit_runs_do_not_overflow() {
        let big = "9".repeat(40);
        let bigger = format!("1{}", "0".repeat(40));
        assert_eq!(natural_cmp(&big, &bigger), Ordering::Less);
    }

    #[test]
    fn natural_stroked_letters_sort_with_base_letter() {
        assert_eq!(natural_cmp("Łódź", "Zebra"), Ordering::Less);
        assert_eq!(natural_cmp("Łódź", "lodz"), Ordering::Equal);
        assert_eq!(natural_cmp("Øresund", "Paris"), Ordering::Less);
    }

    #[test]
    fn natural_expands_sharp_s_and_ligatures() {
        assert_eq!(natural_cmp("Straße", "Strasse"), Ordering::Equal);
        assert_eq!(natural_cmp("Æther", "aether"), Ordering::Equal);
        assert_eq!(natural_cmp("ﬁle", "file"), Ordering::Equal);
    }

    #[test]
    fn natural_ignores_combining_marks() {
        assert_eq!(natural_cmp("Cafe\u{301}", "Cafe"), Ordering::Equal);
        assert_eq!(natural_cmp("Cafe\u{301}", "Café"), Ordering::Equal);
    }

    #[test]
    fn natural_punctuation_before_digits_before_letters() {
        assert_eq!(natural_cmp("A_b", "A1"), Ordering::Less);
        assert_eq!(natural_cmp("~Notes", "Alpha"), Ordering::Less);
        assert_eq!(natural_cmp("A1", "Ab"), Ordering::Less);
        assert_eq!(natural_cmp("A b", "A_b"), Ordering::Less);
    }

    #[test]
    fn natural_full_width_digits_compare_by_value() {
        assert_eq!(natural_cmp("Item ９", "Item 10"), Ordering::Less);
    }

    // =========================================================================
    // sort_records
    // =========================================================================

    #[test]
    fn priority_dominates() {
        let a = record("a", "Zeta", "zeta", num(1.0));
        let b = record("b", "Alpha", "alpha", num(2.0));
        let c = record("c", "Aardvark", "aardvark", None);
        let sorted = sort_records([&c, &b, &a]);
        assert_eq!(ids(&sorted), vec!["a", "b", "c"]);
    }

    #[test]
    fn text_and_number_orders_mix() {
        let a = record("a", "A", "a", text("2"));
        let b = record("b", "B", "b", num(1.0));
        let c = record("c", "C", "c", text(" 3 "));
        let sorted = sort_records([&a, &c, &b]);
        assert_eq!(ids(&sorted), vec!["b", "a", "c"]);
    }

    #[test]
    fn unparsable_order_sorts_last() {
        let a = record("a", "A", "a", text("soon"));
        let b = record("b", "B", "b", num(100.0));
        let sorted = sort_records([&a, &b]);
        assert_eq!(ids(&sorted), vec!["b", "a"]);
    }

    #[test]
    fn title_fallback_is_numeric_aware() {
        let ten = record("x1", "Item 10", "item-10", None);
        let two = record("x2", "Item 2", "item-2", None);
        let sorted = sort_records([&ten, &two]);
        assert_eq!(ids(&sorted), vec!["x2", "x1"]);
    }

    #[test]
    fn title_fallback_is_locale_aware() {
        let zebra = record("z", "Zebra", "zebra", None);
        let lodz = record("l", "Łódź", "lodz", None);
        let sorted = sort_records([&zebra, &lodz]);
        assert_eq!(ids(&sorted), vec!["l", "z"]);
    }

    #[test]
    fn equal_order_falls_back_to_title() {
        let a = record("a", "beta", "a", num(1.0));
        let b = record("b", "Alpha", "b", num(1.0));
        let sorted = sort_records([&a, &b]);
        assert_eq!(ids(&sorted), vec!["b", "a"]);
    }

    #[test]
    fn identical_titles_break_on_slug() {
        let beta = record("1", "Same", "beta-project", num(5.0));
        let alpha = record("2", "Same", "alpha-project", num(5.0));
        let sorted = sort_records([&beta, &alpha]);
        assert_eq!(ids(&sorted), vec!["2", "1"]);
    }

    #[test]
    fn identical_slugs_break_on_id() {
        let b = record("work/b.md", "Same", "same", None);
        let a = record("work/a.md", "Same", "same", None);
        let sorted = sort_records([&b, &a]);
        assert_eq!(ids(&sorted), vec!["work/a.md", "work/b.md"]);
    }

    #[test]
    fn case_only_title_difference_breaks_on_slug() {
        let upper = record("1", "PROJECT", "z-project", None);
        let lower = record("2", "project", "a-project", None);
        let sorted = sort_records([&upper, &lower]);
        assert_eq!(ids(&sorted), vec!["2", "1"]);
    }

    #[test]
    fn sort_empty_list() {
        let sorted = sort_records(std::iter::empty::<&ContentRecord>());
        assert!(sorted.is_empty());
    }

    #[test]
    fn sort_does_not_mutate_input() {
        let records = vec![
            record("c", "C", "c", None),
            record("a", "A", "a", None),
            record("b", "B", "b", None),
        ];
        let before = records.clone();
        let sorted = sort_records(&records);
        assert_eq!(ids(&sorted), vec!["a", "b", "c"]);
        assert_eq!(records, before);
    }

    #[test]
    fn sort_is_deterministic_across_permutations() {
        let records = vec![
            record("work/d.md", "Same", "same", None),
            record("work/c.md", "Same", "same", None),
            record("work/b.md", "Item 10", "b", text("1")),
            record("work/a.md", "Item 2", "a", None),
            record("work/e.md", "item 2", "a", num(1.0)),
        ];
        let expected = ids(&sort_records(&records));
        for perm in permutations(&records) {
            assert_eq!(ids(&sort_records(&perm)), expected);
        }
    }

    #[test]
    fn comparator_is_a_strict_total_order() {
        let records = vec![
            record("1", "Same", "same", None),
            record("2", "Same", "same", None),
            record("3", "same", "SAME", None),
            record("4", "Item 9", "x", num(0.0)),
            record("5", "Item 10", "x", text("0")),
            record("6", "Other", "other", text("junk")),
        ];
        for a in &records {
            for b in &records {
                let ab = compare_records(a, b);
                assert_eq!(ab, compare_records(b, a).reverse(), "antisymmetry");
                if a.id != b.id {
                    assert_ne!(ab, Ordering::Equal, "{} vs {}", a.id, b.id);
                }
                for c in &records {
                    if ab == Ordering::Less && compare_records(b, c) == Ordering::Less {
                        assert_eq!(compare_records(a, c), Ordering::Less, "transitivity");
                    }
                }
            }
        }
    }

    // =========================================================================
    // partition_featured
    // =========================================================================

    #[test]
    fn partition_covers_every_record_once() {
        let mut records = vec![
            record("a", "A", "a", None),
            record("b", "B", "b", None),
            record("c", "C", "c", None),
            record("d", "D", "d", None),
        ];
        records[1].featured = true;
        records[3].featured = true;

        let (featured, rest) = partition_featured(&records);
        assert_eq!(ids(&featured), vec!["b", "d"]);
        assert_eq!(ids(&rest), vec!["a", "c"]);

        let mut all = ids(&featured);
        all.extend(ids(&rest));
        all.sort();
        assert_eq!(all, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn partition_preserves_relative_order() {
        let mut records = vec![
            record("z", "Z", "z", None),
            record("a", "A", "a", None),
        ];
        records[0].featured = true;
        records[1].featured = true;
        let (featured, rest) = partition_featured(&records);
        assert_eq!(ids(&featured), vec!["z", "a"]);
        assert!(rest.is_empty());
    }

    // =========================================================================
    // select_top
    // =========================================================================

    #[test]
    fn select_top_bound_larger_than_list() {
        assert_eq!(select_top(&["a", "b"], 5), &["a", "b"]);
    }

    #[test]
    fn select_top_empty_list() {
        let empty: [&str; 0] = [];
        assert!(select_top(&empty, 3).is_empty());
    }

    #[test]
    fn select_top_zero() {
        assert!(select_top(&["a", "b"], 0).is_empty());
    }

    #[test]
    fn select_top_keeps_order() {
        assert_eq!(select_top(&[3, 1, 2], 2), &[3, 1]);
    }

    // =========================================================================
    // clamp_tags
    // =========================================================================

    #[test]
    fn clamp_tags_counts_overflow() {
        let all = tags(&["a", "b", "c", "d", "e"]);
        let clamped = clamp_tags(&all, 4);
        assert_eq!(clamped.shown, &tags(&["a", "b", "c", "d"])[..]);
        assert_eq!(clamped.overflow, 1);
    }

    #[test]
    fn clamp_tags_empty() {
        let clamped = clamp_tags(&[], 4);
        assert!(clamped.shown.is_empty());
        assert_eq!(clamped.overflow, 0);
    }

    #[test]
    fn clamp_tags_under_limit() {
        let all = tags(&["rust", "cli"]);
        let clamped = clamp_tags(&all, 6);
        assert_eq!(clamped.shown.len(), 2);
        assert_eq!(clamped.overflow, 0);
    }

    // =========================================================================
    // WorkViews
    // =========================================================================

    #[test]
    fn views_sort_each_partition() {
        let mut records = vec![
            record("1", "Beta", "beta", None),
            record("2", "Alpha", "alpha", None),
            record("3", "Gamma", "gamma", num(1.0)),
            record("4", "Delta", "delta", None),
        ];
        records[0].featured = true;
        records[2].featured = true;

        let views = WorkViews::new(&records);
        assert_eq!(ids(&views.featured), vec!["3", "1"]);
        assert_eq!(ids(&views.rest), vec!["2", "4"]);
        assert_eq!(ids(views.top_featured(1)), vec!["3"]);
        assert!(!views.is_empty());
    }

    #[test]
    fn views_empty() {
        let views = WorkViews::new(&[]);
        assert!(views.is_empty());
        assert!(views.top_featured(3).is_empty());
    }
}
