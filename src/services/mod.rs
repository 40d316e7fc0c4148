pub mod assessment_service;
pub mod candidate_service;
pub mod job_service;

/// Parsed `field:direction` sort parameter. Direction defaults to
/// ascending.
pub(crate) fn parse_sort(sort: Option<&str>) -> Option<(String, bool)> {
    let sort = sort?.trim();
    if sort.is_empty() {
        return None;
    }
    let (field, direction) = match sort.split_once(':') {
        Some((f, d)) => (f, d),
        None => (sort, "asc"),
    };
    Some((field.to_string(), direction.eq_ignore_ascii_case("desc")))
}

/// 1-indexed page slice. Out-of-range pages yield an empty list; the
/// start offset saturates so extreme page numbers cannot overflow.
pub(crate) fn paginate<T: Clone>(items: &[T], page: i64, page_size: i64) -> Vec<T> {
    let start = page.saturating_sub(1).saturating_mul(page_size).max(0) as usize;
    items
        .iter()
        .skip(start)
        .take(page_size.max(0) as usize)
        .cloned()
        .collect()
}

/// Filter params use `all` (or empty) as the no-filter sentinel.
pub(crate) fn filter_value(raw: Option<&str>) -> Option<&str> {
    match raw {
        Some(v) if !v.is_empty() && v != "all" => Some(v),
        _ => None,
    }
}
