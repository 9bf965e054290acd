use crate::types::PageMarker;

/// Up to this many pages are listed without any ellipsis.
pub const MAX_UNCOLLAPSED: u32 = 7;

/// Computes the markers shown in a pagination bar.
///
/// The first and last page are always present. Around `current_page` a
/// window of three pages is shown, pinned to `2..=4` near the start and to
/// the last three inner pages near the end, with an ellipsis standing in
/// for every gap.
///
/// `current_page` is expected to already lie in `1..=total_pages`; it is
/// not checked here.
pub fn page_numbers(current_page: u32, total_pages: u32) -> Vec<PageMarker> {
    if total_pages <= MAX_UNCOLLAPSED {
        return (1..=total_pages).map(PageMarker::Page).collect();
    }

    let mut pages = Vec::with_capacity(9);
    pages.push(PageMarker::Page(1));

    let (range_start, range_end) = if current_page <= 3 {
        (2, 4)
    } else if current_page >= total_pages - 2 {
        (total_pages - 3, total_pages - 1)
    } else {
        (
            current_page.saturating_sub(1).max(2),
            current_page.saturating_add(1).min(total_pages - 1),
        )
    };

    if range_start > 2 {
        pages.push(PageMarker::Ellipsis);
    }

    pages.extend((range_start..=range_end).map(PageMarker::Page));

    if range_end < total_pages - 1 {
        pages.push(PageMarker::Ellipsis);
    }

    pages.push(PageMarker::Page(total_pages));
    pages
}
