use crate::Offer;

/// One page of the filtered result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    /// Offers visible on the current page.
    pub visible: &'a [Offer],
    /// The 1-based page that was actually sliced.
    pub page: usize,
    /// `ceil(count / page_size)`; 0 when there are no results.
    pub total_pages: usize,
}

/// Slices the ordered filtered subset into the requested page.
///
/// A request past the last page falls back to page 1, so the returned slice
/// never points past the end of the data. Zero results yield an empty slice
/// and zero pages.
pub fn paginate(offers: &[Offer], page_size: usize, current_page: usize) -> Page<'_> {
    assert!(page_size > 0, "page size must be positive");

    let total_pages = offers.len().div_ceil(page_size);
    let page = if current_page == 0 || current_page > total_pages {
        1
    } else {
        current_page
    };

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(offers.len());
    let visible = if start < offers.len() {
        &offers[start..end]
    } else {
        &[]
    };

    Page {
        visible,
        page,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offers(n: usize) -> Vec<Offer> {
        (0..n)
            .map(|i| Offer {
                provider: format!("P{i}"),
                name: format!("Plan {i}"),
                speed_mbps: 50,
                cost_eur: 30.0,
                cost_first_years_eur: 25.0,
                after_two_years_eur: 30.0,
                duration_months: 24,
                limit_from_gb: None,
                installation_included: false,
                tv: None,
                max_age: None,
                connection_type: "DSL".to_string(),
            })
            .collect()
    }

    #[test]
    fn empty_input_yields_no_pages() {
        let page = paginate(&[], 10, 1);
        assert!(page.visible.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn partial_last_page() {
        let all = offers(23);
        let page = paginate(&all, 10, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.visible.len(), 3);
        assert_eq!(page.visible[0].provider, "P20");
    }

    #[test]
    fn out_of_range_page_falls_back_to_first() {
        let all = offers(12);
        let page = paginate(&all, 10, 5);
        assert_eq!(page.page, 1);
        assert_eq!(page.visible.len(), 10);
        assert_eq!(page.visible[0].provider, "P0");
    }

    #[test]
    fn never_slices_beyond_last_page() {
        for count in 0..30 {
            let all = offers(count);
            for requested in 1..6 {
                let page = paginate(&all, 7, requested);
                assert!(page.page <= page.total_pages.max(1));
                let start = (page.page - 1) * 7;
                assert!(start <= count || page.visible.is_empty());
            }
        }
    }
}
