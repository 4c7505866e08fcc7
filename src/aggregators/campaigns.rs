//! Awareness campaigns per city, paged for the bar chart.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{Selection, WasteRecord};

/// Cities shown per page.
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityCampaigns {
    pub city: String,
    pub campaigns: u32,
}

/// One page of the ranking plus paging context.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CampaignsPage {
    pub page: usize,
    pub page_count: usize,
    pub items: Vec<CityCampaigns>,
}

/// Sums campaigns per city across all years, ranks descending (ties by
/// city name ascending), and returns the selected page of 10. An
/// out-of-range page index clamps to the last page.
pub fn aggregate(records: &[WasteRecord], selection: &Selection) -> CampaignsPage {
    let mut totals: BTreeMap<String, u32> = BTreeMap::new();
    for r in records {
        *totals.entry(r.city.clone()).or_default() += r.campaigns_count;
    }

    let mut ranked: Vec<CityCampaigns> = totals
        .into_iter()
        .map(|(city, campaigns)| CityCampaigns { city, campaigns })
        .collect();
    ranked.sort_by(|a, b| b.campaigns.cmp(&a.campaigns).then_with(|| a.city.cmp(&b.city)));

    if ranked.is_empty() {
        return CampaignsPage::default();
    }

    let page_count = ranked.len().div_ceil(PAGE_SIZE);
    let page = selection.page.min(page_count - 1);
    let items = ranked
        .into_iter()
        .skip(page * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    CampaignsPage {
        page,
        page_count,
        items,
    }
}
