//! Joining the firm-year panel with the industry classification table.

use std::collections::HashMap;

use crate::constants::{UNCLASSIFIED_CODE, UNCLASSIFIED_NAME};
use crate::record::{Classification, FirmYearRecord, PanelRow};

/// Carries the latest known classification forward through `through_year`.
///
/// Every row of the maximum known year is copied once per missing year, with
/// only the year overwritten. Years after the maximum are absent by
/// construction, so no existing row is ever replaced. Returns the number of
/// rows appended.
pub fn backfill_classifications(rows: &mut Vec<Classification>, through_year: i32) -> usize {
    let Some(max_year) = rows.iter().map(|r| r.year).max() else {
        return 0;
    };

    let latest: Vec<Classification> = rows.iter().filter(|r| r.year == max_year).cloned().collect();
    let before = rows.len();

    for year in max_year.saturating_add(1)..=through_year {
        rows.extend(latest.iter().map(|r| Classification { year, ..r.clone() }));
    }

    let added = rows.len().saturating_sub(before);
    if added > 0 {
        tracing::info!(
            from_year = max_year,
            through_year,
            rows = added,
            "Carried latest industry classification forward"
        );
    }
    added
}

/// Left-joins the panel with the classification table on (firm code, year).
///
/// Panel rows without a match get the unclassified sentinels. When the
/// classification table repeats a key, the first occurrence wins.
pub fn merge_panel(panel: Vec<PanelRow>, classifications: &[Classification]) -> Vec<FirmYearRecord> {
    let mut lookup: HashMap<(&str, i32), &Classification> =
        HashMap::with_capacity(classifications.len());
    for c in classifications {
        lookup.entry((c.firm_code.as_str(), c.year)).or_insert(c);
    }

    panel
        .into_iter()
        .map(|row| {
            let (industry_code, industry_name) = lookup
                .get(&(row.firm_code.as_str(), row.year))
                .map_or_else(
                    || (UNCLASSIFIED_CODE.to_owned(), UNCLASSIFIED_NAME.to_owned()),
                    |c| (c.industry_code.clone(), c.industry_name.clone()),
                );
            FirmYearRecord {
                firm_code: row.firm_code,
                firm_name: row.firm_name,
                year: row.year,
                industry_code,
                industry_name,
                composite_index: row.composite_index,
                normalized_index: row.normalized_index,
                extra: row.extra,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(code: &str, year: i32, ind: &str) -> Classification {
        Classification::new(code, year, ind, format!("industry {ind}"))
    }

    #[test]
    fn backfill_copies_latest_year_forward() {
        let mut rows = vec![class("600000", 2020, "J66"), class("600000", 2021, "J67"), class("000001", 2021, "J66")];

        let added = backfill_classifications(&mut rows, 2023);

        assert_eq!(added, 4);
        let y2023: Vec<_> = rows.iter().filter(|r| r.year == 2023).collect();
        assert_eq!(y2023.len(), 2);
        assert!(y2023.iter().any(|r| r.firm_code == "600000" && r.industry_code == "J67"));
        assert!(y2023.iter().any(|r| r.firm_code == "000001" && r.industry_code == "J66"));
    }

    #[test]
    fn backfill_is_noop_when_already_current() {
        let mut rows = vec![class("600000", 2023, "J66")];
        assert_eq!(backfill_classifications(&mut rows, 2023), 0);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn backfill_handles_empty_table() {
        let mut rows = Vec::new();
        assert_eq!(backfill_classifications(&mut rows, 2023), 0);
        assert!(rows.is_empty());
    }

    #[test]
    fn backfill_does_not_touch_earlier_years() {
        let mut rows = vec![class("600000", 2019, "C27"), class("600000", 2021, "C26")];
        backfill_classifications(&mut rows, 2022);
        let y2019 = rows.iter().find(|r| r.year == 2019).map(|r| r.industry_code.as_str());
        assert_eq!(y2019, Some("C27"));
        assert_eq!(rows.iter().filter(|r| r.year == 2020).count(), 0);
    }

    #[test]
    fn merge_fills_sentinels_for_missing_classification() {
        let panel = vec![
            PanelRow::new("600000", "Pudong Bank", 2021).with_indices(Some(1.5), Some(40.0)),
            PanelRow::new("600000", "Pudong Bank", 1999),
        ];
        let classes = vec![class("600000", 2021, "J66")];

        let merged = merge_panel(panel, &classes);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].industry_code, "J66");
        assert_eq!(merged[0].industry_name, "industry J66");
        assert_eq!(merged[0].composite_index, Some(1.5));
        assert_eq!(merged[1].industry_code, UNCLASSIFIED_CODE);
        assert_eq!(merged[1].industry_name, UNCLASSIFIED_NAME);
    }

    #[test]
    fn merge_keeps_first_duplicate_classification() {
        let panel = vec![PanelRow::new("600000", "Pudong Bank", 2021)];
        let classes = vec![class("600000", 2021, "J66"), class("600000", 2021, "K70")];

        let merged = merge_panel(panel, &classes);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].industry_code, "J66");
    }
}
