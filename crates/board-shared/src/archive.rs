use std::collections::BTreeSet;

use crate::ArchivedTaskDto;

/// Distinct `archived_month` values
/// present in the archive list.
pub fn archive_months(
  archives: &[ArchivedTaskDto]
) -> BTreeSet<String> {
  archives
    .iter()
    .filter_map(|archive| {
      archive.archived_month.clone()
    })
    .collect()
}

/// Most recent first. "YYYY-MM" sorts
/// chronologically as plain text.
pub fn months_descending(
  months: &BTreeSet<String>
) -> Vec<String> {
  months.iter().rev().cloned().collect()
}

/// "2024-03" -> "2024年03月". Anything
/// without a dash is shown as is.
pub fn month_label(month: &str) -> String {
  match month.split_once('-') {
    | Some((year, month)) => {
      format!("{year}年{month}月")
    }
    | None => month.to_string()
  }
}

pub fn filter_by_month(
  archives: &[ArchivedTaskDto],
  month: Option<&str>
) -> Vec<ArchivedTaskDto> {
  match month.filter(|m| !m.is_empty()) {
    | Some(month) => archives
      .iter()
      .filter(|archive| {
        archive.archived_month.as_deref()
          == Some(month)
      })
      .cloned()
      .collect(),
    | None => archives.to_vec()
  }
}
