use chrono::NaiveDate;

/// Calendar anchor of the analysis window.
///
/// The forecast timeline is addressed by 1-based month indices relative to
/// this anchor; the window converts between those indices and calendar
/// months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisWindow {
    /// Calendar month (1-12) the analysis starts in.
    pub start_month: u32,
    pub start_year: i32,
}

impl AnalysisWindow {
    pub fn new(start_month: u32, start_year: i32) -> Self {
        Self {
            start_month,
            start_year,
        }
    }

    /// Months since year zero, the common scale for index arithmetic.
    fn absolute(month: u32, year: i32) -> i64 {
        year as i64 * 12 + (month as i64 - 1)
    }

    /// Calendar date (first of month) of a 1-based relative month index.
    ///
    /// Returns `None` only when the index walks past the chrono-representable
    /// calendar range.
    pub fn date_of(&self, index: u32) -> Option<NaiveDate> {
        let abs = Self::absolute(self.start_month, self.start_year) + (index as i64 - 1);
        let year = abs.div_euclid(12);
        let month = abs.rem_euclid(12) + 1;
        NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month as u32, 1)
    }

    /// 1-based relative index of a calendar month. Zero or negative when the
    /// month predates the window.
    pub fn relative_index(&self, month: u32, year: i32) -> i64 {
        Self::absolute(month, year) - Self::absolute(self.start_month, self.start_year) + 1
    }

    /// Short display label for a 1-based relative month index, e.g. `Dec '25`.
    pub fn label_of(&self, index: u32) -> String {
        match self.date_of(index) {
            Some(date) => date.format("%b '%y").to_string(),
            None => format!("month {}", index),
        }
    }
}
