use chrono::{Datelike, Duration, NaiveDate};

/// Column order every artifact must accept, matching the training data.
pub const FEATURE_SCHEMA: [&str; 9] = [
    "SPX",
    "USO",
    "SLV",
    "EUR/USD",
    "Year",
    "Month",
    "Day",
    "DayOfWeek",
    "IsWeekend",
];

/// Placeholder values for the exogenous inputs.
///
/// Future rows have no forward-looking source for the market columns, so
/// they are held at these fixed constants regardless of horizon.
pub const PLACEHOLDER_SPX: f64 = 1500.0;
pub const PLACEHOLDER_USO: f64 = 70.0;
pub const PLACEHOLDER_SLV: f64 = 15.0;
pub const PLACEHOLDER_EUR_USD: f64 = 1.2;

/// One synthetic input row for a future date. Constructed per request and
/// consumed immediately by the model; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub spx: f64,
    pub uso: f64,
    pub slv: f64,
    pub eur_usd: f64,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Monday = 0 .. Sunday = 6.
    pub day_of_week: u32,
    /// 1 iff the date falls on Saturday or Sunday.
    pub is_weekend: u8,
}

impl FeatureRow {
    /// Calendar-derived row for one future date, exogenous fields held at
    /// the placeholder constants.
    pub fn for_date(date: NaiveDate) -> Self {
        let day_of_week = date.weekday().num_days_from_monday();
        Self {
            spx: PLACEHOLDER_SPX,
            uso: PLACEHOLDER_USO,
            slv: PLACEHOLDER_SLV,
            eur_usd: PLACEHOLDER_EUR_USD,
            year: date.year(),
            month: date.month(),
            day: date.day(),
            day_of_week,
            is_weekend: if day_of_week >= 5 { 1 } else { 0 },
        }
    }

    /// Values in [`FEATURE_SCHEMA`] order.
    pub fn as_vector(&self) -> Vec<f64> {
        vec![
            self.spx,
            self.uso,
            self.slv,
            self.eur_usd,
            f64::from(self.year),
            f64::from(self.month),
            f64::from(self.day),
            f64::from(self.day_of_week),
            f64::from(self.is_weekend),
        ]
    }
}

/// `horizon_days` consecutive calendar dates starting the day after
/// `last_date`.
pub fn future_dates(last_date: NaiveDate, horizon_days: u32) -> Vec<NaiveDate> {
    (1..=i64::from(horizon_days))
        .map(|offset| last_date + Duration::days(offset))
        .collect()
}

/// One feature row per date, in the same order.
pub fn feature_batch(dates: &[NaiveDate]) -> Vec<FeatureRow> {
    dates.iter().copied().map(FeatureRow::for_date).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn future_dates_are_contiguous_from_day_after_last() {
        let last = NaiveDate::from_ymd_opt(2018, 5, 16).unwrap();
        let dates = future_dates(last, 3);
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2018, 5, 17).unwrap(),
                NaiveDate::from_ymd_opt(2018, 5, 18).unwrap(),
                NaiveDate::from_ymd_opt(2018, 5, 19).unwrap(),
            ]
        );
    }

    #[test]
    fn future_dates_cross_month_boundaries() {
        let last = NaiveDate::from_ymd_opt(2018, 5, 30).unwrap();
        let dates = future_dates(last, 3);
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2018, 6, 1).unwrap());
        assert_eq!(dates[2], NaiveDate::from_ymd_opt(2018, 6, 2).unwrap());
    }

    #[test]
    fn weekend_flag_matches_weekday() {
        let last = NaiveDate::from_ymd_opt(2018, 5, 14).unwrap();
        for date in future_dates(last, 14) {
            let row = FeatureRow::for_date(date);
            let expected = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
            assert_eq!(row.is_weekend == 1, expected, "date {date}");
        }
    }

    #[test]
    fn day_of_week_counts_from_monday() {
        // 2018-05-14 is a Monday.
        let monday = NaiveDate::from_ymd_opt(2018, 5, 14).unwrap();
        assert_eq!(FeatureRow::for_date(monday).day_of_week, 0);
        let sunday = NaiveDate::from_ymd_opt(2018, 5, 20).unwrap();
        assert_eq!(FeatureRow::for_date(sunday).day_of_week, 6);
    }

    #[test]
    fn vector_order_matches_schema() {
        let date = NaiveDate::from_ymd_opt(2018, 5, 19).unwrap(); // Saturday
        let row = FeatureRow::for_date(date);
        let vector = row.as_vector();
        assert_eq!(vector.len(), FEATURE_SCHEMA.len());
        assert_eq!(
            vector,
            vec![
                PLACEHOLDER_SPX,
                PLACEHOLDER_USO,
                PLACEHOLDER_SLV,
                PLACEHOLDER_EUR_USD,
                2018.0,
                5.0,
                19.0,
                5.0,
                1.0,
            ]
        );
    }

    #[test]
    fn feature_batch_has_one_row_per_date() {
        let last = NaiveDate::from_ymd_opt(2018, 5, 16).unwrap();
        let dates = future_dates(last, 5);
        let batch = feature_batch(&dates);
        assert_eq!(batch.len(), 5);
        assert_eq!(batch[0].day, 17);
    }
}
