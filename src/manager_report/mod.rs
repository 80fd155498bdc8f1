pub mod errors;
pub mod models;

use std::collections::HashMap;
use chrono::NaiveDate;
use chrono_tz::Tz;
use log::{info, warn};
use crate::manager_feasibility::assess;
use crate::manager_feasibility::models::{Conditions, JobSelection, RuleSet};
use crate::manager_owm::models::{ForecastEntry, Location};
use crate::manager_report::models::{ChartSeries, DisplayRow, JobOption, Observation, PageContext, ReportRequest};

pub const COLUMNS: [&str; 6] = ["시간", "기온 (°C)", "습도 (%)", "풍속 (m/s)", "강수량 (mm)", "작업 판단"];

/// Converts raw forecast entries to observations in civil time
///
/// # Arguments
///
/// * 'entries' - entries as delivered by the forecast service
/// * 'tz' - civil timezone
pub fn observations(entries: &[ForecastEntry], tz: Tz) -> Vec<Observation> {
    entries.iter().map(|e| Observation::from_entry(e, tz)).collect()
}

/// Mean temperature per civil date over all given observations
///
/// # Arguments
///
/// * 'observations' - the whole fetched forecast
pub fn daily_averages(observations: &[Observation]) -> HashMap<NaiveDate, f64> {
    let mut sums: HashMap<NaiveDate, (f64, u32)> = HashMap::new();
    for o in observations {
        let entry = sums.entry(o.time.date_naive()).or_insert((0.0, 0));
        entry.0 += o.temp;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(date, (sum, count))| (date, sum / count as f64))
        .collect()
}

/// Builds the page context for a request.
///
/// Chart series and table rows come from the same in-range observations, the verdict
/// filter only narrows the table.
///
/// # Arguments
///
/// * 'observations' - the whole fetched forecast
/// * 'request' - validated page request
/// * 'rule_set' - rule table revision
/// * 'location' - location the forecast was fetched for
pub fn build_report(observations: &[Observation], request: &ReportRequest, rule_set: RuleSet, location: &Location) -> PageContext {
    let averages = daily_averages(observations);

    let rows: Vec<DisplayRow> = observations.iter()
        .filter(|o| request.range.contains(o.time.date_naive()))
        .map(|o| {
            let conditions = Conditions {
                temp: o.temp,
                humidity: o.humidity,
                wind: o.wind,
                rain: o.rain,
                avg_temp: averages.get(&o.time.date_naive()).copied(),
                rain_rate: Some(o.rain / 3.0),
                welding_method: request.welding_method,
                preheated: request.preheated,
            };
            DisplayRow::new(o, &assess(rule_set, request.selection, &conditions))
        })
        .collect();

    let chart = ChartSeries::from_rows(&rows);

    let table: Vec<DisplayRow> = match request.filter {
        Some(filter) => rows.into_iter().filter(|r| r.statuses.contains(&filter.status())).collect(),
        None => rows,
    };

    if chart.is_empty() {
        warn!("no observations between {} and {}", request.range.start, request.range.end);
    } else {
        info!("{} of {} observations in range, {} rows after filter", chart.len(), observations.len(), table.len());
    }

    let (lat, lon) = match location {
        Location::Coordinates { lat, lon } => (Some(*lat), Some(*lon)),
        Location::City(_) => (None, None),
    };

    let mut job_options: Vec<JobOption> = rule_set.catalog()
        .iter()
        .map(|job| JobOption { key: job.key(), label: job.label() })
        .collect();
    job_options.push(JobOption { key: JobSelection::All.key(), label: JobSelection::All.label() });

    PageContext {
        columns: COLUMNS.to_vec(),
        rows: table,
        chart,
        job_key: request.selection.key(),
        job_name: request.selection.label(),
        job_options,
        filter: request.filter.map(|f| f.key()),
        graph_items: request.graph_items.iter().map(|g| g.key()).collect(),
        start_date: request.range.start.to_string(),
        end_date: request.range.end.to_string(),
        location: location.to_string(),
        lat,
        lon,
        welding_method: request.welding_method.map(|m| m.key()),
        preheated: request.preheated,
        rule_set,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use chrono_tz::Asia::Seoul;
    use crate::manager_feasibility::models::{JobType, Status, WeldingMethod};
    use crate::manager_report::models::{ChartItem, DateRange, VerdictFilter};

    fn observation(day: u32, hour_utc: u32, temp: f64, humidity: f64, wind: f64, rain: f64) -> Observation {
        Observation {
            time: Utc.with_ymd_and_hms(2024, 6, day, hour_utc, 0, 0).unwrap().with_timezone(&Seoul),
            temp,
            humidity,
            wind,
            rain,
        }
    }

    fn forecast() -> Vec<Observation> {
        vec![
            // 2024-06-17 in Seoul
            observation(16, 21, 19.0, 60.0, 1.0, 0.0),
            observation(17, 3, 23.0, 60.0, 1.0, 0.0),
            observation(17, 9, 4.0, 60.0, 1.0, 0.0),
            // 2024-06-18 in Seoul
            observation(17, 21, 20.0, 95.0, 12.0, 2.0),
            observation(18, 6, 21.0, 50.0, 2.0, 0.0),
            // 2024-06-19 in Seoul
            observation(18, 21, 30.0, 40.0, 1.0, 0.0),
        ]
    }

    fn request(selection: JobSelection, filter: Option<VerdictFilter>, start: &str, end: &str) -> ReportRequest {
        let today = NaiveDate::from_ymd_opt(2024, 6, 17).unwrap();
        ReportRequest {
            selection,
            filter,
            graph_items: ChartItem::ALL.to_vec(),
            range: DateRange::resolve(Some(start), Some(end), today, 4).unwrap(),
            welding_method: None,
            preheated: false,
        }
    }

    fn seoul() -> Location {
        Location::City("Seoul".to_string())
    }

    #[test]
    fn default_range_is_today_plus_four() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let range = DateRange::resolve(None, None, today, 4).unwrap();
        assert_eq!(range.start, today);
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
    }

    #[test]
    fn oversized_default_range_fails() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 17).unwrap();
        assert!(DateRange::resolve(None, None, today, 200_000_000).is_err());
        assert!(DateRange::resolve(None, None, today, i64::MAX).is_err());
        assert!(DateRange::resolve(None, Some("2024-06-18"), today, i64::MAX).is_ok());
    }

    #[test]
    fn malformed_date_fails() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 17).unwrap();
        assert!(DateRange::resolve(Some("17/06/2024"), None, today, 4).is_err());
        assert!(DateRange::resolve(None, Some("2024-06-31"), today, 4).is_err());
        assert!(DateRange::resolve(Some("2024-06-20"), Some("2024-06-18"), today, 4).is_err());
    }

    #[test]
    fn observations_are_in_civil_time() {
        let entries: Vec<ForecastEntry> = serde_json::from_value(serde_json::json!([
            {"dt": 1718640000, "main": {"temp": 18.0, "humidity": 70}, "wind": {"speed": 1.5}}
        ])).unwrap();
        let obs = observations(&entries, Seoul);
        // 2024-06-17T16:00Z is the 18th 01:00 in Seoul
        assert_eq!(obs[0].time.date_naive(), NaiveDate::from_ymd_opt(2024, 6, 18).unwrap());
        assert_eq!(obs[0].rain, 0.0);
    }

    #[test]
    fn daily_average_by_civil_date() {
        let averages = daily_averages(&forecast());
        let avg = averages[&NaiveDate::from_ymd_opt(2024, 6, 17).unwrap()];
        assert!((avg - 46.0 / 3.0).abs() < 1e-9);
        assert_eq!(averages.len(), 3);
    }

    #[test]
    fn chart_counts_range_regardless_of_filter() {
        let obs = forecast();
        for filter in [None, Some(VerdictFilter::Ok), Some(VerdictFilter::Warning), Some(VerdictFilter::Caution)] {
            let r = request(JobSelection::Single(JobType::Tile), filter, "2024-06-17", "2024-06-18");
            let context = build_report(&obs, &r, RuleSet::Current, &seoul());
            assert_eq!(context.chart.len(), 5);
            assert_eq!(context.chart.judgments.len(), 5);
        }
    }

    #[test]
    fn unfiltered_table_matches_chart() {
        let obs = forecast();
        let r = request(JobSelection::Single(JobType::Painting), None, "2024-06-17", "2024-06-19");
        let context = build_report(&obs, &r, RuleSet::Current, &seoul());
        assert_eq!(context.rows.len(), context.chart.len());
        assert_eq!(context.rows.len(), 6);
    }

    #[test]
    fn filters_narrow_table_only() {
        let obs = forecast();

        let r = request(JobSelection::Single(JobType::Tile), Some(VerdictFilter::Ok), "2024-06-17", "2024-06-19");
        let context = build_report(&obs, &r, RuleSet::Current, &seoul());
        assert_eq!(context.rows.len(), 3);
        assert!(context.rows.iter().all(|row| row.statuses == vec![Status::Permitted]));
        assert!(context.rows.iter().all(|row| row.judgement.starts_with("✅")));

        let r = request(JobSelection::Single(JobType::Tile), Some(VerdictFilter::Warning), "2024-06-17", "2024-06-19");
        let context = build_report(&obs, &r, RuleSet::Current, &seoul());
        assert_eq!(context.rows.len(), 1);
        assert!(context.rows[0].judgement.starts_with("❌"));
        assert_eq!(context.chart.len(), 6);

        let r = request(JobSelection::Single(JobType::Tile), Some(VerdictFilter::Caution), "2024-06-17", "2024-06-19");
        let context = build_report(&obs, &r, RuleSet::Current, &seoul());
        assert_eq!(context.rows.len(), 2);
        assert_eq!(context.filter, Some("caution"));
    }

    #[test]
    fn concrete_uses_daily_average() {
        let obs = vec![
            observation(17, 0, 10.0, 50.0, 1.0, 0.0),
            observation(17, 3, 0.0, 50.0, 1.0, 0.0),
            observation(17, 6, 1.0, 50.0, 1.0, 0.0),
        ];
        let r = request(JobSelection::Single(JobType::Concrete), None, "2024-06-17", "2024-06-17");
        let context = build_report(&obs, &r, RuleSet::Current, &seoul());
        // the 10°C reading is still prohibited, the day averages under 4°C
        assert!(context.rows[0].judgement.starts_with("❌"));
    }

    #[test]
    fn all_jobs_rows_and_options() {
        let obs = forecast();
        let r = request(JobSelection::All, Some(VerdictFilter::Ok), "2024-06-17", "2024-06-19");
        let context = build_report(&obs, &r, RuleSet::Current, &seoul());

        assert_eq!(context.job_key, "all");
        assert_eq!(context.job_name, "전체 작업");
        assert_eq!(context.job_options.len(), 8);
        assert_eq!(context.job_options.last().map(|o| o.key), Some("all"));
        for row in &context.rows {
            assert_eq!(row.judgement.split(" / ").count(), 7);
            assert!(row.statuses.contains(&Status::Permitted));
        }
    }

    #[test]
    fn context_carries_request_echo() {
        let obs = forecast();
        let mut r = request(JobSelection::Single(JobType::Steel), None, "2024-06-18", "2024-06-19");
        r.graph_items = vec![ChartItem::Wind, ChartItem::Rain];
        r.welding_method = Some(WeldingMethod::Tig);
        r.preheated = true;
        let context = build_report(&obs, &r, RuleSet::Legacy, &Location::Coordinates { lat: 35.1, lon: 129.04 });

        assert_eq!(context.start_date, "2024-06-18");
        assert_eq!(context.end_date, "2024-06-19");
        assert_eq!(context.graph_items, vec!["wind", "rain"]);
        assert_eq!(context.location, "35.1000, 129.0400");
        assert_eq!(context.job_options.len(), 6);
        assert_eq!(context.columns.len(), 6);
        assert_eq!(context.chart.labels[0], "06-18 06시");
        assert_eq!(context.lat, Some(35.1));
        assert_eq!(context.lon, Some(129.04));
        assert_eq!(context.welding_method, Some("tig"));
        assert!(context.preheated);
    }

    #[test]
    fn city_context_has_no_coordinates() {
        let obs = forecast();
        let r = request(JobSelection::Single(JobType::Steel), None, "2024-06-25", "2024-06-26");
        let context = build_report(&obs, &r, RuleSet::Current, &seoul());

        assert!(context.chart.is_empty());
        assert!(context.rows.is_empty());
        assert_eq!(context.lat, None);
        assert_eq!(context.lon, None);
        assert_eq!(context.welding_method, None);
        assert!(!context.preheated);
    }
}
