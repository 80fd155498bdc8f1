use std::str::FromStr;
use chrono::{DateTime, NaiveDate, TimeDelta};
use chrono_tz::Tz;
use serde::Serialize;
use crate::manager_feasibility::models::{JobSelection, Judgement, RuleSet, Status, WeldingMethod};
use crate::manager_owm::models::ForecastEntry;
use crate::manager_report::errors::ReportError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One forecast sample in civil time
#[derive(Debug, Clone)]
pub struct Observation {
    pub time: DateTime<Tz>,
    pub temp: f64,
    pub humidity: f64,
    pub wind: f64,
    pub rain: f64,
}

impl Observation {
    pub fn from_entry(entry: &ForecastEntry, tz: Tz) -> Self {
        Observation {
            time: entry.dt.with_timezone(&tz),
            temp: entry.main.temp,
            humidity: entry.main.humidity,
            wind: entry.wind.speed,
            rain: entry.precipitation(),
        }
    }
}

/// Inclusive range of civil dates
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Resolves a date range from optional ISO dates. An unset start means today, an
    /// unset end means today plus `days`.
    ///
    /// # Arguments
    ///
    /// * 'start' - start date as YYYY-MM-DD, if given
    /// * 'end' - end date as YYYY-MM-DD, if given
    /// * 'today' - current civil date
    /// * 'days' - length of the default range after today
    pub fn resolve(start: Option<&str>, end: Option<&str>, today: NaiveDate, days: i64) -> Result<Self, ReportError> {
        let start = match start {
            Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)?,
            None => today,
        };
        let end = match end {
            Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)?,
            None => TimeDelta::try_days(days)
                .and_then(|d| today.checked_add_signed(d))
                .ok_or_else(|| ReportError(format!("{} days after {} is out of range", days, today)))?,
        };

        if start > end {
            return Err(ReportError(format!("start date {} is after end date {}", start, end)));
        }

        Ok(DateRange { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Table filter on verdict status
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VerdictFilter {
    Ok,
    Warning,
    Caution,
}

impl VerdictFilter {
    pub fn key(&self) -> &'static str {
        match self {
            VerdictFilter::Ok => "ok",
            VerdictFilter::Warning => "warning",
            VerdictFilter::Caution => "caution",
        }
    }

    pub fn status(&self) -> Status {
        match self {
            VerdictFilter::Ok => Status::Permitted,
            VerdictFilter::Warning => Status::Prohibited,
            VerdictFilter::Caution => Status::Cautioned,
        }
    }
}

impl FromStr for VerdictFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(VerdictFilter::Ok),
            "warning" => Ok(VerdictFilter::Warning),
            "caution" => Ok(VerdictFilter::Caution),
            _ => Err(format!("unknown filter: {}", s)),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChartItem {
    Temp,
    Humidity,
    Wind,
    Rain,
}

impl ChartItem {
    pub const ALL: [ChartItem; 4] = [ChartItem::Temp, ChartItem::Humidity, ChartItem::Wind, ChartItem::Rain];

    pub fn key(&self) -> &'static str {
        match self {
            ChartItem::Temp => "temp",
            ChartItem::Humidity => "humidity",
            ChartItem::Wind => "wind",
            ChartItem::Rain => "rain",
        }
    }
}

impl FromStr for ChartItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temp" => Ok(ChartItem::Temp),
            "humidity" => Ok(ChartItem::Humidity),
            "wind" => Ok(ChartItem::Wind),
            "rain" => Ok(ChartItem::Rain),
            _ => Err(format!("unknown chart item: {}", s)),
        }
    }
}

/// Validated page request
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub selection: JobSelection,
    pub filter: Option<VerdictFilter>,
    pub graph_items: Vec<ChartItem>,
    pub range: DateRange,
    pub welding_method: Option<WeldingMethod>,
    pub preheated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisplayRow {
    pub time: String,
    pub temp: f64,
    pub humidity: f64,
    pub wind: f64,
    pub rain: f64,
    pub judgement: String,
    pub statuses: Vec<Status>,
}

impl DisplayRow {
    pub fn new(observation: &Observation, judgement: &Judgement) -> Self {
        DisplayRow {
            time: observation.time.format("%m-%d %H시").to_string(),
            temp: observation.temp,
            humidity: observation.humidity,
            wind: observation.wind,
            rain: observation.rain,
            judgement: judgement.to_string(),
            statuses: judgement.statuses(),
        }
    }
}

/// Full, unfiltered series for the chart
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub temps: Vec<f64>,
    pub humidities: Vec<f64>,
    pub winds: Vec<f64>,
    pub rains: Vec<f64>,
    pub judgments: Vec<String>,
}

impl ChartSeries {
    pub fn from_rows(rows: &[DisplayRow]) -> Self {
        let mut series = ChartSeries::default();
        for r in rows {
            series.labels.push(r.time.clone());
            series.temps.push(r.temp);
            series.humidities.push(r.humidity);
            series.winds.push(r.wind);
            series.rains.push(r.rain);
            series.judgments.push(r.judgement.clone());
        }
        series
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobOption {
    pub key: &'static str,
    pub label: &'static str,
}

/// Everything the page renderer needs
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub columns: Vec<&'static str>,
    pub rows: Vec<DisplayRow>,
    pub chart: ChartSeries,
    pub job_key: &'static str,
    pub job_name: &'static str,
    pub job_options: Vec<JobOption>,
    pub filter: Option<&'static str>,
    pub graph_items: Vec<&'static str>,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub welding_method: Option<&'static str>,
    pub preheated: bool,
    pub rule_set: RuleSet,
}
