use actix_web::{get, route, web, HttpRequest, HttpResponse};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use log::{error, info};
use url::form_urlencoded;
use crate::errors::AppError;
use crate::initialization::Config;
use crate::manager_feasibility::models::{JobSelection, JobType, RuleSet, WeldingMethod};
use crate::manager_owm::models::Location;
use crate::manager_owm::OWM;
use crate::manager_report::models::{ChartItem, DateRange, PageContext, ReportRequest, VerdictFilter};
use crate::manager_report::{build_report, observations};
use crate::page;

pub struct AppState {
    pub config: Config,
    pub tz: Tz,
    pub owm: OWM,
}

/// Form fields from query string and body, repeated keys kept in order
fn form_pairs(query: &str, body: &[u8]) -> Vec<(String, String)> {
    form_urlencoded::parse(query.as_bytes())
        .chain(form_urlencoded::parse(body))
        .map(|(k, v)| (k.into_owned(), v.trim().to_string()))
        .collect()
}

/// First non-empty value for a key, empty form inputs count as unset
fn field<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.as_str())
}

fn location(pairs: &[(String, String)], default_city: &str) -> Result<Location, AppError> {
    match (field(pairs, "lat"), field(pairs, "lon")) {
        (None, None) => Ok(Location::City(default_city.to_string())),
        (Some(lat), Some(lon)) => {
            let lat: f64 = lat.parse()?;
            let lon: f64 = lon.parse()?;
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                return Err(AppError::BadRequest(format!("coordinates out of range: {}, {}", lat, lon)));
            }
            Ok(Location::Coordinates { lat, lon })
        }
        _ => Err(AppError::BadRequest("both lat and lon are required".to_string())),
    }
}

/// Validates form fields into a report request and the location to fetch for
///
/// # Arguments
///
/// * 'pairs' - decoded form fields
/// * 'today' - current civil date
/// * 'config' - application configuration
pub fn parse_request(pairs: &[(String, String)], today: NaiveDate, config: &Config) -> Result<(ReportRequest, Location), AppError> {
    let rule_set: RuleSet = config.weather.rule_set;

    let selection: JobSelection = field(pairs, "job_type")
        .unwrap_or(JobType::Concrete.key())
        .parse()
        .map_err(AppError::BadRequest)?;
    if let JobSelection::Single(job) = selection {
        if !rule_set.supports(job) {
            return Err(AppError::BadRequest(format!("job type {} is not available", job.key())));
        }
    }

    let filter = field(pairs, "filter")
        .map(|f| f.parse::<VerdictFilter>())
        .transpose()
        .map_err(AppError::BadRequest)?;

    let mut graph_items: Vec<ChartItem> = Vec::new();
    for (_, v) in pairs.iter().filter(|(k, v)| k == "graph_items" && !v.is_empty()) {
        let item: ChartItem = v.parse().map_err(AppError::BadRequest)?;
        if !graph_items.contains(&item) {
            graph_items.push(item);
        }
    }
    if graph_items.is_empty() {
        graph_items = ChartItem::ALL.to_vec();
    }

    let range = DateRange::resolve(
        field(pairs, "start_date"),
        field(pairs, "end_date"),
        today,
        config.weather.forecast_days,
    )?;

    let welding_method = field(pairs, "welding_method")
        .map(|m| m.parse::<WeldingMethod>())
        .transpose()
        .map_err(AppError::BadRequest)?;

    let preheated = match field(pairs, "preheated") {
        None | Some("off") | Some("false") | Some("0") => false,
        Some("on") | Some("true") | Some("1") => true,
        Some(other) => return Err(AppError::BadRequest(format!("invalid preheated flag: {}", other))),
    };

    let location = location(pairs, &config.weather.city)?;

    Ok((
        ReportRequest { selection, filter, graph_items, range, welding_method, preheated },
        location,
    ))
}

/// Validates the request, fetches the forecast and builds the page context
async fn page_context(req: &HttpRequest, body: &[u8], data: &AppState) -> Result<PageContext, AppError> {
    let pairs = form_pairs(req.query_string(), body);
    let today = Utc::now().with_timezone(&data.tz).date_naive();

    let (request, location) = parse_request(&pairs, today, &data.config)?;
    info!("{:?} at {}", request, location);

    let entries = data.owm.forecast(&location).await.map_err(|e| {
        error!("failed to get forecast: {}", e);
        AppError::from(e)
    })?;

    Ok(build_report(&observations(&entries, data.tz), &request, data.config.weather.rule_set, &location))
}

#[route("/", method = "GET", method = "POST")]
pub async fn index(req: HttpRequest, body: web::Bytes, data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let context = page_context(&req, &body, &data).await?;

    match page::render(&context) {
        Ok(html) => Ok(HttpResponse::Ok().content_type("text/html; charset=utf-8").body(html)),
        Err(e) => {
            error!("failed to render page: {}", e);
            Ok(HttpResponse::InternalServerError().finish())
        }
    }
}

#[get("/api/assessment")]
pub async fn assessment(req: HttpRequest, data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let context = page_context(&req, &[], &data).await?;

    Ok(HttpResponse::Ok().json(context))
}
