mod errors;
mod logging;
mod initialization;
mod handlers;
mod page;
mod manager_owm;
mod manager_feasibility;
mod manager_report;

use actix_web::{web, App, HttpServer};
use log::info;
use crate::errors::UnrecoverableError;
use crate::handlers::{assessment, index, AppState};
use crate::initialization::config;
use crate::logging::setup_logger;
use crate::manager_owm::OWM;

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;
    setup_logger(&config.general)?;

    let tz = config.weather.tz()?;
    let owm = OWM::new(&config.weather.base_url, &config.weather.api_key)?;
    let bind = (config.web_server.bind_address.clone(), config.web_server.bind_port);

    info!("starting siteweather on {}:{}, default location {}, timezone {}, rules {:?}",
          bind.0, bind.1, config.weather.city, config.weather.timezone, config.weather.rule_set);

    let state = web::Data::new(AppState { config, tz, owm });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(index)
            .service(assessment)
    })
        .bind(bind)?
        .run()
        .await?;

    Ok(())
}
