mod config;
mod errors;
mod handlers;
mod models;
mod storage;
mod utils;

use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use log::info;
use crate::config::Config;
use crate::storage::EmployeeStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    info!(
        "Employee store: {} (fallback {})",
        config.project_file.display(),
        config.tmp_file.display()
    );

    // One store shared by every worker so appends stay serialised.
    let store = web::Data::new(EmployeeStore::from_config(&config));

    info!("Starting server at {}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(handlers::default_headers())
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .configure(handlers::configure)
    })
    .bind(config.bind_address.as_str())?
    .run()
    .await
}
