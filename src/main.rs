use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

use leavedesk::config::Config;
use leavedesk::db::init_store;
use leavedesk::docs::ApiDoc;
use leavedesk::routes;
use leavedesk::service::LeaveService;
use leavedesk::store::EmployeeStore;
use leavedesk::utils::employee_cache;

use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Leave Desk API"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let store = init_store(&config.database_url).await;

    let service_data = Data::new(LeaveService::new(store.clone()));
    let employee_store: Arc<dyn EmployeeStore> = store.clone();
    let employee_data = Data::from(employee_store);

    // Warm the name cache in the background; the queue degrades gracefully
    // until it finishes.
    let warmup_store = store.clone();
    actix_web::rt::spawn(async move {
        if let Err(e) = employee_cache::warmup_employee_cache(warmup_store.as_ref(), 250).await {
            eprintln!("Failed to warmup employee name cache: {:?}", e);
        }
    });

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(service_data.clone())
            .app_data(employee_data.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
