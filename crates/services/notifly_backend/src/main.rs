use axum::{routing::get, Router};
use notifly_config::load_config;
use notifly_dispatch::routes as dispatch_routes;
use tokio::net::TcpListener;

mod service_factory;
use service_factory::{build_push_relay, build_registration_store};

#[tokio::main]
async fn main() {
    notifly_common::logging::init();

    let config = load_config().expect("Failed to load config");

    let store = build_registration_store(&config).expect("Failed to build registration store");
    let relay = build_push_relay(&config).expect("Failed to build push relay client");
    let dispatch_config = config.dispatch.clone().unwrap_or_default();

    #[allow(unused_mut)] // mutated only when the openapi feature is enabled
    let mut app = Router::new()
        .route("/", get(|| async { "Welcome to the notifly API!" }))
        .merge(dispatch_routes(&dispatch_config, store, relay));

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use notifly_dispatch::openapi::DispatchApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        let openapi_doc = DispatchApiDoc::openapi();
        tracing::info!("Adding Swagger UI at /docs");

        let swagger_ui = SwaggerUi::new("/docs").url("/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.expect("Failed to bind address");
    tracing::info!("Starting server at http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
