mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::analyze::routes as analyze_routes;
use crate::features::frontend::routes as frontend_routes;
use crate::features::health::{handlers::HealthState, routes as health_routes};
use crate::features::reports::{
    routes as reports_routes, PostgisReportStore, ReportService, ReportStore,
};
use crate::modules::classifier::RoboflowClient;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Persistence is optional: without DATABASE_URL the report endpoints answer 501
    let report_store: Option<Arc<dyn ReportStore>> = match config.database.url.as_deref() {
        Some(url) => {
            let pool = database::create_pool(url, &config.database)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;
            tracing::info!("Database connection pool created");

            let store = PostgisReportStore::new(pool);
            store
                .ensure_schema()
                .await
                .map_err(|e| anyhow::anyhow!("Schema bootstrap failed: {}", e))?;

            Some(Arc::new(store) as Arc<dyn ReportStore>)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, report persistence disabled");
            None
        }
    };

    let report_service = Arc::new(ReportService::new(report_store));
    tracing::info!("Report service initialized");

    let classifier = Arc::new(
        RoboflowClient::new(config.classifier.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize classifier client: {}", e))?,
    );
    if classifier.is_configured() {
        tracing::info!("Classifier client initialized (model: {})", classifier.model());
    } else {
        tracing::warn!("ROBOFLOW_API_KEY not set, image analysis disabled");
    }

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    let api_routes = Router::new()
        .merge(health_routes::routes(HealthState {
            report_service: Arc::clone(&report_service),
            classifier: Arc::clone(&classifier),
        }))
        .merge(reports_routes::routes(Arc::clone(&report_service)))
        .merge(analyze_routes::routes(
            Arc::clone(&classifier),
            config.app.max_request_body_size,
        ));

    let mut app = Router::new().merge(swagger).merge(api_routes);

    // Frontend pages and asset folders only, never the whole directory
    if let Some(dir) = config.app.static_dir.as_deref() {
        let dir = std::path::Path::new(dir);
        if dir.is_dir() {
            tracing::info!("Serving frontend from {}", dir.display());
            app = app.merge(frontend_routes::routes(dir));
        } else {
            tracing::warn!(
                "STATIC_DIR {} is not a directory, frontend disabled",
                dir.display()
            );
        }
    }

    if let Some(cors) = middleware::cors_layer(&config.app.cors_allowed_origins) {
        tracing::info!(
            "CORS enabled for origins: {}",
            config.app.cors_allowed_origins.join(", ")
        );
        app = app.layer(cors);
    }

    let app = app
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
