use std::{fmt::{Debug, Display}, net::TcpListener};

use actix_web::{dev::Server, error::InternalError, http::StatusCode, web, App, HttpRequest, HttpServer};
use anyhow::Context;
use diesel::{r2d2::ConnectionManager, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use r2d2::Pool;
use tracing_actix_web::TracingLogger;

use crate::{
    auth::jwt::Tokenizer,
    configuration::{CatalogSettings, DatabaseSettings, Settings},
    routes::*,
    telemetry::spawn_blocking_with_tracing,
    utils::{json_error, DbPool}
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub struct Application{
    pub host: String,
    pub port: u16,
    pub server: Server
}

impl Application {
    /// Connects to the database, applies pending migrations and binds the
    /// listener. Port 0 picks a random free port, see `self.port`.
    pub async fn new(settings: Settings) -> Result<Self, anyhow::Error>{
        let pool = get_connection_pool(&settings.database).await?;
        run_migrations(&pool).await?;

        let listener = TcpListener::bind((settings.application.host.as_str(), settings.application.port))
            .context("Failed to bind address")?;
        let port = listener.local_addr()?.port();
        tracing::info!(host = %settings.application.host, port, "Listening");

        let server = run(
            listener,
            pool,
            Tokenizer::new(&settings.jwt),
            settings.catalog
        )?;

        Ok(Application{
            host: settings.application.host,
            port,
            server
        })
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub async fn get_connection_pool(settings: &DatabaseSettings) -> Result<DbPool, anyhow::Error> {
    let manager = ConnectionManager::<PgConnection>::new(settings.get_database_table_url());

    spawn_blocking_with_tracing(move || Pool::builder().build(manager))
        .await
        .context("Failed due to threadpool error")?
        .context("Failed to build connection pool")
}

#[tracing::instrument(
    "Running pending migrations",
    skip_all
)]
pub async fn run_migrations(pool: &DbPool) -> Result<(), anyhow::Error> {
    let pool = pool.clone();

    spawn_blocking_with_tracing(move || -> Result<(), anyhow::Error> {
        let mut conn = pool.get()
            .context("Failed to get connection from pool")?;

        let applied = conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
        tracing::info!(applied = applied.len(), "Migrations up to date");

        Ok(())
    })
    .await
    .context("Failed due to threadpool error")?
}

// Malformed bodies, queries and path segments get the same JSON error shape
fn reject_payload<E>(err: E, _req: &HttpRequest) -> actix_web::Error
where
    E: Debug + Display + 'static
{
    let message = err.to_string();
    InternalError::from_response(err, json_error(StatusCode::BAD_REQUEST, &message)).into()
}

fn run(
    listener: TcpListener,
    pool: DbPool,
    tokenizer: Tokenizer,
    catalog: CatalogSettings
) -> Result<Server, anyhow::Error> {
    let pool = web::Data::new(pool);
    let tokenizer = web::Data::new(tokenizer);
    let catalog = web::Data::new(catalog);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(reject_payload))
            .app_data(web::FormConfig::default().error_handler(reject_payload))
            .app_data(web::QueryConfig::default().error_handler(reject_payload))
            .app_data(web::PathConfig::default().error_handler(reject_payload))
            .app_data(pool.clone())
            .app_data(tokenizer.clone())
            .app_data(catalog.clone())
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(register))
                    .route("/login", web::post().to(login))
            )
            .service(
                web::scope("/books")
                    .route("", web::get().to(get_books))
                    .route("/featured", web::get().to(get_featured_books))
                    .route("/trending", web::get().to(get_trending_books))
                    .route("/{book_id}", web::get().to(get_book_by_id))
            )
            .route("/categories", web::get().to(get_categories))
            .service(
                web::scope("/cart")
                    .route("", web::get().to(get_user_cart))
                    .route("", web::post().to(post_cart_item))
                    .route("/{cart_item_id}", web::patch().to(update_cart_item_by_id))
                    .route("/{cart_item_id}", web::delete().to(delete_cart_item))
            )
            .service(
                web::scope("/wishlist")
                    .route("", web::get().to(get_user_wishlist))
                    .route("", web::post().to(post_wishlist_item))
                    .route("/{wishlist_item_id}", web::delete().to(delete_wishlist_item))
                    .route("/{wishlist_item_id}/move-to-cart", web::post().to(move_wishlist_item_to_cart))
            )
            .route("/checkout", web::post().to(post_checkout))
            .service(
                web::scope("/orders")
                    .route("", web::get().to(get_order))
                    .route("/{order_id}", web::get().to(get_single_order))
                    .route("/{order_id}/cancel", web::post().to(cancel_order_by_id))
            )
            .route("/profile", web::get().to(get_profile))
            .service(
                web::scope("/admin")
                    .route("/stats", web::get().to(get_stats))
                    .route("/books", web::post().to(post_book))
                    .route("/books/{book_id}", web::patch().to(update_book_by_id))
                    .route("/books/{book_id}", web::delete().to(delete_book_by_id))
                    .route("/orders/{order_id}/status", web::patch().to(update_order))
            )
            .default_service(web::to(not_found))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
