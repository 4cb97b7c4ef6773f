use bookstore::{
    configuration::{DatabaseSettings, Settings},
    models::Book,
    schema::{books, users},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
    utils::DbPool
};
use chrono::Utc;
use diesel::{r2d2::ConnectionManager, Connection, ExpressionMethods, PgConnection, RunQueryDsl};
use fake::{faker::internet::en::SafeEmail, Fake};
use once_cell::sync::Lazy;
use r2d2::Pool;
use reqwest::Response;
use serde::Deserialize;
use uuid::Uuid;

static LOGGER_INSTANCE: Lazy<()> = Lazy::new(|| {
    let log_level = "info".to_string();
    let name = "bookstore-test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name, log_level, std::io::stdout);
        init_subscriber(subscriber).expect("Failed to init subscriber");
    } else {
        let subscriber = get_subscriber(name, log_level, std::io::sink);
        init_subscriber(subscriber).expect("Failed to init subscriber");
    }
});

pub const TEST_PASSWORD: &str = "correct horse battery";

#[derive(Deserialize, Debug)]
pub struct LoginResponse{
    pub token: String
}

#[derive(Deserialize, Debug)]
pub struct RegisterResponse{
    pub user_id: Uuid
}

pub struct TestUser{
    pub user_id: Uuid,
    pub email: String,
    pub token: String
}

pub struct TestApp{
    pub host: String,
    pub port: u16,
    pub pool: DbPool,
    pub api_client: reqwest::Client
}

impl TestApp {
    // Fresh database per test, migrations are applied by the application
    fn create_db(settings: &DatabaseSettings) -> DbPool{
        let mut connection = PgConnection::establish(&settings.get_database_url())
                                .expect("Failed to connect to postgres database");

        let query = format!(r#"CREATE DATABASE "{}";"#, settings.name);
        diesel::sql_query(query)
            .execute(&mut connection)
            .expect("Failed to create test database");

        Pool::builder()
            .max_size(2)
            .build(ConnectionManager::<PgConnection>::new(settings.get_database_table_url()))
            .expect("Failed to build connection pool to test database")
    }

    pub fn get_app_url(&self) -> String{
        format!("http://{}:{}", self.host, self.port)
    }

    pub async fn spawn_app() -> TestApp{
        Lazy::force(&LOGGER_INSTANCE);

        let mut settings = Settings::get().expect("Failed to read configuration");
        settings.application.port = 0;
        settings.database.name = Uuid::new_v4().to_string();

        let pool = TestApp::create_db(&settings.database);

        let application = Application::new(settings)
                            .await
                            .expect("Failed to build application");

        let host = application.host.clone();
        let port = application.port;
        actix_web::rt::spawn(application.run_until_stopped());

        TestApp{
            host,
            port,
            pool,
            api_client: reqwest::Client::new()
        }
    }

    pub async fn post_register(&self, body: &serde_json::Value) -> Response{
        self.api_client.post(format!("{}/auth/register", self.get_app_url()))
            .form(body)
            .send()
            .await
            .expect("Failed to send request to register endpoint")
    }

    pub async fn post_login(&self, email: &str, password: &str) -> Response{
        self.api_client.post(format!("{}/auth/login", self.get_app_url()))
            .form(&serde_json::json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to send request to login endpoint")
    }

    pub async fn create_user_and_login(&self) -> TestUser{
        let email: String = SafeEmail().fake();

        let response = self.post_register(&serde_json::json!({
            "email": email,
            "password": TEST_PASSWORD,
            "confirm_password": TEST_PASSWORD
        })).await;
        assert_eq!(response.status().as_u16(), 201);
        let user_id = response.json::<RegisterResponse>().await.unwrap().user_id;

        let token = self.post_login(&email, TEST_PASSWORD)
            .await
            .json::<LoginResponse>()
            .await
            .unwrap()
            .token;

        TestUser{ user_id, email, token }
    }

    // Admins only exist through the database, the api never grants the role
    pub async fn create_admin_and_login(&self) -> TestUser{
        let user = self.create_user_and_login().await;

        let mut conn = self.pool.get().unwrap();
        diesel::update(users::table)
            .filter(users::user_id.eq(user.user_id))
            .set(users::is_admin.eq(true))
            .execute(&mut conn)
            .unwrap();

        let token = self.post_login(&user.email, TEST_PASSWORD)
            .await
            .json::<LoginResponse>()
            .await
            .unwrap()
            .token;

        TestUser{ token, ..user }
    }

    pub fn seed_book(&self, title: &str, author: &str, price_cents: i64, category: &str) -> Book{
        let book = Book{
            book_id: Uuid::new_v4(),
            title: title.to_string(),
            author: author.to_string(),
            price_cents,
            category: category.to_string(),
            description: format!("{} by {}", title, author),
            image_url: None,
            is_featured: false,
            is_trending: false,
            created_at: Utc::now()
        };

        let mut conn = self.pool.get().unwrap();
        diesel::insert_into(books::table)
            .values(&book)
            .execute(&mut conn)
            .unwrap();

        book
    }

    pub fn set_book_price(&self, book_id: Uuid, price_cents: i64){
        let mut conn = self.pool.get().unwrap();
        diesel::update(books::table)
            .filter(books::book_id.eq(book_id))
            .set(books::price_cents.eq(price_cents))
            .execute(&mut conn)
            .unwrap();
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Response{
        let mut request = self.api_client.get(format!("{}{}", self.get_app_url(), path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to send request")
    }

    pub async fn post_json(&self, path: &str, token: &str, body: &serde_json::Value) -> Response{
        self.api_client.post(format!("{}{}", self.get_app_url(), path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn patch_json(&self, path: &str, token: &str, body: &serde_json::Value) -> Response{
        self.api_client.patch(format!("{}{}", self.get_app_url(), path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn delete(&self, path: &str, token: &str) -> Response{
        self.api_client.delete(format!("{}{}", self.get_app_url(), path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn add_to_cart(&self, token: &str, book_id: Uuid, quantity: i32) -> Response{
        self.post_json("/cart", token, &serde_json::json!({
            "book_id": book_id,
            "quantity": quantity
        })).await
    }
}
