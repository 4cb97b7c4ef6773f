use bookstore::{db_interaction::StoreStats, models::Book};
use uuid::Uuid;

use crate::helpers::TestApp;

fn new_book() -> serde_json::Value{
    serde_json::json!({
        "title": "Dune",
        "author": "Frank Herbert",
        "price_cents": 1299,
        "category": "Sci-Fi",
        "description": "Desert planet",
        "is_featured": true
    })
}

#[actix_web::test]
async fn admin_routes_reject_regular_users(){
    let app = TestApp::spawn_app().await;
    let user = app.create_user_and_login().await;

    let stats = app.get("/admin/stats", Some(&user.token)).await;
    assert_eq!(stats.status().as_u16(), 403);

    let create = app.post_json("/admin/books", &user.token, &new_book()).await;
    assert_eq!(create.status().as_u16(), 403);

    let status = app.patch_json(
        &format!("/admin/orders/{}/status", Uuid::new_v4()),
        &user.token,
        &serde_json::json!({ "status": "shipped" })
    ).await;
    assert_eq!(status.status().as_u16(), 403);
}

#[actix_web::test]
async fn stats_count_books_orders_and_users(){
    let app = TestApp::spawn_app().await;
    let user = app.create_user_and_login().await;
    let admin = app.create_admin_and_login().await;
    let dune = app.seed_book("Dune", "Frank Herbert", 1299, "Sci-Fi");
    app.seed_book("Emma", "Jane Austen", 899, "Classics");

    app.add_to_cart(&user.token, dune.book_id, 1).await;
    app.post_json("/checkout", &user.token, &serde_json::json!({})).await;

    let stats = app.get("/admin/stats", Some(&admin.token))
        .await
        .json::<StoreStats>()
        .await
        .unwrap();

    assert_eq!(stats, StoreStats{ total_books: 2, total_orders: 1, total_users: 2 });
}

#[actix_web::test]
async fn admin_manages_books(){
    let app = TestApp::spawn_app().await;
    let admin = app.create_admin_and_login().await;

    let created = app.post_json("/admin/books", &admin.token, &new_book()).await;
    assert_eq!(created.status().as_u16(), 201);
    let book = created.json::<Book>().await.unwrap();
    assert!(book.is_featured);

    let path = format!("/admin/books/{}", book.book_id);
    let updated = app.patch_json(&path, &admin.token, &serde_json::json!({ "price_cents": 999 })).await;
    assert_eq!(updated.status().as_u16(), 200);
    assert_eq!(updated.json::<Book>().await.unwrap().price_cents, 999);

    assert_eq!(app.delete(&path, &admin.token).await.status().as_u16(), 204);
    assert_eq!(app.get(&format!("/books/{}", book.book_id), None).await.status().as_u16(), 404);
    assert_eq!(app.delete(&path, &admin.token).await.status().as_u16(), 404);
}

#[actix_web::test]
async fn invalid_books_are_rejected(){
    let app = TestApp::spawn_app().await;
    let admin = app.create_admin_and_login().await;

    let mut negative = new_book();
    negative["price_cents"] = serde_json::json!(-5);
    let mut blank_title = new_book();
    blank_title["title"] = serde_json::json!("   ");
    let mut reserved_category = new_book();
    reserved_category["category"] = serde_json::json!("all");

    for body in [negative, blank_title, reserved_category] {
        let response = app.post_json("/admin/books", &admin.token, &body).await;
        assert_eq!(response.status().as_u16(), 400, "{} was accepted", body);
    }

    let book = app.seed_book("Emma", "Jane Austen", 899, "Classics");
    let empty_update = app.patch_json(
        &format!("/admin/books/{}", book.book_id),
        &admin.token,
        &serde_json::json!({})
    ).await;
    assert_eq!(empty_update.status().as_u16(), 400);
}

#[actix_web::test]
async fn ordered_book_cannot_be_deleted(){
    let app = TestApp::spawn_app().await;
    let user = app.create_user_and_login().await;
    let admin = app.create_admin_and_login().await;
    let dune = app.seed_book("Dune", "Frank Herbert", 1299, "Sci-Fi");

    app.add_to_cart(&user.token, dune.book_id, 1).await;
    app.post_json("/checkout", &user.token, &serde_json::json!({})).await;

    let response = app.delete(&format!("/admin/books/{}", dune.book_id), &admin.token).await;

    assert_eq!(response.status().as_u16(), 409);
}

#[actix_web::test]
async fn unknown_order_status_update_is_not_found(){
    let app = TestApp::spawn_app().await;
    let admin = app.create_admin_and_login().await;

    let response = app.patch_json(
        &format!("/admin/orders/{}/status", Uuid::new_v4()),
        &admin.token,
        &serde_json::json!({ "status": "delivered" })
    ).await;
    assert_eq!(response.status().as_u16(), 404);

    let bad_status = app.patch_json(
        &format!("/admin/orders/{}/status", Uuid::new_v4()),
        &admin.token,
        &serde_json::json!({ "status": "lost" })
    ).await;
    assert_eq!(bad_status.status().as_u16(), 400);
}

#[actix_web::test]
async fn oversized_prices_are_rejected_and_cart_stays_readable(){
    let app = TestApp::spawn_app().await;
    let admin = app.create_admin_and_login().await;
    let user = app.create_user_and_login().await;
    let oversized = i64::MAX / 2 + 1;

    let mut body = new_book();
    body["price_cents"] = serde_json::json!(oversized);
    let created = app.post_json("/admin/books", &admin.token, &body).await;
    assert_eq!(created.status().as_u16(), 400);

    let book = app.seed_book("Emma", "Jane Austen", 899, "Classics");
    app.add_to_cart(&user.token, book.book_id, 2).await;

    let updated = app.patch_json(
        &format!("/admin/books/{}", book.book_id),
        &admin.token,
        &serde_json::json!({ "price_cents": oversized })
    ).await;
    assert_eq!(updated.status().as_u16(), 400);

    let cart = app.get("/cart", Some(&user.token)).await;
    assert_eq!(cart.status().as_u16(), 200);
}
