use bookstore::{
    db_interaction::{CartView, WishlistLine},
    models::WishlistItem
};
use uuid::Uuid;

use crate::helpers::TestApp;

async fn get_wishlist(app: &TestApp, token: &str) -> Vec<WishlistLine>{
    let response = app.get("/wishlist", Some(token)).await;
    assert_eq!(response.status().as_u16(), 200);
    response.json::<Vec<WishlistLine>>().await.unwrap()
}

async fn add_to_wishlist(app: &TestApp, token: &str, book_id: Uuid) -> reqwest::Response{
    app.post_json("/wishlist", token, &serde_json::json!({ "book_id": book_id })).await
}

#[actix_web::test]
async fn adding_same_book_twice_keeps_one_entry(){
    let app = TestApp::spawn_app().await;
    let user = app.create_user_and_login().await;
    let dune = app.seed_book("Dune", "Frank Herbert", 1299, "Sci-Fi");

    let first = add_to_wishlist(&app, &user.token, dune.book_id)
        .await
        .json::<WishlistItem>()
        .await
        .unwrap();
    let second = add_to_wishlist(&app, &user.token, dune.book_id)
        .await
        .json::<WishlistItem>()
        .await
        .unwrap();

    assert_eq!(first.wishlist_item_id, second.wishlist_item_id);

    let wishlist = get_wishlist(&app, &user.token).await;
    assert_eq!(wishlist.len(), 1);
    assert_eq!(wishlist[0].book.title, "Dune");
}

#[actix_web::test]
async fn adding_unknown_book_is_not_found(){
    let app = TestApp::spawn_app().await;
    let user = app.create_user_and_login().await;

    let response = add_to_wishlist(&app, &user.token, Uuid::new_v4()).await;

    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn remove_deletes_only_own_entry(){
    let app = TestApp::spawn_app().await;
    let owner = app.create_user_and_login().await;
    let other = app.create_user_and_login().await;
    let dune = app.seed_book("Dune", "Frank Herbert", 1299, "Sci-Fi");

    let item = add_to_wishlist(&app, &owner.token, dune.book_id)
        .await
        .json::<WishlistItem>()
        .await
        .unwrap();
    let path = format!("/wishlist/{}", item.wishlist_item_id);

    assert_eq!(app.delete(&path, &other.token).await.status().as_u16(), 404);
    assert_eq!(app.delete(&path, &owner.token).await.status().as_u16(), 204);
    assert!(get_wishlist(&app, &owner.token).await.is_empty());
}

#[actix_web::test]
async fn move_to_cart_moves_book(){
    let app = TestApp::spawn_app().await;
    let user = app.create_user_and_login().await;
    let dune = app.seed_book("Dune", "Frank Herbert", 1299, "Sci-Fi");

    app.add_to_cart(&user.token, dune.book_id, 2).await;
    let item = add_to_wishlist(&app, &user.token, dune.book_id)
        .await
        .json::<WishlistItem>()
        .await
        .unwrap();

    let response = app.post_json(
        &format!("/wishlist/{}/move-to-cart", item.wishlist_item_id),
        &user.token,
        &serde_json::json!({})
    ).await;
    assert_eq!(response.status().as_u16(), 200);

    assert!(get_wishlist(&app, &user.token).await.is_empty());

    let cart = app.get("/cart", Some(&user.token))
        .await
        .json::<CartView>()
        .await
        .unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 3);

    let again = app.post_json(
        &format!("/wishlist/{}/move-to-cart", item.wishlist_item_id),
        &user.token,
        &serde_json::json!({})
    ).await;
    assert_eq!(again.status().as_u16(), 404);
}
