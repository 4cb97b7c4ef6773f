use bookstore::db_interaction::UserProfileInfo;

use crate::helpers::TestApp;

#[actix_web::test]
async fn profile_shows_account_and_order_count(){
    let app = TestApp::spawn_app().await;
    let user = app.create_user_and_login().await;
    let book = app.seed_book("Dune", "Frank Herbert", 1299, "Sci-Fi");

    let before = app.get("/profile", Some(&user.token))
        .await
        .json::<UserProfileInfo>()
        .await
        .unwrap();
    assert_eq!(before.user_id, user.user_id);
    assert_eq!(before.email, user.email.to_lowercase());
    assert!(!before.is_admin);
    assert_eq!(before.order_count, 0);

    app.add_to_cart(&user.token, book.book_id, 1).await;
    let checkout = app.post_json("/checkout", &user.token, &serde_json::json!({})).await;
    assert_eq!(checkout.status().as_u16(), 201);

    let after = app.get("/profile", Some(&user.token))
        .await
        .json::<UserProfileInfo>()
        .await
        .unwrap();
    assert_eq!(after.order_count, 1);
}
