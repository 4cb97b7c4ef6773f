use crate::helpers::{LoginResponse, TestApp, TEST_PASSWORD};

#[actix_web::test]
async fn login_with_correct_credentials_returns_token(){
    let app = TestApp::spawn_app().await;
    let user = app.create_user_and_login().await;

    let response = app.post_login(&user.email, TEST_PASSWORD).await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response.json::<LoginResponse>().await.unwrap();
    assert!(!body.token.is_empty());

    let profile = app.get("/profile", Some(&body.token)).await;
    assert_eq!(profile.status().as_u16(), 200);
}

#[actix_web::test]
async fn login_with_wrong_password_is_unauthorized(){
    let app = TestApp::spawn_app().await;
    let user = app.create_user_and_login().await;

    let response = app.post_login(&user.email, "not the password").await;

    assert_eq!(response.status().as_u16(), 401);
}

#[actix_web::test]
async fn login_with_unknown_email_is_unauthorized(){
    let app = TestApp::spawn_app().await;

    let response = app.post_login("nobody@example.com", TEST_PASSWORD).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[actix_web::test]
async fn protected_routes_require_a_valid_token(){
    let app = TestApp::spawn_app().await;

    for path in ["/cart", "/wishlist", "/orders", "/profile"] {
        let missing = app.get(path, None).await;
        assert_eq!(missing.status().as_u16(), 401, "{} accepted a missing token", path);

        let invalid = app.get(path, Some("not.a.token")).await;
        assert_eq!(invalid.status().as_u16(), 401, "{} accepted an invalid token", path);
    }
}
