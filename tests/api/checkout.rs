use bookstore::{db_interaction::{CartView, OrderWithItems}, schema::{cart_items, order_items, orders}};
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};

use crate::helpers::TestApp;

#[actix_web::test]
async fn checkout_of_empty_cart_is_refused(){
    let app = TestApp::spawn_app().await;
    let user = app.create_user_and_login().await;

    let response = app.post_json("/checkout", &user.token, &serde_json::json!({})).await;

    assert_eq!(response.status().as_u16(), 400);
    let body = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["error"], "cart is empty");

    let mut conn = app.pool.get().unwrap();
    let order_count: i64 = orders::table.count().get_result(&mut conn).unwrap();
    assert_eq!(order_count, 0);
}

#[actix_web::test]
async fn checkout_places_order_and_clears_cart(){
    let app = TestApp::spawn_app().await;
    let user = app.create_user_and_login().await;
    let dune = app.seed_book("Dune", "Frank Herbert", 1299, "Sci-Fi");
    let emma = app.seed_book("Emma", "Jane Austen", 899, "Classics");

    app.add_to_cart(&user.token, dune.book_id, 2).await;
    app.add_to_cart(&user.token, emma.book_id, 1).await;

    let response = app.post_json("/checkout", &user.token, &serde_json::json!({})).await;
    assert_eq!(response.status().as_u16(), 201);

    let order = response.json::<OrderWithItems>().await.unwrap();
    assert_eq!(order.user_id, user.user_id);
    assert_eq!(order.status, "pending");
    assert_eq!(order.total.cents(), 2 * 1299 + 899);
    assert_eq!(order.items.len(), 2);

    let cart = app.get("/cart", Some(&user.token))
        .await
        .json::<CartView>()
        .await
        .unwrap();
    assert!(cart.items.is_empty());

    let mut conn = app.pool.get().unwrap();
    let item_count: i64 = order_items::table.count().get_result(&mut conn).unwrap();
    assert_eq!(item_count, 2);
}

#[actix_web::test]
async fn order_keeps_price_paid_after_price_change(){
    let app = TestApp::spawn_app().await;
    let user = app.create_user_and_login().await;
    let dune = app.seed_book("Dune", "Frank Herbert", 1299, "Sci-Fi");

    app.add_to_cart(&user.token, dune.book_id, 1).await;
    let placed = app.post_json("/checkout", &user.token, &serde_json::json!({}))
        .await
        .json::<OrderWithItems>()
        .await
        .unwrap();

    app.set_book_price(dune.book_id, 2500);

    let order = app.get(&format!("/orders/{}", placed.order_id), Some(&user.token))
        .await
        .json::<OrderWithItems>()
        .await
        .unwrap();

    assert_eq!(order.total.cents(), 1299);
    assert_eq!(order.items[0].price.cents(), 1299);
    assert_eq!(order.items[0].book.price_cents, 2500);
}

#[actix_web::test]
async fn second_checkout_finds_empty_cart(){
    let app = TestApp::spawn_app().await;
    let user = app.create_user_and_login().await;
    let dune = app.seed_book("Dune", "Frank Herbert", 1299, "Sci-Fi");

    app.add_to_cart(&user.token, dune.book_id, 1).await;

    let empty = serde_json::json!({});
    let (first, second) = futures_util::join!(
        app.post_json("/checkout", &user.token, &empty),
        app.post_json("/checkout", &user.token, &empty)
    );

    let mut statuses = vec![first.status().as_u16(), second.status().as_u16()];
    statuses.sort();
    assert_eq!(statuses, vec![201, 400]);

    let mut conn = app.pool.get().unwrap();
    let order_count: i64 = orders::table.count().get_result(&mut conn).unwrap();
    assert_eq!(order_count, 1);
}

#[actix_web::test]
async fn lines_added_during_checkout_are_kept_or_ordered(){
    let app = TestApp::spawn_app().await;
    let user = app.create_user_and_login().await;
    let dune = app.seed_book("Dune", "Frank Herbert", 1299, "Sci-Fi");
    let emma = app.seed_book("Emma", "Jane Austen", 899, "Classics");
    let empty = serde_json::json!({});

    let rounds = 20;
    for round in 0..rounds {
        app.add_to_cart(&user.token, dune.book_id, 1).await;

        let (checkout, added) = futures_util::join!(
            app.post_json("/checkout", &user.token, &empty),
            app.add_to_cart(&user.token, emma.book_id, 1)
        );

        assert_eq!(checkout.status().as_u16(), 201, "round {}", round);
        assert_eq!(added.status().as_u16(), 200, "round {}", round);
    }

    let mut conn = app.pool.get().unwrap();
    let in_cart: Vec<i32> = cart_items::table
        .filter(cart_items::book_id.eq(emma.book_id))
        .select(cart_items::quantity)
        .load(&mut conn)
        .unwrap();
    let ordered: Vec<i32> = order_items::table
        .filter(order_items::book_id.eq(emma.book_id))
        .select(order_items::quantity)
        .load(&mut conn)
        .unwrap();

    assert_eq!(in_cart.iter().sum::<i32>() + ordered.iter().sum::<i32>(), rounds);
}
