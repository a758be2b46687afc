// storefront/tests/http_tests.rs

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{web, App};
use serde_json::{json, Value};
use shopcart::NewItem;
use storefront::config::AppConfig;
use storefront::session::CART_COOKIE;
use storefront::state::AppState;
use storefront::web::configure_app_routes;
use storefront::{build_app_state, db};

struct Reply {
  status: StatusCode,
  cart_cookie: Option<Cookie<'static>>,
  body: Value,
}

async fn reply(resp: ServiceResponse) -> Reply {
  let status = resp.status();
  let cart_cookie = resp
    .response()
    .cookies()
    .find(|c| c.name() == CART_COOKIE)
    .map(|c| c.into_owned());
  let body: Value = test::read_body_json(resp).await;
  Reply {
    status,
    cart_cookie,
    body,
  }
}

fn test_config() -> AppConfig {
  AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 0,
    database_url: "sqlite::memory:".to_string(),
    session_secret: Some("a-test-session-secret-that-is-long-enough-to-derive".to_string()),
    seed_db: false,
  }
}

async fn test_state() -> AppState {
  let config = test_config();
  let pool = db::connect(&config.database_url).await.unwrap();
  build_app_state(&config, pool).await.unwrap()
}

async fn add_item(state: &AppState, title: &str, price: i64) -> i64 {
  state
    .catalog()
    .create(NewItem {
      title: title.to_string(),
      price,
      description: format!("{} description", title),
      image: format!("{}.png", title.to_lowercase()),
    })
    .await
    .unwrap()
    .id
}

fn post(uri: &str, cookie: &Option<Cookie<'static>>) -> TestRequest {
  let req = TestRequest::post().uri(uri);
  match cookie {
    Some(c) => req.cookie(c.clone()),
    None => req,
  }
}

fn get(uri: &str, cookie: &Option<Cookie<'static>>) -> TestRequest {
  let req = TestRequest::get().uri(uri);
  match cookie {
    Some(c) => req.cookie(c.clone()),
    None => req,
  }
}

#[actix_web::test]
async fn health_reports_ok() {
  let state = test_state().await;
  let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure_app_routes)).await;

  let r = reply(test::call_service(&app, TestRequest::get().uri("/health").to_request()).await).await;
  assert_eq!(r.status, StatusCode::OK);
  assert_eq!(r.body, json!({ "status": "ok" }));
}

#[actix_web::test]
async fn add_twice_then_render_and_step_down_to_nothing() {
  let state = test_state().await;
  let a = add_item(&state, "Mug", 100).await;
  let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure_app_routes)).await;

  let first = reply(test::call_service(&app, post(&format!("/add_to_cart/{}", a), &None).to_request()).await).await;
  assert_eq!(first.status, StatusCode::OK);
  assert_eq!(first.body["notice"], json!({ "kind": "success", "message": "item added" }));
  assert!(first.cart_cookie.is_some());

  let second = reply(test::call_service(&app, post(&format!("/add_to_cart/{}", a), &first.cart_cookie).to_request()).await).await;
  assert_eq!(second.body["cart_size"], 2);
  assert_eq!(second.body["ledger_entry"]["quantity"], 2);
  let cookie = second.cart_cookie;

  let view = reply(test::call_service(&app, get("/cart", &cookie).to_request()).await).await;
  assert_eq!(view.body["total"], 200);
  assert_eq!(view.body["lines"].as_array().unwrap().len(), 1);
  assert_eq!(view.body["lines"][0]["quantity"], 2);

  let down = reply(test::call_service(&app, post(&format!("/cart/decrease_quantity/{}", a), &cookie).to_request()).await).await;
  assert_eq!(down.body["outcome"], "decremented");
  assert_eq!(down.body["cart"]["total"], 100);

  let gone = reply(test::call_service(&app, post(&format!("/cart/decrease_quantity/{}", a), &cookie).to_request()).await).await;
  assert_eq!(gone.body["outcome"], "removed");
  assert_eq!(gone.body["cart"]["total"], 0);
  assert!(gone.body["cart"]["lines"].as_array().unwrap().is_empty());

  let again = reply(test::call_service(&app, post(&format!("/cart/decrease_quantity/{}", a), &cookie).to_request()).await).await;
  assert_eq!(again.status, StatusCode::OK);
  assert_eq!(again.body["outcome"], "no_entry");
}

#[actix_web::test]
async fn adding_unknown_item_is_404_and_leaves_cookie_alone() {
  let state = test_state().await;
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  let r = reply(test::call_service(&app, post("/add_to_cart/42", &None).to_request()).await).await;
  assert_eq!(r.status, StatusCode::NOT_FOUND);
  assert_eq!(r.body["notice"]["message"], "item not found in catalog");
  assert!(r.cart_cookie.is_none());
  assert!(state.cart.ledger().entries().await.unwrap().is_empty());
}

#[actix_web::test]
async fn removing_a_doubled_item_takes_one_occurrence() {
  let state = test_state().await;
  let a = add_item(&state, "Mug", 100).await;
  let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure_app_routes)).await;

  let mut cookie = None;
  for _ in 0..2 {
    cookie = reply(test::call_service(&app, post(&format!("/add_to_cart/{}", a), &cookie).to_request()).await)
      .await
      .cart_cookie;
  }

  let removed = reply(test::call_service(&app, post(&format!("/cart/remove/{}", a), &cookie).to_request()).await).await;
  assert_eq!(removed.status, StatusCode::OK);
  assert_eq!(removed.body["notice"]["message"], "item removed");
  assert_eq!(removed.body["cart_size"], 1);
  assert_eq!(removed.body["ledger_entry"]["quantity"], 1);

  let view = reply(test::call_service(&app, get("/cart", &removed.cart_cookie).to_request()).await).await;
  assert_eq!(view.body["lines"][0]["id"], a);
  assert_eq!(view.body["total"], 100);
}

#[actix_web::test]
async fn removing_an_item_not_in_the_session_reports_it() {
  let state = test_state().await;
  let a = add_item(&state, "Mug", 100).await;
  let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure_app_routes)).await;

  let r = reply(test::call_service(&app, post(&format!("/cart/remove/{}", a), &None).to_request()).await).await;
  assert_eq!(r.status, StatusCode::NOT_FOUND);
  assert_eq!(r.body["notice"], json!({ "kind": "error", "message": "item not found in cart" }));
  assert_eq!(r.body["cart_size"], 0);
}

#[actix_web::test]
async fn reset_keeps_lines_at_zero() {
  let state = test_state().await;
  let a = add_item(&state, "Mug", 100).await;
  let b = add_item(&state, "Towel", 250).await;
  let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure_app_routes)).await;

  let mut cookie = None;
  for id in [a, b] {
    cookie = reply(test::call_service(&app, post(&format!("/add_to_cart/{}", id), &cookie).to_request()).await)
      .await
      .cart_cookie;
  }
  let up = reply(test::call_service(&app, post(&format!("/cart/increase_quantity/{}", b), &cookie).to_request()).await).await;
  assert_eq!(up.body["ledger_entry"]["quantity"], 2);
  assert_eq!(up.body["cart"]["total"], 600);

  let reset = reply(test::call_service(&app, post("/cart/reset_quantity", &cookie).to_request()).await).await;
  assert_eq!(reset.body["rows_reset"], 2);
  assert_eq!(reset.body["cart"]["total"], 0);
  let lines = reset.body["cart"]["lines"].as_array().unwrap();
  assert_eq!(lines.len(), 2);
  assert!(lines.iter().all(|line| line["quantity"] == 0));
}

#[actix_web::test]
async fn tampered_cookie_reads_as_an_empty_cart() {
  let state = test_state().await;
  let a = add_item(&state, "Mug", 100).await;
  let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure_app_routes)).await;

  let added = reply(test::call_service(&app, post(&format!("/add_to_cart/{}", a), &None).to_request()).await).await;
  assert!(added.cart_cookie.is_some());

  let forged = Some(Cookie::new(CART_COOKIE, format!("[{}]", a)));
  let view = reply(test::call_service(&app, get("/cart", &forged).to_request()).await).await;
  assert_eq!(view.status, StatusCode::OK);
  assert!(view.body["lines"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn catalog_admin_round_trip() {
  let state = test_state().await;
  let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure_app_routes)).await;

  let bad = TestRequest::post()
    .uri("/create")
    .set_json(json!({ "title": "  ", "price": 10, "description": "d", "image": "i.png" }))
    .to_request();
  let r = reply(test::call_service(&app, bad).await).await;
  assert_eq!(r.status, StatusCode::BAD_REQUEST);
  assert_eq!(r.body["error"], "Item title cannot be empty.");

  let mut ids = Vec::new();
  for (title, price) in [("Board", 2400), ("Mug", 450), ("Towel", 900)] {
    let req = TestRequest::post()
      .uri("/create")
      .set_json(json!({ "title": title, "price": price, "description": "d", "image": "i.png" }))
      .to_request();
    let r = reply(test::call_service(&app, req).await).await;
    assert_eq!(r.status, StatusCode::CREATED);
    assert_eq!(r.body["item"]["is_active"], true);
    ids.push(r.body["item"]["id"].as_i64().unwrap());
  }

  let index = reply(test::call_service(&app, TestRequest::get().uri("/").to_request()).await).await;
  let titles: Vec<&str> = index.body["items"]
    .as_array()
    .unwrap()
    .iter()
    .map(|item| item["title"].as_str().unwrap())
    .collect();
  assert_eq!(titles, vec!["Mug", "Towel", "Board"]);

  let off = reply(test::call_service(&app, post(&format!("/deactivate/{}", ids[0]), &None).to_request()).await).await;
  assert_eq!(off.body["item"]["is_active"], false);
  let on = reply(test::call_service(&app, post(&format!("/activate/{}", ids[0]), &None).to_request()).await).await;
  assert_eq!(on.body["item"]["is_active"], true);
  let missing = reply(test::call_service(&app, post("/activate/999", &None).to_request()).await).await;
  assert_eq!(missing.status, StatusCode::NOT_FOUND);

  let deleted = reply(test::call_service(&app, post(&format!("/delete_item/{}", ids[1]), &None).to_request()).await).await;
  assert_eq!(deleted.body["notice"]["message"], "item deleted");
  let twice = reply(test::call_service(&app, post(&format!("/delete_item/{}", ids[1]), &None).to_request()).await).await;
  assert_eq!(twice.status, StatusCode::NOT_FOUND);

  let admin = reply(test::call_service(&app, TestRequest::get().uri("/create").to_request()).await).await;
  assert_eq!(admin.body["items"].as_array().unwrap().len(), 2);

  let wiped = reply(test::call_service(&app, TestRequest::get().uri("/delete_all_items").to_request()).await).await;
  assert_eq!(wiped.body["deleted"], 2);
}

#[actix_web::test]
async fn deleted_item_drops_out_of_the_cart() {
  let state = test_state().await;
  let a = add_item(&state, "Mug", 100).await;
  let b = add_item(&state, "Towel", 250).await;
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  let mut cookie = None;
  for id in [a, b] {
    cookie = reply(test::call_service(&app, post(&format!("/add_to_cart/{}", id), &cookie).to_request()).await)
      .await
      .cart_cookie;
  }
  reply(test::call_service(&app, post(&format!("/delete_item/{}", a), &None).to_request()).await).await;

  let view = reply(test::call_service(&app, get("/cart", &cookie).to_request()).await).await;
  let lines = view.body["lines"].as_array().unwrap();
  assert_eq!(lines.len(), 1);
  assert_eq!(lines[0]["id"], b);
  assert_eq!(view.body["total"], 250);
  // The orphaned ledger row is left in place.
  assert!(state.cart.ledger().entry(a).await.unwrap().is_some());
}

#[actix_web::test]
async fn removing_the_last_unit_keeps_a_zero_row_in_sqlite() {
  let state = test_state().await;
  let a = add_item(&state, "Mug", 100).await;
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  let added = reply(test::call_service(&app, post(&format!("/add_to_cart/{}", a), &None).to_request()).await).await;
  let removed = reply(test::call_service(&app, post(&format!("/cart/remove/{}", a), &added.cart_cookie).to_request()).await).await;
  assert_eq!(removed.status, StatusCode::OK);
  assert_eq!(removed.body["cart_size"], 0);
  assert_eq!(removed.body["ledger_entry"]["quantity"], 0);

  let entries = state.cart.ledger().entries().await.unwrap();
  assert_eq!(entries.len(), 1);
  assert_eq!(entries[0].item_id, a);
  assert_eq!(entries[0].quantity, 0);

  // The session no longer lists the id, so nothing renders.
  let view = reply(test::call_service(&app, get("/cart", &removed.cart_cookie).to_request()).await).await;
  assert!(view.body["lines"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn oversized_cart_amount_is_422_not_a_crash() {
  let state = test_state().await;
  let a = add_item(&state, "Yacht", i64::MAX / 2 + 1).await;
  let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(configure_app_routes)).await;

  let mut cookie = None;
  for _ in 0..2 {
    cookie = reply(test::call_service(&app, post(&format!("/add_to_cart/{}", a), &cookie).to_request()).await)
      .await
      .cart_cookie;
  }

  let view = reply(test::call_service(&app, get("/cart", &cookie).to_request()).await).await;
  assert_eq!(view.status, StatusCode::UNPROCESSABLE_ENTITY);
  assert!(view.body["error"].as_str().unwrap().contains("too large"));
}
