// storefront/src/session.rs

//! The session cart list, carried in an encrypted (private) cookie.
//!
//! Handlers take a [`SessionCart`] argument to read the list and call
//! [`session_cookie`] to hand the updated list back to the browser.

use actix_web::cookie::{Cookie, CookieJar, Key, SameSite};
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use shopcart::SessionCartList;
use tracing::warn;

use crate::errors::{AppError, Result};
use crate::state::AppState;

/// Name of the cookie holding the encrypted session cart list.
pub const CART_COOKIE: &str = "cart";

/// The current request's session cart list. Empty when there is no cookie, or when the
/// cookie cannot be decrypted or parsed (a rotated key, a tampered value).
#[derive(Debug, Clone, Default)]
pub struct SessionCart(pub SessionCartList);

impl SessionCart {
  pub fn list(&self) -> &SessionCartList {
    &self.0
  }

  pub fn into_inner(self) -> SessionCartList {
    self.0
  }
}

impl FromRequest for SessionCart {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
      return ready(Err(AppError::Internal("AppState is not registered".to_string())));
    };
    ready(Ok(SessionCart(read_session_list(req, &state.session_key))))
  }
}

fn read_session_list(req: &HttpRequest, key: &Key) -> SessionCartList {
  let Some(raw) = req.cookie(CART_COOKIE) else {
    return SessionCartList::new();
  };

  let mut jar = CookieJar::new();
  jar.add_original(raw);
  let Some(decrypted) = jar.private(key).get(CART_COOKIE) else {
    warn!("Session cart cookie failed to decrypt; starting with an empty list.");
    return SessionCartList::new();
  };

  serde_json::from_str(decrypted.value()).unwrap_or_else(|e| {
    warn!(error = %e, "Session cart cookie is not a valid id list; starting with an empty list.");
    SessionCartList::new()
  })
}

/// Encrypts `list` into the `cart` cookie.
///
/// The list is not capped; past a few hundred ids the cookie outgrows the browser's
/// per-cookie size limit and is dropped, which reads back as an empty cart.
pub fn session_cookie(list: &SessionCartList, key: &Key) -> Result<Cookie<'static>> {
  let value = serde_json::to_string(list).map_err(|e| AppError::Session(e.to_string()))?;

  let mut jar = CookieJar::new();
  jar.private_mut(key).add(
    Cookie::build(CART_COOKIE, value)
      .path("/")
      .http_only(true)
      .same_site(SameSite::Lax)
      .finish(),
  );
  jar
    .get(CART_COOKIE)
    .cloned()
    .ok_or_else(|| AppError::Session("encrypted cart cookie was not produced".to_string()))
}
