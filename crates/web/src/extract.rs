//! Request extractors whose rejections are reported as [`WebError`], so a
//! body, query string or path that fails to deserialize gets the same JSON
//! error shape as a failed validation.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::WebError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(WebError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(WebError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(WebError))]
pub struct ApiPath<T>(pub T);
