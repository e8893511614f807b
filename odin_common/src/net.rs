/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! common utility functions for JSON-over-HTTP service requests

use std::time::Duration;
use reqwest::{header::{HeaderMap,HeaderValue,ACCEPT,AUTHORIZATION,CONTENT_TYPE}, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned,Serialize};
use tracing::debug;

use crate::define_error;

define_error!{ pub OdinNetError =
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    NotFoundError(String) : "not found {0}",
    UnauthorizedError(String) : "not authorized: {0}",
    ServiceError(String) : "service error: {0}",
    OpFailed(String) : "operation failed: {0}"
}

pub type Result<T> = std::result::Result<T, OdinNetError>;

impl OdinNetError {
    /// true if the remote side could not be reached or did not respond properly
    pub fn is_unavailable (&self)->bool {
        match self {
            OdinNetError::HttpError(e) => e.is_connect() || e.is_timeout() || e.is_request() || e.is_body() || e.is_decode(),
            OdinNetError::ServiceError(_) => true,
            _ => false
        }
    }

    pub fn is_unauthorized (&self)->bool {
        matches!( self, OdinNetError::UnauthorizedError(_))
    }
}

pub fn build_client (timeout: Duration)->Result<Client> {
    Ok( Client::builder().timeout( timeout).build()? )
}

pub fn bearer_headers (token: &str)->Result<HeaderMap> {
    let mut hm = HeaderMap::new();
    let v = HeaderValue::from_str( &format!("Bearer {token}")).map_err(|e| OdinNetError::OpFailed(e.to_string()))?;
    hm.insert( AUTHORIZATION, v);
    Ok(hm)
}

/// map non-success status codes into errors
pub fn check_response (url: &str, response: Response) -> Result<Response> {
    match response.status() {
        s if s.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err( OdinNetError::NotFoundError(url.to_string())),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err( OdinNetError::UnauthorizedError(format!("{url} ({})", response.status()))),
        s if s.is_server_error() || s == StatusCode::TOO_MANY_REQUESTS => Err( OdinNetError::ServiceError(format!("{url} responded with {s}"))),
        other => Err( OdinNetError::OpFailed(format!("response status {other:?}")))
    }
}

async fn send (url: &str, req: RequestBuilder) -> Result<Response> {
    debug!("request {url}");
    let response = req.send().await?;
    check_response( url, response)
}

/// GET request with url query parameters and JSON response
pub async fn get_json_query<Q,U> (client: &Client, url: &str, query: &Q, opt_headers: Option<HeaderMap>) -> Result<U>
    where Q: Serialize + ?Sized, U: DeserializeOwned
{
    let mut req = client.get( url).query( query).header( ACCEPT, "application/json");
    if let Some(headers) = opt_headers {
        req = req.headers( headers)
    }
    Ok( send( url, req).await?.json().await? )
}

/// POST request with JSON body and JSON response
pub async fn post_json_query<T,U> (client: &Client, url: &str, data: &T, opt_headers: Option<HeaderMap>) -> Result<U>
    where T: Serialize + ?Sized, U: DeserializeOwned
{
    let mut req = client.post( url).header( CONTENT_TYPE, "application/json").json( data);
    if let Some(headers) = opt_headers {
        req = req.headers( headers)
    }
    Ok( send( url, req).await?.json().await? )
}

/// POST request with JSON body and binary response (e.g. rendered images)
pub async fn post_json_for_bytes<T> (client: &Client, url: &str, data: &T, accept: &str, opt_headers: Option<HeaderMap>) -> Result<Vec<u8>>
    where T: Serialize + ?Sized
{
    let mut req = client.post( url).header( CONTENT_TYPE, "application/json").header( ACCEPT, accept).json( data);
    if let Some(headers) = opt_headers {
        req = req.headers( headers)
    }
    Ok( send( url, req).await?.bytes().await?.to_vec() )
}

/// POST request with url-encoded form body and JSON response (e.g. for OAuth2 token requests)
pub async fn post_form_query<F,U> (client: &Client, url: &str, form: &F) -> Result<U>
    where F: Serialize + ?Sized, U: DeserializeOwned
{
    let req = client.post( url).form( form);
    Ok( send( url, req).await?.json().await? )
}
