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

//! [`ImageArchive`] implementation for the Sentinel Hub APIs of the Copernicus Data Space Ecosystem (CDSE).
//!
//! This uses three endpoints:
//!   - the OAuth2 token endpoint (client credentials grant)
//!   - the STAC catalog search (`POST .../catalog/1.0.0/search`) to find scenes
//!   - the process API to read band samples of a scene as a FLOAT32 TIFF over a given grid
//!
//! Band math is not done remotely, we only retrieve reflectance samples.

use std::{env, io::Cursor, time::Duration};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use ndarray::Array2;
use reqwest::Client;
use serde::{Serialize,Deserialize};
use serde_json::{json, Value};
use tiff::decoder::{Decoder, DecodingResult};
use tokio::sync::Mutex;
use tracing::{debug,info,warn};

use odin_common::{
    datetime::{secs, utc_now}, geo::GeoRect,
    net::{bearer_headers, build_client, post_form_query, post_json_for_bytes, post_json_query, OdinNetError}
};
use crate::{
    archive::ImageArchive, errors::{credentials_error, data_error, OdinCropwatchError, Result},
    raster::{BandSet, RasterGrid}, scene::{Band, QueryArea, SceneQuery, SceneRef}
};

pub const SH_CLIENT_ID: &str = "SH_CLIENT_ID";
pub const SH_CLIENT_SECRET: &str = "SH_CLIENT_SECRET";

const CRS84: &str = "http://www.opengis.net/def/crs/OGC/1.3/CRS84";

/* #region config *************************************************************************************************/

#[derive(Clone,Serialize,Deserialize,Debug)]
pub struct SentinelHubConfig {
    pub token_url: String,
    pub catalog_url: String,
    pub process_url: String,

    /// OAuth client credentials. Can be overridden by SH_CLIENT_ID and SH_CLIENT_SECRET env vars
    pub client_id: String,
    pub client_secret: String,

    /// max number of items per catalog page
    pub page_limit: usize,

    /// max number of catalog pages we retrieve for one search
    pub max_pages: usize,

    pub timeout: Duration,
}

impl Default for SentinelHubConfig {
    fn default()->Self {
        SentinelHubConfig {
            token_url: "https://identity.dataspace.copernicus.eu/auth/realms/CDSE/protocol/openid-connect/token".to_string(),
            catalog_url: "https://sh.dataspace.copernicus.eu/api/v1/catalog/1.0.0/search".to_string(),
            process_url: "https://sh.dataspace.copernicus.eu/api/v1/process".to_string(),

            //--- the ones that need to be set
            client_id: "?".to_string(),
            client_secret: "?".to_string(),

            page_limit: 100,
            max_pages: 20,
            timeout: secs(60),
        }
    }
}

impl SentinelHubConfig {
    /// replace credentials with the ones from the environment (if set)
    pub fn with_env_credentials (mut self)->Self {
        if let Ok(id) = env::var(SH_CLIENT_ID) { self.client_id = id }
        if let Ok(secret) = env::var(SH_CLIENT_SECRET) { self.client_secret = secret }
        self
    }

    pub fn check_credentials (&self)->Result<()> {
        check_credential( "client_id", &self.client_id)?;
        check_credential( "client_secret", &self.client_secret)
    }
}

fn check_credential (name: &str, value: &str)->Result<()> {
    if value.is_empty() || value == "?" {
        Err( credentials_error( format!("{name} not set (use config or {SH_CLIENT_ID}/{SH_CLIENT_SECRET})")))
    } else if value.chars().any( |c| c.is_whitespace() || c.is_control()) {
        Err( credentials_error( format!("{name} contains whitespace or control characters")))
    } else {
        Ok(())
    }
}

/* #endregion config */

/* #region catalog ************************************************************************************************/

#[derive(Deserialize,Debug)]
struct CatalogPage {
    #[serde(default)]
    features: Vec<CatalogItem>,
    context: Option<CatalogContext>,
}

#[derive(Deserialize,Debug)]
struct CatalogItem {
    id: String,
    collection: Option<String>,
    bbox: Option<Vec<f64>>,
    properties: ItemProperties,
}

#[derive(Deserialize,Debug)]
struct ItemProperties {
    datetime: DateTime<Utc>,
    #[serde(rename="eo:cloud_cover")]
    cloud_cover: Option<f64>,
}

#[derive(Deserialize,Debug)]
struct CatalogContext {
    next: Option<u64>,
}

impl CatalogPage {
    fn into_scenes (self, collection: &str)->(Vec<SceneRef>, Option<u64>) {
        let next = self.context.and_then( |c| c.next);
        let scenes = self.features.into_iter().map( |item| {
            let bounds = match item.bbox.as_deref() {
                Some([w,s,e,n]) => Some( GeoRect::from_wsen_degrees( *w, *s, *e, *n)),
                Some([w,s,_,e,n,_]) => Some( GeoRect::from_wsen_degrees( *w, *s, *e, *n)), // 3D bbox
                _ => None
            };
            SceneRef {
                id: item.id,
                collection: item.collection.unwrap_or_else( || collection.to_string()),
                datetime: item.properties.datetime,
                cloud_cover: item.properties.cloud_cover.unwrap_or( f64::NAN),
                bounds
            }
        }).collect();
        (scenes, next)
    }
}

/// parse a catalog search response into scene references and the `next` token (if there are more pages)
pub fn parse_catalog_page (json: &str, collection: &str)->Result<(Vec<SceneRef>, Option<u64>)> {
    let page: CatalogPage = serde_json::from_str( json)?;
    Ok( page.into_scenes( collection) )
}

/// the JSON body of a catalog search request
pub fn catalog_search_body (query: &SceneQuery, limit: usize, next: Option<u64>)->Value {
    let mut body = json!({
        "collections": [ query.collection ],
        "datetime": query.dates.to_rfc3339_interval(),
        "limit": limit,
    });

    match &query.area {
        QueryArea::Bounds(r) => body["bbox"] = json!( r.to_wsen_array()),
        QueryArea::Point(p) => body["intersects"] = json!({
            "type": "Point",
            "coordinates": [ p.longitude_degrees(), p.latitude_degrees() ]
        })
    }

    if let Some(max_cloud_cover) = query.max_cloud_cover {
        body["filter"] = json!( format!("eo:cloud_cover < {max_cloud_cover}"));
        body["filter-lang"] = json!("cql2-text");
    }

    if let Some(next) = next {
        body["next"] = json!(next);
    }

    body
}

/* #endregion catalog */

/* #region process ************************************************************************************************/

/// evalscript that returns the reflectance of `bands` (in this order) as FLOAT32 samples, NaN where the scene has no data
pub fn evalscript (bands: &[Band])->String {
    let names: Vec<String> = bands.iter().map( |b| format!("\"{}\"", b.sentinel_name())).collect();
    let samples: Vec<String> = bands.iter().map( |b| format!("s.{}", b.sentinel_name())).collect();
    let no_data = vec!["NaN"; bands.len()];

    format!(r#"//VERSION=3
function setup() {{
  return {{
    input: [{{ bands: [{}, "dataMask"], units: "REFLECTANCE" }}],
    output: {{ bands: {}, sampleType: "FLOAT32" }}
  }};
}}
function evaluatePixel(s) {{
  return s.dataMask == 1 ? [{}] : [{}];
}}
"#, names.join(", "), bands.len(), samples.join(", "), no_data.join(", "))
}

/// the JSON body of a process API request for the given scene, bands and output grid.
/// We pin the scene by restricting the time range to its sensing time
pub fn process_request_body (scene: &SceneRef, bands: &[Band], grid: &RasterGrid)->Value {
    let from = scene.datetime - TimeDelta::seconds(30);
    let to = scene.datetime + TimeDelta::seconds(30);

    json!({
        "input": {
            "bounds": {
                "bbox": grid.bounds.to_wsen_array(),
                "properties": { "crs": CRS84 }
            },
            "data": [{
                "type": scene.collection,
                "dataFilter": {
                    "timeRange": {
                        "from": from.to_rfc3339_opts( SecondsFormat::Secs, true),
                        "to": to.to_rfc3339_opts( SecondsFormat::Secs, true)
                    },
                    "mosaickingOrder": "leastCC"
                }
            }]
        },
        "output": {
            "width": grid.width,
            "height": grid.height,
            "responses": [{ "identifier": "default", "format": { "type": "image/tiff" } }]
        },
        "evalscript": evalscript( bands)
    })
}

/// decode a (single or multi sample) floating point TIFF into a BandSet. Samples are interleaved in `bands` order
pub fn decode_band_tiff (bytes: &[u8], bands: &[Band], grid: &RasterGrid)->Result<BandSet> {
    let mut decoder = Decoder::new( Cursor::new( bytes))?;
    let (w, h) = decoder.dimensions()?;
    let (width, height) = (w as usize, h as usize);
    if (height, width) != grid.shape() {
        return Err( data_error( format!("TIFF has size {width}x{height}, expected {}x{}", grid.width, grid.height)))
    }

    let samples: Vec<f32> = match decoder.read_image()? {
        DecodingResult::F32(data) => data,
        DecodingResult::F64(data) => data.into_iter().map( |x| x as f32).collect(),
        _ => return Err( data_error("TIFF does not contain floating point samples"))
    };

    let n = bands.len();
    if n == 0 || samples.len() != width * height * n {
        return Err( data_error( format!("TIFF has {} samples, expected {} bands of {width}x{height}", samples.len(), n)))
    }

    let mut band_set = BandSet::new( *grid);
    for (i, band) in bands.iter().enumerate() {
        let data = Array2::from_shape_fn( (height, width), |(row,col)| samples[(row * width + col) * n + i]);
        band_set.insert( *band, data)?;
    }
    Ok(band_set)
}

/* #endregion process */

/* #region archive ************************************************************************************************/

#[derive(Deserialize,Debug)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

#[derive(Debug,Clone)]
struct AccessToken {
    token: String,
    expires: DateTime<Utc>,
}

pub struct SentinelHubArchive {
    config: SentinelHubConfig,
    client: Client,
    token: Mutex<Option<AccessToken>>,
}

impl SentinelHubArchive {
    /// credentials are checked on first use so that a misconfigured archive only fails the passes that need it
    pub fn new (config: SentinelHubConfig)->Result<Self> {
        let client = build_client( config.timeout)?;
        Ok( SentinelHubArchive { config, client, token: Mutex::new(None) } )
    }

    pub fn config (&self)->&SentinelHubConfig { &self.config }

    /// get a cached or new OAuth access token
    async fn access_token (&self)->Result<String> {
        let mut token = self.token.lock().await;
        if let Some(t) = token.as_ref() {
            if t.expires > utc_now() { return Ok( t.token.clone()) }
        }

        self.config.check_credentials()?;
        debug!("requesting Sentinel Hub access token");
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];
        let response: TokenResponse = post_form_query( &self.client, &self.config.token_url, &form).await.map_err( |e| match e {
            OdinNetError::OpFailed(msg) => credentials_error( format!("token request rejected: {msg}")),
            e => OdinCropwatchError::from(e)
        })?;

        // renew a bit before the token actually expires
        let expires = utc_now() + TimeDelta::seconds( response.expires_in.unwrap_or(300) - 30);
        *token = Some( AccessToken { token: response.access_token.clone(), expires });
        Ok( response.access_token )
    }
}

#[async_trait]
impl ImageArchive for SentinelHubArchive {
    fn name (&self)->&str { "sentinelhub" }

    async fn search (&self, query: &SceneQuery)->Result<Vec<SceneRef>> {
        let token = self.access_token().await?;
        let mut scenes: Vec<SceneRef> = Vec::new();
        let mut next: Option<u64> = None;

        for _ in 0..self.config.max_pages {
            let body = catalog_search_body( query, self.config.page_limit, next);
            let page: CatalogPage = post_json_query( &self.client, &self.config.catalog_url, &body, Some(bearer_headers(&token)?)).await?;
            let (mut page_scenes, page_next) = page.into_scenes( &query.collection);
            scenes.append( &mut page_scenes);

            match page_next {
                Some(n) => next = Some(n),
                None => {
                    next = None;
                    break
                }
            }
        }
        if next.is_some() {
            warn!("catalog search truncated after {} pages", self.config.max_pages);
        }

        // the archive applies the filter but we don't rely on it
        scenes.retain( |s| query.accepts(s));
        if let Some(order) = query.order {
            crate::scene::sort_scenes( &mut scenes, order);
        }

        info!("found {} scenes in {} for {}", scenes.len(), query.collection, query.dates);
        Ok(scenes)
    }

    async fn read_bands (&self, scene: &SceneRef, bands: &[Band], grid: &RasterGrid)->Result<BandSet> {
        let token = self.access_token().await?;
        let body = process_request_body( scene, bands, grid);

        debug!("reading {:?} of scene {} ({}x{})", bands, scene.id, grid.width, grid.height);
        let bytes = post_json_for_bytes( &self.client, &self.config.process_url, &body, "image/tiff", Some(bearer_headers(&token)?)).await?;
        decode_band_tiff( &bytes, bands, grid)
    }
}

/* #endregion archive */
