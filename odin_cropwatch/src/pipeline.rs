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

//! the request pipeline behind one user interaction (point and index selection).
//!
//! A dashboard pass runs three independent sub-passes one after the other:
//!   - map: region → scene selection → derived band → clipped, colorized overlay
//!   - series: index history at the point over the season
//!   - weather: current conditions at the point
//!
//! Failures of one pass are logged and turned into the state of its panel, they never abort the
//! other passes. There are no retries, the next interaction simply runs a new pass.

use std::sync::Arc;
use serde::Serialize;
use tracing::{info,warn};

use odin_common::geo::{GeoPoint,GeoRect};
use odin_openmeteo::{coordinates_caption, WeatherPanel, WeatherProvider, WEATHER_LOADING};
use crate::{
    archive::ImageArchive, errors::{FailureKind, OdinCropwatchError, Result},
    index::{DerivedBand, VegetationIndex}, region::Region, render::{colorize, encode_png},
    scene::SceneRef, selector::{select_scene, SceneSelection},
    series::{compute_series, Series}, CropwatchConfig
};

pub const NO_HISTORY: &str = "Нажмите на карту, чтобы увидеть историю этого места.";
pub const NO_SCENE: &str = "Нет снимков для выбранной области.";

/// the rendered index overlay of one scene
#[derive(Debug,Clone)]
pub struct MapLayer {
    pub region: Region,
    pub scene: SceneRef,
    pub band: DerivedBand,
    /// PNG encoded RGBA image of the clipped band
    pub png: Vec<u8>,
}

impl MapLayer {
    pub fn index (&self)->VegetationIndex { self.band.index }

    /// geographic bounds of the overlay image
    pub fn bounds (&self)->&GeoRect { &self.band.grid.bounds }
}

#[derive(Debug,Clone)]
pub enum MapOverlay {
    Rendered(MapLayer),
    NoScene,
}

/// what a dashboard panel shows
#[derive(Debug,Clone,PartialEq,Serialize)]
pub enum Panel<T> {
    Ready(T),
    Empty(String),
    Failed { kind: FailureKind, message: String },
}

impl<T> Panel<T> {
    pub fn is_ready (&self)->bool { matches!( self, Panel::Ready(_)) }

    pub fn ready (&self)->Option<&T> {
        if let Panel::Ready(v) = self { Some(v) } else { None }
    }

    fn failed (e: &OdinCropwatchError, message: impl ToString)->Self {
        Panel::Failed { kind: e.kind(), message: message.to_string() }
    }
}

/// the result of one dashboard pass
#[derive(Debug,Clone)]
pub struct DashboardView {
    pub point: GeoPoint,
    pub index: VegetationIndex,
    pub caption: String,
    pub map: Panel<MapLayer>,
    pub series: Panel<Series>,
    pub weather: Panel<WeatherPanel>,
}

pub struct CropwatchPipeline {
    config: CropwatchConfig,
    archive: Arc<dyn ImageArchive>,
    weather: Arc<dyn WeatherProvider>,
}

impl CropwatchPipeline {
    pub fn new (config: CropwatchConfig, archive: Arc<dyn ImageArchive>, weather: Arc<dyn WeatherProvider>)->Self {
        CropwatchPipeline { config, archive, weather }
    }

    pub fn config (&self)->&CropwatchConfig { &self.config }

    pub fn region (&self, point: &GeoPoint)->Region {
        Region::around( *point, self.config.region_radius)
    }

    /// the least cloudy scene of the configured window, rendered for `index` and clipped to the region around `point`
    pub async fn map_overlay (&self, point: &GeoPoint, index: VegetationIndex)->Result<MapOverlay> {
        let region = self.region( point);
        let selection = select_scene( self.archive.as_ref(), &region, &self.config.scene_dates, &self.config.collection).await?;

        let scene = match selection {
            SceneSelection::Selected(scene) => scene,
            SceneSelection::NoneFound => return Ok( MapOverlay::NoScene )
        };

        let grid = region.pixel_grid( self.config.resolution);
        let bands = index.definition().formula.bands();
        let band_set = self.archive.read_bands( &scene, &bands, &grid).await?;
        let band = DerivedBand::compute( index, &band_set)?.clip( region.bounds())?;
        let png = encode_png( &colorize( &band))?;

        info!("rendered {index} overlay of {} ({}x{}, {} valid pixels)", scene.id, band.width(), band.height(), band.valid_count());
        Ok( MapOverlay::Rendered( MapLayer { region, scene, band, png }) )
    }

    pub async fn index_series (&self, point: &GeoPoint)->Result<Series> {
        compute_series( self.archive.as_ref(), point, &self.config.series, &self.config.collection).await
    }

    /// one full pass for a point and index selection. This does not fail, errors end up in the panels
    pub async fn dashboard (&self, point: &GeoPoint, index: VegetationIndex)->DashboardView {
        let map = match self.map_overlay( point, index).await {
            Ok(MapOverlay::Rendered(layer)) => Panel::Ready(layer),
            Ok(MapOverlay::NoScene) => Panel::Empty( NO_SCENE.to_string()),
            Err(e) => {
                warn!("map pass for {point} failed: {e}");
                Panel::failed( &e, &e)
            }
        };

        let series = match self.index_series( point).await {
            Ok(series) if series.is_empty() => Panel::Empty( NO_HISTORY.to_string()),
            Ok(series) => Panel::Ready(series),
            Err(e) => {
                warn!("series pass for {point} failed: {e}");
                Panel::failed( &e, &e)
            }
        };

        let weather = match self.weather.current_weather( point).await {
            Ok(wx) => Panel::Ready( WeatherPanel::new( &wx)),
            Err(e) => {
                warn!("weather pass for {point} failed: {e}");
                Panel::failed( &OdinCropwatchError::from(e), WEATHER_LOADING)
            }
        };

        DashboardView { point: *point, index, caption: coordinates_caption( point), map, series, weather }
    }
}
