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
#![allow(unused)]

#![doc = include_str!("../doc/odin_cropwatch.md")]

use serde::{Serialize,Deserialize};
use uom::si::{f64::Length, length::meter};

use odin_common::{define_load_config, datetime::DateRange, geo::GeoPoint};

mod errors;
pub use errors::*;

pub mod region;
pub mod scene;
pub mod raster;
pub mod archive;
pub mod memory_archive;
pub mod sentinelhub;
pub mod selector;
pub mod index;
pub mod series;
pub mod render;
pub mod pipeline;

pub use region::Region;
pub use scene::{Band, SceneRef, SceneQuery, QueryArea, SceneOrder};
pub use archive::ImageArchive;
pub use selector::{SceneSelection, select_scene};
pub use index::{VegetationIndex, IndexDefinition, DerivedBand, NO_DATA};
pub use series::{Series, SeriesPoint, SeriesConfig, compute_series};
pub use pipeline::{CropwatchPipeline, DashboardView, MapOverlay, MapLayer, Panel};

define_load_config!{}

/// Sentinel-2 L2A collection id of the Copernicus Data Space catalog
pub const SENTINEL2_L2A: &str = "sentinel-2-l2a";

/// general configuration of the crop monitoring pipeline
#[derive(Clone,Serialize,Deserialize,Debug)]
pub struct CropwatchConfig {
    /// initial point selection
    pub point: GeoPoint,

    /// radius of the buffer around the selected point that defines the map region
    pub region_radius: Length,

    /// ground resolution we request band rasters with
    pub resolution: Length,

    /// imagery archive collection to search
    pub collection: String,

    /// date window for the map scene
    pub scene_dates: DateRange,

    /// index shown if none is selected
    pub index: VegetationIndex,

    pub series: SeriesConfig,
}

impl Default for CropwatchConfig {
    fn default()->Self {
        CropwatchConfig {
            point: GeoPoint::from_lon_lat_degrees( 71.38, 51.16), // Astana
            region_radius: Length::new::<meter>(2000.0),
            resolution: Length::new::<meter>(10.0),
            collection: SENTINEL2_L2A.to_string(),
            scene_dates: DateRange::new( date(2025, 5, 1), date(2025, 9, 30)),
            index: VegetationIndex::Health,
            series: SeriesConfig::default(),
        }
    }
}

// only used for compile time constant dates
pub(crate) fn date (y: i32, m: u32, d: u32)->chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt( y, m, d).unwrap_or_default()
}
