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

use std::fmt;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize,Deserialize};
use strum::{EnumIter, AsRefStr};

use odin_common::{datetime::DateRange, geo::{GeoPoint,GeoRect}};

/// the Sentinel-2 MSI bands our index set is computed from
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize,EnumIter,AsRefStr)]
pub enum Band {
    /// green, 560nm
    B3,
    /// red, 665nm
    B4,
    /// vegetation red edge, 705nm
    B5,
    /// NIR, 842nm
    B8,
    /// SWIR, 1610nm
    B11,
}

impl Band {
    /// the band name as used by Sentinel Hub evalscripts
    pub fn sentinel_name (&self)->&'static str {
        match self {
            Band::B3 => "B03",
            Band::B4 => "B04",
            Band::B5 => "B05",
            Band::B8 => "B08",
            Band::B11 => "B11",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// reference to a single satellite capture in an imagery archive
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct SceneRef {
    pub id: String,
    pub collection: String,
    pub datetime: DateTime<Utc>,

    /// percentage of cloudy pixels (0..100), NaN if the archive does not know
    pub cloud_cover: f64,

    /// footprint bounding box if the archive provides one
    pub bounds: Option<GeoRect>,
}

impl SceneRef {
    pub fn date (&self)->NaiveDate { self.datetime.date_naive() }
}

impl fmt::Display for SceneRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {:.1}% cloud)", self.id, self.datetime.format("%Y-%m-%d %H:%M"), self.cloud_cover)
    }
}

/// what a scene has to intersect to match a query
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum QueryArea {
    Bounds(GeoRect),
    Point(GeoPoint),
}

impl QueryArea {
    pub fn intersects (&self, footprint: &GeoRect)->bool {
        match self {
            QueryArea::Bounds(r) => r.intersects( footprint),
            QueryArea::Point(p) => footprint.contains( p),
        }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum SceneOrder {
    CloudCoverAscending,
    DateAscending,
}

/// parameters of an archive search
#[derive(Debug,Clone)]
pub struct SceneQuery {
    pub collection: String,
    pub area: QueryArea,
    pub dates: DateRange,
    /// only return scenes with cloud cover strictly below this percentage
    pub max_cloud_cover: Option<f64>,
    pub order: Option<SceneOrder>,
}

impl SceneQuery {
    pub fn new (collection: impl ToString, area: QueryArea, dates: DateRange)->Self {
        SceneQuery { collection: collection.to_string(), area, dates, max_cloud_cover: None, order: None }
    }

    pub fn with_max_cloud_cover (mut self, max_cloud_cover: f64)->Self {
        self.max_cloud_cover = Some(max_cloud_cover);
        self
    }

    pub fn with_order (mut self, order: SceneOrder)->Self {
        self.order = Some(order);
        self
    }

    /// local check of the date and cloud criteria (the area is checked by the archive)
    pub fn accepts (&self, scene: &SceneRef)->bool {
        self.dates.contains( &scene.datetime) && self.accepts_cloud_cover( scene.cloud_cover)
    }

    pub fn accepts_cloud_cover (&self, cloud_cover: f64)->bool {
        match self.max_cloud_cover {
            Some(max) => cloud_cover < max, // NaN never passes a ceiling
            None => true
        }
    }
}

/// sort scenes according to `order`. Both sorts are stable, scenes without known cloud cover go last
pub fn sort_scenes (scenes: &mut [SceneRef], order: SceneOrder) {
    match order {
        SceneOrder::CloudCoverAscending => scenes.sort_by( |a,b| {
            match (a.cloud_cover.is_nan(), b.cloud_cover.is_nan()) {
                (false,false) => a.cloud_cover.total_cmp( &b.cloud_cover),
                (a_nan,b_nan) => a_nan.cmp( &b_nan),
            }
        }),
        SceneOrder::DateAscending => scenes.sort_by_key( |s| s.datetime),
    }
}
