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
use serde::Serialize;
use uom::si::f64::{Length,Area};

use odin_common::geo::{GeoPoint,GeoRect};
use crate::raster::RasterGrid;

/// the analysis region around a selected point: the bounding box of a disc with fixed radius.
/// Regions are immutable, a new point means a new region
#[derive(Debug,Clone,Copy,PartialEq,Serialize)]
pub struct Region {
    center: GeoPoint,
    radius: Length,
    bounds: GeoRect,
}

impl Region {
    pub fn around (center: GeoPoint, radius: Length)->Self {
        let bounds = GeoRect::enclosing_disc( &center, radius);
        Region { center, radius, bounds }
    }

    pub fn center (&self)->&GeoPoint { &self.center }
    pub fn radius (&self)->Length { self.radius }
    pub fn bounds (&self)->&GeoRect { &self.bounds }

    pub fn contains (&self, p: &GeoPoint)->bool { self.bounds.contains(p) }

    pub fn area (&self)->Area { self.bounds.area() }

    /// the pixel grid we request band rasters for at the given ground resolution
    pub fn pixel_grid (&self, resolution: Length)->RasterGrid {
        RasterGrid::covering( self.bounds, resolution)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Region({} r={:.0}m {})", self.center, self.radius.get::<uom::si::length::meter>(), self.bounds)
    }
}
