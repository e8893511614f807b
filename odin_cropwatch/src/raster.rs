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

//! pixel geometry and band sample containers.
//!
//! Rasters are north-up grids over a lat/lon rectangle with uniform angular pixel size. Row 0 is the
//! northern edge, column 0 the western edge. Sample arrays are `ndarray::Array2<f32>` indexed as `[row,col]`.

use std::collections::BTreeMap;
use ndarray::Array2;
use serde::Serialize;
use uom::si::{f64::Length, length::meter};

use odin_common::geo::{GeoPoint,GeoRect};
use crate::{scene::Band, errors::{data_error, Result}};

#[derive(Debug,Clone,Copy,PartialEq,Serialize)]
pub struct RasterGrid {
    pub bounds: GeoRect,
    pub width: usize,
    pub height: usize,
}

impl RasterGrid {
    pub fn new (bounds: GeoRect, width: usize, height: usize)->Self {
        RasterGrid { bounds, width: width.max(1), height: height.max(1) }
    }

    /// grid over `bounds` with pixels of (at least) the given ground resolution
    pub fn covering (bounds: GeoRect, resolution: Length)->Self {
        let res = resolution.get::<meter>();
        let width = (bounds.width().get::<meter>() / res).ceil() as usize;
        let height = (bounds.height().get::<meter>() / res).ceil() as usize;
        Self::new( bounds, width, height)
    }

    pub fn shape (&self)->(usize,usize) { (self.height, self.width) }
    pub fn len (&self)->usize { self.width * self.height }

    /// pixel width in degrees of longitude
    pub fn dx (&self)->f64 { (self.bounds.east() - self.bounds.west()) / self.width as f64 }

    /// pixel height in degrees of latitude
    pub fn dy (&self)->f64 { (self.bounds.north() - self.bounds.south()) / self.height as f64 }

    pub fn pixel_center (&self, row: usize, col: usize)->GeoPoint {
        let lon = self.bounds.west() + (col as f64 + 0.5) * self.dx();
        let lat = self.bounds.north() - (row as f64 + 0.5) * self.dy();
        GeoPoint::from_lon_lat_degrees( lon, lat)
    }

    /// the (row,col) of the pixel containing `p`, or None if `p` is outside the grid
    pub fn pixel_at (&self, p: &GeoPoint)->Option<(usize,usize)> {
        if !self.bounds.contains(p) { return None }

        let col = ((p.longitude_degrees() - self.bounds.west()) / self.dx()).floor() as usize;
        let row = ((self.bounds.north() - p.latitude_degrees()) / self.dy()).floor() as usize;
        Some( (row.min( self.height-1), col.min( self.width-1)) )
    }

    /// the half open row and column index ranges of pixels whose centers are inside `r`
    pub fn center_ranges (&self, r: &GeoRect)->Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
        let b = &self.bounds;
        let col0 = ((r.west() - b.west()) / self.dx() - 0.5).ceil().max(0.0) as usize;
        let col1 = ((((r.east() - b.west()) / self.dx() - 0.5).floor() + 1.0).max(0.0) as usize).min( self.width);
        let row0 = ((b.north() - r.north()) / self.dy() - 0.5).ceil().max(0.0) as usize;
        let row1 = ((((b.north() - r.south()) / self.dy() - 0.5).floor() + 1.0).max(0.0) as usize).min( self.height);

        if row0 < row1 && col0 < col1 { Some( (row0..row1, col0..col1) ) } else { None }
    }

    /// the grid of the pixel window [rows x cols] of this grid
    pub fn window (&self, rows: &std::ops::Range<usize>, cols: &std::ops::Range<usize>)->RasterGrid {
        let west = self.bounds.west() + cols.start as f64 * self.dx();
        let east = self.bounds.west() + cols.end as f64 * self.dx();
        let north = self.bounds.north() - rows.start as f64 * self.dy();
        let south = self.bounds.north() - rows.end as f64 * self.dy();
        RasterGrid::new( GeoRect::from_wsen_degrees( west, south, east, north), cols.len(), rows.len())
    }
}

/// the band samples of one scene over a common grid
#[derive(Debug,Clone)]
pub struct BandSet {
    grid: RasterGrid,
    bands: BTreeMap<Band,Array2<f32>>,
}

impl BandSet {
    pub fn new (grid: RasterGrid)->Self {
        BandSet { grid, bands: BTreeMap::new() }
    }

    pub fn grid (&self)->&RasterGrid { &self.grid }

    pub fn insert (&mut self, band: Band, data: Array2<f32>)->Result<()> {
        if data.dim() != self.grid.shape() {
            return Err( data_error( format!("band {band} has shape {:?}, expected {:?}", data.dim(), self.grid.shape())))
        }
        self.bands.insert( band, data);
        Ok(())
    }

    pub fn get (&self, band: Band)->Result<&Array2<f32>> {
        self.bands.get( &band).ok_or_else( || data_error( format!("missing band {band}")))
    }

    pub fn contains (&self, band: Band)->bool { self.bands.contains_key( &band) }

    pub fn bands (&self)->impl Iterator<Item=&Band> { self.bands.keys() }
}
