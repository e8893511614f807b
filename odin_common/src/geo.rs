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
#![allow(unused,uncommon_codepoints,non_snake_case)]

//! this module provides geodetic points and lat/lon aligned rectangles on a spherical earth.
//! We use the new type pattern around the [geo](https://docs.rs/geo/latest/geo/index.html) `Point` and `Rect`
//! types so that we can keep normalized degree semantics and [uom](https://docs.rs/uom/latest/uom/) lengths
//! at the API level, while still being able to hand the underlying geometries to `geo` algorithms.
//!
//! All computations use the spherical (mean earth radius) model. This is accurate enough for the
//! km-sized analysis regions we deal with, but it is not an ellipsoid computation.

use std::fmt;
use serde::{Serialize,Deserialize,Serializer,Deserializer};
use serde::ser::SerializeStruct;

use geo::{Coord, Destination, Distance, Haversine, Point, Rect};
use uom::si::f64::{Length,Area};
use uom::si::length::meter;
use uom::si::area::square_meter;

use crate::{sin,cos,asin,pow2,deg,rad};

/// mean earth radius in meters (the GRS80 R1 radius `geo::Haversine` uses)
pub const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

#[inline]
pub fn normalize_90 (d:f64) -> f64 {
    let x = d % 360.0;

    if x < -90.0 { -180.0 - x }
    else if x > 90.0 { 180.0 - x }
    else { x }
}

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

/* #region GeoPoint ***********************************************************************************************/

/// a wrapper for geo::Point that uses geodetic degrees stored as f64 (x = longitude, y = latitude)
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lon_lat_degrees (lon: f64, lat: f64) -> Self {
        GeoPoint( Point::new( normalize_180(lon), normalize_90(lat)))
    }

    #[inline] pub fn longitude_degrees (&self)->f64 { self.0.x() }
    #[inline] pub fn latitude_degrees (&self)->f64 { self.0.y() }

    /// great circle (haversine) distance
    pub fn distance_to (&self, other: &GeoPoint) -> Length {
        Length::new::<meter>( Haversine.distance( self.0, other.0))
    }

    /// point reached when travelling `dist` along a great circle with initial `bearing` (degrees clockwise from north)
    pub fn destination (&self, bearing: f64, dist: Length) -> GeoPoint {
        let p = Haversine.destination( self.0, bearing, dist.get::<meter>());
        GeoPoint::from_lon_lat_degrees( p.x(), p.y())
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.0.x(),self.0.y())
    }
}

impl Serialize for GeoPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let mut state = serializer.serialize_struct("GeoPoint", 2)?;
        state.serialize_field("lon", &self.longitude_degrees())?;
        state.serialize_field("lat", &self.latitude_degrees())?;
        state.end()
    }
}

// we accept "lon", "longitude" or "x" for longitude degrees and "lat", "latitude" or "y" for latitude degrees
#[derive(Deserialize)]
struct LonLat {
    #[serde(alias="longitude", alias="x")]
    lon: f64,
    #[serde(alias="latitude", alias="y")]
    lat: f64,
}

impl<'de> Deserialize<'de> for GeoPoint {
    fn deserialize<D>(deserializer: D) -> Result<GeoPoint, D::Error> where D: Deserializer<'de> {
        let ll = LonLat::deserialize( deserializer)?;
        Ok( GeoPoint::from_lon_lat_degrees( ll.lon, ll.lat) )
    }
}

/* #endregion GeoPoint */

/* #region GeoRect ***********************************************************************************************/

/// a lat/lon aligned rectangle. Note that we do not support rectangles that cross the anti-meridian
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoRect(Rect);

impl GeoRect {
    pub fn from_wsen_degrees (west: f64, south: f64, east: f64, north: f64) -> Self {
        GeoRect( Rect::new( Coord{ x: west, y: south }, Coord{ x: east, y: north }))
    }

    /// the bounding box of the spherical cap (disc) with given `radius` around `center`.
    /// If the disc reaches a pole the longitude extent is the full [-180,180]. Longitudes are clamped
    /// at the anti-meridian
    pub fn enclosing_disc (center: &GeoPoint, radius: Length) -> Self {
        let δ = radius.get::<meter>().abs() / MEAN_EARTH_RADIUS;
        let φ = rad( center.latitude_degrees());
        let λ = center.longitude_degrees();

        let south = deg(φ - δ);
        let north = deg(φ + δ);

        if south <= -90.0 || north >= 90.0 {
            Self::from_wsen_degrees( -180.0, south.max(-90.0), 180.0, north.min(90.0))
        } else {
            let Δλ = deg( asin( (sin(δ) / cos(φ)).min(1.0)));
            Self::from_wsen_degrees( (λ - Δλ).max(-180.0), south, (λ + Δλ).min(180.0), north)
        }
    }


    #[inline] pub fn west(&self)->f64 { self.0.min().x }
    #[inline] pub fn east(&self)->f64 { self.0.max().x }
    #[inline] pub fn south(&self)->f64 { self.0.min().y }
    #[inline] pub fn north(&self)->f64 { self.0.max().y }

    pub fn center (&self)->GeoPoint {
        GeoPoint::from_lon_lat_degrees( (self.west() + self.east()) / 2.0, (self.south() + self.north()) / 2.0)
    }

    /// [west,south,east,north] in degrees, as used by STAC and GeoJSON bbox fields
    pub fn to_wsen_array (&self)->[f64;4] {
        [self.west(), self.south(), self.east(), self.north()]
    }

    /// boundary inclusive
    pub fn contains (&self, p: &GeoPoint)->bool {
        let lon = p.longitude_degrees();
        let lat = p.latitude_degrees();
        lon >= self.west() && lon <= self.east() && lat >= self.south() && lat <= self.north()
    }

    /// boundary inclusive
    pub fn intersects (&self, other: &GeoRect)->bool {
        self.west() <= other.east() && other.west() <= self.east() &&
        self.south() <= other.north() && other.south() <= self.north()
    }

    pub fn intersection (&self, other: &GeoRect)->Option<GeoRect> {
        if self.intersects(other) {
            Some( Self::from_wsen_degrees(
                self.west().max( other.west()), self.south().max( other.south()),
                self.east().min( other.east()), self.north().min( other.north())
            ))
        } else {
            None
        }
    }

    /// east-west extent measured along the center latitude
    pub fn width (&self)->Length {
        let φc = rad( (self.south() + self.north()) / 2.0);
        Length::new::<meter>( MEAN_EARTH_RADIUS * cos(φc) * rad( self.east() - self.west()))
    }

    pub fn height (&self)->Length {
        Length::new::<meter>( MEAN_EARTH_RADIUS * rad( self.north() - self.south()))
    }

    /// exact area of the rectangle on the sphere
    pub fn area (&self)->Area {
        let a = pow2(MEAN_EARTH_RADIUS) * rad( self.east() - self.west()) * (sin( rad(self.north())) - sin( rad(self.south())));
        Area::new::<square_meter>( a.abs())
    }
}

impl fmt::Display for GeoRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{},{},{}]", self.west(), self.south(), self.east(), self.north())
    }
}

impl Serialize for GeoRect {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let mut state = serializer.serialize_struct("GeoRect", 4)?;
        state.serialize_field("west", &self.west())?;
        state.serialize_field("south", &self.south())?;
        state.serialize_field("east", &self.east())?;
        state.serialize_field("north", &self.north())?;
        state.end()
    }
}

#[derive(Deserialize)]
struct Wsen { west: f64, south: f64, east: f64, north: f64 }

impl<'de> Deserialize<'de> for GeoRect {
    fn deserialize<D>(deserializer: D) -> Result<GeoRect, D::Error> where D: Deserializer<'de> {
        let r = Wsen::deserialize( deserializer)?;
        Ok( GeoRect::from_wsen_degrees( r.west, r.south, r.east, r.north) )
    }
}

/* #endregion GeoRect */
