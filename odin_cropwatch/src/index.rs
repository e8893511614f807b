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

//! the vegetation indices we support and the derived per-pixel bands computed from them.
//!
//! Each index is defined by a two-band formula, a display range and a color palette. This is static
//! configuration, lookup is by the [`VegetationIndex`] enum. Derived bands use [`NO_DATA`] for pixels
//! where the formula has no defined value, which includes:
//!   - non-finite input samples (pixels not covered by the scene)
//!   - normalized differences with equal inputs or a zero denominator
//!   - ratios with a zero denominator

use std::{fmt, str::FromStr};
use ndarray::{s, Array2, Zip};
use serde::{Serialize,Deserialize};
use strum::{EnumIter, AsRefStr, IntoEnumIterator};

use odin_common::{geo::{GeoPoint,GeoRect}, MinMaxAvg};
use crate::{
    errors::{data_error, unknown_index, OdinCropwatchError, Result},
    raster::{BandSet, RasterGrid}, render::{Palette, RED, YELLOW, GREEN, WHITE, BLUE, DARK_GREEN},
    scene::Band
};

/// value of derived band pixels that do not have a defined index value
pub const NO_DATA: f32 = -9999.0;

#[inline]
pub fn is_valid (v: f32)->bool { v != NO_DATA && v.is_finite() }

/* #region index definitions **************************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize,EnumIter,AsRefStr)]
pub enum VegetationIndex {
    /// NDVI
    Health,
    /// NDWI (Gao)
    Moisture,
    /// NDRE
    Nitrogen,
    /// green chlorophyll index
    Chlorophyll,
}

impl VegetationIndex {
    pub fn acronym (&self)->&'static str {
        match self {
            VegetationIndex::Health => "NDVI",
            VegetationIndex::Moisture => "NDWI",
            VegetationIndex::Nitrogen => "NDRE",
            VegetationIndex::Chlorophyll => "CHL",
        }
    }

    /// the dashboard label
    pub fn label (&self)->&'static str {
        match self {
            VegetationIndex::Health => "Здоровье (NDVI)",
            VegetationIndex::Moisture => "Влага (NDWI)",
            VegetationIndex::Nitrogen => "Азот (NDRE)",
            VegetationIndex::Chlorophyll => "Хлорофилл",
        }
    }

    pub fn definition (&self)->&'static IndexDefinition {
        &DEFINITIONS[*self as usize]
    }
}

impl fmt::Display for VegetationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// accepts the enum name, the acronym (both case insensitive) or the dashboard label
impl FromStr for VegetationIndex {
    type Err = OdinCropwatchError;

    fn from_str (s: &str)->Result<Self> {
        let s = s.trim();
        VegetationIndex::iter()
            .find( |idx| s.eq_ignore_ascii_case( idx.as_ref()) || s.eq_ignore_ascii_case( idx.acronym()) || s == idx.label())
            .ok_or_else( || unknown_index(s))
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Serialize)]
pub enum Formula {
    /// (a - b) / (a + b)
    NormalizedDifference(Band,Band),
    /// a / b - 1
    RatioMinusOne(Band,Band),
}

impl Formula {
    pub fn bands (&self)->[Band;2] {
        match *self {
            Formula::NormalizedDifference(a,b) => [a,b],
            Formula::RatioMinusOne(a,b) => [a,b],
        }
    }

    #[inline]
    pub fn eval (&self, a: f32, b: f32)->f32 {
        match self {
            Formula::NormalizedDifference(..) => normalized_difference( a, b),
            Formula::RatioMinusOne(..) => ratio_minus_one( a, b),
        }
    }
}

pub fn normalized_difference (a: f32, b: f32)->f32 {
    if !is_valid(a) || !is_valid(b) || a == b { return NO_DATA }

    let sum = a + b;
    if sum == 0.0 { return NO_DATA }

    let v = (a - b) / sum;
    if v.is_finite() { v } else { NO_DATA }
}

pub fn ratio_minus_one (a: f32, b: f32)->f32 {
    if !is_valid(a) || !is_valid(b) || b == 0.0 { return NO_DATA }

    let v = a / b - 1.0;
    if v.is_finite() { v } else { NO_DATA }
}

/// value range that is mapped onto the palette. Values outside are clamped
#[derive(Debug,Clone,Copy,PartialEq,Serialize)]
pub struct DisplayRange {
    pub min: f32,
    pub max: f32,
}

impl DisplayRange {
    /// position of `v` within the range as a fraction in [0,1]
    pub fn normalize (&self, v: f32)->f32 {
        if self.max <= self.min { return 0.0 }
        ((v - self.min) / (self.max - self.min)).clamp( 0.0, 1.0)
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Serialize)]
pub struct IndexDefinition {
    pub index: VegetationIndex,
    pub formula: Formula,
    pub range: DisplayRange,
    pub palette: Palette,
}

// has to be in VegetationIndex order
static DEFINITIONS: [IndexDefinition;4] = [
    IndexDefinition {
        index: VegetationIndex::Health,
        formula: Formula::NormalizedDifference( Band::B8, Band::B4),
        range: DisplayRange { min: 0.0, max: 0.8 },
        palette: Palette::new( &[RED, YELLOW, GREEN]),
    },
    IndexDefinition {
        index: VegetationIndex::Moisture,
        formula: Formula::NormalizedDifference( Band::B8, Band::B11),
        range: DisplayRange { min: -0.1, max: 0.5 },
        palette: Palette::new( &[ [0xec,0xe7,0xf2], [0xa6,0xbd,0xdb], [0x2b,0x8c,0xbe] ]),
    },
    IndexDefinition {
        index: VegetationIndex::Nitrogen,
        formula: Formula::NormalizedDifference( Band::B8, Band::B5),
        range: DisplayRange { min: 0.0, max: 0.5 },
        palette: Palette::new( &[ [0xf7,0xfc,0xb9], [0xad,0xdd,0x8e], [0x31,0xa3,0x54] ]),
    },
    IndexDefinition {
        index: VegetationIndex::Chlorophyll,
        formula: Formula::RatioMinusOne( Band::B8, Band::B3),
        range: DisplayRange { min: 0.0, max: 5.0 },
        palette: Palette::new( &[WHITE, BLUE, DARK_GREEN]),
    },
];

/* #endregion index definitions */

/* #region derived band *******************************************************************************************/

/// per-pixel index values of one scene
#[derive(Debug,Clone)]
pub struct DerivedBand {
    pub index: VegetationIndex,
    pub grid: RasterGrid,
    pub data: Array2<f32>,
}

impl DerivedBand {
    pub fn compute (index: VegetationIndex, bands: &BandSet)->Result<Self> {
        let formula = index.definition().formula;
        let [band_a, band_b] = formula.bands();
        let a = bands.get( band_a)?;
        let b = bands.get( band_b)?;

        let mut data = Array2::<f32>::from_elem( bands.grid().shape(), NO_DATA);
        Zip::from( &mut data).and( a).and( b).for_each( |v, &a, &b| *v = formula.eval( a, b));

        Ok( DerivedBand { index, grid: *bands.grid(), data } )
    }

    pub fn definition (&self)->&'static IndexDefinition { self.index.definition() }

    pub fn width (&self)->usize { self.grid.width }
    pub fn height (&self)->usize { self.grid.height }

    /// the part of this band with pixel centers inside `bounds`
    pub fn clip (&self, bounds: &GeoRect)->Result<Self> {
        let (rows, cols) = self.grid.center_ranges( bounds)
            .ok_or_else( || data_error( format!("derived {} band does not overlap {bounds}", self.index)))?;

        let data = self.data.slice( s![rows.clone(), cols.clone()]).to_owned();
        let grid = self.grid.window( &rows, &cols);
        Ok( DerivedBand { index: self.index, grid, data } )
    }

    pub fn value_at (&self, p: &GeoPoint)->Option<f32> {
        let (row, col) = self.grid.pixel_at(p)?;
        let v = self.data[[row,col]];
        if is_valid(v) { Some(v) } else { None }
    }

    pub fn valid_count (&self)->usize {
        self.data.iter().filter( |v| is_valid(**v)).count()
    }

    /// min/max/mean over valid pixels
    pub fn stats (&self)->MinMaxAvg {
        let mut acc = MinMaxAvg::new();
        for &v in self.data.iter().filter( |v| is_valid(**v)) {
            acc.add( v as f64);
        }
        acc
    }
}

/* #endregion derived band */
