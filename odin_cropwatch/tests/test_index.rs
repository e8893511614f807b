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

use ndarray::Array2;
use strum::IntoEnumIterator;
use odin_common::geo::{GeoPoint,GeoRect};
use odin_cropwatch::{
    index::*, raster::{BandSet, RasterGrid}, Band, FailureKind, OdinCropwatchError
};

fn grid ()->RasterGrid {
    RasterGrid::new( GeoRect::from_wsen_degrees( 71.0, 51.0, 71.01, 51.01), 10, 10)
}

fn uniform_bands (values: &[(Band,f32)])->BandSet {
    let g = grid();
    let mut bs = BandSet::new( g);
    for (band,v) in values {
        bs.insert( *band, Array2::from_elem( g.shape(), *v)).unwrap();
    }
    bs
}

#[test]
fn test_equal_bands_are_no_data() {
    for v in [0.0f32, 0.05, 0.3, 1.0] {
        assert_eq!( normalized_difference( v, v), NO_DATA);
    }

    for index in [VegetationIndex::Health, VegetationIndex::Moisture, VegetationIndex::Nitrogen] {
        let [a,b] = index.definition().formula.bands();
        let bs = uniform_bands( &[(a, 0.27), (b, 0.27)]);
        let derived = DerivedBand::compute( index, &bs).unwrap();
        println!("{index}: {} valid pixels", derived.valid_count());
        assert!( derived.data.iter().all( |v| *v == NO_DATA));
        assert!( derived.stats().is_empty());
    }
}

#[test]
fn test_zero_denominator() {
    assert_eq!( normalized_difference( 0.2, -0.2), NO_DATA);
    assert_eq!( normalized_difference( f32::NAN, 0.2), NO_DATA);
    assert_eq!( normalized_difference( 0.2, f32::INFINITY), NO_DATA);
    assert_eq!( ratio_minus_one( 0.4, 0.0), NO_DATA);
    assert_eq!( ratio_minus_one( f32::NAN, 0.1), NO_DATA);
}

#[test]
fn test_chlorophyll_equal_bands() {
    let bs = uniform_bands( &[(Band::B8, 0.31), (Band::B3, 0.31)]);
    let derived = DerivedBand::compute( VegetationIndex::Chlorophyll, &bs).unwrap();
    assert!( derived.data.iter().all( |v| *v == 0.0));
    assert_eq!( derived.valid_count(), 100);
}

#[test]
fn test_formulas() {
    let bs = uniform_bands( &[(Band::B3, 0.1), (Band::B4, 0.1), (Band::B5, 0.2), (Band::B8, 0.5), (Band::B11, 0.3)]);
    let expected = [
        (VegetationIndex::Health, (0.5 - 0.1) / (0.5 + 0.1)),
        (VegetationIndex::Moisture, (0.5 - 0.3) / (0.5 + 0.3)),
        (VegetationIndex::Nitrogen, (0.5 - 0.2) / (0.5 + 0.2)),
        (VegetationIndex::Chlorophyll, 0.5 / 0.1 - 1.0),
    ];

    for (index, v) in expected {
        let derived = DerivedBand::compute( index, &bs).unwrap();
        let stats = derived.stats();
        println!("{index}: {stats:?}");
        assert_eq!( stats.n, 100);
        assert!( (stats.avg - v as f64).abs() < 1e-5);
    }
}

#[test]
fn test_missing_band() {
    let bs = uniform_bands( &[(Band::B8, 0.5)]);
    let res = DerivedBand::compute( VegetationIndex::Health, &bs);
    assert!( matches!( res, Err(OdinCropwatchError::DataError(_))));
}

#[test]
fn test_definitions() {
    let def = VegetationIndex::Health.definition();
    assert_eq!( def.formula, Formula::NormalizedDifference( Band::B8, Band::B4));
    assert_eq!( (def.range.min, def.range.max), (0.0, 0.8));

    let def = VegetationIndex::Moisture.definition();
    assert_eq!( def.formula, Formula::NormalizedDifference( Band::B8, Band::B11));
    assert_eq!( (def.range.min, def.range.max), (-0.1, 0.5));
    assert_eq!( def.palette.colors()[2], [0x2b,0x8c,0xbe]);

    let def = VegetationIndex::Nitrogen.definition();
    assert_eq!( def.formula, Formula::NormalizedDifference( Band::B8, Band::B5));
    assert_eq!( (def.range.min, def.range.max), (0.0, 0.5));

    let def = VegetationIndex::Chlorophyll.definition();
    assert_eq!( def.formula, Formula::RatioMinusOne( Band::B8, Band::B3));
    assert_eq!( (def.range.min, def.range.max), (0.0, 5.0));

    for index in VegetationIndex::iter() {
        assert_eq!( index.definition().index, index);
        assert_eq!( index.definition().palette.colors().len(), 3);
    }
}

#[test]
fn test_index_names() {
    assert_eq!( "Health".parse::<VegetationIndex>().unwrap(), VegetationIndex::Health);
    assert_eq!( "NDVI".parse::<VegetationIndex>().unwrap(), VegetationIndex::Health);
    assert_eq!( "ndwi".parse::<VegetationIndex>().unwrap(), VegetationIndex::Moisture);
    assert_eq!( "Азот (NDRE)".parse::<VegetationIndex>().unwrap(), VegetationIndex::Nitrogen);
    assert_eq!( " chlorophyll ".parse::<VegetationIndex>().unwrap(), VegetationIndex::Chlorophyll);

    let res = "EVI".parse::<VegetationIndex>();
    match res {
        Err(e) => {
            println!("{e}");
            assert!( matches!( e, OdinCropwatchError::UnknownIndex(_)));
            assert_eq!( e.kind(), FailureKind::Config);
        }
        Ok(idx) => panic!("EVI should not parse, got {idx}")
    }
}

#[test]
fn test_clip() {
    let bs = uniform_bands( &[(Band::B8, 0.5), (Band::B4, 0.1)]);
    let derived = DerivedBand::compute( VegetationIndex::Health, &bs).unwrap();

    // pixels are 0.001 deg, centers at 71.0005, 71.0015 ..
    let clipped = derived.clip( &GeoRect::from_wsen_degrees( 71.002, 51.002, 71.0061, 51.0049)).unwrap();
    println!("clipped: {:?}", clipped.grid);
    assert_eq!( (clipped.width(), clipped.height()), (4, 3));
    assert_eq!( clipped.data.dim(), (3, 4));
    assert!( (clipped.grid.bounds.west() - 71.002).abs() < 1e-9);
    assert!( (clipped.grid.bounds.east() - 71.006).abs() < 1e-9);
    assert!( (clipped.grid.bounds.south() - 51.002).abs() < 1e-9);
    assert!( (clipped.grid.bounds.north() - 51.005).abs() < 1e-9);

    assert!( derived.clip( &GeoRect::from_wsen_degrees( 72.0, 52.0, 72.1, 52.1)).is_err());
}

#[test]
fn test_value_at() {
    let g = grid();
    let mut bs = BandSet::new( g);
    // B4 increases with column, NaN in the last row
    bs.insert( Band::B8, Array2::from_shape_fn( g.shape(), |(r,_)| if r == 9 { f32::NAN } else { 0.5 })).unwrap();
    bs.insert( Band::B4, Array2::from_shape_fn( g.shape(), |(_,c)| 0.05 + 0.01 * c as f32)).unwrap();
    let derived = DerivedBand::compute( VegetationIndex::Health, &bs).unwrap();
    assert_eq!( derived.valid_count(), 90);

    let p = g.pixel_center( 4, 4);
    let v = derived.value_at( &p).unwrap();
    assert!( (v - normalized_difference( 0.5, 0.09)).abs() < 1e-6);

    // anywhere inside the pixel
    let corner = GeoPoint::from_lon_lat_degrees( 71.0041, 51.0059);
    assert_eq!( derived.value_at( &corner), Some(v));

    // point in NO_DATA row
    assert_eq!( derived.value_at( &g.pixel_center( 9, 4)), None);

    // outside of grid
    assert_eq!( derived.value_at( &GeoPoint::from_lon_lat_degrees( 72.0, 51.005)), None);
}
