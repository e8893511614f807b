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

use std::io::Write;
use chrono::NaiveDate;
use serde::{Serialize,Deserialize};
use tracing::{debug,info};
use uom::si::{f64::Length, length::meter};

use odin_common::{datetime::{ser_date, DateRange}, geo::{GeoPoint,GeoRect}};
use crate::{
    archive::ImageArchive, date, errors::Result, index::{DerivedBand, VegetationIndex},
    raster::RasterGrid, scene::{sort_scenes, QueryArea, SceneOrder, SceneQuery}
};

/// parameters of the index history at a point
#[derive(Clone,Serialize,Deserialize,Debug)]
pub struct SeriesConfig {
    /// the season we scan
    pub dates: DateRange,

    /// only scenes with cloud cover (percent) strictly below this are used
    pub max_cloud_cover: f64,

    /// sampling scale of the point value: the size of the (single) pixel that contains the point
    pub scale: Length,

    pub index: VegetationIndex,
}

impl Default for SeriesConfig {
    fn default()->Self {
        SeriesConfig {
            dates: DateRange::new( date(2025, 3, 1), date(2025, 11, 1)),
            max_cloud_cover: 30.0,
            scale: Length::new::<meter>(20.0),
            index: VegetationIndex::Health,
        }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Serialize)]
pub struct SeriesPoint {
    #[serde(serialize_with="ser_date")]
    pub date: NaiveDate,
    pub value: f64,
}

/// the index history at a point in chronological order. Scenes without a valid value are not included
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct Series {
    pub index: VegetationIndex,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn new (index: VegetationIndex)->Self {
        Series { index, points: Vec::new() }
    }

    pub fn is_empty (&self)->bool { self.points.is_empty() }
    pub fn len (&self)->usize { self.points.len() }

    pub fn iter (&self)->impl Iterator<Item=&SeriesPoint> { self.points.iter() }

    /// write as "date,value" CSV
    pub fn write_csv<W: Write> (&self, w: W)->Result<()> {
        let mut wtr = csv::Writer::from_writer( w);
        for p in &self.points {
            wtr.serialize( p)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv (&self)->Result<String> {
        let mut buf: Vec<u8> = Vec::new();
        self.write_csv( &mut buf)?;
        Ok( String::from_utf8_lossy( &buf).into_owned() )
    }

    pub fn to_json (&self)->Result<String> {
        Ok( serde_json::to_string( self)? )
    }
}

/// compute the index history at `point` over the configured season.
///
/// Each archive scene that contains the point and passes the cloud ceiling is read as a single pixel of
/// size `config.scale` centered on the point, and turned into the index value of that pixel.
/// Archive errors abort the whole series
pub async fn compute_series (archive: &dyn ImageArchive, point: &GeoPoint, config: &SeriesConfig, collection: &str)->Result<Series> {
    let query = SceneQuery::new( collection, QueryArea::Point(*point), config.dates)
        .with_max_cloud_cover( config.max_cloud_cover)
        .with_order( SceneOrder::DateAscending);

    let mut scenes = archive.search( &query).await?;
    scenes.retain( |s| query.accepts(s));
    sort_scenes( &mut scenes, SceneOrder::DateAscending);
    debug!("{} scenes for {} series at {point}", scenes.len(), config.index);

    let window = sample_grid( point, config.scale);
    let bands = config.index.definition().formula.bands();
    let mut series = Series::new( config.index);

    for scene in &scenes {
        let band_set = archive.read_bands( scene, &bands, &window).await?;
        let derived = DerivedBand::compute( config.index, &band_set)?;

        match derived.value_at( point) {
            Some(value) => series.points.push( SeriesPoint { date: scene.date(), value: value as f64 }),
            None => debug!("no valid {} value for scene {}", config.index, scene.id)
        }
    }

    info!("{} series at {point}: {} of {} scenes", config.index, series.len(), scenes.len());
    Ok(series)
}

/// the read window for a point sample: one `scale` sized pixel centered on the point
pub fn sample_grid (point: &GeoPoint, scale: Length)->RasterGrid {
    let bounds = GeoRect::enclosing_disc( point, scale / 2.0);
    RasterGrid::new( bounds, 1, 1)
}
