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

use std::sync::Arc;
use async_trait::async_trait;
use uom::si::length::meter;

use odin_common::{geo::{GeoPoint,GeoRect}, net::OdinNetError};
use odin_openmeteo::{self as wx, CurrentWeather, WeatherProvider, WEATHER_LOADING};
use odin_cropwatch::{
    load_config, memory_archive::{MemoryArchive, MemoryScene}, pipeline::{NO_HISTORY, NO_SCENE},
    raster::{BandSet, RasterGrid}, sentinelhub::{SentinelHubArchive, SentinelHubConfig},
    Band, CropwatchConfig, CropwatchPipeline, FailureKind, ImageArchive, MapOverlay, Panel, Result,
    SceneQuery, SceneRef, VegetationIndex, SENTINEL2_L2A
};

fn scene (id: &str, date: &str, cloud_cover: f64)->SceneRef {
    SceneRef {
        id: id.to_string(),
        collection: SENTINEL2_L2A.to_string(),
        datetime: format!("{date}T06:30:00Z").parse().unwrap(),
        cloud_cover,
        bounds: None
    }
}

fn footprint ()->GeoRect { GeoRect::from_wsen_degrees( 70.0, 50.5, 72.5, 52.0) }

fn astana ()->GeoPoint { GeoPoint::from_lon_lat_degrees( 71.38, 51.16) }

fn season_archive ()->MemoryArchive {
    let bands = |b4: f32| [(Band::B3, 0.08), (Band::B4, b4), (Band::B5, 0.2), (Band::B8, 0.5), (Band::B11, 0.25)];
    MemoryArchive::new()
        .with( MemoryScene::uniform( scene( "jun", "2025-06-14", 18.0), footprint(), &bands(0.1)))
        .with( MemoryScene::uniform( scene( "jul", "2025-07-09", 4.0), footprint(), &bands(0.05)))
        .with( MemoryScene::uniform( scene( "aug", "2025-08-23", 62.0), footprint(), &bands(0.3)))
        .with( MemoryScene::uniform( scene( "apr", "2025-04-02", 2.0), footprint(), &bands(0.25)))
}

struct FixedWeather(CurrentWeather);

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn current_weather (&self, _pos: &GeoPoint)->wx::Result<CurrentWeather> { Ok(self.0) }
}

struct IncompleteWeather;

#[async_trait]
impl WeatherProvider for IncompleteWeather {
    async fn current_weather (&self, _pos: &GeoPoint)->wx::Result<CurrentWeather> {
        CurrentWeather::from_json( r#"{"current":{"temperature_2m":22.5,"wind_speed_10m":12}}"#)
    }
}

struct UnavailableArchive;

#[async_trait]
impl ImageArchive for UnavailableArchive {
    fn name (&self)->&str { "unavailable" }

    async fn search (&self, _query: &SceneQuery)->Result<Vec<SceneRef>> {
        Err( OdinNetError::ServiceError("catalog responded with 503".into()).into())
    }

    async fn read_bands (&self, _scene: &SceneRef, _bands: &[Band], _grid: &RasterGrid)->Result<BandSet> {
        Err( OdinNetError::ServiceError("process responded with 503".into()).into())
    }
}

fn fixed_weather ()->Arc<dyn WeatherProvider> {
    Arc::new( FixedWeather( CurrentWeather { temperature_2m: 22.5, relative_humidity_2m: 40.0, wind_speed_10m: 12.0 }))
}

#[tokio::test]
async fn test_map_overlay() {
    let conf = CropwatchConfig::default();
    let archive = Arc::new( season_archive());
    let pipeline = CropwatchPipeline::new( conf, archive.clone(), fixed_weather());

    let overlay = pipeline.map_overlay( &astana(), VegetationIndex::Health).await.unwrap();
    let layer = match overlay {
        MapOverlay::Rendered(layer) => layer,
        MapOverlay::NoScene => panic!("expected overlay")
    };

    // least cloudy scene in 2025-05-01..2025-09-30 ("apr" is out of range)
    assert_eq!( layer.scene.id, "jul");
    assert_eq!( archive.reads(), 1);

    // clipped to the 2km buffer box around the point
    let region = pipeline.region( &astana());
    let b = layer.bounds();
    println!("region {}, overlay bounds {b}", region.bounds());
    let dx = layer.band.grid.dx();
    let dy = layer.band.grid.dy();
    assert!( (b.west() - region.bounds().west()).abs() <= dx);
    assert!( (b.east() - region.bounds().east()).abs() <= dx);
    assert!( (b.south() - region.bounds().south()).abs() <= dy);
    assert!( (b.north() - region.bounds().north()).abs() <= dy);
    assert!( (region.bounds().height().get::<meter>() - 4000.0).abs() < 1.0);

    let def = layer.band.definition();
    assert_eq!( (def.range.min, def.range.max), (0.0, 0.8));
    assert_eq!( layer.band.valid_count(), layer.band.width() * layer.band.height());

    let stats = layer.band.stats();
    assert!( (stats.avg - ((0.5f32 - 0.05) / (0.5 + 0.05)) as f64).abs() < 1e-6);
    assert_eq!( &layer.png[1..4], b"PNG");
}

#[tokio::test]
async fn test_dashboard() {
    let pipeline = CropwatchPipeline::new( CropwatchConfig::default(), Arc::new( season_archive()), fixed_weather());
    let view = pipeline.dashboard( &astana(), VegetationIndex::Moisture).await;

    assert_eq!( view.caption, "Координаты: \n51.1600, 71.3800");

    let layer = view.map.ready().unwrap();
    assert_eq!( layer.index(), VegetationIndex::Moisture);

    // series uses Health, cloud cover < 30% within 2025-03-01..2025-11-01
    let series = view.series.ready().unwrap();
    let dates: Vec<String> = series.iter().map( |p| p.date.to_string()).collect();
    assert_eq!( dates, vec!["2025-04-02", "2025-06-14", "2025-07-09"]);
    assert_eq!( series.index, VegetationIndex::Health);

    let weather = view.weather.ready().unwrap();
    assert_eq!( weather.value_of("Темп."), Some("22.5°C"));
    assert_eq!( weather.value_of("Влажн."), Some("40%"));
    assert_eq!( weather.value_of("Ветер"), Some("12 км/ч"));
}

#[tokio::test]
async fn test_no_scene() {
    // scenes exist, but none intersects the region
    let archive = MemoryArchive::new()
        .with( MemoryScene::uniform( scene( "elsewhere", "2025-07-01", 1.0), GeoRect::from_wsen_degrees( 10.0, 40.0, 11.0, 41.0), &[(Band::B8, 0.5), (Band::B4, 0.1)]));
    let pipeline = CropwatchPipeline::new( CropwatchConfig::default(), Arc::new( archive), fixed_weather());

    let overlay = pipeline.map_overlay( &astana(), VegetationIndex::Health).await.unwrap();
    assert!( matches!( overlay, MapOverlay::NoScene));

    let view = pipeline.dashboard( &astana(), VegetationIndex::Health).await;
    assert!( matches!( &view.map, Panel::Empty(msg) if msg == NO_SCENE));
    assert_eq!( view.series, Panel::Empty( NO_HISTORY.to_string()));
    assert!( view.weather.is_ready());
}

#[tokio::test]
async fn test_weather_failure_is_isolated() {
    let pipeline = CropwatchPipeline::new( CropwatchConfig::default(), Arc::new( season_archive()), Arc::new( IncompleteWeather));
    let view = pipeline.dashboard( &astana(), VegetationIndex::Health).await;

    assert!( view.map.is_ready());
    assert!( view.series.is_ready());
    assert_eq!( view.weather, Panel::Failed { kind: FailureKind::Data, message: WEATHER_LOADING.to_string() });
}

#[tokio::test]
async fn test_archive_failure_is_isolated() {
    let pipeline = CropwatchPipeline::new( CropwatchConfig::default(), Arc::new( UnavailableArchive), fixed_weather());
    let view = pipeline.dashboard( &astana(), VegetationIndex::Health).await;

    match &view.map {
        Panel::Failed{kind,message} => {
            println!("map: {message}");
            assert_eq!( *kind, FailureKind::ServiceUnavailable);
        }
        other => panic!("expected failed map panel, got {other:?}")
    }
    assert!( matches!( view.series, Panel::Failed{ kind: FailureKind::ServiceUnavailable, .. }));
    assert!( view.weather.is_ready());
}

#[tokio::test]
async fn test_missing_credentials_are_isolated() {
    let archive = SentinelHubArchive::new( SentinelHubConfig::default()).unwrap();
    let pipeline = CropwatchPipeline::new( CropwatchConfig::default(), Arc::new( archive), fixed_weather());
    let view = pipeline.dashboard( &astana(), VegetationIndex::Nitrogen).await;

    assert!( matches!( view.map, Panel::Failed{ kind: FailureKind::Credentials, .. }));
    assert!( matches!( view.series, Panel::Failed{ kind: FailureKind::Credentials, .. }));
    assert!( view.weather.is_ready());
}

#[test]
fn test_config() {
    let conf: CropwatchConfig = load_config( "cropwatch.ron").unwrap();
    let default = CropwatchConfig::default();

    assert_eq!( conf.point, default.point);
    assert_eq!( conf.region_radius.get::<meter>(), 2000.0);
    assert_eq!( conf.resolution.get::<meter>(), 10.0);
    assert_eq!( conf.collection, SENTINEL2_L2A);
    assert_eq!( conf.scene_dates, default.scene_dates);
    assert_eq!( conf.index, VegetationIndex::Health);
    assert_eq!( conf.series.dates, default.series.dates);
    assert_eq!( conf.series.max_cloud_cover, 30.0);
    assert_eq!( conf.series.scale.get::<meter>(), 20.0);
}
