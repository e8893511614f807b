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

use uom::si::{f64::Length, length::meter};
use odin_common::{datetime::DateRange, geo::{GeoPoint,GeoRect}};
use odin_cropwatch::{
    memory_archive::{MemoryArchive, MemoryScene}, scene::sort_scenes,
    select_scene, Band, Region, SceneOrder, SceneRef, SceneSelection, SENTINEL2_L2A
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

fn astana_footprint ()->GeoRect { GeoRect::from_wsen_degrees( 70.0, 50.5, 72.5, 52.0) }

fn mem_scene (id: &str, date: &str, cloud_cover: f64, footprint: GeoRect)->MemoryScene {
    MemoryScene::uniform( scene( id, date, cloud_cover), footprint, &[(Band::B8, 0.5), (Band::B4, 0.1)])
}

#[tokio::test]
async fn test_select_least_cloudy() {
    let far_away = GeoRect::from_wsen_degrees( 10.0, 40.0, 11.0, 41.0);
    let archive = MemoryArchive::new()
        .with( mem_scene( "s-12", "2025-06-01", 12.0, astana_footprint()))
        .with( mem_scene( "s-3", "2025-07-15", 3.0, astana_footprint()))
        .with( mem_scene( "s-25", "2025-08-20", 25.0, astana_footprint()))
        .with( mem_scene( "s-1-too-early", "2025-04-20", 1.0, astana_footprint()))
        .with( mem_scene( "s-1-too-late", "2025-09-30", 1.0, astana_footprint())) // end day is exclusive
        .with( mem_scene( "s-0-elsewhere", "2025-07-01", 0.0, far_away));

    let region = Region::around( GeoPoint::from_lon_lat_degrees( 71.38, 51.16), Length::new::<meter>(2000.0));
    let dates = DateRange::parse( "2025-05-01", "2025-09-30").unwrap();

    let selection = select_scene( &archive, &region, &dates, SENTINEL2_L2A).await.unwrap();
    println!("{selection:?}");
    assert_eq!( selection.scene().map( |s| s.id.as_str()), Some("s-3"));
    assert_eq!( archive.reads(), 0); // selection does not read bands
}

#[tokio::test]
async fn test_none_found() {
    let archive = MemoryArchive::new()
        .with( mem_scene( "s-12", "2024-06-01", 12.0, astana_footprint()));

    let region = Region::around( GeoPoint::from_lon_lat_degrees( 71.38, 51.16), Length::new::<meter>(2000.0));
    let dates = DateRange::parse( "2025-05-01", "2025-09-30").unwrap();

    let selection = select_scene( &archive, &region, &dates, SENTINEL2_L2A).await.unwrap();
    assert_eq!( selection, SceneSelection::NoneFound);

    // other collection
    let selection = select_scene( &archive, &region, &DateRange::parse( "2024-01-01", "2025-01-01").unwrap(), "landsat-ot-l2").await.unwrap();
    assert_eq!( selection, SceneSelection::NoneFound);
}

#[test]
fn test_sort_order() {
    let mut scenes = vec![
        scene( "a", "2025-06-03", 20.0),
        scene( "b", "2025-06-01", f64::NAN),
        scene( "c", "2025-06-02", 5.0),
        scene( "d", "2025-06-04", 20.0),
    ];

    sort_scenes( &mut scenes, SceneOrder::CloudCoverAscending);
    let ids: Vec<&str> = scenes.iter().map( |s| s.id.as_str()).collect();
    assert_eq!( ids, vec!["c", "a", "d", "b"]); // stable, unknown cloud cover last

    sort_scenes( &mut scenes, SceneOrder::DateAscending);
    let ids: Vec<&str> = scenes.iter().map( |s| s.id.as_str()).collect();
    assert_eq!( ids, vec!["b", "c", "a", "d"]);
}
