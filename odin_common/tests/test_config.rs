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

use std::path::PathBuf;
use serde::Deserialize;
use odin_common::{config::*, geo::GeoPoint, MinMaxAvg};

#[derive(Deserialize,Debug)]
struct TestConfig {
    name: String,
    point: GeoPoint,
    max_cloud: f64,
}

#[test]
fn test_config_from_str() {
    let conf: TestConfig = config_from_str( r#"
        TestConfig(
            name: "field-7",
            point: (lat: 51.16, lon: 71.38),
            max_cloud: 30.0,
        )
    "#).unwrap();
    println!("{conf:?}");
    assert_eq!( conf.name, "field-7");
    assert_eq!( conf.point.latitude_degrees(), 51.16);
    assert_eq!( conf.max_cloud, 30.0);

    let res: Result<TestConfig> = config_from_str( "TestConfig( name: \"x\" )");
    assert!( matches!( res, Err(ConfigError::RonError(_))));
}

#[test]
fn test_candidates() {
    // explicit paths are used as given
    let c = config_candidates( "odin_common", "/src/odin_common", "/etc/foo.ron");
    assert_eq!( c, vec![ PathBuf::from("/etc/foo.ron") ]);

    let c = config_candidates( "odin_common", "/src/odin_common", "foo.ron");
    assert_eq!( c.last(), Some( &PathBuf::from("/src/odin_common/configs/foo.ron")));
    assert!( c.contains( &PathBuf::from("configs/foo.ron")));

    let res: Result<TestConfig> = load_config_file( "odin_common", "/does/not/exist", "no-such-config.ron");
    assert!( matches!( res, Err(ConfigError::NotFound(_))));
}

#[test]
fn test_min_max_avg() {
    let mut mma = MinMaxAvg::new();
    assert_eq!( mma.mean(), None);
    for x in [0.2, 0.4, 0.6] { mma.add(x) }
    assert_eq!( mma.n, 3);
    assert_eq!( mma.min, 0.2);
    assert_eq!( mma.max, 0.6);
    assert!( (mma.mean().unwrap() - 0.4).abs() < 1e-12);
}
