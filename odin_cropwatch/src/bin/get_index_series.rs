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

use tracing_subscriber::EnvFilter;

use odin_common::{define_cli, geo::GeoPoint};
use odin_cropwatch::{
    compute_series, load_config, sentinelhub::{SentinelHubArchive, SentinelHubConfig}, CropwatchConfig, VegetationIndex
};

define_cli! { ARGS [about="print the index history of a point as CSV (or JSON)"] =
    config: String [help="filename of cropwatch config", short, long, default_value="cropwatch.ron"],
    sh_config: String [help="filename of Sentinel Hub config", long, default_value="sentinelhub.ron"],
    index: Option<String> [help="index (NDVI, NDWI, NDRE, CHL), default from config", short, long],
    max_cloud: Option<f64> [help="max cloud cover percentage, default from config", long],
    json: bool [help="print JSON instead of CSV", long],
    lat: f64 [help="latitude in degrees", allow_negative_numbers=true],
    lon: f64 [help="longitude in degrees", allow_negative_numbers=true]
}

#[tokio::main]
async fn main ()->anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).with_writer( std::io::stderr).init();

    let conf: CropwatchConfig = load_config( &ARGS.config)?;
    let sh_conf: SentinelHubConfig = load_config::<SentinelHubConfig>( &ARGS.sh_config)?.with_env_credentials();

    let mut series_conf = conf.series.clone();
    if let Some(name) = &ARGS.index { series_conf.index = name.parse::<VegetationIndex>()? }
    if let Some(max_cloud) = ARGS.max_cloud { series_conf.max_cloud_cover = max_cloud }

    let archive = SentinelHubArchive::new( sh_conf)?;
    let point = GeoPoint::from_lon_lat_degrees( ARGS.lon, ARGS.lat);
    let series = compute_series( &archive, &point, &series_conf, &conf.collection).await?;

    if ARGS.json {
        println!("{}", series.to_json()?);
    } else {
        print!("{}", series.to_csv()?);
    }

    Ok(())
}
