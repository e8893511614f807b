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

use std::{path::Path, sync::Arc};
use tracing_subscriber::EnvFilter;

use odin_common::{define_cli, datetime::fmt_date, geo::GeoPoint};
use odin_openmeteo::{OpenMeteoClient, OpenMeteoConfig};
use odin_cropwatch::{
    load_config, render::save_png, sentinelhub::{SentinelHubArchive, SentinelHubConfig},
    CropwatchConfig, CropwatchPipeline, Panel, VegetationIndex
};

define_cli! { ARGS [about="compute a vegetation index overlay, season history and current weather for a point"] =
    config: String [help="filename of cropwatch config", short, long, default_value="cropwatch.ron"],
    sh_config: String [help="filename of Sentinel Hub config", long, default_value="sentinelhub.ron"],
    wx_config: String [help="filename of Open-Meteo config", long, default_value="openmeteo.ron"],
    index: Option<String> [help="index to show (NDVI, NDWI, NDRE, CHL)", short, long],
    output_dir: String [help="directory to store overlay PNG and series CSV", short, long, default_value="."],
    lat: Option<f64> [help="latitude in degrees (default from config)", allow_negative_numbers=true],
    lon: Option<f64> [help="longitude in degrees (default from config)", allow_negative_numbers=true]
}

#[tokio::main]
async fn main ()->anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).init();

    let conf: CropwatchConfig = load_config( &ARGS.config)?;
    let sh_conf: SentinelHubConfig = load_config::<SentinelHubConfig>( &ARGS.sh_config)?.with_env_credentials();
    let wx_conf: OpenMeteoConfig = odin_openmeteo::load_config( &ARGS.wx_config)?;

    let index: VegetationIndex = match &ARGS.index {
        Some(name) => name.parse()?,
        None => conf.index
    };
    let point = match (ARGS.lat, ARGS.lon) {
        (Some(lat), Some(lon)) => GeoPoint::from_lon_lat_degrees( lon, lat),
        _ => conf.point
    };

    let archive = Arc::new( SentinelHubArchive::new( sh_conf)?);
    let weather = Arc::new( OpenMeteoClient::new( wx_conf)?);
    let pipeline = CropwatchPipeline::new( conf, archive, weather);

    let view = pipeline.dashboard( &point, index).await;
    let out_dir = Path::new( &ARGS.output_dir);

    println!("{}\n", view.caption);

    println!("-- {}", index.label());
    match &view.map {
        Panel::Ready(layer) => {
            let path = out_dir.join( format!("{}_{}.png", index.acronym().to_lowercase(), fmt_date( &layer.scene.date())));
            save_png( &layer.png, &path)?;
            let stats = layer.band.stats();
            println!("scene:  {}", layer.scene);
            println!("bounds: {}", layer.bounds());
            println!("range:  {:.3} .. {:.3}, mean {:.3} ({} pixels)", stats.min, stats.max, stats.avg, stats.n);
            println!("image:  {}", path.display());
        }
        Panel::Empty(msg) => println!("{msg}"),
        Panel::Failed{kind,message} => println!("map not available ({kind}): {message}"),
    }

    println!("\n-- {} history", view.series.ready().map( |s| s.index.label()).unwrap_or( pipeline.config().series.index.label()));
    match &view.series {
        Panel::Ready(series) => {
            let path = out_dir.join( format!("{}_series.csv", series.index.acronym().to_lowercase()));
            series.write_csv( std::fs::File::create( &path)?)?;
            for p in series.iter() {
                println!("{}  {:.3}", fmt_date( &p.date), p.value);
            }
            println!("series: {}", path.display());
        }
        Panel::Empty(msg) => println!("{msg}"),
        Panel::Failed{kind,message} => println!("history not available ({kind}): {message}"),
    }

    println!("\n-- weather");
    match &view.weather {
        Panel::Ready(panel) => print!("{panel}"),
        Panel::Empty(msg) | Panel::Failed{message: msg, ..} => println!("{msg}"),
    }

    Ok(())
}
