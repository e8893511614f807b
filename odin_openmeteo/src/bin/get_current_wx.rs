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

use tracing::warn;
use tracing_subscriber::EnvFilter;
use odin_common::{define_cli, geo::GeoPoint};
use odin_openmeteo::{coordinates_caption, load_config, OpenMeteoClient, OpenMeteoConfig, WeatherPanel, WeatherProvider, WEATHER_LOADING};

define_cli! { ARGS [about="show current weather for a point (Open-Meteo)"] =
    config: String [help="filename of Open-Meteo config file", short, long, default_value="openmeteo.ron"],
    lat: f64 [help="latitude in degrees", allow_negative_numbers=true],
    lon: f64 [help="longitude in degrees", allow_negative_numbers=true]
}

#[tokio::main]
async fn main ()->anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).init();

    let conf: OpenMeteoConfig = load_config( &ARGS.config)?;
    let client = OpenMeteoClient::new( conf)?;
    let pos = GeoPoint::from_lon_lat_degrees( ARGS.lon, ARGS.lat);

    println!("{}", coordinates_caption( &pos));
    match client.current_weather( &pos).await {
        Ok(wx) => print!("{}", WeatherPanel::new( &wx)),
        Err(e) => {
            warn!("no current weather for {pos}: {e}");
            println!("{WEATHER_LOADING}")
        }
    }

    Ok(())
}
