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

/* #region define_cli *********************************************************************************************/

/// syntactic sugar macro to define a global (lazy static) clap command line argument struct, to be used
/// at the top of binaries like:
/// ```ignore
/// define_cli! { ARGS [about="show current weather"] =
///     config: String [help="filename of config file", short, long, default_value="openmeteo.ron"],
///     lat: f64 [help="latitude in degrees", allow_negative_numbers=true],
///     lon: f64 [help="longitude in degrees", allow_negative_numbers=true]
/// }
/// ...
/// let conf: MyConfig = load_config( &ARGS.config)?;
/// ```
/// The using crate needs `clap` and `lazy_static` dependencies.
#[macro_export]
macro_rules! define_cli {
    ($name:ident [ $( $sopt:ident $(= $sx:expr)? ),* ] = $( $( #[$meta:meta] )? $fname:ident : $ftype:ty [ $( $fopt:ident $(= $fx:expr)?),* ] ),* ) => {
        #[derive(clap::Parser,Debug)]
        #[command( $( $sopt $(=$sx)? ),* )]
        struct CliOpts {
            $(
                #[arg( $( $fopt $(=$fx)? ),* )]
                $(#[$meta])?
                $fname : $ftype,
            )*
        }
        lazy_static::lazy_static! { static ref $name: CliOpts = <CliOpts as clap::Parser>::parse(); }
    }
}

/* #endregion define_cli */

/// syntactic sugar macro to define thiserror Error enums:
/// ```ignore
/// define_error!{ pub OdinNetError =
///   IOError( #[from] std::io::Error ) : "IO error: {0}",
///   OpFailed(String) : "operation failed: {0}"
/// }
/// ```
/// will get expanded into
/// ```ignore
/// #[derive(thiserror::Error,Debug)]
/// pub enum OdinNetError {
///     #[error("IO error: {0}")]
///     IOError(#[from] std::io::Error),
///
///     #[error("operation failed: {0}")]
///     OpFailed(String),
/// }
/// ```
#[macro_export]
macro_rules! define_error {
    ($vis:vis $name:ident = $( $err_variant:ident ( $( $( #[$meta:meta] )? $field_type:ty),* ) : $msg_lit:literal ),* $(,)?) => {
        #[derive(thiserror::Error,Debug)]
        $vis enum $name {
            $(
                #[error($msg_lit)]
                $err_variant ( $( $(#[$meta])? $field_type ),*  )
            ),*
        }
    }
}

/// expand into a crate level `load_config(filename)` function that looks up and deserializes RON config
/// files of the calling crate. Put this at the top of lib.rs:
/// ```ignore
/// odin_common::define_load_config!{}
/// ...
/// let conf: OpenMeteoConfig = load_config("openmeteo.ron")?;
/// ```
/// See [`crate::config::find_config_file`] for the lookup order.
#[macro_export]
macro_rules! define_load_config {
    () => {
        /// load a RON config file of this crate
        pub fn load_config<C> (filename: &str) -> odin_common::config::Result<C> where C: serde::de::DeserializeOwned {
            odin_common::config::load_config_file( env!("CARGO_PKG_NAME"), env!("CARGO_MANIFEST_DIR"), filename)
        }
    }
}
