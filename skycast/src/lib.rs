//! Skycast - terminal weather app
//!
//! The flow follows the selection reconciler in `skycast-core`:
//! 1. Key press -> component -> `Action`
//! 2. Action dispatched to the store, reducer returns effects
//! 3. Effects spawned as keyed tasks calling the service clients
//! 4. Task results come back as tagged actions
//! 5. Redraw when the selection changed

pub mod api;
pub mod config;
pub mod effects;
pub mod logging;
pub mod runtime;
pub mod tasks;
pub mod ui;

use std::cell::RefCell;

use ratatui::{backend::Backend, Terminal};
use skycast_core::{Action, AssetCatalog, Selection};

use crate::api::{ApiError, CitySearchClient, Geolocator, OpenWeatherClient};
use crate::config::Config;
use crate::effects::EffectHandler;
use crate::runtime::Runtime;
use crate::ui::SkycastUi;

/// Build the service clients described by the config.
pub fn effect_handler(config: &Config) -> Result<EffectHandler, ApiError> {
    let weather = OpenWeatherClient::new(
        &config.weather_url,
        config.api_key.clone(),
        config.units,
    )?;
    let search = CitySearchClient::new(&config.geocoding_url)?;
    let geolocator = match config.fixed_position {
        Some(coordinates) => Geolocator::fixed(coordinates),
        None => Geolocator::ip_api(&config.geolocation_url)?,
    };
    Ok(EffectHandler::new(weather, search, geolocator))
}

/// Run the app on an already prepared terminal until the user quits.
pub async fn run_app<B: Backend>(terminal: &mut Terminal<B>, config: Config) -> anyhow::Result<()> {
    let handler = effect_handler(&config)?;
    let selection = Selection::new(
        config.placeholder_city.clone(),
        config.fixed_position.unwrap_or_default(),
    );

    let mut runtime = Runtime::new(selection);
    runtime.enqueue(Action::Bootstrap);

    let ui = RefCell::new(SkycastUi::new(
        AssetCatalog::new(config.assets_dir.clone()),
        config.units,
    ));

    runtime
        .run(
            terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| ui.borrow_mut().map_event(event, state),
            |effect, tasks| handler.handle(effect, tasks),
        )
        .await?;

    Ok(())
}
