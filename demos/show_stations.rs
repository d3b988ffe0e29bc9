use airmap::{AirMapConfig, AirMapError, AirQualityController, MemoryMap};

#[tokio::main]
async fn main() -> Result<(), AirMapError> {
    env_logger::init();

    let config = AirMapConfig::from_env()?;
    println!("Loading stations of {} from {}", config.city, config.base_url);

    let mut controller = AirQualityController::new(config, MemoryMap::new())?;
    let loaded = controller.init().await;
    println!("{} stations loaded", loaded);

    let placed = controller.set_enabled(true).await;
    println!("{} markers placed", placed);

    for marker in controller.map().markers() {
        println!(
            "{} ({}) at {:.4}, {:.4}: {} entries at {}",
            marker.station_id,
            marker.lookup_id,
            marker.position.0,
            marker.position.1,
            marker.reading.entries.len(),
            marker.reading.timestamp
        );
    }

    let first = controller.map().markers().next().map(|m| m.station_id.clone());
    if let Some(station_id) = first {
        controller.click_marker(&station_id);
        println!("\nPanel:\n{}", controller.panel().html());
    }

    println!(
        "\nGeoJSON:\n{:#}",
        controller.map().to_geojson()
    );

    controller.set_enabled(false).await;
    Ok(())
}
