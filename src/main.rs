use agrocast::config::AgroCastConfig;
use agrocast::models::{Location, WeatherSnapshot};
use agrocast::weather::{ForecastProvider, OpenMeteoClient};
use agrocast::{cache, report};
use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

struct CliArgs {
    location: Option<String>,
    crop: Option<String>,
}

fn parse_args() -> Result<CliArgs> {
    let mut location = None;
    let mut crop = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--crop" => {
                crop = Some(args.next().ok_or_else(|| anyhow!("--crop needs a value"))?);
            }
            "--help" | "-h" => {
                println!("agrocast [LOCATION] [--crop CROP_ID]");
                println!();
                println!("Weather-driven farm advisory. Without LOCATION the configured");
                println!("default coordinates are used. Crop ids: wheat, rice, cotton, ...");
                std::process::exit(0);
            }
            _ if location.is_none() => location = Some(arg),
            _ => return Err(anyhow!("Unexpected argument: {arg}")),
        }
    }

    Ok(CliArgs { location, crop })
}

async fn resolve_location(client: &OpenMeteoClient, config: &AgroCastConfig, name: Option<&str>) -> Result<Location> {
    match name {
        Some(name) => {
            let results = client.geocode(name).await?;
            results
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("Location not found: {name}"))
        }
        None => {
            // Same behaviour as the old dashboard when geolocation was
            // unavailable: fall back to the configured coordinates and let
            // reverse geocoding fill in a display name.
            let lat = config.defaults.latitude;
            let lon = config.defaults.longitude;
            let place = client.reverse_geocode(lat, lon).await;
            let mut location = Location::new(lat, lon, place.city);
            location.area = place.area;
            if !place.country.is_empty() {
                location.country = Some(place.country);
            }
            Ok(location)
        }
    }
}

async fn load_snapshot(
    client: &OpenMeteoClient,
    config: &AgroCastConfig,
    location: &Location,
) -> Result<WeatherSnapshot> {
    let key = location.cache_key();
    if let Some(cached) = cache::get::<WeatherSnapshot>(&key).await? {
        if cached.is_fresh(config.cache.ttl_hours) {
            tracing::debug!("Using cached snapshot for {}", location.name);
            return Ok(cached);
        }
    }

    let snapshot = client.fetch_snapshot(location).await?;
    cache::put(&key, snapshot.clone(), cache::jittered_ttl(config.cache.ttl_hours)).await?;
    Ok(snapshot)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AgroCastConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let args = parse_args()?;

    cache::init(&config.cache.location)
        .with_context(|| format!("Failed to open cache database at {}", config.cache.location))?;

    let client = OpenMeteoClient::new(config.weather.clone())?;
    let location = resolve_location(&client, &config, args.location.as_deref()).await?;
    tracing::info!(
        "Advisory for {} ({})",
        location.name,
        location.format_coordinates()
    );

    let snapshot = load_snapshot(&client, &config, &location).await?;

    let crop = args.crop.or_else(|| config.defaults.crop.clone());
    print!("{}", report::render(&snapshot, crop.as_deref()));

    Ok(())
}
