use galaxy_bg::{GalaxyConfig, Viewer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {}", path);
            GalaxyConfig::load(&path)?
        }
        None => GalaxyConfig::default(),
    };

    Viewer::new()
        .with_config(config)
        .with_title("Galaxy Background")
        .run()?;
    Ok(())
}
