use tokio::net::TcpListener;

use tinywiki::logger::Logger;
use tinywiki::{app, AppState, Config, PageStore, TemplateComponent, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if let Err(e) = Logger::init() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = Config::from_env();
    log::debug!("Configuration: {:?}", config);

    let store = PageStore::open(config.data_dir.clone())?;
    log::info!("Serving pages from {:?}", store.data_dir());
    let renderer = TemplateComponent::load(&config.template_dir);
    let state = AppState::new(store, renderer, config.static_dir.clone());

    let addr = config.socket_addr();
    log::info!("Wiki listening on http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app(state, config.max_body_bytes))
        .await
        .map_err(WikiError::from)?;
    log::info!("Server shutdown");
    Ok(())
}
