use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tutor_booking::{
    configuration::Configuration, configuration_handler::ConfigurationHandler,
    follow_list::FollowListAccess, follow_lookup::FollowListLookup, http::create_app,
    local_follow_directory::LocalFollowDirectory, local_slots::LocalSlots,
    remote_follow_directory::RemoteFollowDirectory,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tutor_booking=info")),
        )
        .init();

    let configuration = ConfigurationHandler::parse_arguments();

    let follow_access: Arc<dyn FollowListAccess> = match configuration.follow_directory_url() {
        Some(url) => {
            info!(%url, "Using remote follow directory");
            Arc::new(RemoteFollowDirectory::new(
                url,
                configuration.follow_directory_token(),
            ))
        }
        None => {
            warn!("No follow directory configured. Serving example students from memory");
            let directory = LocalFollowDirectory::default();
            directory.insert_example_students();
            Arc::new(directory)
        }
    };
    let follow_lookup = FollowListLookup::new(follow_access, configuration.lookup_timeout());

    let slots = LocalSlots::default();
    slots.insert_example_slots();

    let address = format!("0.0.0.0:{}", configuration.port());
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(?err, "Failed to bind {address}");
            return;
        }
    };
    info!("Accessible at {address}");

    let app = create_app(slots, follow_lookup, configuration);
    if let Err(err) = axum::serve(listener, app).await {
        error!(?err, "Server stopped");
    }
}
