use crate::core::config::MongoConfig;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

/// Create the MongoDB client. The client holds a connection pool and is
/// cheap to clone; it is created once at startup and shut down on exit.
pub async fn create_client(config: &MongoConfig) -> Result<Client, mongodb::error::Error> {
    let mut options = ClientOptions::parse(&config.url).await?;
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(config.connect_timeout());
    options.server_selection_timeout = Some(config.server_selection_timeout());

    Client::with_options(options)
}

pub fn database(client: &Client, config: &MongoConfig) -> Database {
    client.database(&config.database)
}
