pub mod archive_client;
pub mod error;
pub mod forecast_client;
pub mod geocoding_client;

#[cfg(test)]
pub(crate) mod test_server;
