use super::Db;
use crate::{Error, Result};

use url::Url;

/// Connects to the database named by `url`.
///
/// Only PostgreSQL is built in, behind the `postgresql` feature.
pub async fn connect(url: &str) -> Result<Db> {
    let url = Url::parse(url).map_err(|err| Error::invalid_connection_url(err.to_string()))?;

    match url.scheme() {
        "postgresql" | "postgres" => connect_postgresql(&url).await,
        scheme => Err(Error::invalid_connection_url(format!(
            "unsupported database; scheme={scheme}; url={url}"
        ))),
    }
}

#[cfg(feature = "postgresql")]
async fn connect_postgresql(url: &Url) -> Result<Db> {
    let driver = quarry_driver_postgresql::PostgreSQL::connect(url.as_str()).await?;
    Ok(Db::new(driver))
}

#[cfg(not(feature = "postgresql"))]
async fn connect_postgresql(_url: &Url) -> Result<Db> {
    Err(crate::err!("`postgresql` feature not enabled"))
}
