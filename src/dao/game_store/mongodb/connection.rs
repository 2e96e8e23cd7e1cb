use std::time::Duration;

use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use tokio::time::sleep;
use tracing::debug;

use super::error::{MongoDaoError, MongoResult};

/// Bounded exponential backoff applied while waiting for the first ping to succeed.
struct PingBackoff {
    attempts: u32,
    delay: Duration,
}

impl PingBackoff {
    const MAX_ATTEMPTS: u32 = 10;
    const INITIAL_DELAY: Duration = Duration::from_millis(250);
    const MAX_DELAY: Duration = Duration::from_secs(5);

    fn new() -> Self {
        Self {
            attempts: 0,
            delay: Self::INITIAL_DELAY,
        }
    }

    /// Record a failed attempt; `None` once the attempt budget is spent.
    fn next_delay(&mut self) -> Option<Duration> {
        self.attempts += 1;
        if self.attempts >= Self::MAX_ATTEMPTS {
            return None;
        }
        let current = self.delay;
        self.delay = (self.delay * 2).min(Self::MAX_DELAY);
        Some(current)
    }
}

/// Build a client and wait until the database answers a ping.
pub async fn establish_connection(
    options: &ClientOptions,
    database_name: &str,
) -> MongoResult<Database> {
    let client = Client::with_options(options.clone())
        .map_err(|source| MongoDaoError::ClientConstruction { source })?;
    let database = client.database(database_name);

    let mut backoff = PingBackoff::new();
    loop {
        match database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => break,
            Err(source) => match backoff.next_delay() {
                Some(delay) => {
                    debug!(
                        attempt = backoff.attempts,
                        error = %source,
                        "MongoDB not reachable yet; retrying"
                    );
                    sleep(delay).await;
                }
                None => {
                    return Err(MongoDaoError::InitialPing {
                        attempts: backoff.attempts,
                        source,
                    });
                }
            },
        }
    }

    Ok(database)
}
