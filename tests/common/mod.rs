use async_trait::async_trait;
use testcontainers::{core::WaitFor, GenericImage, RunnableImage};

use chatbot_server::gateway::{CompletionGateway, FragmentStream, GatewayError, Turn};
use chatbot_server::store::{PostgresStore, StoreConfig};

/// The PostgreSQL Docker image to use for testing
pub const POSTGRES_IMAGE: &str = "postgres";
pub const POSTGRES_TAG: &str = "16-alpine";

/// Default PostgreSQL port
pub const POSTGRES_PORT: u16 = 5432;

/// Default credentials for the test container
pub const POSTGRES_USER: &str = "postgres";
pub const POSTGRES_PASSWORD: &str = "chatbot_test_password";
pub const POSTGRES_DB: &str = "chatbot";

/// Create a runnable PostgreSQL container
pub fn create_postgres_container() -> RunnableImage<GenericImage> {
    let image = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
        .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
        .with_env_var("POSTGRES_DB", POSTGRES_DB)
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ));

    RunnableImage::from(image).with_tag(POSTGRES_TAG)
}

/// Build a connection string for the running container
pub fn build_connection_string(host: &str, port: u16) -> String {
    format!(
        "postgresql://{}:{}@{}:{}/{}",
        POSTGRES_USER, POSTGRES_PASSWORD, host, port, POSTGRES_DB
    )
}

/// Connect to the container, retrying while the server finishes its
/// first-boot initialization (the ready message fires once before the
/// init-phase restart)
pub async fn connect(host: &str, port: u16) -> PostgresStore {
    let config = StoreConfig::from_connection_string(&build_connection_string(host, port))
        .expect("valid connection string");

    for _ in 0..40 {
        match PostgresStore::new(config.clone()).await {
            Ok(store) => return store,
            Err(_) => tokio::time::sleep(std::time::Duration::from_millis(250)).await,
        }
    }

    panic!("could not connect to postgres container");
}

/// Deterministic gateway double yielding canned reply fragments
///
/// With `fail_after` set, the stream aborts after that many fragments.
pub struct CannedGateway {
    pub fragments: Vec<&'static str>,
    pub fail_after: Option<usize>,
}

impl CannedGateway {
    pub fn replying(fragments: Vec<&'static str>) -> Self {
        Self {
            fragments,
            fail_after: None,
        }
    }
}

#[async_trait]
impl CompletionGateway for CannedGateway {
    async fn complete(&self, _: &str, _: &[Turn]) -> Result<String, GatewayError> {
        Ok(self.fragments.concat())
    }

    async fn stream_complete(&self, _: &str, _: &[Turn]) -> Result<FragmentStream, GatewayError> {
        let mut items: Vec<Result<String, GatewayError>> = Vec::new();
        let keep = self.fail_after.unwrap_or(self.fragments.len());
        for fragment in self.fragments.iter().take(keep) {
            items.push(Ok(fragment.to_string()));
        }
        if self.fail_after.is_some() {
            items.push(Err(GatewayError::Stream(
                "connection reset mid-stream".to_string(),
            )));
        }

        Ok(Box::pin(futures::stream::iter(items)))
    }
}
