use fluidinfo::{ClientConfig, FluidinfoClient, Instance, Session, SessionConfig};

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Session config for a mock server, signed in as `username`/`password`.
pub fn session_config(uri: &str) -> SessionConfig {
    SessionConfig::builder()
        .instance(Instance::custom(format!("{}/", uri)).expect("mock server URL is valid"))
        .basic_auth("username", "password")
        .build()
}

pub fn client_config() -> ClientConfig {
    ClientConfig::builder().with_tracing(true).build()
}

pub fn session(uri: &str) -> Session {
    Session::with_client_config(session_config(uri), client_config())
        .expect("session should build")
}

pub fn values_client(uri: &str) -> FluidinfoClient {
    FluidinfoClient::with_config(session_config(uri), client_config())
        .expect("client should build")
}
