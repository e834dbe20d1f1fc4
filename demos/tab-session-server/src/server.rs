use std::{
    net::{SocketAddr, ToSocketAddrs},
    sync::Arc,
};

use crate::{
    error::{ServerResult, TabSessionServerError},
    routes::app_routes,
};
use axum::Router;
use tab_id::{
    server::{InMemorySessionStore, SessionStore},
    ExtractOptions, DEFAULT_ID_SEARCH_PARAM_KEY,
};

/// Application state shared by every route
#[derive(Clone)]
pub struct AppState {
    pub session_store: Arc<dyn SessionStore>,
    pub extract_options: Arc<ExtractOptions>,
}

/// Configuration struct for the demo server
pub struct ServerOptions {
    /// Hostname or IP address the server will bind to (default: "127.0.0.1")
    pub host: String,
    /// Port the server will listen on (default: 8080)
    pub port: u16,
    /// Query-string key carrying the tab id (default: "tid")
    pub param_key: String,
}

impl ServerOptions {
    pub fn validate(&self) -> ServerResult<()> {
        if self.param_key.is_empty() {
            return Err(TabSessionServerError::InvalidServerOptions(
                "'param_key' must not be empty.".into(),
            ));
        }
        Ok(())
    }

    /// Resolves the server address from host and port
    ///
    /// Strips an http:// or https:// scheme prefix from the host.
    pub fn resolve_server_address(&self) -> ServerResult<SocketAddr> {
        self.validate()?;

        let host = self
            .host
            .strip_prefix("http://")
            .or_else(|| self.host.strip_prefix("https://"))
            .unwrap_or(&self.host)
            .to_string();

        let mut iter = (host, self.port)
            .to_socket_addrs()
            .map_err(|err| TabSessionServerError::ServerStartError(err.to_string()))?;
        match iter.next() {
            Some(addr) => Ok(addr),
            None => Ok(format!("{}:{}", self.host, self.port).parse()?),
        }
    }
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            param_key: DEFAULT_ID_SEARCH_PARAM_KEY.to_string(),
        }
    }
}

/// Axum server keeping one session per browser tab
pub struct TabSessionServer {
    app: Router,
    options: ServerOptions,
}

impl TabSessionServer {
    /// Creates a server backed by an [`InMemorySessionStore`]
    pub fn new(options: ServerOptions) -> Self {
        Self::with_session_store(options, Arc::new(InMemorySessionStore::new()))
    }

    pub fn with_session_store(options: ServerOptions, session_store: Arc<dyn SessionStore>) -> Self {
        let state = Arc::new(AppState {
            session_store,
            extract_options: Arc::new(ExtractOptions::new(options.param_key.clone())),
        });
        let app = app_routes(state);
        Self { app, options }
    }

    pub fn server_info(&self, addr: SocketAddr) -> String {
        format!(
            "Server is available at http://{}/?{}=<tab id>",
            addr, self.options.param_key
        )
    }

    pub async fn start(self) -> ServerResult<()> {
        let addr = self.options.resolve_server_address()?;
        tracing::info!("{}", self.server_info(addr));

        axum_server::bind(addr)
            .serve(self.app.into_make_service())
            .await
            .map_err(|err| TabSessionServerError::ServerStartError(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_default_address() {
        let addr = ServerOptions::default().resolve_server_address().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn strips_scheme() {
        let options = ServerOptions {
            host: "http://127.0.0.1".into(),
            port: 3000,
            ..Default::default()
        };
        assert_eq!(options.resolve_server_address().unwrap().port(), 3000);
    }

    #[test]
    fn rejects_empty_param_key() {
        let options = ServerOptions {
            param_key: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(TabSessionServerError::InvalidServerOptions(_))
        ));
    }
}
