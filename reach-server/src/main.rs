use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use reach_server::cache::{CacheConfig, SearchCache};
use reach_server::cost::CostModel;
use reach_server::dataset::{self, DatasetError};
use reach_server::geo::GeoLookup;
use reach_server::planner::SearchConfig;
use reach_server::schedule::ScheduleIndex;
use reach_server::web::{AppState, create_router};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
struct ServerConfig {
    schedule_csv: PathBuf,
    geo_csv: PathBuf,
    bind_addr: SocketAddr,
    min_connection_mins: Option<i64>,
    cache_ttl: Duration,
}

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("environment variable {var} has invalid value {value:?}")]
    InvalidVar { var: &'static str, value: String },

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("failed to serve: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerConfig {
    fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StartupError> {
        let required = |var: &'static str| lookup(var).ok_or(StartupError::MissingVar(var));
        let parse_int = |var: &'static str, value: String| {
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| StartupError::InvalidVar { var, value })
        };

        let bind_addr = lookup("REACH_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let min_connection_mins = lookup("REACH_MIN_CONNECTION_MINS")
            .map(|v| parse_int("REACH_MIN_CONNECTION_MINS", v))
            .transpose()?;
        let cache_ttl_secs = lookup("REACH_CACHE_TTL_SECS")
            .map(|v| parse_int("REACH_CACHE_TTL_SECS", v))
            .transpose()?
            .unwrap_or(DEFAULT_CACHE_TTL_SECS as i64);
        if cache_ttl_secs < 0 {
            return Err(StartupError::InvalidVar {
                var: "REACH_CACHE_TTL_SECS",
                value: cache_ttl_secs.to_string(),
            });
        }

        Ok(Self {
            schedule_csv: required("REACH_SCHEDULE_CSV")?.into(),
            geo_csv: required("REACH_GEO_CSV")?.into(),
            bind_addr: bind_addr
                .parse()
                .map_err(|_| StartupError::InvalidVar {
                    var: "REACH_BIND_ADDR",
                    value: bind_addr.clone(),
                })?,
            min_connection_mins,
            cache_ttl: Duration::from_secs(cache_ttl_secs as u64),
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let server = ServerConfig::from_env()?;

    let records = dataset::load_schedule(&server.schedule_csv)?;
    let index = ScheduleIndex::build(&records);
    info!(
        visits = index.visit_count(),
        trips = index.trip_count(),
        cells = index.cell_count(),
        skipped = index.skipped(),
        "Schedule indexed"
    );

    let geo = GeoLookup::from_rows(&dataset::load_geo(&server.geo_csv)?);
    info!(
        cells = geo.len(),
        rejected = geo.rejected(),
        "Coordinates indexed"
    );

    let mut search_config = SearchConfig::default();
    if let Some(mins) = server.min_connection_mins {
        search_config.min_connection_mins = mins;
    }

    let cache_config = CacheConfig {
        ttl: server.cache_ttl,
        ..CacheConfig::default()
    };

    let state = AppState::new(
        index,
        geo,
        CostModel::default(),
        search_config,
        SearchCache::new(&cache_config),
    );
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(server.bind_addr).await?;
    info!(addr = %server.bind_addr, "Reachability server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, StartupError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[
            ("REACH_SCHEDULE_CSV", "schedule.csv"),
            ("REACH_GEO_CSV", "geo.csv"),
        ])
        .unwrap();

        assert_eq!(config.schedule_csv, PathBuf::from("schedule.csv"));
        assert_eq!(config.geo_csv, PathBuf::from("geo.csv"));
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.min_connection_mins, None);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("REACH_SCHEDULE_CSV", "s.csv"),
            ("REACH_GEO_CSV", "g.csv"),
            ("REACH_BIND_ADDR", "0.0.0.0:8080"),
            ("REACH_MIN_CONNECTION_MINS", "15"),
            ("REACH_CACHE_TTL_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.min_connection_mins, Some(15));
        assert_eq!(config.cache_ttl, Duration::from_secs(5));
    }

    #[test]
    fn missing_paths() {
        let err = config_from(&[("REACH_GEO_CSV", "g.csv")]).unwrap_err();
        assert!(matches!(err, StartupError::MissingVar("REACH_SCHEDULE_CSV")));
    }

    #[test]
    fn invalid_values() {
        let base = [("REACH_SCHEDULE_CSV", "s.csv"), ("REACH_GEO_CSV", "g.csv")];

        let mut vars = base.to_vec();
        vars.push(("REACH_BIND_ADDR", "localhost"));
        assert!(matches!(
            config_from(&vars),
            Err(StartupError::InvalidVar { var: "REACH_BIND_ADDR", .. })
        ));

        let mut vars = base.to_vec();
        vars.push(("REACH_MIN_CONNECTION_MINS", "half an hour"));
        assert!(matches!(
            config_from(&vars),
            Err(StartupError::InvalidVar { var: "REACH_MIN_CONNECTION_MINS", .. })
        ));

        let mut vars = base.to_vec();
        vars.push(("REACH_CACHE_TTL_SECS", "-1"));
        assert!(config_from(&vars).is_err());
    }
}
