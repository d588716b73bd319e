use std::{env, net::SocketAddr, path::PathBuf};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub host: [u8; 4],
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let data_dir = env::var("APP_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let host = match env::var("HOST") {
            Ok(value) => parse_host(&value).unwrap_or_else(|| {
                warn!("ignoring invalid HOST {value:?}");
                [0, 0, 0, 0]
            }),
            Err(_) => [0, 0, 0, 0],
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);

        Self {
            data_dir,
            host,
            port,
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

fn parse_host(value: &str) -> Option<[u8; 4]> {
    value
        .parse::<std::net::Ipv4Addr>()
        .ok()
        .map(|addr| addr.octets())
}
