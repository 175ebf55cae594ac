use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tracing::error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

pub fn get_host_uri() -> String {
    host_uri_from(env::var("HOST").ok(), get_port())
}

pub fn get_port() -> u16 {
    parse_port(env::var("PORT").ok())
}

pub fn get_bind_addr() -> IpAddr {
    parse_bind_addr(env::var("BIND_ADDR").ok())
}

pub fn get_socket_addr() -> SocketAddr {
    SocketAddr::new(get_bind_addr(), get_port())
}

fn host_uri_from(host: Option<String>, port: u16) -> String {
    match host {
        Some(host) => format!("https://{host}"),
        None => format!("http://localhost:{port}"),
    }
}

fn parse_port(port: Option<String>) -> u16 {
    let Some(port) = port else {
        return DEFAULT_PORT;
    };

    match port.parse::<u16>() {
        Ok(port) => port,
        _ => {
            error!("Failed to parse PORT env var, using default");
            DEFAULT_PORT
        }
    }
}

fn parse_bind_addr(addr: Option<String>) -> IpAddr {
    let Some(addr) = addr else {
        return DEFAULT_BIND_ADDR;
    };

    match addr.parse::<IpAddr>() {
        Ok(addr) => addr,
        _ => {
            error!("Failed to parse BIND_ADDR env var, using default");
            DEFAULT_BIND_ADDR
        }
    }
}
