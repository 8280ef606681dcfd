use actix_web::HttpRequest;

/// Same-origin check over the Origin/Host headers. A request without an
/// Origin header is allowed: browsers omit it on same-origin GETs and
/// non-browser clients never send it. A malformed Origin fails closed.
pub fn validate_origin(request: &HttpRequest) -> bool {
    let origin = match request.headers().get("Origin") {
        Some(origin) => origin,
        None => return true,
    };

    let origin = match origin.to_str() {
        Ok(origin) => origin,
        Err(_) => return false,
    };
    let host = match request
        .headers()
        .get("Host")
        .and_then(|host| host.to_str().ok())
    {
        Some(host) => host,
        None => return false,
    };

    match origin_host(origin) {
        Some(origin_host) => origin_host == host,
        None => false,
    }
}

/// Extracts the host[:port] component of an Origin header value. Origins
/// carry no path, so anything past the scheme that still contains a slash
/// is malformed.
fn origin_host(origin: &str) -> Option<&str> {
    let host = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))?;

    if host.is_empty() || host.contains('/') {
        return None;
    }

    Some(host)
}

/// Client address used for rate-limit keys and the location stub. Honors
/// X-Forwarded-For via actix's connection info; a direct peer address has
/// its port stripped.
pub fn client_ip(request: &HttpRequest) -> String {
    let connection_info = request.connection_info();

    match connection_info.realip_remote_addr() {
        Some(addr) => strip_port(addr).to_string(),
        None => String::from("unknown"),
    }
}

/// Peer addresses arrive as "1.2.3.4:5678" or "[::1]:8080"; forwarded
/// headers usually carry a bare IP. A bare IPv6 address is full of colons
/// and has to be kept whole.
fn strip_port(addr: &str) -> &str {
    if let Some(bracketed) = addr.strip_prefix('[') {
        if let Some((ip, _rest)) = bracketed.split_once(']') {
            return ip;
        }
    }

    match addr.rsplit_once(':') {
        Some((ip, _port)) if ip.contains('.') => ip,
        _ => addr,
    }
}
