pub fn default_service_name() -> String {
    "surfsup".to_string()
}

pub fn default_host() -> String {
    "127.0.0.1".to_string()
}

pub fn default_http_port() -> u16 {
    5000
}

pub fn default_database_url() -> String {
    "sqlite://hawaii.sqlite".to_string()
}

pub fn default_max_connections() -> u32 {
    5
}

pub fn default_log_format() -> String {
    "pretty".to_string()
}

pub fn default_metrics_port() -> u16 {
    9090
}
