pub fn default_log_format() -> String {
    "pretty".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_metrics_port() -> u16 {
    9464
}

pub fn default_annotate() -> bool {
    true
}

/// Delays above this are reported as a warning
pub fn long_delay_threshold_ms() -> u64 {
    60_000
}
