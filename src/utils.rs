pub fn duration_to_ms_string(duration: std::time::Duration) -> String {
    let milliseconds = duration.as_secs_f64() * 1000.0;
    format!("{milliseconds:.2}ms")
}
