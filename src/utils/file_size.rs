/// Human-readable byte counts for the selection label and size-limit errors.
pub struct FileSizeUtils;

impl FileSizeUtils {
    pub fn format_size(bytes: u64) -> String {
        const STEPS: [(u64, &str); 3] = [(1 << 30, "GB"), (1 << 20, "MB"), (1 << 10, "KB")];

        STEPS
            .iter()
            .find(|(scale, _)| bytes >= *scale)
            .map(|(scale, unit)| format!("{:.2} {}", bytes as f64 / *scale as f64, unit))
            .unwrap_or_else(|| format!("{} B", bytes))
    }
}
