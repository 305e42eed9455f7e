pub struct TableConfig {
    /// Name of the stop table inside a zip archive.
    pub file_name: String,
    /// Field delimiter of the csv file.
    pub delimiter: u8,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            file_name: "stop_level.csv".into(),
            delimiter: b',',
        }
    }
}
