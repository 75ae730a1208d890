use csv::StringRecord;

/// Header-keyed view of one CSV record.
///
/// Header names are matched case-insensitively after trimming. Lookups take
/// a list of aliases and return the first one whose cell is non-blank.
pub(crate) struct CsvRow<'a> {
    headers: &'a [String],
    record: &'a StringRecord,
}

impl<'a> CsvRow<'a> {
    /// `headers` must already be trimmed and lowercased.
    pub(crate) fn new(headers: &'a [String], record: &'a StringRecord) -> Self {
        Self { headers, record }
    }

    pub(crate) fn value(&self, keys: &[&str]) -> Option<&'a str> {
        keys.iter().find_map(|key| {
            let key = key.trim().to_ascii_lowercase();
            let idx = self.headers.iter().position(|h| *h == key)?;
            let cell = self.record.get(idx)?.trim();
            (!cell.is_empty()).then_some(cell)
        })
    }

    pub(crate) fn string(&self, keys: &[&str]) -> Option<String> {
        self.value(keys).map(str::to_string)
    }

    pub(crate) fn double(&self, keys: &[&str]) -> Option<f64> {
        self.value(keys)?.parse().ok()
    }

    pub(crate) fn int(&self, keys: &[&str]) -> Option<i32> {
        self.value(keys)?.parse().ok()
    }
}

/// Normalises raw header cells for [`CsvRow`].
pub(crate) fn normalize_headers(headers: &StringRecord) -> Vec<String> {
    headers
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_ascii_lowercase())
        .collect()
}
